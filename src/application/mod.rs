pub mod use_cases;

pub use use_cases::csv_transfer::CsvTransferUseCase;
pub use use_cases::esg_lookup::EsgLookupUseCase;
pub use use_cases::pdf_transfer::PdfTransferUseCase;
pub use use_cases::query::QueryUseCase;
