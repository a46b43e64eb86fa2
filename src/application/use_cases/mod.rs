pub mod csv_transfer;
pub mod esg_lookup;
pub mod pdf_transfer;
pub mod query;
