// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// ESG record export and header-keyed import

mod csv_parser;
mod csv_writer;

pub use csv_parser::{CsvParser, CsvRow};
pub use csv_writer::write_record;
