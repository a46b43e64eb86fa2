mod pdf_reader;
mod pdf_writer;

pub use pdf_reader::read_report;
pub use pdf_writer::render_report;
