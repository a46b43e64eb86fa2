use std::path::Path;

use crate::domain::error::Result;
use crate::domain::esg_record::EsgRecord;
use crate::infrastructure::pdf::{read_report, render_report};

#[derive(Default)]
pub struct PdfTransferUseCase;

impl PdfTransferUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, record: &EsgRecord) -> Result<Vec<u8>> {
        render_report(record)
    }

    /// Reads a report PDF back into a record; the caller owns the file's lifetime.
    pub fn import(&self, path: &Path) -> Result<EsgRecord> {
        read_report(path)
    }
}
