use std::path::Path;

use crate::domain::error::Result;
use crate::domain::esg_record::EsgRecord;
use crate::infrastructure::csv::{write_record, CsvParser, CsvRow};

pub struct CsvTransferUseCase {
    parser: CsvParser,
}

impl Default for CsvTransferUseCase {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTransferUseCase {
    pub fn new() -> Self {
        Self {
            parser: CsvParser::new(),
        }
    }

    pub fn export(&self, record: &EsgRecord) -> Result<String> {
        write_record(record)
    }

    /// Parses an uploaded CSV; the caller owns the file's lifetime.
    pub fn import(&self, path: &Path) -> Result<Vec<CsvRow>> {
        self.parser.parse_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use std::io::Write;

    #[test]
    fn test_import_reads_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Company,Industry,Country,Overall Score\nAcme,Tech,US,80\nGlobex,Energy,DE,64\n"
        )
        .unwrap();

        let rows = CsvTransferUseCase::new().import(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["Company"], "Globex");
        assert_eq!(rows[1]["Overall Score"], "64");
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CsvTransferUseCase::new().import(&dir.path().join("gone.csv"));

        assert!(matches!(result, Err(AppError::IoError(_))));
    }
}
