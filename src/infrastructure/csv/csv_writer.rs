use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::esg_record::EsgRecord;

pub const EXPORT_HEADERS: [&str; 8] = [
    "Company",
    "Industry",
    "Country",
    "Overall Score",
    "Transparency Score",
    "Environmental Score",
    "Social Score",
    "Governance Score",
];

/// Renders a record as a header line plus one data line.
///
/// Fields are written raw: a value containing the delimiter shifts the
/// columns of the data line.
pub fn write_record(record: &EsgRecord) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    writer.write_record(record.rendered_fields())?;

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::CsvParser;
    use serde_json::json;

    fn acme() -> EsgRecord {
        serde_json::from_value(json!({
            "companyname": "Acme",
            "industry": "Tech",
            "country": "US",
            "Overall Score": 80,
            "Overall Transparency Score": 70,
            "Environmental Pillar Score": 60,
            "Social Pillar Score": 90,
            "Governance Pillar Score": 85
        }))
        .unwrap()
    }

    #[test]
    fn test_writes_fixed_header_and_row() {
        let csv = write_record(&acme()).unwrap();
        assert_eq!(
            csv,
            "Company,Industry,Country,Overall Score,Transparency Score,Environmental Score,Social Score,Governance Score\n\
             Acme,Tech,US,80,70,60,90,85\n"
        );
    }

    #[test]
    fn test_missing_fields_written_as_undefined() {
        let record: EsgRecord = serde_json::from_value(json!({ "companyname": "Acme" })).unwrap();
        let csv = write_record(&record).unwrap();
        assert!(csv.ends_with(
            "Acme,undefined,undefined,undefined,undefined,undefined,undefined,undefined\n"
        ));
    }

    #[test]
    fn test_export_then_import_preserves_values() {
        let record: EsgRecord = serde_json::from_value(json!({
            "companyname": "Globex Corp",
            "industry": "Energy",
            "country": "DE",
            "Overall Score": 64.25,
            "Overall Transparency Score": 51,
            "Environmental Pillar Score": 70.5,
            "Social Pillar Score": 58,
            "Governance Pillar Score": 66.75
        }))
        .unwrap();

        let csv = write_record(&record).unwrap();
        let rows = CsvParser::new().parse_reader(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        let values: Vec<&str> = rows[0].values().filter_map(|v| v.as_str()).collect();
        assert_eq!(values, record.rendered_fields());
        assert_eq!(rows[0]["Company"], "Globex Corp");
        assert_eq!(rows[0]["Governance Score"], "66.75");
    }

    #[test]
    fn test_comma_in_value_is_not_escaped() {
        let record: EsgRecord =
            serde_json::from_value(json!({ "companyname": "Acme, Inc." })).unwrap();
        let csv = write_record(&record).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("Acme, Inc.,undefined"));
    }
}
