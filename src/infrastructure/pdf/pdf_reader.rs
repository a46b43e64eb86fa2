use std::path::Path;

use encoding_rs::{UTF_16BE, WINDOWS_1252};
use lopdf::{Dictionary, Document, Object};
use once_cell::sync::Lazy;
use regex::Regex;

use super::pdf_writer::{INFO_KEYS, TITLE_PREFIX};
use crate::domain::error::Result;
use crate::domain::esg_record::{EsgRecord, UNKNOWN_COMPANY, UNKNOWN_COUNTRY, UNKNOWN_INDUSTRY};

static LEADING_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Company,
    Industry,
    Country,
    Overall,
    Transparency,
    Environmental,
    Social,
    Governance,
}

impl Slot {
    fn index(self) -> usize {
        self as usize
    }
}

/// Slot taken by an unlabeled line, by its position among non-blank lines.
const POSITIONAL_SLOTS: [Slot; 8] = [
    Slot::Company,
    Slot::Industry,
    Slot::Country,
    Slot::Overall,
    Slot::Transparency,
    Slot::Environmental,
    Slot::Social,
    Slot::Governance,
];

/// Report labels plus the scoring service's own field names.
const LABELS: [(&str, Slot); 14] = [
    ("company", Slot::Company),
    ("companyname", Slot::Company),
    ("industry", Slot::Industry),
    ("country", Slot::Country),
    ("overall score", Slot::Overall),
    ("transparency score", Slot::Transparency),
    ("overall transparency score", Slot::Transparency),
    ("environmental score", Slot::Environmental),
    ("environmental pillar score", Slot::Environmental),
    ("social score", Slot::Social),
    ("social pillar score", Slot::Social),
    ("governance score", Slot::Governance),
    ("governance pillar score", Slot::Governance),
    ("esg report for", Slot::Company),
];

/// Loads a report PDF from disk.
pub fn read_report(path: &Path) -> Result<EsgRecord> {
    let document = Document::load(path)?;
    report_from_document(&document)
}

pub fn report_from_document(document: &Document) -> Result<EsgRecord> {
    let text = extract_document_text(document)?;
    Ok(parse_report(&text, info_dictionary(document)))
}

fn extract_document_text(document: &Document) -> Result<String> {
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Ok(String::new());
    }
    Ok(document.extract_text(&page_numbers)?)
}

fn info_dictionary(document: &Document) -> Option<&Dictionary> {
    match document.trailer.get(b"Info").ok()? {
        Object::Reference(id) => document.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(info) => Some(info),
        _ => None,
    }
}

/// Maps a report onto an ESG record.
///
/// Values stored in the Info dictionary are taken as-is. Remaining fields
/// come from the page text: labeled lines (`Industry: Tech`) fill their
/// field wherever they appear, an unlabeled line falls back to the field at
/// its position. The first value seen for a field wins; missing text fields
/// get placeholders and missing or non-numeric scores become `0`.
pub fn parse_report(text: &str, info: Option<&Dictionary>) -> EsgRecord {
    let mut values: [Option<String>; 8] = Default::default();

    if let Some(info) = info {
        for (entry, key) in values.iter_mut().zip(INFO_KEYS.iter()) {
            if let Ok(Object::String(bytes, _)) = info.get(key.as_bytes()) {
                *entry = Some(decode_text_string(bytes));
            }
        }
    }

    let lines = text.lines().filter(|line| !line.trim().is_empty());
    for (position, line) in lines.enumerate() {
        let (slot, value) = match classify(line) {
            Some(labeled) => labeled,
            None => match POSITIONAL_SLOTS.get(position) {
                Some(slot) => (*slot, line),
                None => continue,
            },
        };

        let entry = &mut values[slot.index()];
        if entry.is_none() && !value.trim().is_empty() {
            *entry = Some(value.to_string());
        }
    }

    let [company, industry, country, overall, transparency, environmental, social, governance] =
        values;

    EsgRecord::from_imported(
        company.unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
        industry.unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string()),
        country.unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        [
            parse_score(overall.as_deref()),
            parse_score(transparency.as_deref()),
            parse_score(environmental.as_deref()),
            parse_score(social.as_deref()),
            parse_score(governance.as_deref()),
        ],
    )
}

/// Finds the label of `line`. Only the label side is trimmed; the value
/// keeps its own whitespace after the single separating space.
fn classify(line: &str) -> Option<(Slot, &str)> {
    let head = line.trim_start();
    if let Some(rest) = strip_prefix_ignore_case(head, TITLE_PREFIX) {
        return Some((Slot::Company, strip_separator(rest)));
    }

    let (label, value) = head.split_once(':')?;
    let label = label.trim().to_lowercase();
    LABELS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, slot)| (*slot, strip_separator(value)))
}

fn strip_separator(value: &str) -> &str {
    value.strip_prefix(' ').unwrap_or(value)
}

/// Decodes a PDF text string: UTF-16BE when it carries a byte order mark,
/// otherwise single-byte text.
fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => UTF_16BE.decode_without_bom_handling(rest).0.into_owned(),
        _ => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
    }
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = &line[prefix.len()..];
    // "ESG Report forecast" is not a title line
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Parses the leading number of `value`, `0` when there is none.
fn parse_score(value: Option<&str>) -> f64 {
    value
        .and_then(|text| LEADING_NUMBER_PATTERN.find(text.trim_start()))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::esg_record::FieldValue;
    use crate::infrastructure::pdf::render_report;
    use serde_json::json;
    use std::io::Write;

    fn load(bytes: &[u8]) -> Document {
        Document::load_mem(bytes).unwrap()
    }

    #[test]
    fn test_parse_labeled_report() {
        let text = "ESG Report for Acme\nIndustry: Tech\nCountry: US\nOverall Score: 80\n\
                    Transparency Score: 70\nEnvironmental Score: 60\nSocial Score: 90\n\
                    Governance Score: 85.5\n";
        let record = parse_report(text, None);

        assert_eq!(record.company_name, Some(FieldValue::from("Acme")));
        assert_eq!(record.country, Some(FieldValue::from("US")));
        assert_eq!(record.overall_score, Some(FieldValue::Number(80.0)));
        assert_eq!(record.governance_score, Some(FieldValue::Number(85.5)));
    }

    #[test]
    fn test_parse_positional_lines() {
        let text = "Acme\nTech\nUS\n80\n70\n60\n90\n85";
        let record = parse_report(text, None);

        assert_eq!(record.company_name, Some(FieldValue::from("Acme")));
        assert_eq!(record.industry, Some(FieldValue::from("Tech")));
        assert_eq!(record.transparency_score, Some(FieldValue::Number(70.0)));
        assert_eq!(record.governance_score, Some(FieldValue::Number(85.0)));
    }

    #[test]
    fn test_parse_defaults_for_missing_lines() {
        let record = parse_report("", None);

        assert_eq!(record.company_name, Some(FieldValue::from(UNKNOWN_COMPANY)));
        assert_eq!(record.industry, Some(FieldValue::from(UNKNOWN_INDUSTRY)));
        assert_eq!(record.country, Some(FieldValue::from(UNKNOWN_COUNTRY)));
        assert_eq!(record.social_score, Some(FieldValue::Number(0.0)));
    }

    #[test]
    fn test_parse_score_takes_leading_number() {
        assert_eq!(parse_score(Some("72.5 points")), 72.5);
        assert_eq!(parse_score(Some("-3e2")), -300.0);
        assert_eq!(parse_score(Some("undefined")), 0.0);
        assert_eq!(parse_score(None), 0.0);
    }

    #[test]
    fn test_labels_win_over_position() {
        let text = "Country: FR\nESG Report for Initech\nOverall Score: 12";
        let record = parse_report(text, None);

        assert_eq!(record.company_name, Some(FieldValue::from("Initech")));
        assert_eq!(record.country, Some(FieldValue::from("FR")));
        assert_eq!(record.industry, Some(FieldValue::from(UNKNOWN_INDUSTRY)));
        assert_eq!(record.overall_score, Some(FieldValue::Number(12.0)));
    }

    #[test]
    fn test_value_containing_colon_is_kept_whole() {
        let record = parse_report("Industry: Tech: Hardware", None);
        assert_eq!(record.industry, Some(FieldValue::from("Tech: Hardware")));
    }

    #[test]
    fn test_value_whitespace_is_preserved() {
        let text = "ESG Report for   Acme  Co \n  Industry:  Heavy  Tech \nCountry: US";
        let record = parse_report(text, None);

        assert_eq!(record.company_name, Some(FieldValue::from("  Acme  Co ")));
        assert_eq!(record.industry, Some(FieldValue::from(" Heavy  Tech ")));
        assert_eq!(record.country, Some(FieldValue::from("US")));
    }

    #[test]
    fn test_page_text_keeps_padded_company_name() {
        let original: EsgRecord =
            serde_json::from_value(json!({ "companyname": "  Acme  Co " })).unwrap();
        let document = load(&render_report(&original).unwrap());

        let text = extract_document_text(&document).unwrap();
        let imported = parse_report(&text, None);

        assert_eq!(imported.company_name, Some(FieldValue::from("  Acme  Co ")));
    }

    #[test]
    fn test_info_values_take_precedence_over_page_text() {
        let mut info = Dictionary::new();
        info.set(
            "EsgCompany",
            Object::String(vec![0xFE, 0xFF, 0x67, 0x71], lopdf::StringFormat::Hexadecimal),
        );
        info.set("EsgCountry", Object::string_literal(b"Espa\xF1a".to_vec()));

        let record = parse_report("ESG Report for ?\nIndustry: Tech", Some(&info));

        assert_eq!(record.company_name, Some(FieldValue::from("\u{6771}")));
        assert_eq!(record.industry, Some(FieldValue::from("Tech")));
        assert_eq!(record.country, Some(FieldValue::from("Espa\u{f1}a")));
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let original: EsgRecord = serde_json::from_value(json!({
            "companyname": "Globex Holding",
            "industry": "Industrials",
            "country": "Germany",
            "Overall Score": 73.25,
            "Overall Transparency Score": 88,
            "Environmental Pillar Score": 61.5,
            "Social Pillar Score": 70.125,
            "Governance Pillar Score": 79
        }))
        .unwrap();

        let document = load(&render_report(&original).unwrap());
        let imported = report_from_document(&document).unwrap();

        assert_eq!(imported.company_name, original.company_name);
        assert_eq!(imported.industry, original.industry);
        assert_eq!(imported.country, original.country);
        assert_eq!(imported.overall_score, Some(FieldValue::Number(73.25)));
        assert_eq!(imported.transparency_score, Some(FieldValue::Number(88.0)));
        assert_eq!(imported.environmental_score, Some(FieldValue::Number(61.5)));
        assert_eq!(imported.social_score, Some(FieldValue::Number(70.125)));
        assert_eq!(imported.governance_score, Some(FieldValue::Number(79.0)));

        // The page text alone carries the same values.
        let from_text = parse_report(&extract_document_text(&document).unwrap(), None);
        assert_eq!(from_text, imported);
    }

    #[test]
    fn test_round_trip_keeps_non_latin_text() {
        let original: EsgRecord = serde_json::from_value(json!({
            "companyname": "\u{6771}\u{4eac}\u{96fb}\u{529b}",
            "industry": "\u{141}\u{f3}d\u{17a} Energy",
            "country": "  \u{65e5}\u{672c} ",
            "Overall Score": 64
        }))
        .unwrap();

        let document = load(&render_report(&original).unwrap());
        let imported = report_from_document(&document).unwrap();

        assert_eq!(imported.company_name, original.company_name);
        assert_eq!(imported.industry, original.industry);
        assert_eq!(imported.country, original.country);
        assert_eq!(imported.overall_score, Some(FieldValue::Number(64.0)));
        assert_eq!(imported.social_score, Some(FieldValue::Number(0.0)));
    }

    #[test]
    fn test_read_report_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a pdf").unwrap();

        let result = read_report(file.path());
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }
}
