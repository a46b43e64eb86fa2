use encoding_rs::WINDOWS_1252;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::domain::error::{AppError, Result};
use crate::domain::esg_record::EsgRecord;

// US Letter in points, one-inch margin.
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;
const FONT_SIZE: i64 = 12;
const LINE_HEIGHT: i64 = 16;

pub const TITLE_PREFIX: &str = "ESG Report for";

/// Info dictionary keys carrying the raw field values, in record field order.
pub const INFO_KEYS: [&str; 8] = [
    "EsgCompany",
    "EsgIndustry",
    "EsgCountry",
    "EsgOverallScore",
    "EsgTransparencyScore",
    "EsgEnvironmentalScore",
    "EsgSocialScore",
    "EsgGovernanceScore",
];

/// The eight report lines in print order.
pub fn report_lines(record: &EsgRecord) -> [String; 8] {
    let [company, industry, country, overall, transparency, environmental, social, governance] =
        record.rendered_fields();
    [
        format!("{} {}", TITLE_PREFIX, company),
        format!("Industry: {}", industry),
        format!("Country: {}", country),
        format!("Overall Score: {}", overall),
        format!("Transparency Score: {}", transparency),
        format!("Environmental Score: {}", environmental),
        format!("Social Score: {}", social),
        format!("Governance Score: {}", governance),
    ]
}

/// Renders a one-page report and returns the serialized PDF.
///
/// Each line is emitted as its own text object so that text extraction
/// yields exactly one line per field. The page text is limited to
/// WinAnsi, so the exact values also go into the Info dictionary.
pub fn render_report(record: &EsgRecord) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = Vec::new();
    for (index, line) in report_lines(record).iter().enumerate() {
        let offset = LINE_HEIGHT * i64::try_from(index).unwrap_or(0);
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]));
        operations.push(Operation::new(
            "Td",
            vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - offset).into()],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_text(line), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_bytes = content
        .encode()
        .map_err(|e| AppError::Internal(format!("Failed to encode PDF content: {}", e)))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(info_dictionary(record));
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AppError::Internal(format!("Failed to write PDF: {}", e)))?;
    Ok(buffer)
}

fn info_dictionary(record: &EsgRecord) -> Dictionary {
    let fields = record.rendered_fields();
    let mut info = Dictionary::new();
    info.set("Title", text_string(&format!("{} {}", TITLE_PREFIX, fields[0])));
    info.set("Producer", text_string("esgbridge"));
    for (key, value) in INFO_KEYS.iter().zip(fields.iter()) {
        info.set(*key, text_string(value));
    }
    info
}

/// PDF text string in UTF-16BE with a byte order mark.
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// WinAnsi bytes for page text; characters outside Windows-1252 become `?`.
fn encode_text(text: &str) -> Vec<u8> {
    let mut buffer = [0u8; 4];
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let (encoded, _, unmappable) = WINDOWS_1252.encode(ch.encode_utf8(&mut buffer));
        match encoded.first() {
            Some(byte) if !unmappable => bytes.push(*byte),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}
