use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Text written for a field the caller did not supply.
pub const UNDEFINED: &str = "undefined";

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_INDUSTRY: &str = "Unknown Industry";
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

/// A single ESG field as it arrives from a client or the scoring service.
/// Scores are usually numbers but upstream payloads occasionally carry them
/// as strings, so both are accepted and rendered as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Other(Value::String(s)) => f.write_str(s),
            FieldValue::Other(Value::Null) => f.write_str(UNDEFINED),
            FieldValue::Other(other) => write!(f, "{}", other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EsgRecord {
    #[serde(rename = "companyname", default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<FieldValue>,
    #[serde(rename = "Overall Score", default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<FieldValue>,
    #[serde(
        rename = "Overall Transparency Score",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transparency_score: Option<FieldValue>,
    #[serde(
        rename = "Environmental Pillar Score",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub environmental_score: Option<FieldValue>,
    #[serde(rename = "Social Pillar Score", default, skip_serializing_if = "Option::is_none")]
    pub social_score: Option<FieldValue>,
    #[serde(
        rename = "Governance Pillar Score",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub governance_score: Option<FieldValue>,
}

impl EsgRecord {
    /// Interprets the `data` member of an export request.
    ///
    /// Returns `None` when the payload is absent or falsy (`null`, `false`,
    /// `0`, `""`). Any other non-object payload yields an empty record whose
    /// fields all render as `undefined`.
    pub fn from_payload(payload: Option<&Value>) -> Option<Self> {
        let payload = payload?;
        if is_falsy(payload) {
            return None;
        }
        if payload.is_object() {
            Some(serde_json::from_value(payload.clone()).unwrap_or_default())
        } else {
            Some(Self::default())
        }
    }

    /// Builds a record from imported values; every field is present.
    pub fn from_imported(
        company_name: String,
        industry: String,
        country: String,
        scores: [f64; 5],
    ) -> Self {
        let [overall, transparency, environmental, social, governance] = scores;
        Self {
            company_name: Some(company_name.into()),
            industry: Some(industry.into()),
            country: Some(country.into()),
            overall_score: Some(overall.into()),
            transparency_score: Some(transparency.into()),
            environmental_score: Some(environmental.into()),
            social_score: Some(social.into()),
            governance_score: Some(governance.into()),
        }
    }

    /// The eight fields rendered as text, in export column order.
    pub fn rendered_fields(&self) -> [String; 8] {
        [
            render(&self.company_name),
            render(&self.industry),
            render(&self.country),
            render(&self.overall_score),
            render(&self.transparency_score),
            render(&self.environmental_score),
            render(&self.social_score),
            render(&self.governance_score),
        ]
    }
}

fn render(field: &Option<FieldValue>) -> String {
    field
        .as_ref()
        .map(|value| value.to_string())
        .unwrap_or_else(|| UNDEFINED.to_string())
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0 || f.is_nan()).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
