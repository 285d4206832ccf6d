use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod config;

pub const RUN_RISK_JOB_PATH: &str = "/api/RiskJob/run-risk-job";
pub const INIT_RISK_PATH: &str = "/api/RiskJob/init-risk";

const LABEL_KEYS: &[&str] = &[
    "borrowerName",
    "name",
    "borrowerId",
    "id",
    "borrower_name",
    "borrower_id",
];

/// One borrower's computed risk as returned by the run-job endpoint.
///
/// The record is kept as the JSON object the API sent; field order survives a
/// decode/encode cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BorrowerRisk {
    fields: Map<String, Value>,
}

impl BorrowerRisk {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Best-effort display name: the first well-known id/name key that holds a
    /// scalar, or `None` when the record carries none of them.
    pub fn label(&self) -> Option<String> {
        LABEL_KEYS
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .find_map(scalar_text)
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for BorrowerRisk {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Renders a JSON scalar without quotes; arrays and objects yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
