use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded HAR document, kept as an untyped JSON tree.
///
/// Exporters disagree on which fields are present and how they are typed,
/// so nothing here is validated up front. Readers pull the fields they need
/// and fall back to defaults when a key is missing or has the wrong shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawHarDocument(Value);

impl RawHarDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `log.entries` array, or an empty slice when the document has none
    pub fn entries(&self) -> &[Value] {
        self.0
            .get("log")
            .and_then(|log| log.get("entries"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl From<Value> for RawHarDocument {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
