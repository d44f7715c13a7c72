//! Objects returned by the Conduit API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a `*.search` result page.
///
/// `fields` and `attachments` are kept as raw JSON; Conduit encodes an empty
/// attachment set as `[]` rather than `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitObject {
    pub id: u64,
    #[serde(rename = "type")]
    pub object_type: String,
    pub phid: String,
    #[serde(default)]
    pub fields: Value,
    #[serde(default)]
    pub attachments: Value,
}

impl ConduitObject {
    /// The `fields.name` value, when the object has one.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

/// Result of `maniphest.edit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditResult {
    pub object: EditedObject,
    #[serde(default)]
    pub transactions: Vec<TransactionRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditedObject {
    pub id: u64,
    pub phid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRef {
    pub phid: String,
}

/// An output record handed back to the caller, one per result.
pub type Record = Value;
