//! The opaque, semi-structured invoice record supplied by the provider.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One account's raw invoice data. There is no guaranteed schema: the same
/// semantic value may live under a flat key of several historical namings, or
/// inside a category-specific details object holding a further "full data"
/// mapping with human-readable keys.
#[derive(Clone, Debug, Deserialize, Serialize, derive_more::From)]
pub struct RawInvoiceRecord(pub Value);

impl RawInvoiceRecord {
    /// Walks the key path through nested objects. Array indices are not
    /// supported: the provider nests objects only.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let mut current = &self.0;
        for key in path {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    /// Renders a leaf value as text for lenient parsing. Objects, arrays,
    /// and nulls yield `None`.
    #[must_use]
    pub fn get_text(&self, path: &[&str]) -> Option<String> {
        match self.get_path(path)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
