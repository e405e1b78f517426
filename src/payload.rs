//! Notification payload structures
//!
//! Nexus sends the component details as a JSON-encoded string *inside* the
//! outer JSON document, so decoding happens in two passes: once for the
//! notification, once for the `component` field's string value.

use crate::error::Result;
use serde::Deserialize;

/// Outer webhook notification document
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    #[serde(rename = "repositoryName")]
    pub repository_name: String,
    /// JSON-encoded component document, decoded via [`Notification::component`]
    pub component: String,
}

/// Component details nested inside a notification
#[derive(Debug, Clone, Deserialize)]
pub struct Component {
    pub name: String,
    pub group: String,
    pub version: String,
}

impl Notification {
    /// Decode the outer notification document from the raw request body.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// Decode the nested `component` field.
    pub fn component(&self) -> Result<Component> {
        Ok(serde_json::from_str(&self.component)?)
    }
}
