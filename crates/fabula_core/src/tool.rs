//! Tool definitions offered to the model.

use serde::{Deserialize, Serialize};

/// Declaration of a callable tool in a generation request.
///
/// `parameters` holds a JSON Schema object in the provider wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name the model must reference
    pub name: String,
    /// Human-readable description shown to the model
    pub description: String,
    /// JSON Schema for the tool arguments
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    /// Create a tool declaration.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}
