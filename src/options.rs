//! Generator configuration.
//!
//! Read from the `options` object of a compilation model; every field has a
//! default so an empty object (or no object) is valid.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const DEFAULT_TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Emit `#nullable enable` at the top of each unit.
    pub nullable_directive: bool,
    /// Decorate generated fields, properties and accessor methods with
    /// `[GeneratedCode(toolName, toolVersion)]`.
    pub generated_code_attribute: bool,
    pub tool_name: String,
    pub tool_version: String,
    pub run_analyzers: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            nullable_directive: true,
            generated_code_attribute: true,
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            tool_version: DEFAULT_TOOL_VERSION.to_string(),
            run_analyzers: true,
        }
    }
}
