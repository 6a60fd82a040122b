use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::SourceLocation;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC IDS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum DiagnosticId {
    EmptyPropertyName,
    InvalidPropertyName,
    InvalidVisibility,
    InvalidDefaultMode,
    DefaultValueNotSupported,
    DefaultValueAndFactory,
    RedundantWriteVisibility,
    DefaultValueNull,
    AttachedPropertyNotUsed,
    InstancePropertyNotUsed,
    InstanceToAttached,
    StaticProperty,
    AttributeOnIndexer,
    HandlerAddPartialPlatformClass,
    DuplicatePropertyName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DESCRIPTOR CATALOG
// ═══════════════════════════════════════════════════════════════════════════════

/// Stable code, default severity and message template. Placeholders are
/// positional (`{0}`, `{1}`, ...).
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub code: &'static str,
    pub severity: Severity,
    pub title: &'static str,
    pub message_format: &'static str,
}

pub fn descriptor(id: DiagnosticId) -> Descriptor {
    use DiagnosticId::*;
    let (code, severity, title, message_format) = match id {
        EmptyPropertyName => (
            "BPG0001",
            Severity::Error,
            "Property name is required",
            "The property name of '{0}' must not be null or empty",
        ),
        InvalidPropertyName => (
            "BPG0002",
            Severity::Error,
            "Property name is not a valid identifier",
            "'{0}' is not a valid property name",
        ),
        InvalidVisibility => (
            "BPG0003",
            Severity::Error,
            "Invalid visibility",
            "'{0}' is not a valid value for {1} on property '{2}'",
        ),
        InvalidDefaultMode => (
            "BPG0004",
            Severity::Warning,
            "Invalid default binding mode",
            "'{0}' is not a defined binding mode for property '{1}'",
        ),
        DefaultValueNotSupported => (
            "BPG0005",
            Severity::Error,
            "Default value is not supported",
            "Default value '{0}' cannot be converted to '{1}' for property '{2}'",
        ),
        DefaultValueAndFactory => (
            "BPG0006",
            Severity::Warning,
            "Default value and default value factory",
            "Property '{0}' specifies both DefaultValue and DefaultValueFactory; the default value is used",
        ),
        RedundantWriteVisibility => (
            "BPG0007",
            Severity::Info,
            "Redundant write visibility",
            "WriteVisibility of property '{0}' equals its Visibility and can be removed",
        ),
        DefaultValueNull => (
            "BPG0008",
            Severity::Warning,
            "Non-nullable property without default value",
            "Property '{0}' of non-nullable type '{1}' needs a DefaultValue or DefaultValueFactory",
        ),
        AttachedPropertyNotUsed => (
            "BPG0009",
            Severity::Warning,
            "Attached property accessor does not use its bindable property",
            "'{0}' does not read or write '{1}'",
        ),
        InstancePropertyNotUsed => (
            "BPG0010",
            Severity::Warning,
            "Property does not use its bindable property",
            "The accessors of '{0}' must read and write '{1}'",
        ),
        InstanceToAttached => (
            "BPG0011",
            Severity::Info,
            "Instance property marked as attached property",
            "Property '{0}' is marked as an attached property; declare static Get{0}/Set{0} methods instead",
        ),
        StaticProperty => (
            "BPG0012",
            Severity::Error,
            "Static property cannot be bindable",
            "Static property '{0}' cannot be a bindable property",
        ),
        AttributeOnIndexer => (
            "BPG0013",
            Severity::Error,
            "Indexer cannot be bindable",
            "Indexers cannot be bindable properties",
        ),
        HandlerAddPartialPlatformClass => (
            "BPG0014",
            Severity::Info,
            "Add partial platform handler class",
            "Add a partial {0} implementation of '{1}' for the platform properties of '{2}'",
        ),
        DuplicatePropertyName => (
            "BPG0015",
            Severity::Error,
            "Duplicate bindable property",
            "Property '{0}' is already declared on '{1}'",
        ),
    };
    Descriptor {
        code,
        severity,
        title,
        message_format,
    }
}

fn format_message(template: &str, args: &[&str]) -> String {
    let mut message = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        message = message.replace(&format!("{{{}}}", index), arg);
    }
    message
}

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub id: DiagnosticId,
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
    /// Structured metadata for downstream tooling.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Diagnostic {
    pub fn new(id: DiagnosticId, args: &[&str], location: Option<&SourceLocation>) -> Self {
        let descriptor = descriptor(id);
        Diagnostic {
            id,
            code: descriptor.code.to_string(),
            severity: descriptor.severity,
            message: format_message(descriptor.message_format, args),
            location: location.cloned(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{}({},{}): ", loc.file, loc.line, loc.column)?;
        }
        write!(f, "{} {}: {}", self.severity, self.code, self.message)
    }
}
