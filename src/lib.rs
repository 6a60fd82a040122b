//! # Bindable Property Generator Ground Truth
//!
//! ## Generation Invariants
//!
//! 1. **Input Is a Model**: the host compiler flattens every candidate type into
//!    a [`Compilation`]. Nothing in this crate parses C# source; accessor bodies are
//!    only scanned for identifiers.
//!
//! 2. **One Unit per Family**: each declaring type yields at most one source unit for
//!    instance properties and one for attached properties. Output identifiers are
//!    injective over (type, family).
//!
//! 3. **Diagnostics Never Abort**: a bad marker drops that one occurrence. Siblings on
//!    the same type still generate.
//!
//! 4. **Shape Decides Emission**: a property is either writable (single public key)
//!    or read-only (private key plus a public projection). Visibility of the setter is
//!    never wider than the getter.
//!
//! 5. **Determinism**: identical input yields byte-identical output, independent of
//!    thread scheduling and of named-argument order.
//!
//! 6. **Conflicts Are Reported Once**: `DefaultValueAndFactory` comes from the parser
//!    only; analyzers own disjoint diagnostic sets.

#[cfg(feature = "napi")]
use napi_derive::napi;

pub mod access;
pub mod analyzer;
pub mod cache;
pub mod codegen;
pub mod conversion;
pub mod default_validator;
pub mod descriptor;
pub mod diagnostics;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod finalize;
pub mod framework;
pub mod model;
pub mod options;
pub mod parse;
pub mod platform_validator;
pub mod symbols;
pub mod syntax;
pub mod usage_validator;
pub mod visitor;

#[cfg(test)]
mod fixtures;



pub use cache::OutputCache;
pub use diagnostics::{Diagnostic, DiagnosticId, Severity};
pub use driver::{
    generate, generate_with, load_compilation, parse_compilation, run_analyzers, run_generator,
    CancellationToken, GeneratorOutput,
};
pub use error::{GeneratorError, Result};
pub use finalize::SourceUnit;
pub use model::Compilation;
pub use options::GeneratorOptions;

/// Node entry point: takes the serialized model, returns the serialized
/// [`GeneratorOutput`].
#[cfg(feature = "napi")]
#[napi]
pub fn generate_native(model_json: String) -> napi::Result<serde_json::Value> {
    let compilation = parse_compilation(&model_json, std::path::Path::new("<napi>"))
        .map_err(|e| napi::Error::from_reason(format!("{:#}", anyhow::Error::from(e))))?;
    let output = generate(&compilation, &CancellationToken::new())
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_value(&output).map_err(|e| napi::Error::from_reason(e.to_string()))
}
