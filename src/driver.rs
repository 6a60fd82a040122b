//! Driver Module
//!
//! Runs discovery, emission and the analyzers over a whole compilation.
//! Per-type work fans out on rayon and is collected back in input order,
//! so the output is identical from run to run.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::analyzer::{default_analyzers, AnalysisContext, Analyzer};
use crate::diagnostics::Diagnostic;
use crate::discovery::discover_type;
use crate::error::{GeneratorError, Result};
use crate::finalize::{render_entry, SourceUnit};
use crate::model::Compilation;
use crate::options::GeneratorOptions;
use crate::symbols::SymbolTable;

/// Cooperative cancellation flag shared with the host.
///
/// Checked before each type is processed, never in the middle of one.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(GeneratorError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOutput {
    pub sources: Vec<SourceUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratorOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODEL LOADING
// ═══════════════════════════════════════════════════════════════════════════════

pub fn parse_compilation(json: &str, path: &Path) -> Result<Compilation> {
    serde_json::from_str(json).map_err(|source| GeneratorError::Model {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_compilation(path: &Path) -> Result<Compilation> {
    let json = fs::read_to_string(path).map_err(|source| GeneratorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_compilation(&json, path)
}

// ═══════════════════════════════════════════════════════════════════════════════
// PIPELINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Discover and emit every marked type. Parser diagnostics are returned
/// alongside the sources, in type order.
pub fn run_generator(
    compilation: &Compilation,
    options: &GeneratorOptions,
    cancel: &CancellationToken,
) -> Result<GeneratorOutput> {
    let symbols = SymbolTable::new(compilation);

    let per_type = compilation
        .types
        .par_iter()
        .map(|ty| -> Result<(Vec<SourceUnit>, Vec<Diagnostic>)> {
            cancel.check()?;
            let mut sources = Vec::new();
            let mut diagnostics = Vec::new();
            for entry in discover_type(ty, &symbols) {
                diagnostics.extend(entry.diagnostics.iter().cloned());
                sources.extend(render_entry(&entry, options));
            }
            Ok((sources, diagnostics))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut output = GeneratorOutput::default();
    let mut hint_names = HashSet::new();
    for (sources, diagnostics) in per_type {
        for unit in sources {
            if !hint_names.insert(unit.hint_name.clone()) {
                warn!(hint = %unit.hint_name, "duplicate output identifier, keeping the first unit");
                continue;
            }
            debug!(hint = %unit.hint_name, bytes = unit.text.len(), "emitted unit");
            output.sources.push(unit);
        }
        output.diagnostics.extend(diagnostics);
    }
    Ok(output)
}

/// Run `analyzers` over every type; diagnostics come back grouped by type,
/// then by analyzer.
pub fn run_analyzers(
    compilation: &Compilation,
    analyzers: &[Box<dyn Analyzer>],
    cancel: &CancellationToken,
) -> Result<Vec<Diagnostic>> {
    let cx = AnalysisContext::new(compilation);

    let per_type = compilation
        .types
        .par_iter()
        .map(|ty| -> Result<Vec<Diagnostic>> {
            cancel.check()?;
            let mut out = Vec::new();
            for analyzer in analyzers {
                analyzer.analyze_type(&cx, ty, &mut out);
            }
            Ok(out)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(per_type.into_iter().flatten().collect())
}

/// Full pipeline with the options carried by the model.
pub fn generate(compilation: &Compilation, cancel: &CancellationToken) -> Result<GeneratorOutput> {
    generate_with(compilation, &compilation.options, cancel)
}

pub fn generate_with(
    compilation: &Compilation,
    options: &GeneratorOptions,
    cancel: &CancellationToken,
) -> Result<GeneratorOutput> {
    let mut output = run_generator(compilation, options, cancel)?;
    if options.run_analyzers {
        let diagnostics = run_analyzers(compilation, &default_analyzers(), cancel)?;
        output.diagnostics.extend(diagnostics);
    }
    info!(
        assembly = %compilation.assembly_name,
        types = compilation.types.len(),
        sources = output.sources.len(),
        diagnostics = output.diagnostics.len(),
        "generation finished"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticId;
    use crate::fixtures::*;

    fn label() -> Compilation {
        compilation_with(class(
            "Demo",
            "Label",
            vec![instance_marker("Text", string_type(), vec![])],
        ))
    }

    #[test]
    fn test_generate_collects_sources_and_diagnostics() {
        let output = generate(&label(), &CancellationToken::new()).unwrap();
        assert_eq!(output.sources.len(), 1);
        assert_eq!(output.sources[0].hint_name, "Demo.Label.g.cs");
        let ids: Vec<DiagnosticId> = output.diagnostics.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![DiagnosticId::DefaultValueNull]);
        assert!(!output.has_errors());
    }

    #[test]
    fn test_analyzers_can_be_disabled() {
        let options = GeneratorOptions {
            run_analyzers: false,
            ..Default::default()
        };
        let output = generate_with(&label(), &options, &CancellationToken::new()).unwrap();
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = generate(&label(), &cancel);
        assert!(matches!(result, Err(GeneratorError::Cancelled)));
    }

    #[test]
    fn test_duplicate_types_emit_once() {
        let mut compilation = label();
        compilation.types.push(compilation.types[0].clone());
        let output = run_generator(
            &compilation,
            &GeneratorOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(output.sources.len(), 1);
    }

    #[test]
    fn test_load_compilation_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bindable.json");
        fs::write(&path, "{").unwrap();
        match load_compilation(&path) {
            Err(GeneratorError::Model { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected {:?}", other.map(|c| c.types.len())),
        }

        let missing = dir.path().join("missing.bindable.json");
        assert!(matches!(
            load_compilation(&missing),
            Err(GeneratorError::Io { .. })
        ));
    }

    #[test]
    fn test_model_json_round_trips_through_loader() {
        let json = r#"{
            "assemblyName": "Demo",
            "types": [{
                "namespace": "Demo",
                "name": "Label",
                "attributes": [{
                    "name": "BindablePropertyAttribute",
                    "typeArguments": [{ "name": "int", "special": "int", "isValueType": true }],
                    "constructorArguments": [{ "kind": "string", "value": "MaxLines" }],
                    "namedArguments": [{ "name": "DefaultValue", "value": { "kind": "int", "value": 1 } }]
                }]
            }]
        }"#;
        let compilation = parse_compilation(json, Path::new("inline.json")).unwrap();
        let output = generate(&compilation, &CancellationToken::new()).unwrap();
        assert_eq!(output.sources.len(), 1);
        assert!(output.sources[0].text.contains("defaultValue: 1,"));
        assert!(output.diagnostics.is_empty());
    }
}
