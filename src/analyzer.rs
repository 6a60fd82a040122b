//! Static analyzers over hand-written declarations.
//!
//! Each analyzer checks one narrow rule, shares nothing mutable and may run
//! concurrently with the others. Per-compilation lookups live in an
//! [`AnalysisContext`] built once before any analyzer runs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::default_validator::DefaultValueValidator;
use crate::diagnostics::{Diagnostic, DiagnosticId};
use crate::model::{Compilation, TypeDecl};
use crate::platform_validator::{present_platforms, Platform, PlatformValidator};
use crate::symbols::SymbolTable;
use crate::usage_validator::UsageValidator;

pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;

    fn supported_diagnostics(&self) -> &'static [DiagnosticId];

    fn analyze_type(&self, cx: &AnalysisContext<'_>, ty: &TypeDecl, out: &mut Vec<Diagnostic>);
}

/// Read-only state shared by all analyzers for one compilation.
pub struct AnalysisContext<'a> {
    pub compilation: &'a Compilation,
    pub symbols: SymbolTable<'a>,
    pub platforms: Vec<&'static Platform>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(compilation: &'a Compilation) -> Self {
        Self {
            compilation,
            symbols: SymbolTable::new(compilation),
            platforms: present_platforms(&compilation.referenced_assemblies),
        }
    }
}

pub fn default_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(UsageValidator),
        Box::new(DefaultValueValidator),
        Box::new(PlatformValidator),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════════
// BODY SCANNING
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    /// Comments and string/char literals, in the order the lexer would see them.
    static ref LITERALS_AND_COMMENTS: Regex = Regex::new(
        r#"(?s)//[^\n]*|/\*.*?\*/|@"(?:[^"]|"")*"|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#
    )
    .unwrap();
    static ref IDENTIFIER: Regex = Regex::new(r"@?[A-Za-z_][A-Za-z0-9_]*").unwrap();
}

pub fn strip_literals_and_comments(body: &str) -> String {
    LITERALS_AND_COMMENTS.replace_all(body, " ").into_owned()
}

/// Whether `body` mentions `identifier` as a whole word outside comments
/// and literals.
pub fn references_identifier(body: &str, identifier: &str) -> bool {
    let code = strip_literals_and_comments(body);
    IDENTIFIER
        .find_iter(&code)
        .any(|m| m.as_str().trim_start_matches('@') == identifier)
}
