//! Discovery Module
//!
//! Scans one type declaration for markers, runs every occurrence through the
//! parser and groups the results into one emission entry per generator
//! family.

use std::collections::HashSet;
use tracing::{debug, trace};

use crate::descriptor::PropertyDescriptor;
use crate::diagnostics::{Diagnostic, DiagnosticId};
use crate::finalize::hint_name;
use crate::model::{AttributeData, MethodDecl, PropertyDecl, TypeDecl, TypeHeader, TypeKind};
use crate::parse::{MarkerFamily, MarkerParser};
use crate::symbols::SymbolTable;
use crate::visitor::DeclarationVisitor;

// ═══════════════════════════════════════════════════════════════════════════════
// EMISSION ENTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything needed to emit one source unit for one declaring type and one
/// generator family.
#[derive(Debug, Clone)]
pub struct ClassEmissionEntry {
    pub namespace: Option<String>,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub kind: TypeKind,
    pub family: MarkerFamily,
    pub hint_name: String,
    /// Enclosing types, innermost first.
    pub containing_types: Vec<TypeHeader>,
    pub descriptors: Vec<PropertyDescriptor>,
    /// Diagnostics of successful and failed parses alike.
    pub diagnostics: Vec<Diagnostic>,
}

impl ClassEmissionEntry {
    fn new(ty: &TypeDecl, family: MarkerFamily) -> Self {
        ClassEmissionEntry {
            namespace: ty.namespace.clone().filter(|ns| !ns.is_empty()),
            name: ty.name.clone(),
            type_parameters: ty.type_parameters.clone(),
            kind: ty.kind,
            family,
            hint_name: hint_name(ty, family),
            containing_types: ty.containing_types.iter().rev().cloned().collect(),
            descriptors: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_output(&self) -> bool {
        !self.descriptors.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MARKER COLLECTION
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
enum Occurrence<'a> {
    Class(&'a AttributeData),
    Property(&'a PropertyDecl, &'a AttributeData),
    Method(&'a MethodDecl, &'a AttributeData),
}

/// Collects marker occurrences in declaration order.
#[derive(Default)]
struct MarkerCollector<'a> {
    occurrences: Vec<(MarkerFamily, Occurrence<'a>)>,
}

impl<'a> DeclarationVisitor<'a> for MarkerCollector<'a> {
    fn visit_type_attribute(&mut self, _ty: &'a TypeDecl, attr: &'a AttributeData) {
        if let Some(family) = MarkerFamily::of(attr) {
            self.occurrences.push((family, Occurrence::Class(attr)));
        }
    }

    fn visit_property_attribute(
        &mut self,
        _ty: &'a TypeDecl,
        property: &'a PropertyDecl,
        attr: &'a AttributeData,
    ) {
        if let Some(family) = MarkerFamily::of(attr) {
            self.occurrences
                .push((family, Occurrence::Property(property, attr)));
        }
    }

    fn visit_method_attribute(
        &mut self,
        _ty: &'a TypeDecl,
        method: &'a MethodDecl,
        attr: &'a AttributeData,
    ) {
        if let Some(family) = MarkerFamily::of(attr) {
            self.occurrences.push((family, Occurrence::Method(method, attr)));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DISCOVERY
// ═══════════════════════════════════════════════════════════════════════════════

/// Build the emission entries of one type: at most one per family, instance
/// first. Entries without descriptors are kept when they carry diagnostics.
/// Property names are unique across both families; later duplicates are
/// dropped with an error.
pub fn discover_type(ty: &TypeDecl, symbols: &SymbolTable<'_>) -> Vec<ClassEmissionEntry> {
    if matches!(ty.kind, TypeKind::Enum | TypeKind::Interface) {
        return Vec::new();
    }

    let mut collector = MarkerCollector::default();
    collector.visit_type(ty);
    if collector.occurrences.is_empty() {
        return Vec::new();
    }
    trace!(ty = %ty.name, markers = collector.occurrences.len(), "discovered markers");

    let parser = MarkerParser::new(symbols, ty);
    let mut entries = Vec::new();
    let mut names = HashSet::new();
    for family in [MarkerFamily::Instance, MarkerFamily::Attached] {
        let mut entry = ClassEmissionEntry::new(ty, family);
        let mut seen = false;
        for (_, occurrence) in collector
            .occurrences
            .iter()
            .filter(|(f, _)| *f == family)
        {
            seen = true;
            let diagnostics = &mut entry.diagnostics;
            let descriptor = match occurrence {
                Occurrence::Class(attr) => parser.parse_class_marker(attr, diagnostics),
                Occurrence::Property(property, attr) => {
                    parser.parse_property_marker(property, attr, diagnostics)
                }
                Occurrence::Method(method, attr) => {
                    parser.parse_method_marker(method, attr, diagnostics)
                }
            };
            let Some(descriptor) = descriptor else {
                continue;
            };
            if !names.insert(descriptor.name.clone()) {
                debug!(property = %descriptor.name, "duplicate property dropped");
                entry.diagnostics.push(Diagnostic::new(
                    DiagnosticId::DuplicatePropertyName,
                    &[&descriptor.name, &ty.name],
                    descriptor.location.as_ref(),
                ));
                continue;
            }
            entry.descriptors.push(descriptor);
        }
        if seen && (entry.has_output() || !entry.diagnostics.is_empty()) {
            debug!(
                hint = %entry.hint_name,
                properties = entry.descriptors.len(),
                diagnostics = entry.diagnostics.len(),
                "built emission entry"
            );
            entries.push(entry);
        }
    }
    entries
}
