//! Checks that hand-written accessors carrying a marker actually go through
//! the generated bindable property.

use crate::analyzer::{references_identifier, AnalysisContext, Analyzer};
use crate::diagnostics::{Diagnostic, DiagnosticId};
use crate::framework::{key_field_name, property_field_name};
use crate::model::{AttributeData, MethodDecl, PropertyDecl, TypeDecl};
use crate::parse::{attached_property_name, find_attached_setter, MarkerFamily};
use crate::visitor::DeclarationVisitor;

pub struct UsageValidator;

impl Analyzer for UsageValidator {
    fn name(&self) -> &'static str {
        "usage"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticId] {
        &[
            DiagnosticId::AttachedPropertyNotUsed,
            DiagnosticId::InstancePropertyNotUsed,
            DiagnosticId::InstanceToAttached,
            DiagnosticId::StaticProperty,
            DiagnosticId::AttributeOnIndexer,
        ]
    }

    fn analyze_type(&self, _cx: &AnalysisContext<'_>, ty: &TypeDecl, out: &mut Vec<Diagnostic>) {
        UsageVisitor { out }.visit_type(ty);
    }
}

struct UsageVisitor<'o> {
    out: &'o mut Vec<Diagnostic>,
}

impl<'a, 'o> DeclarationVisitor<'a> for UsageVisitor<'o> {
    fn visit_property_attribute(
        &mut self,
        _ty: &'a TypeDecl,
        property: &'a PropertyDecl,
        attr: &'a AttributeData,
    ) {
        let location = attr.location.as_ref().or(property.location.as_ref());
        match MarkerFamily::of(attr) {
            Some(MarkerFamily::Instance) => {
                if property.is_indexer {
                    self.out
                        .push(Diagnostic::new(DiagnosticId::AttributeOnIndexer, &[], location));
                } else if property.is_static {
                    self.out.push(Diagnostic::new(
                        DiagnosticId::StaticProperty,
                        &[&property.name],
                        location,
                    ));
                } else if !wires_instance_property(property) {
                    self.out.push(Diagnostic::new(
                        DiagnosticId::InstancePropertyNotUsed,
                        &[&property.name, &property_field_name(&property.name)],
                        location,
                    ));
                }
            }
            Some(MarkerFamily::Attached) => {
                if property.is_static {
                    self.out.push(Diagnostic::new(
                        DiagnosticId::StaticProperty,
                        &[&property.name],
                        location,
                    ));
                }
                self.out.push(Diagnostic::new(
                    DiagnosticId::InstanceToAttached,
                    &[&property.name],
                    location,
                ));
            }
            None => {}
        }
    }

    fn visit_method_attribute(
        &mut self,
        ty: &'a TypeDecl,
        method: &'a MethodDecl,
        attr: &'a AttributeData,
    ) {
        if MarkerFamily::of(attr) != Some(MarkerFamily::Attached) || !method.is_static {
            return;
        }
        let Some(name) = attached_property_name(&method.name) else {
            return;
        };
        let field = property_field_name(name);
        let getter_reads = method
            .body
            .as_deref()
            .is_some_and(|body| references_identifier(body, &field));
        if getter_reads {
            return;
        }
        let setter_writes = find_attached_setter(ty, name)
            .and_then(|setter| setter.body.as_deref())
            .is_some_and(|body| {
                references_identifier(body, &field) || references_identifier(body, &key_field_name(name))
            });
        if !setter_writes {
            self.out.push(Diagnostic::new(
                DiagnosticId::AttachedPropertyNotUsed,
                &[&method.name, &field],
                attr.location.as_ref().or(method.location.as_ref()),
            ));
        }
    }
}

/// Every accessor of a hand-written property references the generated
/// field; the setter may use the key instead.
fn wires_instance_property(property: &PropertyDecl) -> bool {
    if property.is_auto_implemented() {
        return false;
    }
    let field = property_field_name(&property.name);
    let key = key_field_name(&property.name);

    let getter_body = property
        .expression_body
        .as_deref()
        .or_else(|| property.getter.as_ref().and_then(|g| g.body.as_deref()));
    let getter_ok = match (&property.getter, getter_body) {
        (_, Some(body)) => references_identifier(body, &field),
        (None, None) => true,
        (Some(_), None) => false,
    };
    let setter_ok = match property.setter.as_ref().filter(|_| property.expression_body.is_none()) {
        Some(setter) => setter.body.as_deref().is_some_and(|body| {
            references_identifier(body, &field) || references_identifier(body, &key)
        }),
        None => true,
    };
    getter_ok && setter_ok
}
