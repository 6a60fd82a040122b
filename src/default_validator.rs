//! Non-nullable reference-typed properties need a default.

use crate::analyzer::{AnalysisContext, Analyzer};
use crate::diagnostics::{Diagnostic, DiagnosticId};
use crate::model::{
    AttributeData, MethodDecl, PropertyDecl, SourceLocation, TypeDecl, TypeRef, TypedConstant,
};
use crate::parse::{
    attached_property_name, attached_type_arguments, instance_type_arguments, MarkerFamily,
    ARG_DEFAULT_VALUE, ARG_DEFAULT_VALUE_FACTORY,
};
use crate::visitor::DeclarationVisitor;

pub struct DefaultValueValidator;

impl Analyzer for DefaultValueValidator {
    fn name(&self) -> &'static str {
        "default-value"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticId] {
        &[DiagnosticId::DefaultValueNull]
    }

    fn analyze_type(&self, _cx: &AnalysisContext<'_>, ty: &TypeDecl, out: &mut Vec<Diagnostic>) {
        DefaultVisitor { out }.visit_type(ty);
    }
}

/// The marker provides a non-null default or asks for a factory.
fn supplies_default(attr: &AttributeData) -> bool {
    let explicit = attr
        .named(ARG_DEFAULT_VALUE)
        .is_some_and(|value| !value.is_null());
    let factory = attr
        .named(ARG_DEFAULT_VALUE_FACTORY)
        .and_then(TypedConstant::as_bool)
        .unwrap_or(false);
    explicit || factory
}

struct DefaultVisitor<'o> {
    out: &'o mut Vec<Diagnostic>,
}

impl DefaultVisitor<'_> {
    fn check(
        &mut self,
        name: &str,
        ty: &TypeRef,
        attr: &AttributeData,
        fallback: Option<&SourceLocation>,
    ) {
        if ty.is_non_nullable_reference() && !supplies_default(attr) {
            self.out.push(Diagnostic::new(
                DiagnosticId::DefaultValueNull,
                &[name, &ty.display()],
                attr.location.as_ref().or(fallback),
            ));
        }
    }
}

impl<'a> DeclarationVisitor<'a> for DefaultVisitor<'_> {
    fn visit_type_attribute(&mut self, ty: &'a TypeDecl, attr: &'a AttributeData) {
        let property_type = match MarkerFamily::of(attr) {
            Some(MarkerFamily::Instance) => instance_type_arguments(attr),
            Some(MarkerFamily::Attached) => attached_type_arguments(attr).map(|(t, _)| t),
            None => None,
        };
        let name = match attr.constructor_arguments.first() {
            Some(TypedConstant::String(name)) if !name.is_empty() => name,
            _ => return,
        };
        if let Some(property_type) = property_type {
            self.check(name, property_type, attr, ty.location.as_ref());
        }
    }

    fn visit_property_attribute(
        &mut self,
        _ty: &'a TypeDecl,
        property: &'a PropertyDecl,
        attr: &'a AttributeData,
    ) {
        if MarkerFamily::of(attr) == Some(MarkerFamily::Instance)
            && !property.is_static
            && !property.is_indexer
        {
            self.check(&property.name, &property.ty, attr, property.location.as_ref());
        }
    }

    fn visit_method_attribute(
        &mut self,
        _ty: &'a TypeDecl,
        method: &'a MethodDecl,
        attr: &'a AttributeData,
    ) {
        if MarkerFamily::of(attr) != Some(MarkerFamily::Attached) || !method.is_static {
            return;
        }
        if let (Some(name), Some(return_type)) =
            (attached_property_name(&method.name), method.return_type.as_ref())
        {
            self.check(name, return_type, attr, method.location.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::symbols::MARKER_INSTANCE;

    fn analyze(ty: TypeDecl) -> Vec<Diagnostic> {
        let compilation = compilation_with(ty);
        let cx = AnalysisContext::new(&compilation);
        let mut out = Vec::new();
        DefaultValueValidator.analyze_type(&cx, &compilation.types[0], &mut out);
        out
    }

    #[test]
    fn test_non_nullable_string_without_default() {
        let out = analyze(class(
            "Demo",
            "Label",
            vec![instance_marker("Text", string_type(), vec![])],
        ));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, DiagnosticId::DefaultValueNull);
        assert_eq!(
            out[0].message,
            "Property 'Text' of non-nullable type 'string' needs a DefaultValue or DefaultValueFactory"
        );
    }

    #[test]
    fn test_default_or_factory_satisfies() {
        let with_default = instance_marker(
            "Text",
            string_type(),
            vec![named(ARG_DEFAULT_VALUE, TypedConstant::String(String::new()))],
        );
        let with_factory = instance_marker(
            "Title",
            string_type(),
            vec![named(ARG_DEFAULT_VALUE_FACTORY, TypedConstant::Bool(true))],
        );
        let null_default = instance_marker(
            "Hint",
            string_type(),
            vec![named(ARG_DEFAULT_VALUE, TypedConstant::Null)],
        );
        let out = analyze(class(
            "Demo",
            "Label",
            vec![with_default, with_factory, null_default],
        ));
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("'Hint'"));
    }

    #[test]
    fn test_nullable_value_and_generic_types_are_exempt() {
        let mut nullable = string_type();
        nullable.nullable = true;
        let mut generic = TypeRef::named("T", false);
        generic.type_parameter = true;
        let out = analyze(class(
            "Demo",
            "Label",
            vec![
                instance_marker("A", nullable, vec![]),
                instance_marker("B", int_type(), vec![]),
                instance_marker("C", generic, vec![]),
            ],
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_member_level_markers() {
        let mut ty = class("Demo", "Label", vec![]);
        let mut caption = bodied_property("Caption", string_type(), true);
        caption.attributes.push(member_marker(MARKER_INSTANCE));
        ty.properties.push(caption);
        ty.methods.push(attached_getter("Tag", string_type(), host_type()));
        let out = analyze(ty);
        let names: Vec<&str> = out.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(out.len(), 2, "{:?}", names);
        assert!(out[0].message.contains("'Caption'"));
        assert!(out[1].message.contains("'Tag'"));
    }
}
