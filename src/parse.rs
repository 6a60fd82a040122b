//! Marker parsing.
//!
//! Turns one marker occurrence into a [`PropertyDescriptor`]. User mistakes
//! become diagnostics; a hard failure drops only the occurrence at hand and
//! never its siblings. Shape mismatches (wrong generic arity, marker on an
//! unsupported member) are skipped without a diagnostic.

use tracing::debug;

use crate::access::{BindingMode, DefaultMode, Visibility};
use crate::conversion::{convert_default_value, describe_constant};
use crate::descriptor::{MarkerKind, MarkerSite, PropertyDescriptor};
use crate::diagnostics::{Diagnostic, DiagnosticId};
use crate::model::{
    AttributeData, MethodDecl, PropertyDecl, SourceLocation, TypeDecl, TypeRef, TypedConstant,
};
use crate::symbols::{
    is_valid_identifier, normalize_attribute_name, SymbolTable, MARKER_ATTACHED, MARKER_INSTANCE,
};

// ═══════════════════════════════════════════════════════════════════════════════
// NAMED ARGUMENTS
// ═══════════════════════════════════════════════════════════════════════════════

pub const ARG_DEFAULT_MODE: &str = "DefaultMode";
pub const ARG_VISIBILITY: &str = "Visibility";
pub const ARG_WRITE_VISIBILITY: &str = "WriteVisibility";
pub const ARG_DEFAULT_VALUE: &str = "DefaultValue";
pub const ARG_DEFAULT_VALUE_FACTORY: &str = "DefaultValueFactory";
pub const ARG_COERCE_VALUE_CALLBACK: &str = "CoerceValueCallback";
pub const ARG_VALIDATE_VALUE_CALLBACK: &str = "ValidateValueCallback";
pub const ARG_IS_READ_ONLY: &str = "IsReadOnly";
pub const ARG_PROJECT_TO_PLATFORM: &str = "ProjectToPlatform";

/// Prefix of attached getter methods (`GetX`).
pub const GETTER_PREFIX: &str = "Get";
pub const SETTER_PREFIX: &str = "Set";

/// Marker variant of an attribute, by normalized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerFamily {
    Instance,
    Attached,
}

impl MarkerFamily {
    pub fn of(attr: &AttributeData) -> Option<Self> {
        match normalize_attribute_name(&attr.name) {
            MARKER_INSTANCE => Some(MarkerFamily::Instance),
            MARKER_ATTACHED => Some(MarkerFamily::Attached),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERIC ARGUMENT EXTRACTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Property type of a class-level instance marker (`BindableProperty<T>`).
pub fn instance_type_arguments(attr: &AttributeData) -> Option<&TypeRef> {
    match attr.type_arguments.as_slice() {
        [property_type] => Some(property_type),
        _ => None,
    }
}

/// Property and host types of a class-level attached marker
/// (`AttachedBindableProperty<T, THost>`).
pub fn attached_type_arguments(attr: &AttributeData) -> Option<(&TypeRef, &TypeRef)> {
    match attr.type_arguments.as_slice() {
        [property_type, host] => Some((property_type, host)),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARSER
// ═══════════════════════════════════════════════════════════════════════════════

/// Parser for the markers of one declaring type. Built fresh per type.
pub struct MarkerParser<'a> {
    symbols: &'a SymbolTable<'a>,
    declaring: &'a TypeDecl,
}

impl<'a> MarkerParser<'a> {
    pub fn new(symbols: &'a SymbolTable<'a>, declaring: &'a TypeDecl) -> Self {
        Self { symbols, declaring }
    }

    /// Class-level marker: `[BindableProperty<T>("Name")]` or
    /// `[AttachedBindableProperty<T, THost>("Name")]` on the type itself.
    pub fn parse_class_marker(
        &self,
        attr: &AttributeData,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<PropertyDescriptor> {
        let (property_type, kind) = match MarkerFamily::of(attr)? {
            MarkerFamily::Instance => (instance_type_arguments(attr)?, MarkerKind::Instance),
            MarkerFamily::Attached => {
                let (property_type, host) = attached_type_arguments(attr)?;
                (property_type, MarkerKind::Attached { host: host.clone() })
            }
        };
        let location = attr.location.as_ref().or(self.declaring.location.as_ref());

        let name = match attr.constructor_arguments.first() {
            Some(TypedConstant::String(name)) if !name.is_empty() => name.as_str(),
            _ => {
                debug!(ty = %self.declaring.name, "marker without property name");
                diagnostics.push(Diagnostic::new(
                    DiagnosticId::EmptyPropertyName,
                    &[&self.declaring.name],
                    location,
                ));
                return None;
            }
        };
        if !is_valid_identifier(name) {
            diagnostics.push(Diagnostic::new(
                DiagnosticId::InvalidPropertyName,
                &[name],
                location,
            ));
            return None;
        }

        let descriptor = PropertyDescriptor::new(
            name,
            property_type.clone(),
            self.declaring.type_ref(),
            kind,
            MarkerSite::Class,
        );
        self.finish(descriptor, attr, location, diagnostics)
    }

    /// Member-level instance marker on a hand-written property.
    pub fn parse_property_marker(
        &self,
        property: &PropertyDecl,
        attr: &AttributeData,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<PropertyDescriptor> {
        // Attached markers on properties, static properties and indexers
        // are usage errors reported by the analyzers.
        if MarkerFamily::of(attr)? != MarkerFamily::Instance
            || !attr.type_arguments.is_empty()
            || property.is_static
            || property.is_indexer
        {
            return None;
        }
        let location = attr.location.as_ref().or(property.location.as_ref());
        let mut descriptor = PropertyDescriptor::new(
            &property.name,
            property.ty.clone(),
            self.declaring.type_ref(),
            MarkerKind::Instance,
            MarkerSite::Member,
        );
        descriptor.is_read_only = !property.has_setter();
        self.finish(descriptor, attr, location, diagnostics)
    }

    /// Member-level attached marker on a static `GetX(THost)` method.
    pub fn parse_method_marker(
        &self,
        method: &MethodDecl,
        attr: &AttributeData,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<PropertyDescriptor> {
        if MarkerFamily::of(attr)? != MarkerFamily::Attached
            || !attr.type_arguments.is_empty()
            || !method.is_static
        {
            return None;
        }
        let name = attached_property_name(&method.name)?;
        let property_type = method.return_type.as_ref()?;
        let host = match method.parameters.as_slice() {
            [host] => &host.ty,
            _ => return None,
        };
        let location = attr.location.as_ref().or(method.location.as_ref());
        let mut descriptor = PropertyDescriptor::new(
            name,
            property_type.clone(),
            self.declaring.type_ref(),
            MarkerKind::Attached { host: host.clone() },
            MarkerSite::Member,
        );
        descriptor.is_read_only = find_attached_setter(self.declaring, name).is_none();
        self.finish(descriptor, attr, location, diagnostics)
    }

    /// Apply named arguments and run the post-checks shared by all sites.
    fn finish(
        &self,
        mut descriptor: PropertyDescriptor,
        attr: &AttributeData,
        location: Option<&SourceLocation>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<PropertyDescriptor> {
        descriptor.location = location.cloned();
        let name = descriptor.name.clone();
        let mut explicit_default: Option<&TypedConstant> = None;

        for arg in &attr.named_arguments {
            let value = &arg.value;
            match arg.name.as_str() {
                ARG_DEFAULT_MODE => match value.as_integer() {
                    Some(raw) => match BindingMode::from_raw(raw) {
                        Some(mode) => descriptor.default_mode = DefaultMode::Known(mode),
                        None => {
                            diagnostics.push(Diagnostic::new(
                                DiagnosticId::InvalidDefaultMode,
                                &[&describe_constant(value), &name],
                                location,
                            ));
                            descriptor.default_mode = DefaultMode::Raw(raw);
                        }
                    },
                    None => diagnostics.push(Diagnostic::new(
                        DiagnosticId::InvalidDefaultMode,
                        &[&describe_constant(value), &name],
                        location,
                    )),
                },
                ARG_VISIBILITY => match parse_visibility(value) {
                    Some(visibility) => descriptor.get_visibility = visibility,
                    None => diagnostics.push(invalid_visibility(value, ARG_VISIBILITY, &name, location)),
                },
                ARG_WRITE_VISIBILITY => match parse_visibility(value) {
                    Some(visibility) => descriptor.set_visibility = Some(visibility),
                    None => diagnostics.push(invalid_visibility(
                        value,
                        ARG_WRITE_VISIBILITY,
                        &name,
                        location,
                    )),
                },
                ARG_DEFAULT_VALUE => explicit_default = Some(value),
                ARG_DEFAULT_VALUE_FACTORY => {
                    descriptor.has_default_value_factory = value.as_bool().unwrap_or(false)
                }
                ARG_COERCE_VALUE_CALLBACK => {
                    descriptor.has_coerce_callback = value.as_bool().unwrap_or(false)
                }
                ARG_VALIDATE_VALUE_CALLBACK => {
                    descriptor.has_validate_callback = value.as_bool().unwrap_or(false)
                }
                ARG_IS_READ_ONLY => {
                    descriptor.is_read_only |= value.as_bool().unwrap_or(false)
                }
                _ => {}
            }
        }

        if descriptor.set_visibility == Some(descriptor.get_visibility) {
            diagnostics.push(Diagnostic::new(
                DiagnosticId::RedundantWriteVisibility,
                &[&name],
                location,
            ));
        }

        match explicit_default {
            // An explicit null next to a factory leaves the factory in charge.
            Some(value) if value.is_null() && descriptor.has_default_value_factory => {}
            Some(value) => {
                if descriptor.has_default_value_factory {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticId::DefaultValueAndFactory,
                        &[&name],
                        location,
                    ));
                }
                match convert_default_value(value, &descriptor.property_type, self.symbols) {
                    Some(expr) => descriptor.default_value = Some(expr),
                    None => {
                        debug!(property = %name, "default value not convertible");
                        diagnostics.push(Diagnostic::new(
                            DiagnosticId::DefaultValueNotSupported,
                            &[
                                &describe_constant(value),
                                &descriptor.property_type.display(),
                                &name,
                            ],
                            location,
                        ));
                        return None;
                    }
                }
            }
            None => {}
        }

        Some(descriptor)
    }
}

fn parse_visibility(value: &TypedConstant) -> Option<Visibility> {
    value.as_integer().and_then(Visibility::from_raw)
}

fn invalid_visibility(
    value: &TypedConstant,
    argument: &str,
    property: &str,
    location: Option<&SourceLocation>,
) -> Diagnostic {
    Diagnostic::new(
        DiagnosticId::InvalidVisibility,
        &[&describe_constant(value), argument, property],
        location,
    )
}

/// `GetFoo` → `Foo`.
pub fn attached_property_name(getter: &str) -> Option<&str> {
    getter
        .strip_prefix(GETTER_PREFIX)
        .filter(|rest| is_valid_identifier(rest))
}

/// Static `SetX(THost, T)` companion of an attached getter.
pub fn find_attached_setter<'t>(declaring: &'t TypeDecl, name: &str) -> Option<&'t MethodDecl> {
    let setter_name = format!("{}{}", SETTER_PREFIX, name);
    declaring
        .methods
        .iter()
        .find(|m| m.is_static && m.name == setter_name && m.parameters.len() == 2)
}
