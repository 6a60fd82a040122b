//! Handler scaffolding advisories.
//!
//! A handler class marked `[BindableHandler<TView>]` maps a view to native
//! controls. When the view projects properties to the platform, every
//! platform referenced by the compilation needs a partial handler
//! implementation; one advisory per platform carries the metadata a code
//! fix needs to scaffold it.

use crate::analyzer::{AnalysisContext, Analyzer};
use crate::diagnostics::{Diagnostic, DiagnosticId};
use crate::model::{TypeDecl, TypedConstant};
use crate::parse::{MarkerFamily, ARG_PROJECT_TO_PLATFORM};
use crate::symbols::{normalize_attribute_name, MARKER_HANDLER, MARKER_PLATFORM};

#[derive(Debug, PartialEq, Eq)]
pub struct Platform {
    pub name: &'static str,
    /// Assembly whose presence in the references enables the platform.
    pub assembly: &'static str,
}

pub const PLATFORMS: &[Platform] = &[
    Platform {
        name: "Android",
        assembly: "Mono.Android",
    },
    Platform {
        name: "iOS",
        assembly: "Microsoft.iOS",
    },
    Platform {
        name: "MacCatalyst",
        assembly: "Microsoft.MacCatalyst",
    },
    Platform {
        name: "Windows",
        assembly: "Microsoft.WinUI",
    },
    Platform {
        name: "Tizen",
        assembly: "Tizen.NET",
    },
];

/// Platforms whose assembly is referenced, in table order.
pub fn present_platforms(referenced_assemblies: &[String]) -> Vec<&'static Platform> {
    PLATFORMS
        .iter()
        .filter(|p| referenced_assemblies.iter().any(|a| a == p.assembly))
        .collect()
}

pub const PROPERTY_PLATFORM: &str = "Platform";
pub const PROPERTY_VIEW_TYPE: &str = "ViewType";
pub const PROPERTY_HANDLER_TYPE: &str = "HandlerType";
pub const PROPERTY_PROPERTIES: &str = "Properties";

/// Names of the view's properties that are projected to native controls.
pub fn projected_properties(view: &TypeDecl) -> Vec<String> {
    let mut names: Vec<String> = view
        .attributes
        .iter()
        .filter(|attr| MarkerFamily::of(attr).is_some())
        .filter(|attr| {
            attr.named(ARG_PROJECT_TO_PLATFORM)
                .and_then(TypedConstant::as_bool)
                .unwrap_or(false)
        })
        .filter_map(|attr| match attr.constructor_arguments.first() {
            Some(TypedConstant::String(name)) if !name.is_empty() => Some(name.clone()),
            _ => None,
        })
        .collect();
    names.extend(
        view.properties
            .iter()
            .filter(|p| {
                p.attributes
                    .iter()
                    .any(|a| normalize_attribute_name(&a.name) == MARKER_PLATFORM)
            })
            .map(|p| p.name.clone()),
    );
    names
}

pub struct PlatformValidator;

impl Analyzer for PlatformValidator {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticId] {
        &[DiagnosticId::HandlerAddPartialPlatformClass]
    }

    fn analyze_type(&self, cx: &AnalysisContext<'_>, ty: &TypeDecl, out: &mut Vec<Diagnostic>) {
        if cx.platforms.is_empty() {
            return;
        }
        for attr in ty
            .attributes
            .iter()
            .filter(|a| normalize_attribute_name(&a.name) == MARKER_HANDLER)
        {
            let [view_type] = attr.type_arguments.as_slice() else {
                continue;
            };
            let Some(view) = cx.symbols.lookup(view_type) else {
                continue;
            };
            let properties = projected_properties(view);
            if properties.is_empty() {
                continue;
            }
            let serialized = serde_json::to_string(&properties).unwrap_or_default();
            let location = attr.location.as_ref().or(ty.location.as_ref());
            for platform in &cx.platforms {
                out.push(
                    Diagnostic::new(
                        DiagnosticId::HandlerAddPartialPlatformClass,
                        &[platform.name, &ty.name, &view.name],
                        location,
                    )
                    .with_property(PROPERTY_PLATFORM, platform.name)
                    .with_property(PROPERTY_VIEW_TYPE, view.qualified_name())
                    .with_property(PROPERTY_HANDLER_TYPE, ty.qualified_name())
                    .with_property(PROPERTY_PROPERTIES, serialized.clone()),
                );
            }
        }
    }
}
