//! Finalize Module
//!
//! Wraps the generated members of an emission entry in partial type and
//! namespace declarations, names the unit and renders it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codegen::MemberGenerator;
use crate::discovery::ClassEmissionEntry;
use crate::model::{TypeDecl, TypeHeader};
use crate::options::GeneratorOptions;
use crate::parse::MarkerFamily;
use crate::syntax::{CompilationUnit, TypeWrapper};

pub const HINT_EXTENSION: &str = ".g.cs";
pub const ATTACHED_SUFFIX: &str = "-Attached";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUnit {
    pub hint_name: String,
    pub text: String,
    /// Lowercase hex SHA-256 of `text`.
    pub hash: String,
}

pub fn compute_hash(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT IDENTIFIER
// ═══════════════════════════════════════════════════════════════════════════════

fn push_segment(out: &mut String, name: &str, arity: usize) {
    out.push_str(name);
    if arity > 0 {
        out.push('`');
        out.push_str(&arity.to_string());
    }
}

/// `{namespace}.{Outer}+{Inner}+{Name}` with `` `N `` on generic segments,
/// `-Attached` for the attached family and the `.g.cs` extension.
///
/// Namespaces and identifiers never contain `+`, `` ` `` or `-`, and the
/// type chain never contains `.`, so distinct types cannot collide.
pub fn hint_name(ty: &TypeDecl, family: MarkerFamily) -> String {
    let mut out = String::new();
    if let Some(ns) = ty.namespace.as_deref().filter(|ns| !ns.is_empty()) {
        out.push_str(ns);
        out.push('.');
    }
    for TypeHeader {
        name,
        type_parameters,
        ..
    } in &ty.containing_types
    {
        push_segment(&mut out, name, type_parameters.len());
        out.push('+');
    }
    push_segment(&mut out, &ty.name, ty.type_parameters.len());
    if family == MarkerFamily::Attached {
        out.push_str(ATTACHED_SUFFIX);
    }
    out.push_str(HINT_EXTENSION);
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// RENDERING
// ═══════════════════════════════════════════════════════════════════════════════

/// Render one entry; `None` when it has nothing to emit.
pub fn render_entry(entry: &ClassEmissionEntry, options: &GeneratorOptions) -> Option<SourceUnit> {
    if !entry.has_output() {
        return None;
    }

    let generator = MemberGenerator::new(options);
    let mut members = Vec::new();
    for descriptor in &entry.descriptors {
        generator.generate(descriptor, &mut members);
    }

    // Outermost first for printing.
    let mut wrappers: Vec<TypeWrapper> = entry
        .containing_types
        .iter()
        .rev()
        .map(|header| TypeWrapper {
            keyword: header.kind.keyword(),
            name: header.name.clone(),
            type_parameters: header.type_parameters.clone(),
        })
        .collect();
    wrappers.push(TypeWrapper {
        keyword: entry.kind.keyword(),
        name: entry.name.clone(),
        type_parameters: entry.type_parameters.clone(),
    });

    let text = CompilationUnit {
        nullable_directive: options.nullable_directive,
        namespace: entry.namespace.clone(),
        wrappers,
        members,
    }
    .render();

    Some(SourceUnit {
        hint_name: entry.hint_name.clone(),
        hash: compute_hash(&text),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::model::TypeKind;

    #[test]
    fn test_hint_name_scheme() {
        let mut ty = class("Demo.Controls", "Inner", vec![]);
        ty.type_parameters = vec!["T".to_string()];
        ty.containing_types = vec![
            header("Outer"),
            TypeHeader {
                name: "Middle".to_string(),
                kind: TypeKind::Struct,
                type_parameters: vec!["A".to_string(), "B".to_string()],
            },
        ];
        assert_eq!(
            hint_name(&ty, MarkerFamily::Instance),
            "Demo.Controls.Outer+Middle`2+Inner`1.g.cs"
        );
        assert_eq!(
            hint_name(&ty, MarkerFamily::Attached),
            "Demo.Controls.Outer+Middle`2+Inner`1-Attached.g.cs"
        );
    }

    #[test]
    fn test_hint_name_global_namespace() {
        let mut ty = class("", "Label", vec![]);
        ty.namespace = None;
        assert_eq!(hint_name(&ty, MarkerFamily::Instance), "Label.g.cs");
    }

    #[test]
    fn test_nested_and_generic_types_are_distinct() {
        // `Outer.Inner` nested vs. a namespace-level `Inner` in `Demo.Outer`.
        let mut nested = class("Demo", "Inner", vec![]);
        nested.containing_types = vec![header("Outer")];
        let flat = class("Demo.Outer", "Inner", vec![]);
        let mut generic = class("Demo", "Inner", vec![]);
        generic.type_parameters = vec!["T".to_string()];
        let plain = class("Demo", "Inner", vec![]);

        let names = [
            hint_name(&nested, MarkerFamily::Instance),
            hint_name(&flat, MarkerFamily::Instance),
            hint_name(&generic, MarkerFamily::Instance),
            hint_name(&plain, MarkerFamily::Instance),
        ];
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_hash_is_sha256_hex() {
        assert_eq!(
            compute_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
