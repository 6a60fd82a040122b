//! Symbol lookup over one compilation.

use std::collections::HashMap;

use crate::model::{Compilation, EnumMember, SpecialType, TypeDecl, TypeKind, TypeRef};

// ═══════════════════════════════════════════════════════════════════════════════
// MARKER NAMES
// ═══════════════════════════════════════════════════════════════════════════════

pub const MARKER_INSTANCE: &str = "BindableProperty";
pub const MARKER_ATTACHED: &str = "AttachedBindableProperty";
pub const MARKER_HANDLER: &str = "BindableHandler";
pub const MARKER_PLATFORM: &str = "PlatformProperty";
pub const FLAGS_ATTRIBUTE: &str = "Flags";

/// Reduce an attribute name as written or as bound to its simple marker
/// name: `global::Ns.BindablePropertyAttribute<int>` → `BindableProperty`.
pub fn normalize_attribute_name(name: &str) -> &str {
    let name = name.strip_prefix("global::").unwrap_or(name);
    let name = match name.find(['<', '`']) {
        Some(idx) => &name[..idx],
        None => name,
    };
    let name = name.rsplit('.').next().unwrap_or(name);
    match name.strip_suffix("Attribute") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

/// C# identifier check (ASCII subset plus a leading `@` escape).
pub fn is_valid_identifier(s: &str) -> bool {
    let s = s.strip_prefix('@').unwrap_or(s);
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

// ═══════════════════════════════════════════════════════════════════════════════
// SYMBOL TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Resolved view of an enum type.
#[derive(Debug, Clone, Copy)]
pub struct EnumSymbol<'a> {
    pub decl: &'a TypeDecl,
    pub underlying: SpecialType,
    pub is_flags: bool,
}

impl<'a> EnumSymbol<'a> {
    pub fn member_with_value(&self, value: i128) -> Option<&'a EnumMember> {
        self.decl
            .enum_members
            .iter()
            .find(|m| m.value as i128 == value)
    }

    /// True when `value` is made only of bits declared by some member.
    pub fn is_combination_of_members(&self, value: i128) -> bool {
        let declared = self
            .decl
            .enum_members
            .iter()
            .fold(0i128, |acc, m| acc | m.value as i128);
        value >= 0 && value & !declared == 0
    }
}

/// Built once per compilation; read-only afterwards and shared freely
/// across worker threads.
#[derive(Debug, Default)]
pub struct SymbolTable<'a> {
    by_name: HashMap<String, &'a TypeDecl>,
}

impl<'a> SymbolTable<'a> {
    pub fn new(compilation: &'a Compilation) -> Self {
        let mut by_name = HashMap::new();
        for ty in compilation
            .external_types
            .iter()
            .chain(compilation.types.iter())
        {
            // Source types shadow metadata types of the same name.
            by_name.insert(ty.metadata_name(), ty);
        }
        Self { by_name }
    }

    pub fn lookup(&self, ty: &TypeRef) -> Option<&'a TypeDecl> {
        if ty.special.is_some() || ty.type_parameter {
            return None;
        }
        self.by_name.get(ty.lookup_name()).copied()
    }

    pub fn lookup_name(&self, name: &str) -> Option<&'a TypeDecl> {
        let name = name.strip_prefix("global::").unwrap_or(name);
        self.by_name.get(name).copied()
    }

    pub fn resolve_enum(&self, ty: &TypeRef) -> Option<EnumSymbol<'a>> {
        let decl = self.lookup(ty).filter(|d| d.kind == TypeKind::Enum)?;
        Some(EnumSymbol {
            decl,
            underlying: decl.enum_underlying_type.unwrap_or(SpecialType::Int32),
            is_flags: decl.has_attribute(FLAGS_ATTRIBUTE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttributeData;

    #[test]
    fn test_normalize_attribute_name() {
        assert_eq!(normalize_attribute_name("BindableProperty"), "BindableProperty");
        assert_eq!(
            normalize_attribute_name("BindablePropertyAttribute"),
            "BindableProperty"
        );
        assert_eq!(
            normalize_attribute_name("global::Bindable.AttachedBindablePropertyAttribute<int, Host>"),
            "AttachedBindableProperty"
        );
        assert_eq!(normalize_attribute_name("Ns.BindableProperty`1"), "BindableProperty");
        assert_eq!(normalize_attribute_name("Attribute"), "Attribute");
    }

    #[test]
    fn test_identifiers() {
        assert!(is_valid_identifier("Text"));
        assert!(is_valid_identifier("_value1"));
        assert!(is_valid_identifier("@class"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier("my text"));
    }

    #[test]
    fn test_resolve_flags_enum() {
        let compilation = Compilation {
            external_types: vec![TypeDecl {
                namespace: Some("Demo".to_string()),
                name: "Edges".to_string(),
                kind: TypeKind::Enum,
                attributes: vec![AttributeData {
                    name: "System.FlagsAttribute".to_string(),
                    ..Default::default()
                }],
                enum_members: vec![
                    EnumMember { name: "Left".to_string(), value: 1 },
                    EnumMember { name: "Right".to_string(), value: 2 },
                ],
                ..Default::default()
            }],
            ..Default::default()
        };
        let symbols = SymbolTable::new(&compilation);
        let edges = symbols
            .resolve_enum(&TypeRef::named("global::Demo.Edges", true))
            .unwrap();
        assert!(edges.is_flags);
        assert_eq!(edges.underlying, SpecialType::Int32);
        assert_eq!(edges.member_with_value(2).unwrap().name, "Right");
        assert!(edges.is_combination_of_members(3));
        assert!(!edges.is_combination_of_members(4));
    }
}
