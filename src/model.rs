//! Declaration model exported by the host compiler front-end.
//!
//! The host owns the real semantic model. It flattens every type that may
//! carry markers into these records (serde, camelCase JSON) and hands them
//! to the pipeline. Nothing here is mutated after deserialization.

use serde::{Deserialize, Serialize};

use crate::options::GeneratorOptions;

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILATION
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Compilation {
    #[serde(default)]
    pub assembly_name: String,
    #[serde(default)]
    pub referenced_assemblies: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    /// Metadata-only types (enums from referenced assemblies and the like).
    /// Resolvable through the symbol table, never scanned for markers.
    #[serde(default)]
    pub external_types: Vec<TypeDecl>,
    #[serde(default)]
    pub options: GeneratorOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Record,
    Interface,
    Enum,
}

impl TypeKind {
    /// Keyword used when re-declaring the type as a partial.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Record => "record",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHeader {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub type_parameters: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Enclosing types, outermost first.
    #[serde(default)]
    pub containing_types: Vec<TypeHeader>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub enum_underlying_type: Option<SpecialType>,
    #[serde(default)]
    pub enum_members: Vec<EnumMember>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl TypeDecl {
    /// Dotted name without type arguments, e.g. `Demo.Outer.Inner`.
    /// This is the key the symbol table resolves `TypeRef::name` against.
    pub fn metadata_name(&self) -> String {
        let mut segments: Vec<&str> = Vec::new();
        if let Some(ns) = self.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            segments.push(ns);
        }
        segments.extend(self.containing_types.iter().map(|t| t.name.as_str()));
        segments.push(&self.name);
        segments.join(".")
    }

    /// Fully qualified reference usable in generated code, including the
    /// type parameters of every enclosing generic type.
    pub fn qualified_name(&self) -> String {
        let mut out = String::from("global::");
        if let Some(ns) = self.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            out.push_str(ns);
            out.push('.');
        }
        for header in &self.containing_types {
            out.push_str(&header.name);
            push_type_parameters(&mut out, &header.type_parameters);
            out.push('.');
        }
        out.push_str(&self.name);
        push_type_parameters(&mut out, &self.type_parameters);
        out
    }

    /// The declaring type as a reference, for `typeof` and casts.
    pub fn type_ref(&self) -> TypeRef {
        TypeRef {
            name: self.qualified_name(),
            special: None,
            is_value_type: matches!(self.kind, TypeKind::Struct | TypeKind::Enum),
            nullable: false,
            type_parameter: false,
        }
    }

    pub fn is_reference_type(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Class | TypeKind::Record | TypeKind::Interface
        )
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| crate::symbols::normalize_attribute_name(&a.name) == name)
    }
}

fn push_type_parameters(out: &mut String, params: &[String]) {
    if !params.is_empty() {
        out.push('<');
        out.push_str(&params.join(", "));
        out.push('>');
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TYPE REFERENCES
// ═══════════════════════════════════════════════════════════════════════════════

/// Primitive classification of a type, named by its C# keyword.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum SpecialType {
    #[serde(rename = "bool")]
    #[strum(serialize = "bool")]
    Boolean,
    #[serde(rename = "char")]
    #[strum(serialize = "char")]
    Char,
    #[serde(rename = "sbyte")]
    #[strum(serialize = "sbyte")]
    SByte,
    #[serde(rename = "byte")]
    #[strum(serialize = "byte")]
    Byte,
    #[serde(rename = "short")]
    #[strum(serialize = "short")]
    Int16,
    #[serde(rename = "ushort")]
    #[strum(serialize = "ushort")]
    UInt16,
    #[serde(rename = "int")]
    #[strum(serialize = "int")]
    Int32,
    #[serde(rename = "uint")]
    #[strum(serialize = "uint")]
    UInt32,
    #[serde(rename = "long")]
    #[strum(serialize = "long")]
    Int64,
    #[serde(rename = "ulong")]
    #[strum(serialize = "ulong")]
    UInt64,
    #[serde(rename = "float")]
    #[strum(serialize = "float")]
    Single,
    #[serde(rename = "double")]
    #[strum(serialize = "double")]
    Double,
    #[serde(rename = "decimal")]
    #[strum(serialize = "decimal")]
    Decimal,
    #[serde(rename = "string")]
    #[strum(serialize = "string")]
    String,
    #[serde(rename = "object")]
    #[strum(serialize = "object")]
    Object,
}

impl SpecialType {
    pub fn is_reference_type(self) -> bool {
        matches!(self, SpecialType::String | SpecialType::Object)
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            SpecialType::SByte
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::UInt16
                | SpecialType::Int32
                | SpecialType::UInt32
                | SpecialType::Int64
                | SpecialType::UInt64
        )
    }

    pub fn is_floating(self) -> bool {
        matches!(
            self,
            SpecialType::Single | SpecialType::Double | SpecialType::Decimal
        )
    }

    /// Inclusive value range of an integral kind.
    pub fn integral_range(self) -> Option<(i128, i128)> {
        let range = match self {
            SpecialType::SByte => (i8::MIN as i128, i8::MAX as i128),
            SpecialType::Byte => (0, u8::MAX as i128),
            SpecialType::Int16 => (i16::MIN as i128, i16::MAX as i128),
            SpecialType::UInt16 | SpecialType::Char => (0, u16::MAX as i128),
            SpecialType::Int32 => (i32::MIN as i128, i32::MAX as i128),
            SpecialType::UInt32 => (0, u32::MAX as i128),
            SpecialType::Int64 => (i64::MIN as i128, i64::MAX as i128),
            SpecialType::UInt64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }
}

/// A nominal type handle as seen by the host's semantic model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Dotted name, optionally prefixed with `global::` and carrying type
    /// arguments. Ignored for display when `special` is set.
    pub name: String,
    #[serde(default)]
    pub special: Option<SpecialType>,
    #[serde(default)]
    pub is_value_type: bool,
    /// Nullable annotation (`T?`).
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub type_parameter: bool,
}

impl TypeRef {
    pub fn special(special: SpecialType) -> Self {
        TypeRef {
            name: special.to_string(),
            special: Some(special),
            is_value_type: !special.is_reference_type(),
            nullable: false,
            type_parameter: false,
        }
    }

    pub fn named(name: &str, is_value_type: bool) -> Self {
        TypeRef {
            name: name.to_string(),
            special: None,
            is_value_type,
            nullable: false,
            type_parameter: false,
        }
    }

    /// Name without `global::` or type arguments, for symbol lookup.
    pub fn lookup_name(&self) -> &str {
        let name = self.name.strip_prefix("global::").unwrap_or(&self.name);
        match name.find('<') {
            Some(idx) => &name[..idx],
            None => name,
        }
    }

    /// Rendering without the nullable annotation, as required inside
    /// `typeof(...)` for reference types.
    pub fn display_unannotated(&self) -> String {
        if let Some(special) = self.special {
            return special.to_string();
        }
        if self.type_parameter || self.name.starts_with("global::") {
            return self.name.clone();
        }
        format!("global::{}", self.name)
    }

    pub fn display(&self) -> String {
        let base = self.display_unannotated();
        if self.nullable {
            format!("{}?", base)
        } else {
            base
        }
    }

    /// Rendering legal inside `typeof(...)`.
    pub fn display_for_typeof(&self) -> String {
        if self.nullable && self.is_value_type {
            self.display()
        } else {
            self.display_unannotated()
        }
    }

    /// A reference type that is not annotated nullable. Unconstrained type
    /// parameters are not considered.
    pub fn is_non_nullable_reference(&self) -> bool {
        !self.is_value_type && !self.nullable && !self.type_parameter
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTES
// ═══════════════════════════════════════════════════════════════════════════════

/// An attribute argument as the host evaluated it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum TypedConstant {
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "bool")]
    Bool(bool),
    #[serde(rename = "char")]
    Char(char),
    #[serde(rename = "sbyte")]
    SByte(i8),
    #[serde(rename = "byte")]
    Byte(u8),
    #[serde(rename = "short")]
    Int16(i16),
    #[serde(rename = "ushort")]
    UInt16(u16),
    #[serde(rename = "int")]
    Int32(i32),
    #[serde(rename = "uint")]
    UInt32(u32),
    #[serde(rename = "long")]
    Int64(i64),
    #[serde(rename = "ulong")]
    UInt64(u64),
    #[serde(rename = "float")]
    Single(f32),
    #[serde(rename = "double")]
    Double(f64),
    #[serde(rename = "string")]
    String(String),
    #[serde(rename = "type")]
    Type(TypeRef),
    #[serde(rename = "enum")]
    Enum {
        #[serde(rename = "typeName")]
        type_name: String,
        value: i64,
    },
}

impl TypedConstant {
    /// Integral payload of integral, char and enum constants.
    pub fn as_integer(&self) -> Option<i128> {
        let value = match self {
            TypedConstant::Char(c) => *c as u32 as i128,
            TypedConstant::SByte(v) => *v as i128,
            TypedConstant::Byte(v) => *v as i128,
            TypedConstant::Int16(v) => *v as i128,
            TypedConstant::UInt16(v) => *v as i128,
            TypedConstant::Int32(v) => *v as i128,
            TypedConstant::UInt32(v) => *v as i128,
            TypedConstant::Int64(v) => *v as i128,
            TypedConstant::UInt64(v) => *v as i128,
            TypedConstant::Enum { value, .. } => *value as i128,
            _ => return None,
        };
        Some(value)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedConstant::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedConstant::Null)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedArgument {
    pub name: String,
    pub value: TypedConstant,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AttributeData {
    pub name: String,
    #[serde(default)]
    pub type_arguments: Vec<TypeRef>,
    #[serde(default)]
    pub constructor_arguments: Vec<TypedConstant>,
    #[serde(default)]
    pub named_arguments: Vec<NamedArgument>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl AttributeData {
    /// Last value supplied for a named argument.
    pub fn named(&self, key: &str) -> Option<&TypedConstant> {
        self.named_arguments
            .iter()
            .rev()
            .find(|arg| arg.name == key)
            .map(|arg| &arg.value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MEMBERS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccessorDecl {
    /// Absent for auto accessors (`get;`).
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_indexer: bool,
    #[serde(default)]
    pub getter: Option<AccessorDecl>,
    #[serde(default)]
    pub setter: Option<AccessorDecl>,
    /// `=> expr` shorthand for a get-only property.
    #[serde(default)]
    pub expression_body: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl PropertyDecl {
    /// No hand-written accessor bodies at all.
    pub fn is_auto_implemented(&self) -> bool {
        self.expression_body.is_none()
            && self.getter.as_ref().map_or(true, |a| a.body.is_none())
            && self.setter.as_ref().map_or(true, |a| a.body.is_none())
    }

    pub fn has_setter(&self) -> bool {
        self.expression_body.is_none() && self.setter.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    /// Absent for `void`.
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}
