//! Model builders shared by the unit and scenario tests.

use crate::model::{
    AccessorDecl, AttributeData, Compilation, MethodDecl, NamedArgument, ParameterDecl,
    PropertyDecl, SpecialType, TypeDecl, TypeHeader, TypeKind, TypeRef, TypedConstant,
};
use crate::symbols::{MARKER_ATTACHED, MARKER_INSTANCE};

pub fn string_type() -> TypeRef {
    TypeRef::special(SpecialType::String)
}

pub fn int_type() -> TypeRef {
    TypeRef::special(SpecialType::Int32)
}

pub fn bool_type() -> TypeRef {
    TypeRef::special(SpecialType::Boolean)
}

pub fn host_type() -> TypeRef {
    TypeRef::named("Microsoft.Maui.Controls.View", false)
}

pub fn named(key: &str, value: TypedConstant) -> NamedArgument {
    NamedArgument {
        name: key.to_string(),
        value,
    }
}

/// `[BindableProperty<ty>(name, ...)]` on a class.
pub fn instance_marker(name: &str, ty: TypeRef, named: Vec<NamedArgument>) -> AttributeData {
    AttributeData {
        name: MARKER_INSTANCE.to_string(),
        type_arguments: vec![ty],
        constructor_arguments: vec![TypedConstant::String(name.to_string())],
        named_arguments: named,
        location: None,
    }
}

/// `[AttachedBindableProperty<ty, host>(name, ...)]` on a class.
pub fn attached_marker(
    name: &str,
    ty: TypeRef,
    host: TypeRef,
    named: Vec<NamedArgument>,
) -> AttributeData {
    AttributeData {
        name: MARKER_ATTACHED.to_string(),
        type_arguments: vec![ty, host],
        constructor_arguments: vec![TypedConstant::String(name.to_string())],
        named_arguments: named,
        location: None,
    }
}

/// Argument-less marker as placed on a member.
pub fn member_marker(name: &str) -> AttributeData {
    AttributeData {
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn class(ns: &str, name: &str, attrs: Vec<AttributeData>) -> TypeDecl {
    TypeDecl {
        namespace: Some(ns.to_string()),
        name: name.to_string(),
        kind: TypeKind::Class,
        attributes: attrs,
        ..Default::default()
    }
}

pub fn header(name: &str) -> TypeHeader {
    TypeHeader {
        name: name.to_string(),
        kind: TypeKind::Class,
        type_parameters: Vec::new(),
    }
}

pub fn compilation_with(ty: TypeDecl) -> Compilation {
    Compilation {
        assembly_name: "Demo".to_string(),
        types: vec![ty],
        ..Default::default()
    }
}

/// Property whose accessors go through the generated field.
pub fn bodied_property(name: &str, ty: TypeRef, has_setter: bool) -> PropertyDecl {
    let getter = AccessorDecl {
        body: Some(format!("({})GetValue({}Property)", ty.display(), name)),
    };
    let setter = has_setter.then(|| AccessorDecl {
        body: Some(format!("SetValue({}Property, value)", name)),
    });
    PropertyDecl {
        name: name.to_string(),
        ty,
        is_static: false,
        is_indexer: false,
        getter: Some(getter),
        setter,
        expression_body: None,
        attributes: Vec::new(),
        location: None,
    }
}

/// Marked `static T GetName(THost view)` reading the generated field.
pub fn attached_getter(name: &str, ty: TypeRef, host: TypeRef) -> MethodDecl {
    MethodDecl {
        name: format!("Get{}", name),
        body: Some(format!("({})view.GetValue({}Property)", ty.display(), name)),
        return_type: Some(ty),
        is_static: true,
        parameters: vec![ParameterDecl {
            name: "view".to_string(),
            ty: host,
        }],
        attributes: vec![member_marker(MARKER_ATTACHED)],
        location: None,
    }
}

/// Unmarked `static void SetName(THost view, T value)`.
pub fn attached_setter(name: &str, ty: TypeRef, host: TypeRef) -> MethodDecl {
    MethodDecl {
        name: format!("Set{}", name),
        return_type: None,
        is_static: true,
        parameters: vec![
            ParameterDecl {
                name: "view".to_string(),
                ty: host,
            },
            ParameterDecl {
                name: "value".to_string(),
                ty,
            },
        ],
        body: Some(format!("view.SetValue({}Property, value)", name)),
        attributes: Vec::new(),
        location: None,
    }
}
