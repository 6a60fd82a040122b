use crate::model::{AttributeData, MethodDecl, PropertyDecl, TypeDecl};

/// The DeclarationVisitor trait defines the single traversal order over a
/// type declaration and the attributes carried by it and its members.
///
/// Rules:
/// 1. Traversal order is fixed: type attributes, then properties, then methods,
///    each in declaration order.
/// 2. Implementers override `visit_*` methods to add behavior.
/// 3. Implementers call the matching `walk_*` function to continue traversal
///    unless pruning is intended.
/// 4. Traversal is read-only; declarations are never mutated.
pub trait DeclarationVisitor<'a> {
    fn visit_type(&mut self, ty: &'a TypeDecl) {
        walk_type(self, ty);
    }

    fn visit_type_attribute(&mut self, _ty: &'a TypeDecl, _attr: &'a AttributeData) {
        // Leaf
    }

    fn visit_property(&mut self, ty: &'a TypeDecl, property: &'a PropertyDecl) {
        walk_property(self, ty, property);
    }

    fn visit_property_attribute(
        &mut self,
        _ty: &'a TypeDecl,
        _property: &'a PropertyDecl,
        _attr: &'a AttributeData,
    ) {
        // Leaf
    }

    fn visit_method(&mut self, ty: &'a TypeDecl, method: &'a MethodDecl) {
        walk_method(self, ty, method);
    }

    fn visit_method_attribute(
        &mut self,
        _ty: &'a TypeDecl,
        _method: &'a MethodDecl,
        _attr: &'a AttributeData,
    ) {
        // Leaf
    }
}

pub fn walk_type<'a, V: DeclarationVisitor<'a> + ?Sized>(visitor: &mut V, ty: &'a TypeDecl) {
    for attr in &ty.attributes {
        visitor.visit_type_attribute(ty, attr);
    }
    for property in &ty.properties {
        visitor.visit_property(ty, property);
    }
    for method in &ty.methods {
        visitor.visit_method(ty, method);
    }
}

pub fn walk_property<'a, V: DeclarationVisitor<'a> + ?Sized>(
    visitor: &mut V,
    ty: &'a TypeDecl,
    property: &'a PropertyDecl,
) {
    for attr in &property.attributes {
        visitor.visit_property_attribute(ty, property, attr);
    }
}

pub fn walk_method<'a, V: DeclarationVisitor<'a> + ?Sized>(
    visitor: &mut V,
    ty: &'a TypeDecl,
    method: &'a MethodDecl,
) {
    for attr in &method.attributes {
        visitor.visit_method_attribute(ty, method, attr);
    }
}
