//! Constant conversion of default values to literal expressions.
//!
//! A default value is boxed into the property store as `object`, so the
//! emitted expression must already have the exact primitive kind of the
//! property. An `int` constant for a `long` property becomes `5L`, never `5`.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

use crate::model::{SpecialType, TypedConstant};
use crate::symbols::{EnumSymbol, SymbolTable};
use crate::syntax::{Expr, Literal};

// ═══════════════════════════════════════════════════════════════════════════════
// IMPLICIT NUMERIC CONVERSIONS
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    /// Target kind → source kinds that convert to it implicitly.
    static ref IMPLICIT_SOURCES: HashMap<SpecialType, HashSet<SpecialType>> = {
        use SpecialType::*;
        let mut m = HashMap::new();
        m.insert(Int16, [SByte, Byte].into_iter().collect());
        m.insert(UInt16, [Byte, Char].into_iter().collect());
        m.insert(Int32, [SByte, Byte, Int16, UInt16, Char].into_iter().collect());
        m.insert(UInt32, [Byte, UInt16, Char].into_iter().collect());
        m.insert(
            Int64,
            [SByte, Byte, Int16, UInt16, Int32, UInt32, Char].into_iter().collect(),
        );
        m.insert(UInt64, [Byte, UInt16, UInt32, Char].into_iter().collect());
        m.insert(
            Single,
            [SByte, Byte, Int16, UInt16, Int32, UInt32, Int64, UInt64, Char]
                .into_iter()
                .collect(),
        );
        m.insert(
            Double,
            [SByte, Byte, Int16, UInt16, Int32, UInt32, Int64, UInt64, Char, Single]
                .into_iter()
                .collect(),
        );
        m.insert(
            Decimal,
            [SByte, Byte, Int16, UInt16, Int32, UInt32, Int64, UInt64, Char]
                .into_iter()
                .collect(),
        );
        m
    };
}

/// Whether a value of kind `source` may be assigned to `target` without an
/// explicit conversion.
pub fn is_implicitly_convertible(source: SpecialType, target: SpecialType) -> bool {
    source == target
        || target == SpecialType::Object
        || IMPLICIT_SOURCES
            .get(&target)
            .is_some_and(|sources| sources.contains(&source))
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONSTANT VALUES
// ═══════════════════════════════════════════════════════════════════════════════

/// Primitive kind a constant carries by itself. Enum constants report no
/// kind; they are handled through their underlying value.
pub fn constant_kind(value: &TypedConstant) -> Option<SpecialType> {
    let kind = match value {
        TypedConstant::Bool(_) => SpecialType::Boolean,
        TypedConstant::Char(_) => SpecialType::Char,
        TypedConstant::SByte(_) => SpecialType::SByte,
        TypedConstant::Byte(_) => SpecialType::Byte,
        TypedConstant::Int16(_) => SpecialType::Int16,
        TypedConstant::UInt16(_) => SpecialType::UInt16,
        TypedConstant::Int32(_) => SpecialType::Int32,
        TypedConstant::UInt32(_) => SpecialType::UInt32,
        TypedConstant::Int64(_) => SpecialType::Int64,
        TypedConstant::UInt64(_) => SpecialType::UInt64,
        TypedConstant::Single(_) => SpecialType::Single,
        TypedConstant::Double(_) => SpecialType::Double,
        TypedConstant::String(_) => SpecialType::String,
        _ => return None,
    };
    Some(kind)
}

/// Human-readable rendering of a constant for diagnostics.
pub fn describe_constant(value: &TypedConstant) -> String {
    match value {
        TypedConstant::Null => "null".to_string(),
        TypedConstant::Bool(b) => b.to_string(),
        TypedConstant::Char(c) => c.to_string(),
        TypedConstant::Single(v) => v.to_string(),
        TypedConstant::Double(v) => v.to_string(),
        TypedConstant::String(s) => s.clone(),
        TypedConstant::Type(t) => format!("typeof({})", t.display_for_typeof()),
        TypedConstant::Enum { type_name, value } => format!("({}){}", type_name, value),
        other => other
            .as_integer()
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

fn float_value(value: &TypedConstant) -> Option<f64> {
    match value {
        TypedConstant::Single(v) => Some(*v as f64),
        TypedConstant::Double(v) => Some(*v),
        _ => None,
    }
}

fn integer_literal(kind: SpecialType, value: i128) -> Expr {
    if kind == SpecialType::Char {
        return Expr::Literal(Literal::Char(value as u16));
    }
    Expr::Literal(Literal::Integer { kind, value })
}

fn real_literal(kind: SpecialType, text: String) -> Expr {
    Expr::Literal(Literal::Real { kind, text })
}

/// A `char` constant the target's UTF-16 `char` cannot hold.
fn is_outside_bmp(value: &TypedConstant) -> bool {
    matches!(value, TypedConstant::Char(c) if u32::from(*c) > 0xFFFF)
}

/// Literal of the constant in its own kind.
fn source_literal(value: &TypedConstant) -> Option<Expr> {
    if is_outside_bmp(value) {
        return None;
    }
    let expr = match value {
        TypedConstant::Null => Expr::null(),
        TypedConstant::Bool(b) => Expr::Literal(Literal::Bool(*b)),
        TypedConstant::String(s) => Expr::Literal(Literal::String(s.clone())),
        TypedConstant::Single(v) => real_literal(SpecialType::Single, v.to_string()),
        TypedConstant::Double(v) => real_literal(SpecialType::Double, v.to_string()),
        TypedConstant::Type(t) => Expr::TypeOf(t.display_for_typeof()),
        other => integer_literal(constant_kind(other)?, other.as_integer()?),
    };
    Some(expr)
}

fn fits(kind: SpecialType, value: i128) -> bool {
    kind.integral_range()
        .is_some_and(|(min, max)| value >= min && value <= max)
}

/// Explicit conversion that the literal cannot represent exactly.
fn unchecked_cast(target: SpecialType, source: Expr) -> Expr {
    Expr::Unchecked(Box::new(Expr::cast(&target.to_string(), source)))
}

/// `int` literal when the value fits, otherwise `long`.
fn natural_integer(value: i128) -> Expr {
    if fits(SpecialType::Int32, value) {
        integer_literal(SpecialType::Int32, value)
    } else {
        integer_literal(SpecialType::Int64, value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONVERSION
// ═══════════════════════════════════════════════════════════════════════════════

/// Convert a constant to an expression of exactly the `target` kind, or
/// `None` when no conversion exists.
pub fn convert_to_special(value: &TypedConstant, target: SpecialType) -> Option<Expr> {
    if is_outside_bmp(value) {
        return None;
    }
    match target {
        SpecialType::Object => {
            return match value {
                TypedConstant::Enum { type_name, value } => Some(Expr::cast(
                    &format!("global::{}", type_name.trim_start_matches("global::")),
                    natural_integer(*value as i128),
                )),
                other => source_literal(other),
            };
        }
        SpecialType::String => {
            return match value {
                TypedConstant::Null | TypedConstant::String(_) => source_literal(value),
                _ => None,
            };
        }
        SpecialType::Boolean => {
            return match value {
                TypedConstant::Bool(_) => source_literal(value),
                _ => None,
            };
        }
        _ => {}
    }

    if let Some(integer) = value.as_integer() {
        // Enum constants never convert implicitly to numeric kinds.
        let implicit = constant_kind(value)
            .is_some_and(|source| is_implicitly_convertible(source, target));
        let source = source_literal(value).unwrap_or_else(|| natural_integer(integer));
        return convert_integer(integer, source, target, implicit);
    }
    if let Some(float) = float_value(value) {
        return convert_float(value, float, target);
    }
    None
}

fn convert_integer(integer: i128, source: Expr, target: SpecialType, implicit: bool) -> Option<Expr> {
    if target.is_floating() {
        return Some(real_literal(target, integer.to_string()));
    }
    target.integral_range()?;
    if implicit || fits(target, integer) {
        return Some(integer_literal(target, integer));
    }
    Some(unchecked_cast(target, source))
}

fn convert_float(value: &TypedConstant, float: f64, target: SpecialType) -> Option<Expr> {
    if !float.is_finite() {
        return None;
    }
    let source = source_literal(value)?;
    match target {
        SpecialType::Double => Some(real_literal(target, float.to_string())),
        SpecialType::Single => {
            let narrowed = float as f32;
            if narrowed as f64 == float {
                Some(real_literal(target, narrowed.to_string()))
            } else {
                Some(unchecked_cast(target, source))
            }
        }
        SpecialType::Decimal => {
            // Decimal spans roughly ±7.9e28.
            if float.abs() < 7.9e28 {
                let text = match value {
                    TypedConstant::Single(v) => v.to_string(),
                    _ => float.to_string(),
                };
                Some(real_literal(target, text))
            } else {
                None
            }
        }
        integral if integral.integral_range().is_some() => {
            if float.fract() == 0.0 && fits(integral, float as i128) {
                Some(integer_literal(integral, float as i128))
            } else {
                Some(unchecked_cast(integral, source))
            }
        }
        _ => None,
    }
}

/// Default value for an enum-typed property: a qualified member access when
/// the value names a declared member, otherwise an explicit cast over the
/// underlying value when the enum is a flags enum or the constant is already
/// typed as that enum.
pub fn convert_to_enum(
    value: &TypedConstant,
    symbol: &EnumSymbol<'_>,
    enum_display: &str,
) -> Option<Expr> {
    let integer = value.as_integer()?;
    if let Some(member) = symbol.member_with_value(integer) {
        return Some(Expr::member(Expr::ident(enum_display), &member.name));
    }
    let typed_as_enum = match value {
        TypedConstant::Enum { type_name, .. } => {
            type_name.trim_start_matches("global::") == symbol.decl.metadata_name()
        }
        _ => false,
    };
    let flags_combination = symbol.is_flags && symbol.is_combination_of_members(integer);
    if !typed_as_enum && !flags_combination {
        return None;
    }
    let underlying = match value {
        TypedConstant::Enum { .. } => {
            convert_integer(integer, natural_integer(integer), symbol.underlying, false)
        }
        other => convert_to_special(other, symbol.underlying),
    }?;
    Some(Expr::cast(enum_display, underlying))
}

/// Resolve the default value expression for a property type.
pub fn convert_default_value(
    value: &TypedConstant,
    property_type: &crate::model::TypeRef,
    symbols: &SymbolTable<'_>,
) -> Option<Expr> {
    if let Some(symbol) = symbols.resolve_enum(property_type) {
        if value.is_null() {
            return property_type.nullable.then(Expr::null);
        }
        return convert_to_enum(value, &symbol, &property_type.display_unannotated());
    }
    if value.is_null() {
        // Null is only meaningful for reference and nullable types.
        return (!property_type.is_value_type || property_type.nullable).then(Expr::null);
    }
    let special = property_type.special?;
    convert_to_special(value, special)
}
