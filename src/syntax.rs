//! Output syntax tree and its printer.
//!
//! The generator never concatenates source text directly: it builds these
//! nodes and a single printer renders them, so spacing and ordering come from
//! one place.

use crate::model::SpecialType;

// ═══════════════════════════════════════════════════════════════════════════════
// EXPRESSIONS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Char(u16),
    String(String),
    /// Integral literal of an exact primitive kind.
    Integer { kind: SpecialType, value: i128 },
    /// `float`, `double` or `decimal` literal; `text` is the plain decimal
    /// rendering without suffix.
    Real { kind: SpecialType, text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Expr,
}

impl Argument {
    pub fn named(name: &str, value: Expr) -> Self {
        Argument {
            name: Some(name.to_string()),
            value,
        }
    }

    pub fn positional(value: Expr) -> Self {
        Argument { name: None, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    TypeOf(String),
    Default(String),
    MemberAccess(Box<Expr>, String),
    Cast(String, Box<Expr>),
    Unchecked(Box<Expr>),
    Invocation(Box<Expr>, Vec<Argument>),
    /// Always emitted as a `static` lambda.
    Lambda(Vec<String>, Box<Expr>),
}

impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Ident(name.to_string())
    }

    pub fn member(target: Expr, name: &str) -> Self {
        Expr::MemberAccess(Box::new(target), name.to_string())
    }

    pub fn cast(ty: &str, expr: Expr) -> Self {
        Expr::Cast(ty.to_string(), Box::new(expr))
    }

    pub fn call(target: Expr, args: Vec<Argument>) -> Self {
        Expr::Invocation(Box::new(target), args)
    }

    pub fn lambda(params: &[&str], body: Expr) -> Self {
        Expr::Lambda(
            params.iter().map(|p| p.to_string()).collect(),
            Box::new(body),
        )
    }

    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MEMBERS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub attributes: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub ty: String,
    pub name: String,
    pub initializer: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessorDecl {
    pub modifiers: Vec<&'static str>,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub attributes: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub ty: String,
    pub name: String,
    pub getter: AccessorDecl,
    pub setter: Option<AccessorDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: &str, name: &str) -> Self {
        Parameter {
            ty: ty.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub attributes: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Expression body; `None` declares a partial method without body.
    pub body: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(f) => &f.name,
            Member::Property(p) => &p.name,
            Member::Method(m) => &m.name,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILATION UNIT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct TypeWrapper {
    pub keyword: &'static str,
    pub name: String,
    pub type_parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub nullable_directive: bool,
    pub namespace: Option<String>,
    /// Partial type declarations, outermost first; the last one holds the
    /// members.
    pub wrappers: Vec<TypeWrapper>,
    pub members: Vec<Member>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRINTER
// ═══════════════════════════════════════════════════════════════════════════════

const INDENT: &str = "    ";

pub fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Null => "null".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Char(c) => format!("'{}'", escape_char(*c)),
        Literal::String(s) => format!("\"{}\"", escape_string(s)),
        Literal::Integer { kind, value } => match kind {
            SpecialType::Int32 => value.to_string(),
            SpecialType::UInt32 => format!("{}U", value),
            SpecialType::Int64 => format!("{}L", value),
            SpecialType::UInt64 => format!("{}UL", value),
            // No literal suffix exists for these; the cast is a constant
            // conversion so the boxed value has the exact kind.
            other => format!("({}){}", other, value),
        },
        Literal::Real { kind, text } => {
            let suffix = match kind {
                SpecialType::Single => "F",
                SpecialType::Decimal => "M",
                _ => "D",
            };
            format!("{}{}", text, suffix)
        }
    }
}

fn escape_char(c: u16) -> String {
    match c {
        0x27 => "\\'".to_string(),
        0x5C => "\\\\".to_string(),
        0x20..=0x7E => (c as u8 as char).to_string(),
        _ => format!("\\u{:04X}", c),
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Render an expression on one line.
pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(lit) => render_literal(lit),
        Expr::Ident(name) => name.clone(),
        Expr::TypeOf(ty) => format!("typeof({})", ty),
        Expr::Default(ty) => format!("default({})", ty),
        Expr::MemberAccess(target, name) => {
            format!("{}.{}", render_primary(target), name)
        }
        Expr::Cast(ty, inner) => {
            let rendered = render_expr(inner);
            let needs_parens = match inner.as_ref() {
                Expr::Literal(Literal::Integer { .. }) | Expr::Literal(Literal::Real { .. }) => {
                    rendered.starts_with('-') || rendered.starts_with('(')
                }
                Expr::Cast(..) | Expr::Lambda(..) => true,
                _ => false,
            };
            if needs_parens {
                format!("({})({})", ty, rendered)
            } else {
                format!("({}){}", ty, rendered)
            }
        }
        Expr::Unchecked(inner) => format!("unchecked({})", render_expr(inner)),
        Expr::Invocation(target, args) => {
            let args = args
                .iter()
                .map(render_argument)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({})", render_primary(target), args)
        }
        Expr::Lambda(params, body) => {
            let params = if params.len() == 1 {
                params[0].clone()
            } else {
                format!("({})", params.join(", "))
            };
            format!("static {} => {}", params, render_expr(body))
        }
    }
}

/// Operand position of member access and invocation.
fn render_primary(expr: &Expr) -> String {
    match expr {
        Expr::Cast(..) | Expr::Lambda(..) => format!("({})", render_expr(expr)),
        _ => render_expr(expr),
    }
}

fn render_argument(arg: &Argument) -> String {
    match &arg.name {
        Some(name) => format!("{}: {}", name, render_expr(&arg.value)),
        None => render_expr(&arg.value),
    }
}

struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.out.push('\n');
            return;
        }
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth -= 1;
        self.line("}");
    }

    fn attributes(&mut self, attributes: &[String]) {
        for attr in attributes {
            self.line(&format!("[{}]", attr));
        }
    }

    fn member(&mut self, member: &Member) {
        match member {
            Member::Field(field) => self.field(field),
            Member::Property(prop) => self.property(prop),
            Member::Method(method) => self.method(method),
        }
    }

    fn field(&mut self, field: &FieldDecl) {
        self.attributes(&field.attributes);
        let head = format!(
            "{} {} {} = ",
            field.modifiers.join(" "),
            field.ty,
            field.name
        );
        match &field.initializer {
            // Factory calls with named arguments get one argument per line.
            Expr::Invocation(target, args) if args.iter().any(|a| a.name.is_some()) => {
                self.line(&format!("{}{}(", head, render_primary(target)));
                self.depth += 1;
                let last = args.len().saturating_sub(1);
                for (index, arg) in args.iter().enumerate() {
                    let sep = if index == last { ");" } else { "," };
                    self.line(&format!("{}{}", render_argument(arg), sep));
                }
                self.depth -= 1;
            }
            other => self.line(&format!("{}{};", head, render_expr(other))),
        }
    }

    fn property(&mut self, prop: &PropertyDecl) {
        self.attributes(&prop.attributes);
        self.open(&format!(
            "{} {} {}",
            prop.modifiers.join(" "),
            prop.ty,
            prop.name
        ));
        self.accessor("get", &prop.getter);
        if let Some(setter) = &prop.setter {
            self.accessor("set", setter);
        }
        self.close();
    }

    fn accessor(&mut self, keyword: &str, accessor: &AccessorDecl) {
        let mut head = accessor.modifiers.join(" ");
        if !head.is_empty() {
            head.push(' ');
        }
        self.line(&format!(
            "{}{} => {};",
            head,
            keyword,
            render_expr(&accessor.body)
        ));
    }

    fn method(&mut self, method: &MethodDecl) {
        self.attributes(&method.attributes);
        let params = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let signature = format!(
            "{} {} {}({})",
            method.modifiers.join(" "),
            method.return_type,
            method.name,
            params
        );
        match &method.body {
            Some(body) => self.line(&format!("{} => {};", signature, render_expr(body))),
            None => self.line(&format!("{};", signature)),
        }
    }
}

impl CompilationUnit {
    pub fn render(&self) -> String {
        let mut p = Printer::new();
        p.line("// <auto-generated/>");
        if self.nullable_directive {
            p.line("#nullable enable");
        }
        p.line("");

        if let Some(ns) = &self.namespace {
            p.open(&format!("namespace {}", ns));
        }
        for wrapper in &self.wrappers {
            let mut header = format!("partial {} {}", wrapper.keyword, wrapper.name);
            if !wrapper.type_parameters.is_empty() {
                header.push('<');
                header.push_str(&wrapper.type_parameters.join(", "));
                header.push('>');
            }
            p.open(&header);
        }
        for (index, member) in self.members.iter().enumerate() {
            if index > 0 {
                p.line("");
            }
            p.member(member);
        }
        for _ in &self.wrappers {
            p.close();
        }
        if self.namespace.is_some() {
            p.close();
        }
        p.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn int(kind: SpecialType, value: i128) -> Expr {
        Expr::Literal(Literal::Integer { kind, value })
    }

    #[test]
    fn test_literal_suffixes() {
        assert_eq!(render_expr(&int(SpecialType::Int32, -5)), "-5");
        assert_eq!(render_expr(&int(SpecialType::UInt32, 5)), "5U");
        assert_eq!(render_expr(&int(SpecialType::Int64, 5)), "5L");
        assert_eq!(render_expr(&int(SpecialType::UInt64, 5)), "5UL");
        assert_eq!(render_expr(&int(SpecialType::Byte, 5)), "(byte)5");
        let real = Expr::Literal(Literal::Real {
            kind: SpecialType::Decimal,
            text: "1.5".to_string(),
        });
        assert_eq!(render_expr(&real), "1.5M");
    }

    #[test]
    fn test_string_and_char_escaping() {
        let s = Expr::Literal(Literal::String("say \"hi\"\n".to_string()));
        assert_eq!(render_expr(&s), r#""say \"hi\"\n""#);
        assert_eq!(render_expr(&Expr::Literal(Literal::Char(0x27))), r"'\''");
        assert_eq!(render_expr(&Expr::Literal(Literal::Char(0x41))), "'A'");
        assert_eq!(render_expr(&Expr::Literal(Literal::Char(0xE9))), r"'\u00E9'");
    }

    #[test]
    fn test_cast_parenthesization() {
        let neg = Expr::cast("global::Demo.Mode", int(SpecialType::Int32, -1));
        assert_eq!(render_expr(&neg), "(global::Demo.Mode)(-1)");

        let call = Expr::call(
            Expr::member(Expr::cast("global::Demo.Box", Expr::ident("bindable")), "OnChanged"),
            vec![],
        );
        assert_eq!(render_expr(&call), "((global::Demo.Box)bindable).OnChanged()");
    }

    #[test]
    fn test_lambda_rendering() {
        let single = Expr::lambda(&["bindable"], Expr::ident("x"));
        assert_eq!(render_expr(&single), "static bindable => x");
        let multi = Expr::lambda(&["a", "b"], Expr::ident("x"));
        assert_eq!(render_expr(&multi), "static (a, b) => x");
    }

    #[test]
    fn test_render_unit_wrapping() {
        let unit = CompilationUnit {
            nullable_directive: true,
            namespace: Some("Demo".to_string()),
            wrappers: vec![
                TypeWrapper {
                    keyword: "class",
                    name: "Outer".to_string(),
                    type_parameters: vec![],
                },
                TypeWrapper {
                    keyword: "class",
                    name: "Inner".to_string(),
                    type_parameters: vec!["T".to_string()],
                },
            ],
            members: vec![Member::Method(MethodDecl {
                attributes: vec![],
                modifiers: vec!["partial"],
                return_type: "void".to_string(),
                name: "OnTextChanged".to_string(),
                parameters: vec![
                    Parameter::new("string", "oldValue"),
                    Parameter::new("string", "newValue"),
                ],
                body: None,
            })],
        };
        let expected = indoc! {"
            // <auto-generated/>
            #nullable enable

            namespace Demo
            {
                partial class Outer
                {
                    partial class Inner<T>
                    {
                        partial void OnTextChanged(string oldValue, string newValue);
                    }
                }
            }
        "};
        assert_eq!(unit.render(), expected);
    }
}
