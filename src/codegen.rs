//! Member generation.
//!
//! Turns validated descriptors into output members. Every descriptor goes
//! through the same fixed sequence (key fields, accessors, stubs) and the
//! members are appended to one ordered list, so the layout never depends on
//! the order in which arguments were written.

use crate::access::{DefaultMode, Visibility};
use crate::descriptor::{MarkerKind, MarkerSite, PropertyDescriptor, Shape};
use crate::framework::{
    key_field_name, property_field_name, BINDABLE_PARAM, BINDABLE_PROPERTY, BINDABLE_PROPERTY_KEY,
    BINDING_MODE, CREATE, CREATE_ATTACHED, CREATE_ATTACHED_READ_ONLY, CREATE_READ_ONLY,
    GENERATED_CODE_ATTRIBUTE, GET_VALUE, KEY_PROJECTION, NEW_VALUE_PARAM, OLD_VALUE_PARAM,
    SET_VALUE, VALUE_PARAM, VIEW_PARAM,
};
use crate::model::SpecialType;
use crate::options::GeneratorOptions;
use crate::syntax::{
    AccessorDecl, Argument, Expr, FieldDecl, Literal, Member, MethodDecl, Parameter, PropertyDecl,
};

// ═══════════════════════════════════════════════════════════════════════════════
// NAMING
// ═══════════════════════════════════════════════════════════════════════════════

pub fn changed_stub_name(name: &str) -> String {
    format!("On{}Changed", name)
}

pub fn changing_stub_name(name: &str) -> String {
    format!("On{}Changing", name)
}

pub fn validate_stub_name(name: &str) -> String {
    format!("Validate{}", name)
}

pub fn coerce_stub_name(name: &str) -> String {
    format!("Coerce{}", name)
}

pub fn default_value_stub_name(name: &str) -> String {
    format!("Create{}DefaultValue", name)
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Emits the members of one descriptor. Holds only borrowed, read-only
/// state, so one instance may be shared across descriptors of a type.
pub struct MemberGenerator<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> MemberGenerator<'a> {
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }

    /// Append all members of `descriptor` to `members`.
    pub fn generate(&self, descriptor: &PropertyDescriptor, members: &mut Vec<Member>) {
        let shape = descriptor.shape();
        self.key_fields(descriptor, shape, members);
        if descriptor.site == MarkerSite::Class {
            match &descriptor.kind {
                MarkerKind::Instance => self.instance_accessor(descriptor, shape, members),
                MarkerKind::Attached { host } => {
                    self.attached_accessors(descriptor, host.display(), shape, members)
                }
            }
        }
        self.stubs(descriptor, members);
    }

    fn generated_code(&self) -> Vec<String> {
        if !self.options.generated_code_attribute {
            return Vec::new();
        }
        vec![format!(
            "{}(\"{}\", \"{}\")",
            GENERATED_CODE_ATTRIBUTE, self.options.tool_name, self.options.tool_version
        )]
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Key fields
    // ───────────────────────────────────────────────────────────────────────────

    fn key_fields(&self, d: &PropertyDescriptor, shape: Shape, members: &mut Vec<Member>) {
        let attached = d.kind.is_attached();
        let read = d.get_visibility;
        match shape {
            Shape::Writable => {
                let factory = if attached { CREATE_ATTACHED } else { CREATE };
                members.push(Member::Field(FieldDecl {
                    attributes: self.generated_code(),
                    modifiers: field_modifiers(read),
                    ty: BINDABLE_PROPERTY.to_string(),
                    name: property_field_name(&d.name),
                    initializer: Expr::call(
                        Expr::member(Expr::ident(BINDABLE_PROPERTY), factory),
                        create_arguments(d),
                    ),
                }));
            }
            Shape::ReadOnly => {
                let factory = if attached {
                    CREATE_ATTACHED_READ_ONLY
                } else {
                    CREATE_READ_ONLY
                };
                let key = key_field_name(&d.name);
                members.push(Member::Field(FieldDecl {
                    attributes: self.generated_code(),
                    modifiers: field_modifiers(d.effective_set_visibility()),
                    ty: BINDABLE_PROPERTY_KEY.to_string(),
                    name: key.clone(),
                    initializer: Expr::call(
                        Expr::member(Expr::ident(BINDABLE_PROPERTY), factory),
                        create_arguments(d),
                    ),
                }));
                members.push(Member::Field(FieldDecl {
                    attributes: self.generated_code(),
                    modifiers: field_modifiers(read),
                    ty: BINDABLE_PROPERTY.to_string(),
                    name: property_field_name(&d.name),
                    initializer: Expr::member(Expr::ident(&key), KEY_PROJECTION),
                }));
            }
        }
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────────────────

    fn instance_accessor(&self, d: &PropertyDescriptor, shape: Shape, members: &mut Vec<Member>) {
        let ty = d.property_type.display();
        let access = AccessorVisibility::resolve(d, shape);
        let getter = AccessorDecl {
            modifiers: access.getter,
            body: Expr::cast(
                &ty,
                Expr::call(
                    Expr::ident(GET_VALUE),
                    vec![Argument::positional(Expr::ident(&property_field_name(&d.name)))],
                ),
            ),
        };
        let setter = AccessorDecl {
            modifiers: access.setter,
            body: Expr::call(
                Expr::ident(SET_VALUE),
                vec![
                    Argument::positional(Expr::ident(&write_handle(d, shape))),
                    Argument::positional(Expr::ident(VALUE_PARAM)),
                ],
            ),
        };
        members.push(Member::Property(PropertyDecl {
            attributes: self.generated_code(),
            modifiers: access.property,
            ty,
            name: d.name.clone(),
            getter,
            setter: Some(setter),
        }));
    }

    fn attached_accessors(
        &self,
        d: &PropertyDescriptor,
        host: String,
        shape: Shape,
        members: &mut Vec<Member>,
    ) {
        let ty = d.property_type.display();
        let read = d.get_visibility;
        let write = match shape {
            Shape::Writable => read,
            Shape::ReadOnly => d.effective_set_visibility(),
        };

        let mut getter_modifiers = read.modifiers().to_vec();
        getter_modifiers.push("static");
        members.push(Member::Method(MethodDecl {
            attributes: self.generated_code(),
            modifiers: getter_modifiers,
            return_type: ty.clone(),
            name: format!("Get{}", d.name),
            parameters: vec![Parameter::new(&host, VIEW_PARAM)],
            body: Some(Expr::cast(
                &ty,
                Expr::call(
                    Expr::member(Expr::ident(VIEW_PARAM), GET_VALUE),
                    vec![Argument::positional(Expr::ident(&property_field_name(&d.name)))],
                ),
            )),
        }));

        let mut setter_modifiers = write.modifiers().to_vec();
        setter_modifiers.push("static");
        members.push(Member::Method(MethodDecl {
            attributes: self.generated_code(),
            modifiers: setter_modifiers,
            return_type: "void".to_string(),
            name: format!("Set{}", d.name),
            parameters: vec![
                Parameter::new(&host, VIEW_PARAM),
                Parameter::new(&ty, VALUE_PARAM),
            ],
            body: Some(Expr::call(
                Expr::member(Expr::ident(VIEW_PARAM), SET_VALUE),
                vec![
                    Argument::positional(Expr::ident(&write_handle(d, shape))),
                    Argument::positional(Expr::ident(VALUE_PARAM)),
                ],
            )),
        }));
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Callback stubs
    // ───────────────────────────────────────────────────────────────────────────

    fn stubs(&self, d: &PropertyDescriptor, members: &mut Vec<Member>) {
        let ty = d.property_type.display();
        let host = host_parameter(d);
        let (notify_modifiers, private_modifiers): (Vec<&'static str>, Vec<&'static str>) =
            if d.kind.is_attached() {
                (vec!["static", "partial"], vec!["private", "static", "partial"])
            } else {
                (vec!["partial"], vec!["private", "partial"])
            };

        let with_host = |mut params: Vec<Parameter>| {
            if let Some(host) = &host {
                params.insert(0, host.clone());
            }
            params
        };
        let change_params = with_host(vec![
            Parameter::new(&ty, OLD_VALUE_PARAM),
            Parameter::new(&ty, NEW_VALUE_PARAM),
        ]);

        members.push(stub(
            notify_modifiers.clone(),
            "void",
            changed_stub_name(&d.name),
            change_params.clone(),
        ));
        members.push(stub(
            notify_modifiers,
            "void",
            changing_stub_name(&d.name),
            change_params,
        ));
        if d.has_validate_callback {
            members.push(stub(
                private_modifiers.clone(),
                "bool",
                validate_stub_name(&d.name),
                with_host(vec![Parameter::new(&ty, VALUE_PARAM)]),
            ));
        }
        if d.has_coerce_callback {
            members.push(stub(
                private_modifiers.clone(),
                &ty,
                coerce_stub_name(&d.name),
                with_host(vec![Parameter::new(&ty, VALUE_PARAM)]),
            ));
        }
        if d.emits_default_value_factory() {
            members.push(stub(
                private_modifiers,
                &ty,
                default_value_stub_name(&d.name),
                with_host(Vec::new()),
            ));
        }
    }
}

fn stub(
    modifiers: Vec<&'static str>,
    return_type: &str,
    name: String,
    parameters: Vec<Parameter>,
) -> Member {
    Member::Method(MethodDecl {
        attributes: Vec::new(),
        modifiers,
        return_type: return_type.to_string(),
        name,
        parameters,
        body: None,
    })
}

fn field_modifiers(visibility: Visibility) -> Vec<&'static str> {
    let mut modifiers = visibility.modifiers().to_vec();
    modifiers.extend(["static", "readonly"]);
    modifiers
}

fn host_parameter(d: &PropertyDescriptor) -> Option<Parameter> {
    match &d.kind {
        MarkerKind::Attached { host } => Some(Parameter::new(&host.display(), VIEW_PARAM)),
        MarkerKind::Instance => None,
    }
}

/// Field the setter writes through: the key for read-only properties.
fn write_handle(d: &PropertyDescriptor, shape: Shape) -> String {
    match shape {
        Shape::Writable => property_field_name(&d.name),
        Shape::ReadOnly => key_field_name(&d.name),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ACCESSOR VISIBILITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Modifiers of an instance property and its accessors. At most one accessor
/// carries modifiers, and they are always more restrictive than the
/// property's own.
struct AccessorVisibility {
    property: Vec<&'static str>,
    getter: Vec<&'static str>,
    setter: Vec<&'static str>,
}

impl AccessorVisibility {
    fn resolve(d: &PropertyDescriptor, shape: Shape) -> Self {
        let read = d.get_visibility;
        let write = d.effective_set_visibility();
        let plain = |property: Visibility| AccessorVisibility {
            property: property.modifiers().to_vec(),
            getter: Vec::new(),
            setter: Vec::new(),
        };
        if shape == Shape::Writable || read == write {
            return plain(read);
        }
        if write.is_more_restrictive_than(read) {
            AccessorVisibility {
                setter: write.modifiers().to_vec(),
                ..plain(read)
            }
        } else if read.is_more_restrictive_than(write) {
            AccessorVisibility {
                getter: read.modifiers().to_vec(),
                ..plain(write)
            }
        } else {
            // protected/internal: the setter gets their intersection.
            AccessorVisibility {
                setter: Visibility::ProtectedPrivate.modifiers().to_vec(),
                ..plain(read)
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FACTORY ARGUMENTS
// ═══════════════════════════════════════════════════════════════════════════════

fn create_arguments(d: &PropertyDescriptor) -> Vec<Argument> {
    let callbacks = Callbacks::new(d);
    vec![
        Argument::named(
            "propertyName",
            Expr::Literal(Literal::String(d.name.clone())),
        ),
        Argument::named(
            "returnType",
            Expr::TypeOf(d.property_type.display_for_typeof()),
        ),
        Argument::named(
            "declaringType",
            Expr::TypeOf(d.declaring_type.display_for_typeof()),
        ),
        Argument::named("defaultValue", default_value(d)),
        Argument::named("defaultBindingMode", binding_mode(d.default_mode)),
        Argument::named(
            "validateValue",
            callbacks.optional(d.has_validate_callback, Callbacks::validate),
        ),
        Argument::named("propertyChanged", callbacks.changed()),
        Argument::named("propertyChanging", callbacks.changing()),
        Argument::named(
            "coerceValue",
            callbacks.optional(d.has_coerce_callback, Callbacks::coerce),
        ),
        Argument::named(
            "defaultValueCreator",
            callbacks.optional(d.emits_default_value_factory(), Callbacks::default_value),
        ),
    ]
}

fn default_value(d: &PropertyDescriptor) -> Expr {
    if let Some(value) = &d.default_value {
        return value.clone();
    }
    let ty = &d.property_type;
    let is_reference = match ty.special {
        Some(special) => special.is_reference_type(),
        None => !ty.is_value_type && !ty.type_parameter,
    };
    if is_reference || ty.nullable {
        Expr::null()
    } else {
        Expr::Default(ty.display_unannotated())
    }
}

fn binding_mode(mode: DefaultMode) -> Expr {
    match mode {
        DefaultMode::Known(mode) => Expr::member(Expr::ident(BINDING_MODE), mode.as_ref()),
        DefaultMode::Raw(raw) => Expr::cast(
            BINDING_MODE,
            Expr::Literal(Literal::Integer {
                kind: SpecialType::Int32,
                value: raw,
            }),
        ),
    }
}

/// Forwarding lambdas from the framework's loosely typed delegates to the
/// strongly typed stubs.
struct Callbacks {
    name: String,
    value_type: String,
    /// Instance: cast target of `bindable`. Attached: the host type.
    receiver: String,
    attached: bool,
}

impl Callbacks {
    fn new(d: &PropertyDescriptor) -> Self {
        let (receiver, attached) = match &d.kind {
            MarkerKind::Instance => (d.declaring_type.display_unannotated(), false),
            MarkerKind::Attached { host } => (host.display_unannotated(), true),
        };
        Callbacks {
            name: d.name.clone(),
            value_type: d.property_type.display(),
            receiver,
            attached,
        }
    }

    fn optional(&self, enabled: bool, build: fn(&Self) -> Expr) -> Expr {
        if enabled {
            build(self)
        } else {
            Expr::null()
        }
    }

    fn typed(&self, param: &str) -> Argument {
        Argument::positional(Expr::cast(&self.value_type, Expr::ident(param)))
    }

    /// Instance: `((Decl)bindable).Stub(args)`. Attached:
    /// `Stub((Host)bindable, args)`.
    fn forward(&self, stub: String, mut args: Vec<Argument>) -> Expr {
        let receiver = Expr::cast(&self.receiver, Expr::ident(BINDABLE_PARAM));
        if self.attached {
            args.insert(0, Argument::positional(receiver));
            Expr::call(Expr::ident(&stub), args)
        } else {
            Expr::call(Expr::member(receiver, &stub), args)
        }
    }

    fn change(&self, stub: String) -> Expr {
        Expr::lambda(
            &[BINDABLE_PARAM, OLD_VALUE_PARAM, NEW_VALUE_PARAM],
            self.forward(
                stub,
                vec![self.typed(OLD_VALUE_PARAM), self.typed(NEW_VALUE_PARAM)],
            ),
        )
    }

    fn changed(&self) -> Expr {
        self.change(changed_stub_name(&self.name))
    }

    fn changing(&self) -> Expr {
        self.change(changing_stub_name(&self.name))
    }

    fn validate(&self) -> Expr {
        Expr::lambda(
            &[BINDABLE_PARAM, VALUE_PARAM],
            self.forward(validate_stub_name(&self.name), vec![self.typed(VALUE_PARAM)]),
        )
    }

    fn coerce(&self) -> Expr {
        Expr::lambda(
            &[BINDABLE_PARAM, VALUE_PARAM],
            self.forward(coerce_stub_name(&self.name), vec![self.typed(VALUE_PARAM)]),
        )
    }

    fn default_value(&self) -> Expr {
        Expr::lambda(
            &[BINDABLE_PARAM],
            self.forward(default_value_stub_name(&self.name), Vec::new()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::BindingMode;
    use crate::model::TypeRef;
    use crate::syntax::{render_expr, CompilationUnit, TypeWrapper};
    use indoc::indoc;

    fn options() -> GeneratorOptions {
        GeneratorOptions {
            generated_code_attribute: false,
            ..Default::default()
        }
    }

    fn descriptor(name: &str, ty: TypeRef, kind: MarkerKind) -> PropertyDescriptor {
        PropertyDescriptor::new(
            name,
            ty,
            TypeRef::named("Demo.Label", false),
            kind,
            MarkerSite::Class,
        )
    }

    fn host() -> TypeRef {
        TypeRef::named("Microsoft.Maui.Controls.View", false)
    }

    fn render(members: Vec<Member>) -> String {
        CompilationUnit {
            nullable_directive: false,
            namespace: None,
            wrappers: vec![TypeWrapper {
                keyword: "class",
                name: "Label".to_string(),
                type_parameters: vec![],
            }],
            members,
        }
        .render()
    }

    fn names(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.name()).collect()
    }

    #[test]
    fn test_writable_instance_property() {
        let options = options();
        let d = descriptor("Text", TypeRef::special(SpecialType::String), MarkerKind::Instance);
        let mut members = Vec::new();
        MemberGenerator::new(&options).generate(&d, &mut members);

        let expected = indoc! {r#"
            // <auto-generated/>

            partial class Label
            {
                public static readonly global::Microsoft.Maui.Controls.BindableProperty TextProperty = global::Microsoft.Maui.Controls.BindableProperty.Create(
                    propertyName: "Text",
                    returnType: typeof(string),
                    declaringType: typeof(global::Demo.Label),
                    defaultValue: null,
                    defaultBindingMode: global::Microsoft.Maui.Controls.BindingMode.OneWay,
                    validateValue: null,
                    propertyChanged: static (bindable, oldValue, newValue) => ((global::Demo.Label)bindable).OnTextChanged((string)oldValue, (string)newValue),
                    propertyChanging: static (bindable, oldValue, newValue) => ((global::Demo.Label)bindable).OnTextChanging((string)oldValue, (string)newValue),
                    coerceValue: null,
                    defaultValueCreator: null);

                public string Text
                {
                    get => (string)GetValue(TextProperty);
                    set => SetValue(TextProperty, value);
                }

                partial void OnTextChanged(string oldValue, string newValue);

                partial void OnTextChanging(string oldValue, string newValue);
            }
        "#};
        assert_eq!(render(members), expected);
    }

    #[test]
    fn test_attached_read_only_with_private_setter() {
        let options = options();
        let mut d = descriptor(
            "IsPinned",
            TypeRef::special(SpecialType::Boolean),
            MarkerKind::Attached { host: host() },
        );
        d.set_visibility = Some(Visibility::Private);
        let mut members = Vec::new();
        MemberGenerator::new(&options).generate(&d, &mut members);

        assert_eq!(
            names(&members),
            vec![
                "IsPinnedPropertyKey",
                "IsPinnedProperty",
                "GetIsPinned",
                "SetIsPinned",
                "OnIsPinnedChanged",
                "OnIsPinnedChanging",
            ]
        );
        let text = render(members);
        assert!(text.contains(
            "private static readonly global::Microsoft.Maui.Controls.BindablePropertyKey IsPinnedPropertyKey = global::Microsoft.Maui.Controls.BindableProperty.CreateAttachedReadOnly("
        ));
        assert!(text.contains(
            "public static readonly global::Microsoft.Maui.Controls.BindableProperty IsPinnedProperty = IsPinnedPropertyKey.BindableProperty;"
        ));
        assert!(text.contains(
            "public static bool GetIsPinned(global::Microsoft.Maui.Controls.View view) => (bool)view.GetValue(IsPinnedProperty);"
        ));
        assert!(text.contains(
            "private static void SetIsPinned(global::Microsoft.Maui.Controls.View view, bool value) => view.SetValue(IsPinnedPropertyKey, value);"
        ));
        assert!(text.contains(
            "propertyChanged: static (bindable, oldValue, newValue) => OnIsPinnedChanged((global::Microsoft.Maui.Controls.View)bindable, (bool)oldValue, (bool)newValue),"
        ));
        assert!(text.contains(
            "static partial void OnIsPinnedChanged(global::Microsoft.Maui.Controls.View view, bool oldValue, bool newValue);"
        ));
        assert!(text.contains("defaultValue: default(bool),"));
    }

    #[test]
    fn test_stub_order_with_all_callbacks() {
        let options = options();
        let mut d = descriptor("Count", TypeRef::special(SpecialType::Int32), MarkerKind::Instance);
        d.has_validate_callback = true;
        d.has_coerce_callback = true;
        d.has_default_value_factory = true;
        let mut members = Vec::new();
        MemberGenerator::new(&options).generate(&d, &mut members);
        assert_eq!(
            names(&members),
            vec![
                "CountProperty",
                "Count",
                "OnCountChanged",
                "OnCountChanging",
                "ValidateCount",
                "CoerceCount",
                "CreateCountDefaultValue",
            ]
        );
        let text = render(members);
        assert!(text.contains("private partial bool ValidateCount(int value);"));
        assert!(text.contains("private partial int CoerceCount(int value);"));
        assert!(text.contains("private partial int CreateCountDefaultValue();"));
        assert!(text.contains(
            "defaultValueCreator: static bindable => ((global::Demo.Label)bindable).CreateCountDefaultValue());"
        ));
        assert!(text.contains(
            "validateValue: static (bindable, value) => ((global::Demo.Label)bindable).ValidateCount((int)value),"
        ));
    }

    #[test]
    fn test_member_site_emits_keys_and_stubs_only() {
        let options = options();
        let mut d = descriptor("Caption", TypeRef::special(SpecialType::String), MarkerKind::Instance);
        d.site = MarkerSite::Member;
        d.is_read_only = true;
        let mut members = Vec::new();
        MemberGenerator::new(&options).generate(&d, &mut members);
        assert_eq!(
            names(&members),
            vec![
                "CaptionPropertyKey",
                "CaptionProperty",
                "OnCaptionChanged",
                "OnCaptionChanging",
            ]
        );
    }

    fn property_modifiers(get: Visibility, set: Visibility) -> String {
        let options = options();
        let mut d = descriptor("Text", TypeRef::special(SpecialType::String), MarkerKind::Instance);
        d.get_visibility = get;
        d.set_visibility = Some(set);
        let mut members = Vec::new();
        MemberGenerator::new(&options).generate(&d, &mut members);
        let text = render(members);
        text.lines()
            .skip_while(|l| !l.trim_end().ends_with("string Text"))
            .take(4)
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_accessor_modifier_placement() {
        assert_eq!(
            property_modifiers(Visibility::Public, Visibility::Private),
            "public string Text { get => (string)GetValue(TextProperty); private set => SetValue(TextPropertyKey, value);"
        );
        assert_eq!(
            property_modifiers(Visibility::Private, Visibility::Public),
            "public string Text { private get => (string)GetValue(TextProperty); set => SetValue(TextPropertyKey, value);"
        );
        assert_eq!(
            property_modifiers(Visibility::Protected, Visibility::Internal),
            "protected string Text { get => (string)GetValue(TextProperty); private protected set => SetValue(TextPropertyKey, value);"
        );
    }

    #[test]
    fn test_binding_mode_expressions() {
        assert_eq!(
            render_expr(&binding_mode(DefaultMode::Known(BindingMode::TwoWay))),
            "global::Microsoft.Maui.Controls.BindingMode.TwoWay"
        );
        assert_eq!(
            render_expr(&binding_mode(DefaultMode::Raw(7))),
            "(global::Microsoft.Maui.Controls.BindingMode)7"
        );
        assert_eq!(
            render_expr(&binding_mode(DefaultMode::Raw(u64::MAX as i128))),
            "(global::Microsoft.Maui.Controls.BindingMode)18446744073709551615"
        );
    }

    #[test]
    fn test_generated_code_attribute() {
        let options = GeneratorOptions {
            tool_name: "bindable-compiler".to_string(),
            tool_version: "1.2.3".to_string(),
            ..Default::default()
        };
        let d = descriptor("Text", TypeRef::special(SpecialType::String), MarkerKind::Instance);
        let mut members = Vec::new();
        MemberGenerator::new(&options).generate(&d, &mut members);
        let text = render(members);
        assert_eq!(
            text.matches("[global::System.CodeDom.Compiler.GeneratedCode(\"bindable-compiler\", \"1.2.3\")]")
                .count(),
            2
        );
    }
}
