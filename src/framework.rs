//! Fully qualified names of the property-storage framework the generated
//! code calls into. These are reproduced verbatim in every emitted unit.

pub const BINDABLE_PROPERTY: &str = "global::Microsoft.Maui.Controls.BindableProperty";
pub const BINDABLE_PROPERTY_KEY: &str = "global::Microsoft.Maui.Controls.BindablePropertyKey";
pub const BINDING_MODE: &str = "global::Microsoft.Maui.Controls.BindingMode";
pub const BINDABLE_OBJECT: &str = "global::Microsoft.Maui.Controls.BindableObject";
pub const GENERATED_CODE_ATTRIBUTE: &str = "global::System.CodeDom.Compiler.GeneratedCode";

pub const CREATE: &str = "Create";
pub const CREATE_READ_ONLY: &str = "CreateReadOnly";
pub const CREATE_ATTACHED: &str = "CreateAttached";
pub const CREATE_ATTACHED_READ_ONLY: &str = "CreateAttachedReadOnly";

/// Projection from a read-only key to its public handle.
pub const KEY_PROJECTION: &str = "BindableProperty";

pub const GET_VALUE: &str = "GetValue";
pub const SET_VALUE: &str = "SetValue";

pub const PROPERTY_SUFFIX: &str = "Property";
pub const KEY_SUFFIX: &str = "PropertyKey";

/// Parameter names of the framework's callback delegates.
pub const BINDABLE_PARAM: &str = "bindable";
pub const OLD_VALUE_PARAM: &str = "oldValue";
pub const NEW_VALUE_PARAM: &str = "newValue";
pub const VALUE_PARAM: &str = "value";

/// Parameter name of the host in generated attached accessors and stubs.
pub const VIEW_PARAM: &str = "view";

pub fn property_field_name(name: &str) -> String {
    format!("{}{}", name, PROPERTY_SUFFIX)
}

pub fn key_field_name(name: &str) -> String {
    format!("{}{}", name, KEY_SUFFIX)
}
