//! Access levels and binding modes as carried by marker arguments.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════════════
// VISIBILITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Access level encoded as flags. The composites are the bitwise-or of two
/// atomic levels and need both modifier tokens when emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public = 1,
    Protected = 2,
    Internal = 4,
    Private = 8,
    ProtectedInternal = 6,
    ProtectedPrivate = 10,
}

lazy_static! {
    static ref MODIFIER_TOKENS: HashMap<Visibility, &'static [&'static str]> = {
        let mut m: HashMap<Visibility, &'static [&'static str]> = HashMap::new();
        m.insert(Visibility::Public, &["public"]);
        m.insert(Visibility::Protected, &["protected"]);
        m.insert(Visibility::Internal, &["internal"]);
        m.insert(Visibility::Private, &["private"]);
        m.insert(Visibility::ProtectedInternal, &["protected", "internal"]);
        m.insert(Visibility::ProtectedPrivate, &["private", "protected"]);
        m
    };
}

impl Visibility {
    pub fn from_raw(raw: i128) -> Option<Self> {
        match raw {
            1 => Some(Visibility::Public),
            2 => Some(Visibility::Protected),
            4 => Some(Visibility::Internal),
            8 => Some(Visibility::Private),
            6 => Some(Visibility::ProtectedInternal),
            10 => Some(Visibility::ProtectedPrivate),
            _ => None,
        }
    }

    pub fn modifiers(self) -> &'static [&'static str] {
        MODIFIER_TOKENS.get(&self).copied().unwrap_or(&["public"])
    }

    fn rank(self) -> u8 {
        match self {
            Visibility::Public => 5,
            Visibility::ProtectedInternal => 4,
            Visibility::Protected | Visibility::Internal => 3,
            Visibility::ProtectedPrivate => 2,
            Visibility::Private => 1,
        }
    }

    /// Strict restrictiveness order. `Protected` and `Internal` are not
    /// comparable with each other.
    pub fn is_more_restrictive_than(self, other: Visibility) -> bool {
        self.rank() < other.rank()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BINDING MODE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
pub enum BindingMode {
    Default = 0,
    TwoWay = 1,
    OneWay = 2,
    OneWayToSource = 3,
    OneTime = 4,
}

impl BindingMode {
    pub fn from_raw(raw: i128) -> Option<Self> {
        match raw {
            0 => Some(BindingMode::Default),
            1 => Some(BindingMode::TwoWay),
            2 => Some(BindingMode::OneWay),
            3 => Some(BindingMode::OneWayToSource),
            4 => Some(BindingMode::OneTime),
            _ => None,
        }
    }
}

/// Effective default binding mode of a descriptor. An undefined raw value is
/// kept so the emitted code still compiles as a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultMode {
    Known(BindingMode),
    Raw(i128),
}

impl Default for DefaultMode {
    fn default() -> Self {
        DefaultMode::Known(BindingMode::OneWay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composites_are_or_of_atomic_levels() {
        assert_eq!(
            Visibility::ProtectedInternal as i128,
            Visibility::Protected as i128 | Visibility::Internal as i128
        );
        assert_eq!(
            Visibility::ProtectedPrivate as i128,
            Visibility::Protected as i128 | Visibility::Private as i128
        );
        assert_eq!(Visibility::from_raw(12), None);
        assert_eq!(Visibility::from_raw(0), None);
    }

    #[test]
    fn test_modifier_tokens() {
        assert_eq!(Visibility::ProtectedPrivate.modifiers(), &["private", "protected"]);
        assert_eq!(Visibility::ProtectedInternal.modifiers(), &["protected", "internal"]);
        assert_eq!(Visibility::Private.modifiers(), &["private"]);
    }

    #[test]
    fn test_restrictiveness() {
        assert!(Visibility::Private.is_more_restrictive_than(Visibility::Public));
        assert!(Visibility::Protected.is_more_restrictive_than(Visibility::ProtectedInternal));
        assert!(!Visibility::Protected.is_more_restrictive_than(Visibility::Internal));
        assert!(!Visibility::Internal.is_more_restrictive_than(Visibility::Protected));
    }

    #[test]
    fn test_binding_mode_range() {
        assert_eq!(BindingMode::from_raw(1), Some(BindingMode::TwoWay));
        assert_eq!(BindingMode::from_raw(5), None);
        assert_eq!(DefaultMode::default(), DefaultMode::Known(BindingMode::OneWay));
    }
}
