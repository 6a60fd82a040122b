//! Parsed, validated representation of one marker occurrence.

use crate::access::{DefaultMode, Visibility};
use crate::model::{SourceLocation, TypeRef};
use crate::syntax::Expr;

/// Which generator family the marker belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    Instance,
    Attached { host: TypeRef },
}

impl MarkerKind {
    pub fn is_attached(&self) -> bool {
        matches!(self, MarkerKind::Attached { .. })
    }
}

/// Where the marker was written. Class-level markers get a generated
/// accessor; member-level markers sit on a hand-written accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSite {
    Class,
    Member,
}

/// Emitted member layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Writable,
    ReadOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub property_type: TypeRef,
    pub declaring_type: TypeRef,
    pub kind: MarkerKind,
    pub site: MarkerSite,
    /// Converted default; `None` means the type's natural default.
    pub default_value: Option<Expr>,
    pub default_mode: DefaultMode,
    pub get_visibility: Visibility,
    /// `None` inherits `get_visibility`.
    pub set_visibility: Option<Visibility>,
    pub is_read_only: bool,
    pub has_default_value_factory: bool,
    pub has_coerce_callback: bool,
    pub has_validate_callback: bool,
    pub location: Option<SourceLocation>,
}

impl PropertyDescriptor {
    pub fn new(
        name: &str,
        property_type: TypeRef,
        declaring_type: TypeRef,
        kind: MarkerKind,
        site: MarkerSite,
    ) -> Self {
        PropertyDescriptor {
            name: name.to_string(),
            property_type,
            declaring_type,
            kind,
            site,
            default_value: None,
            default_mode: DefaultMode::default(),
            get_visibility: Visibility::Public,
            set_visibility: None,
            is_read_only: false,
            has_default_value_factory: false,
            has_coerce_callback: false,
            has_validate_callback: false,
            location: None,
        }
    }

    pub fn shape(&self) -> Shape {
        let distinct_write = self
            .set_visibility
            .is_some_and(|set| set != self.get_visibility);
        if distinct_write || self.is_read_only {
            Shape::ReadOnly
        } else {
            Shape::Writable
        }
    }

    pub fn effective_set_visibility(&self) -> Visibility {
        match self.set_visibility {
            Some(set) => set,
            None if self.is_read_only => Visibility::Private,
            None => self.get_visibility,
        }
    }

    /// The explicit default wins over the factory.
    pub fn emits_default_value_factory(&self) -> bool {
        self.has_default_value_factory && self.default_value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecialType;

    fn descriptor() -> PropertyDescriptor {
        PropertyDescriptor::new(
            "Text",
            TypeRef::special(SpecialType::String),
            TypeRef::named("Demo.Label", false),
            MarkerKind::Instance,
            MarkerSite::Class,
        )
    }

    #[test]
    fn test_shape_selection() {
        let mut d = descriptor();
        assert_eq!(d.shape(), Shape::Writable);

        d.set_visibility = Some(Visibility::Public);
        assert_eq!(d.shape(), Shape::Writable);

        d.set_visibility = Some(Visibility::Private);
        assert_eq!(d.shape(), Shape::ReadOnly);

        d.set_visibility = None;
        d.is_read_only = true;
        assert_eq!(d.shape(), Shape::ReadOnly);
        assert_eq!(d.effective_set_visibility(), Visibility::Private);
    }

    #[test]
    fn test_every_distinct_visibility_pair_is_read_only() {
        let all = [
            Visibility::Public,
            Visibility::Protected,
            Visibility::Internal,
            Visibility::Private,
            Visibility::ProtectedInternal,
            Visibility::ProtectedPrivate,
        ];
        for get in all {
            for set in all {
                let mut d = descriptor();
                d.get_visibility = get;
                d.set_visibility = Some(set);
                let expected = if get == set { Shape::Writable } else { Shape::ReadOnly };
                assert_eq!(d.shape(), expected, "{:?}/{:?}", get, set);
            }
        }
    }

    #[test]
    fn test_explicit_default_suppresses_factory() {
        let mut d = descriptor();
        d.has_default_value_factory = true;
        assert!(d.emits_default_value_factory());
        d.default_value = Some(Expr::Literal(crate::syntax::Literal::String(
            "hello".to_string(),
        )));
        assert!(!d.emits_default_value_factory());
    }
}
