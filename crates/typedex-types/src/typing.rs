//! A record's type assignment at a single generation.

use serde::{Deserialize, Serialize};

use crate::labels::TypeName;

/// Errors raised when a list of type labels cannot form a [`Typing`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypingError {
    /// Zero or more than two labels were supplied.
    #[error("a typing needs one or two types, received {0}")]
    Arity(usize),

    /// The same label appeared twice.
    #[error("duplicate type {0} in typing")]
    Duplicate(TypeName),
}

/// One or two type labels, in slot order.
///
/// Derived equality is slot-ordered. Use [`Typing::matches_set`] for the
/// order-independent comparison that strict counting needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TypeName>", into = "Vec<TypeName>")]
pub enum Typing {
    /// A single type.
    Mono(TypeName),
    /// Two distinct types; the first is the primary slot.
    Dual(TypeName, TypeName),
}

impl Typing {
    /// Build a typing from slot-ordered labels.
    pub fn new(types: Vec<TypeName>) -> Result<Self, TypingError> {
        let len = types.len();
        let mut iter = types.into_iter();
        match (iter.next(), iter.next(), iter.next()) {
            (Some(first), None, None) => Ok(Self::Mono(first)),
            (Some(first), Some(second), None) => {
                if first == second {
                    Err(TypingError::Duplicate(first))
                } else {
                    Ok(Self::Dual(first, second))
                }
            }
            _ => Err(TypingError::Arity(len)),
        }
    }

    /// Number of types (1 or 2).
    pub const fn len(&self) -> usize {
        match self {
            Self::Mono(_) => 1,
            Self::Dual(..) => 2,
        }
    }

    /// Always `false`; a typing holds at least one type.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the types in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeName> {
        let (first, second) = match self {
            Self::Mono(a) => (a, None),
            Self::Dual(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    /// Returns `true` if `type_name` is one of this typing's types.
    pub fn contains(&self, type_name: &TypeName) -> bool {
        match self {
            Self::Mono(a) => a == type_name,
            Self::Dual(a, b) => a == type_name || b == type_name,
        }
    }

    /// Order-independent equality against a filter of one or two labels.
    pub fn matches_set(&self, filter: &[TypeName]) -> bool {
        match (self, filter) {
            (Self::Mono(a), [x]) => a == x,
            (Self::Dual(a, b), [x, y]) => (a == x && b == y) || (a == y && b == x),
            _ => false,
        }
    }

    /// Share of one record credited to each of its types: 1.0 when
    /// mono-typed, 0.5 when dual-typed.
    pub const fn share(&self) -> f64 {
        match self {
            Self::Mono(_) => 1.0,
            Self::Dual(..) => 0.5,
        }
    }
}

impl TryFrom<Vec<TypeName>> for Typing {
    type Error = TypingError;

    fn try_from(types: Vec<TypeName>) -> Result<Self, Self::Error> {
        Self::new(types)
    }
}

impl From<Typing> for Vec<TypeName> {
    fn from(typing: Typing) -> Self {
        match typing {
            Typing::Mono(a) => vec![a],
            Typing::Dual(a, b) => vec![a, b],
        }
    }
}

impl core::fmt::Display for Typing {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Mono(a) => write!(f, "{a}"),
            Self::Dual(a, b) => write!(f, "{a}/{b}"),
        }
    }
}
