//! String label newtypes for species identities and type names.
//!
//! Labels are the lowercase slugs used by the remote provider
//! (`"charizard"`, `"mr-mime"`, `"fire"`). Wrapping them keeps a species
//! identity from being passed where a type label is expected.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a transparent newtype wrapper around [`String`].
macro_rules! define_label {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create a label from anything string-like.
            pub fn new(label: impl Into<String>) -> Self {
                Self(label.into())
            }

            /// Borrow the label as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self(label.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                Self(label)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_label! {
    /// Unique name of a species (for example `"venusaur"`).
    SpeciesName
}

define_label! {
    /// Name of an elemental type (for example `"grass"`).
    TypeName
}
