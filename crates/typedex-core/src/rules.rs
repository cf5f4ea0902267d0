//! Static rule tables that shape the dataset.
//!
//! These encode curated knowledge that cannot be derived from the provider's
//! payloads: which identities only evolve from a regional form, which
//! identities end a line even though the tree continues past them, which
//! catalog types are not real types, and when each type entered the game.

use std::collections::{BTreeMap, BTreeSet};

use typedex_types::{SpeciesName, TypeName};

/// Identities whose prior form is region-specific.
pub const REGION_EXCLUSIVE: [&str; 11] = [
    "perrserker",
    "sirfetchd",
    "mr-rime",
    "cursola",
    "obstagoon",
    "runerigus",
    "overqwil",
    "sneasler",
    "clodsire",
    "basculegion",
    "ursaluna",
];

/// Identities counted as terminal even though they have evolutions.
///
/// Each gained a regional-only evolution later; the original form remains
/// an endpoint in every region without that evolution.
pub const FORCED_TERMINALS: [&str; 7] = [
    "mr-mime",
    "farfetchd",
    "corsola",
    "ursaring",
    "linoone",
    "qwilfish",
    "basculin",
];

/// Catalog entries that are not playable types.
pub const PSEUDO_TYPES: [&str; 3] = ["unknown", "stellar", "shadow"];

/// Types introduced after generation 1.
pub const TYPE_INTRODUCTIONS: [(&str, u32); 3] = [("steel", 2), ("dark", 2), ("fairy", 6)];

/// Rule tables used by record building and aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyRules {
    /// Identities flagged `region_exclusive`.
    pub region_exclusive: BTreeSet<SpeciesName>,
    /// Identities treated as chain terminals regardless of children.
    pub forced_terminals: BTreeSet<SpeciesName>,
    /// Catalog types dropped before aggregation.
    pub excluded_types: BTreeSet<TypeName>,
    /// First generation of each late type; unlisted types exist from 1.
    pub type_introductions: BTreeMap<TypeName, u32>,
}

impl Default for TaxonomyRules {
    fn default() -> Self {
        Self {
            region_exclusive: REGION_EXCLUSIVE.into_iter().map(SpeciesName::from).collect(),
            forced_terminals: FORCED_TERMINALS.into_iter().map(SpeciesName::from).collect(),
            excluded_types: PSEUDO_TYPES.into_iter().map(TypeName::from).collect(),
            type_introductions: TYPE_INTRODUCTIONS
                .into_iter()
                .map(|(name, generation)| (TypeName::from(name), generation))
                .collect(),
        }
    }
}

impl TaxonomyRules {
    /// Whether `identity` is region-exclusive.
    pub fn is_region_exclusive(&self, identity: &SpeciesName) -> bool {
        self.region_exclusive.contains(identity)
    }

    /// Drop pseudo-types from a raw catalog, keeping order.
    pub fn type_catalog(&self, raw: &[TypeName]) -> Vec<TypeName> {
        raw.iter()
            .filter(|name| !self.excluded_types.contains(*name))
            .cloned()
            .collect()
    }

    /// Whether `type_name` exists in `generation`.
    pub fn is_type_available(&self, type_name: &TypeName, generation: u32) -> bool {
        self.type_introductions
            .get(type_name)
            .is_none_or(|introduced| *introduced <= generation)
    }

    /// Catalog types that exist in `generation`, keeping order.
    pub fn available_types(&self, catalog: &[TypeName], generation: u32) -> Vec<TypeName> {
        catalog
            .iter()
            .filter(|name| self.is_type_available(name, generation))
            .cloned()
            .collect()
    }
}
