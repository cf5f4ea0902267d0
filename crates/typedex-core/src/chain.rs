//! Evolution chain resolution.
//!
//! A chain is a tree rooted at the base form. Dataset records are built only
//! for terminal identities: natural leaves, plus any identity flagged as a
//! forced terminal (regional split lines where the tree shape does not match
//! the endpoint used for counting). Every identity in the tree is also
//! reported as a member so that later catalog entries from the same chain
//! can be skipped.

use std::collections::BTreeSet;

use typedex_types::{ChainLink, SpeciesName};

/// A node of an evolution tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionNode {
    /// Species at this node.
    pub identity: SpeciesName,
    /// Species this node evolves into.
    pub children: Vec<EvolutionNode>,
}

impl EvolutionNode {
    /// A node with no evolutions.
    pub fn leaf(identity: impl Into<SpeciesName>) -> Self {
        Self {
            identity: identity.into(),
            children: Vec::new(),
        }
    }

    /// A node evolving into `children`.
    pub fn with_children(identity: impl Into<SpeciesName>, children: Vec<Self>) -> Self {
        Self {
            identity: identity.into(),
            children,
        }
    }
}

impl From<&ChainLink> for EvolutionNode {
    fn from(link: &ChainLink) -> Self {
        Self {
            identity: SpeciesName::from(link.species.name.as_str()),
            children: link.evolves_to.iter().map(Self::from).collect(),
        }
    }
}

/// Members and terminals of one chain, each in depth-first pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainResolution {
    /// Every identity in the tree.
    pub members: Vec<SpeciesName>,
    /// Identities that produce a canonical record.
    pub terminals: Vec<SpeciesName>,
}

impl ChainResolution {
    /// Members as a set.
    pub fn member_set(&self) -> BTreeSet<SpeciesName> {
        self.members.iter().cloned().collect()
    }

    /// Terminals as a set.
    pub fn terminal_set(&self) -> BTreeSet<SpeciesName> {
        self.terminals.iter().cloned().collect()
    }
}

/// Walk `root` depth-first and collect members and terminals.
///
/// A node is terminal if it has no children or is in `forced_terminals`.
/// Children of a forced terminal are still visited.
pub fn resolve_chain(
    root: &EvolutionNode,
    forced_terminals: &BTreeSet<SpeciesName>,
) -> ChainResolution {
    let mut resolution = ChainResolution::default();
    let mut seen: BTreeSet<&SpeciesName> = BTreeSet::new();
    let mut stack: Vec<&EvolutionNode> = vec![root];

    while let Some(node) = stack.pop() {
        if !seen.insert(&node.identity) {
            continue;
        }
        resolution.members.push(node.identity.clone());
        if node.children.is_empty() || forced_terminals.contains(&node.identity) {
            resolution.terminals.push(node.identity.clone());
        }
        // Reverse so the first child is visited first.
        stack.extend(node.children.iter().rev());
    }

    resolution
}
