//! Enumeration types for counting queries and output resources.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How a query's type filter is compared against a record's typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum MatchMode {
    /// The record's typing contains the single filter type.
    Partial,
    /// The record's typing equals the filter set, ignoring order.
    Strict,
}

impl MatchMode {
    /// Lowercase label used in resource keys and log fields.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Partial => "partial",
            Self::Strict => "strict",
        }
    }

    /// Number of filter types a query in this mode may carry.
    pub const fn accepts_arity(self, arity: usize) -> bool {
        match self {
            Self::Partial => arity == 1,
            Self::Strict => arity == 1 || arity == 2,
        }
    }
}

/// Which records are visible at a queried generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TemporalMode {
    /// Only records introduced in exactly the queried generation.
    Snapshot,
    /// Every record available for play by the queried generation.
    Accumulated,
}

impl TemporalMode {
    /// Both modes, snapshot first.
    pub const ALL: [Self; 2] = [Self::Snapshot, Self::Accumulated];

    /// Lowercase label used in resource keys and log fields.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::Accumulated => "accumulated",
        }
    }

    /// Returns `true` for [`TemporalMode::Accumulated`].
    pub const fn is_accumulated(self) -> bool {
        matches!(self, Self::Accumulated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn arity_rules() {
        assert!(MatchMode::Partial.accepts_arity(1));
        assert!(!MatchMode::Partial.accepts_arity(2));
        assert!(MatchMode::Strict.accepts_arity(1));
        assert!(MatchMode::Strict.accepts_arity(2));
        assert!(!MatchMode::Strict.accepts_arity(0));
        assert!(!MatchMode::Strict.accepts_arity(3));
    }

    #[test]
    fn modes_serialize_snake_case() {
        let json = serde_json::to_string(&TemporalMode::Accumulated).unwrap();
        assert_eq!(json, "\"accumulated\"");
        let json = serde_json::to_string(&MatchMode::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
    }
}
