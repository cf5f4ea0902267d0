//! Type history reconstruction.
//!
//! The provider only reports typing changes: each past-type entry says
//! "this typing applied up to and including generation G". Reconstruction
//! expands those deltas into one typing per generation.

use std::collections::BTreeMap;

use typedex_types::{PastTypes, TypeName, TypeSlot, Typing, TypingError};

use crate::numeral::{NumeralError, parse_generation_tag};

/// Reasons a type history cannot be reconstructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// A generation tag was not a recognizable numeral.
    #[error(transparent)]
    Numeral(#[from] NumeralError),

    /// A slot list did not form a valid typing.
    #[error("invalid typing: {0}")]
    Typing(#[from] TypingError),

    /// Delta boundaries were not strictly increasing.
    #[error("delta boundary {boundary} does not follow {previous}")]
    NonIncreasing {
        /// Boundary of the preceding delta.
        previous: u32,
        /// The out-of-order boundary.
        boundary: u32,
    },

    /// A delta refers to a generation past the last known one.
    #[error("delta boundary {boundary} exceeds max generation {max_generation}")]
    BeyondMaxGeneration {
        /// The offending boundary.
        boundary: u32,
        /// Last known generation.
        max_generation: u32,
    },
}

/// A typing that applied up to and including `boundary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHistoryDelta {
    /// Last generation with this typing.
    pub boundary: u32,
    /// The typing.
    pub typing: Typing,
}

impl TypeHistoryDelta {
    /// Parse a past-types payload entry.
    pub fn from_payload(entry: &PastTypes) -> Result<Self, HistoryError> {
        Ok(Self {
            boundary: parse_generation_tag(&entry.generation.name)?,
            typing: typing_from_slots(&entry.types)?,
        })
    }
}

/// Build a typing from provider slots, ordered by slot number.
pub fn typing_from_slots(slots: &[TypeSlot]) -> Result<Typing, TypingError> {
    let mut ordered: Vec<&TypeSlot> = slots.iter().collect();
    ordered.sort_by_key(|slot| slot.slot);
    Typing::new(
        ordered
            .into_iter()
            .map(|slot| TypeName::from(slot.type_ref.name.as_str()))
            .collect(),
    )
}

/// Expand `deltas` into a typing for every generation `1..=max_generation`.
///
/// Each delta fills the generations after the previous boundary through its
/// own boundary; generations after the last delta take `current`.
pub fn reconstruct_history(
    deltas: &[TypeHistoryDelta],
    current: &Typing,
    max_generation: u32,
) -> Result<BTreeMap<u32, Typing>, HistoryError> {
    let mut types = BTreeMap::new();
    let mut next_generation: u32 = 1;
    let mut previous: Option<u32> = None;

    for delta in deltas {
        if let Some(previous) = previous {
            if delta.boundary <= previous {
                return Err(HistoryError::NonIncreasing {
                    previous,
                    boundary: delta.boundary,
                });
            }
        }
        if delta.boundary > max_generation {
            return Err(HistoryError::BeyondMaxGeneration {
                boundary: delta.boundary,
                max_generation,
            });
        }

        for generation in next_generation..=delta.boundary {
            types.insert(generation, delta.typing.clone());
        }
        next_generation = delta.boundary.saturating_add(1);
        previous = Some(delta.boundary);
    }

    for generation in next_generation..=max_generation {
        types.insert(generation, current.clone());
    }

    Ok(types)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use typedex_types::NamedResource;

    use super::*;

    fn mono(label: &str) -> Typing {
        Typing::Mono(TypeName::from(label))
    }

    fn dual(a: &str, b: &str) -> Typing {
        Typing::Dual(TypeName::from(a), TypeName::from(b))
    }

    fn slot(slot: u8, name: &str) -> TypeSlot {
        TypeSlot {
            slot,
            type_ref: NamedResource {
                name: name.to_owned(),
                url: format!("type/{name}"),
            },
        }
    }

    #[test]
    fn fills_between_boundaries() {
        let deltas = [
            TypeHistoryDelta {
                boundary: 3,
                typing: mono("grass"),
            },
            TypeHistoryDelta {
                boundary: 5,
                typing: dual("grass", "poison"),
            },
        ];
        let history = reconstruct_history(&deltas, &mono("poison"), 6).unwrap();

        assert_eq!(history.len(), 6);
        for generation in 1..=3 {
            assert_eq!(history.get(&generation), Some(&mono("grass")));
        }
        for generation in 4..=5 {
            assert_eq!(history.get(&generation), Some(&dual("grass", "poison")));
        }
        assert_eq!(history.get(&6), Some(&mono("poison")));
    }

    #[test]
    fn no_deltas_uses_current_everywhere() {
        let history = reconstruct_history(&[], &dual("fire", "flying"), 9).unwrap();
        assert_eq!(history.len(), 9);
        assert!(history.values().all(|typing| *typing == dual("fire", "flying")));
    }

    #[test]
    fn rejects_non_increasing_boundaries() {
        let deltas = [
            TypeHistoryDelta {
                boundary: 5,
                typing: mono("normal"),
            },
            TypeHistoryDelta {
                boundary: 5,
                typing: mono("fairy"),
            },
        ];
        assert_eq!(
            reconstruct_history(&deltas, &mono("fairy"), 9),
            Err(HistoryError::NonIncreasing {
                previous: 5,
                boundary: 5
            })
        );
    }

    #[test]
    fn rejects_boundary_past_max() {
        let deltas = [TypeHistoryDelta {
            boundary: 7,
            typing: mono("normal"),
        }];
        assert!(matches!(
            reconstruct_history(&deltas, &mono("fairy"), 6),
            Err(HistoryError::BeyondMaxGeneration { .. })
        ));
    }

    #[test]
    fn slots_are_ordered_by_slot_number() {
        let typing = typing_from_slots(&[slot(2, "flying"), slot(1, "fire")]);
        assert_eq!(typing, Ok(dual("fire", "flying")));
        assert!(typing_from_slots(&[]).is_err());
    }

    #[test]
    fn delta_from_payload_rejects_bad_numeral() {
        let entry = PastTypes {
            generation: NamedResource {
                name: String::from("generation-q"),
                url: String::new(),
            },
            types: vec![slot(1, "normal")],
        };
        assert!(matches!(
            TypeHistoryDelta::from_payload(&entry),
            Err(HistoryError::Numeral(_))
        ));
    }
}
