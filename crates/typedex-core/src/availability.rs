//! Availability rules: whether a record counts at a generation.
//!
//! A record exists from its introduction onward. Region-exclusive records
//! are the exception: their prior form only exists in the region of their
//! own generation, so they are visible in that generation and no other.

use typedex_types::{CanonicalRecord, TemporalMode};

/// Availability facts for one record at one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    /// Introduced in or before the generation.
    pub exists: bool,
    /// Introduced in exactly the generation.
    pub introduced_this_generation: bool,
    /// Playable in the generation.
    pub eligible: bool,
}

impl Availability {
    /// Evaluate `record` at `generation`.
    pub const fn of(record: &CanonicalRecord, generation: u32) -> Self {
        let exists = record.introduced_generation <= generation;
        let introduced_this_generation = record.introduced_generation == generation;
        Self {
            exists,
            introduced_this_generation,
            eligible: (exists && !record.region_exclusive) || introduced_this_generation,
        }
    }

    /// Whether the record counts under `mode`.
    pub const fn counts_in(self, mode: TemporalMode) -> bool {
        match mode {
            TemporalMode::Snapshot => self.introduced_this_generation,
            TemporalMode::Accumulated => self.eligible,
        }
    }
}

/// Whether `record` is counted at `generation` under `mode`.
pub const fn is_counted(record: &CanonicalRecord, generation: u32, mode: TemporalMode) -> bool {
    Availability::of(record, generation).counts_in(mode)
}
