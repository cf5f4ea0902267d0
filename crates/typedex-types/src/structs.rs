//! Canonical records and the output resources built from them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{MatchMode, TemporalMode};
use crate::ids::RunId;
use crate::labels::{SpeciesName, TypeName};
use crate::typing::Typing;

// ---------------------------------------------------------------------------
// Canonical records
// ---------------------------------------------------------------------------

/// One terminal species with its typing across every generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Unique species name.
    pub identity: SpeciesName,
    /// Generation in which the species first existed (>= 1).
    pub introduced_generation: u32,
    /// National catalog number; unique across a record set.
    pub catalog_number: u32,
    /// True if the species only evolves from a regional prior form.
    pub region_exclusive: bool,
    /// Typing for every generation `1..=max_generation`.
    pub types_by_generation: BTreeMap<u32, Typing>,
}

impl CanonicalRecord {
    /// Typing at `generation`, if covered.
    pub fn typing_at(&self, generation: u32) -> Option<&Typing> {
        self.types_by_generation.get(&generation)
    }
}

/// Serializable form of a validated record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDataset {
    /// Highest generation covered by every record.
    pub max_generation: u32,
    /// The canonical records, in collection order.
    pub records: Vec<CanonicalRecord>,
}

// ---------------------------------------------------------------------------
// Generation resources
// ---------------------------------------------------------------------------

/// Count of records matching one type filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TypeCounter {
    /// The filter: one type, or two for strict pairs.
    pub types: Vec<TypeName>,
    /// Matching, counted records.
    pub count: u32,
}

/// Per-generation aggregate for one match/temporal mode combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GenerationResource {
    /// The generation described.
    pub generation: u32,
    /// Partial (membership) or strict (exact typing) counters.
    pub match_mode: MatchMode,
    /// Snapshot or accumulated visibility.
    pub temporal_mode: TemporalMode,
    /// One counter per type filter, in enumeration order.
    pub counters: Vec<TypeCounter>,
    /// Inverted Gini coefficient (0-100); `None` when the sample is degenerate.
    pub balance: Option<f64>,
    /// Normalized Shannon index (0-100); `None` when the sample is degenerate.
    pub diversity: Option<f64>,
}

// ---------------------------------------------------------------------------
// Type resources
// ---------------------------------------------------------------------------

/// Count of records of one type at one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GenerationCounter {
    /// The generation.
    pub generation: u32,
    /// Records whose typing contains the type.
    pub count: u32,
}

/// Per-type history across all generations (membership semantics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TypeResource {
    /// The type described.
    pub type_name: TypeName,
    /// Snapshot or accumulated visibility.
    pub temporal_mode: TemporalMode,
    /// One counter per generation, ascending.
    pub counters: Vec<GenerationCounter>,
}

// ---------------------------------------------------------------------------
// Run manifest
// ---------------------------------------------------------------------------

/// Where a run's canonical records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DatasetOrigin {
    /// Fetched from the remote provider during this run.
    Fetched,
    /// Reused from a previously stored source dataset.
    Reused,
}

/// Summary written after every aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunManifest {
    /// Identifier of the run.
    pub run_id: RunId,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the last resource was persisted.
    pub finished_at: DateTime<Utc>,
    /// Number of generations aggregated.
    pub generation_count: u32,
    /// Number of canonical records aggregated.
    pub record_count: u32,
    /// Generation resources written.
    pub generation_resources: u32,
    /// Type resources written.
    pub type_resources: u32,
    /// Whether the records were fetched or reused.
    pub source: DatasetOrigin,
}
