//! Core pipeline for the Typedex taxonomy dataset.
//!
//! Raw species, evolution-chain, and form payloads are turned into a
//! validated set of canonical records, one per final evolution, each with
//! a typing for every generation. The records are then counted and
//! weighted across every generation, type filter, and counting mode, and
//! summarized with balance and diversity indices.
//!
//! # Modules
//!
//! - [`numeral`] -- Roman numeral generation tags
//! - [`chain`] -- Evolution chain resolution
//! - [`history`] -- Type history reconstruction
//! - [`rules`] -- Curated rule tables
//! - [`builder`] -- Record building and dataset collection
//! - [`records`] -- The validated record set
//! - [`availability`] -- Whether a record counts at a generation
//! - [`counting`] -- Counts and weights
//! - [`indices`] -- Balance and diversity
//! - [`aggregate`] -- The resource matrix
//! - [`provider`] -- Remote data seam
//! - [`refresh`] -- End-to-end entry points
//! - [`config`] -- YAML configuration
//! - [`error`] -- Pipeline error types

pub mod aggregate;
pub mod availability;
pub mod builder;
pub mod chain;
pub mod config;
pub mod counting;
pub mod error;
pub mod history;
pub mod indices;
pub mod numeral;
pub mod provider;
pub mod records;
pub mod refresh;
pub mod rules;

pub use aggregate::{AggregationReport, aggregate};
pub use availability::is_counted;
pub use builder::{SpeciesCache, build_record, collect_records};
pub use chain::{ChainResolution, EvolutionNode, resolve_chain};
pub use config::{ConfigError, TypedexConfig};
pub use counting::{CountingQuery, count, query_weight, total_weight};
pub use error::{BuildError, PipelineError, QueryError, TransportError};
pub use history::{HistoryError, TypeHistoryDelta, reconstruct_history};
pub use indices::{IndexError, balance, diversity};
pub use provider::{DataProvider, StaticProvider};
pub use records::RecordSet;
pub use refresh::{RefreshOutcome, RefreshSettings, aggregate_existing, run_full_aggregation};
pub use rules::TaxonomyRules;
