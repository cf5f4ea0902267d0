//! Error types for the `typedex-core` crate.
//!
//! Transport and data-integrity errors are fatal for a run. Degenerate
//! statistical samples are reported per resource instead (see
//! [`crate::indices`]).

use typedex_types::{MatchMode, SpeciesName};

use crate::history::HistoryError;

/// A remote fetch failed or returned an unusable payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {message}")]
    Request {
        /// Requested URL.
        url: String,
        /// Transport failure description.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body did not match the expected payload shape.
    #[error("failed to decode payload from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error description.
        message: String,
    },

    /// The species catalog came back empty.
    #[error("species catalog is empty")]
    EmptyCatalog,
}

/// Data-integrity failures while building canonical records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Generation tags or type history could not be interpreted.
    #[error("malformed history for {identity}: {source}")]
    MalformedHistory {
        /// The species being built.
        identity: SpeciesName,
        /// What was wrong.
        #[source]
        source: HistoryError,
    },

    /// Zero or several national catalog numbers were listed.
    #[error("{identity} has {found} national catalog entries, expected exactly one")]
    AmbiguousCatalogEntry {
        /// The species being built.
        identity: SpeciesName,
        /// Number of national entries found.
        found: usize,
    },

    /// Zero or several varieties were flagged as default.
    #[error("{identity} has {found} default varieties, expected exactly one")]
    AmbiguousDefaultForm {
        /// The species being built.
        identity: SpeciesName,
        /// Number of default varieties found.
        found: usize,
    },

    /// Two records share a catalog number.
    #[error("catalog number {catalog_number} is shared by {first} and {second}")]
    DuplicateCatalogNumber {
        /// The shared number.
        catalog_number: u32,
        /// The record that claimed it first.
        first: SpeciesName,
        /// The conflicting record.
        second: SpeciesName,
    },

    /// A record's introduction generation lies outside `1..=max_generation`.
    #[error(
        "{identity} is introduced in generation {introduced_generation}, outside 1..={max_generation}"
    )]
    IntroducedOutOfRange {
        /// The offending record.
        identity: SpeciesName,
        /// Generation the record claims to be introduced in.
        introduced_generation: u32,
        /// Highest generation of the set.
        max_generation: u32,
    },

    /// A record lacks a typing for a generation it must cover.
    #[error("{identity} has no typing for generation {generation}")]
    IncompleteCoverage {
        /// The incomplete record.
        identity: SpeciesName,
        /// First uncovered generation.
        generation: u32,
    },
}

/// Contract violations by callers of the counting engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The filter has the wrong number of types for the match mode.
    #[error("{} query received {received} filter types", .match_mode.label())]
    InvalidQueryArity {
        /// Mode of the rejected query.
        match_mode: MatchMode,
        /// Number of filter types supplied.
        received: usize,
    },
}

/// Top-level error for a full aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// A remote fetch failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A record could not be built or validated.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// An internally generated query was rejected.
    #[error("query error: {0}")]
    Query(#[from] QueryError),
}
