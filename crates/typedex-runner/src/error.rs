//! Error types for the runner binary.
//!
//! [`RunnerError`] wraps every failure mode of a run so `main` can
//! propagate with `?`.

/// Top-level error for the runner binary.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: typedex_core::ConfigError,
    },

    /// Fetching, building, or aggregating failed.
    #[error("pipeline error: {source}")]
    Pipeline {
        /// The underlying pipeline error.
        #[from]
        source: typedex_core::PipelineError,
    },

    /// Reading or writing resources failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: typedex_store::StoreError,
    },

    /// The first argument is not a known mode.
    #[error("unknown mode {given:?}, expected refresh, rebuild, or schedule")]
    InvalidMode {
        /// The argument as given.
        given: String,
    },

    /// The schedule names a date that never occurs.
    #[error("schedule {month:02}-{day:02} never occurs")]
    Schedule {
        /// Configured month.
        month: u32,
        /// Configured day.
        day: u32,
    },
}
