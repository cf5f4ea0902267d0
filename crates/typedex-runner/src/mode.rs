//! Run modes selected by the first command-line argument.

use std::str::FromStr;

use crate::error::RunnerError;

/// What the binary does after loading configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Re-aggregate the stored source dataset, fetching it first if absent.
    #[default]
    Refresh,
    /// Fetch every record from the provider, then aggregate.
    Rebuild,
    /// Rebuild once a year at the configured instant, forever.
    Schedule,
}

impl RunMode {
    /// Mode from an optional argument; no argument means [`RunMode::Refresh`].
    pub fn from_arg(arg: Option<&str>) -> Result<Self, RunnerError> {
        arg.map_or(Ok(Self::default()), str::parse)
    }

    /// Lowercase name used in log fields.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::Rebuild => "rebuild",
            Self::Schedule => "schedule",
        }
    }
}

impl FromStr for RunMode {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refresh" => Ok(Self::Refresh),
            "rebuild" => Ok(Self::Rebuild),
            "schedule" => Ok(Self::Schedule),
            _ => Err(RunnerError::InvalidMode {
                given: s.to_owned(),
            }),
        }
    }
}
