//! File layout for stored resources.
//!
//! ```text
//! <data_dir>/
//!     source.json
//!     manifest.json
//!     generations/gen_<n>_<partial|strict>[_accumulated].json
//!     types/<type>[_accumulated].json
//! ```

use std::path::PathBuf;

use typedex_types::{GenerationResource, MatchMode, TemporalMode, TypeName, TypeResource};

use crate::error::StoreError;

/// File holding the canonical record set.
pub const SOURCE_FILE: &str = "source.json";

/// File holding the last run's manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Directory holding generation resources.
pub const GENERATIONS_DIR: &str = "generations";

/// Directory holding type resources.
pub const TYPES_DIR: &str = "types";

const fn accumulated_suffix(temporal_mode: TemporalMode) -> &'static str {
    if temporal_mode.is_accumulated() {
        "_accumulated"
    } else {
        ""
    }
}

/// Identifies one generation resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationKey {
    /// The generation.
    pub generation: u32,
    /// Partial or strict counters.
    pub match_mode: MatchMode,
    /// Snapshot or accumulated visibility.
    pub temporal_mode: TemporalMode,
}

impl GenerationKey {
    /// The key a resource is stored under.
    pub const fn of(resource: &GenerationResource) -> Self {
        Self {
            generation: resource.generation,
            match_mode: resource.match_mode,
            temporal_mode: resource.temporal_mode,
        }
    }

    /// Path relative to the data directory.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(GENERATIONS_DIR).join(format!(
            "gen_{}_{}{}.json",
            self.generation,
            self.match_mode.label(),
            accumulated_suffix(self.temporal_mode)
        ))
    }
}

/// Identifies one type resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey {
    /// The type.
    pub type_name: TypeName,
    /// Snapshot or accumulated visibility.
    pub temporal_mode: TemporalMode,
}

impl TypeKey {
    /// The key a resource is stored under.
    pub fn of(resource: &TypeResource) -> Self {
        Self {
            type_name: resource.type_name.clone(),
            temporal_mode: resource.temporal_mode,
        }
    }

    /// Path relative to the data directory.
    ///
    /// The type name becomes the file stem, so it must be a non-empty run
    /// of ASCII alphanumerics, `-` or `_`.
    pub fn relative_path(&self) -> Result<PathBuf, StoreError> {
        if !is_slug(self.type_name.as_str()) {
            return Err(StoreError::UnsafeTypeName {
                type_name: self.type_name.to_string(),
            });
        }
        Ok(PathBuf::from(TYPES_DIR).join(format!(
            "{}{}.json",
            self.type_name,
            accumulated_suffix(self.temporal_mode)
        )))
    }
}

fn is_slug(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generation_file_names() {
        let key = GenerationKey {
            generation: 4,
            match_mode: MatchMode::Strict,
            temporal_mode: TemporalMode::Accumulated,
        };
        assert_eq!(
            key.relative_path(),
            PathBuf::from("generations/gen_4_strict_accumulated.json")
        );

        let key = GenerationKey {
            generation: 1,
            match_mode: MatchMode::Partial,
            temporal_mode: TemporalMode::Snapshot,
        };
        assert_eq!(
            key.relative_path(),
            PathBuf::from("generations/gen_1_partial.json")
        );
    }

    #[test]
    fn type_file_names() {
        let key = TypeKey {
            type_name: TypeName::from("dragon"),
            temporal_mode: TemporalMode::Accumulated,
        };
        assert_eq!(
            key.relative_path().unwrap(),
            PathBuf::from("types/dragon_accumulated.json")
        );

        let key = TypeKey {
            type_name: TypeName::from("ice"),
            temporal_mode: TemporalMode::Snapshot,
        };
        assert_eq!(key.relative_path().unwrap(), PathBuf::from("types/ice.json"));
    }

    #[test]
    fn type_names_that_escape_the_directory_are_rejected() {
        for name in ["../source", "a/b", "..", "", "fire.bak", "ice\\x"] {
            let key = TypeKey {
                type_name: TypeName::from(name),
                temporal_mode: TemporalMode::Snapshot,
            };
            assert!(
                matches!(
                    key.relative_path(),
                    Err(StoreError::UnsafeTypeName { ref type_name }) if type_name == name
                ),
                "{name:?} was accepted"
            );
        }
    }
}
