//! The validated, immutable set of canonical records for one run.

use std::collections::BTreeMap;

use typedex_types::{CanonicalRecord, SourceDataset, SpeciesName};

use crate::error::BuildError;

/// Canonical records sharing a common generation range.
///
/// Construction checks that every record is introduced within
/// `1..=max_generation`, covers that whole range, and that catalog numbers
/// are unique. After that the set is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    max_generation: u32,
    records: Vec<CanonicalRecord>,
}

impl RecordSet {
    /// Validate and wrap `records`.
    pub fn new(records: Vec<CanonicalRecord>, max_generation: u32) -> Result<Self, BuildError> {
        let mut claimed: BTreeMap<u32, &SpeciesName> = BTreeMap::new();

        for record in &records {
            if !(1..=max_generation).contains(&record.introduced_generation) {
                return Err(BuildError::IntroducedOutOfRange {
                    identity: record.identity.clone(),
                    introduced_generation: record.introduced_generation,
                    max_generation,
                });
            }

            if let Some(generation) =
                (1..=max_generation).find(|generation| record.typing_at(*generation).is_none())
            {
                return Err(BuildError::IncompleteCoverage {
                    identity: record.identity.clone(),
                    generation,
                });
            }

            if let Some(first) = claimed.insert(record.catalog_number, &record.identity) {
                return Err(BuildError::DuplicateCatalogNumber {
                    catalog_number: record.catalog_number,
                    first: first.clone(),
                    second: record.identity.clone(),
                });
            }
        }

        Ok(Self {
            max_generation,
            records,
        })
    }

    /// Highest generation covered by every record.
    pub const fn max_generation(&self) -> u32 {
        self.max_generation
    }

    /// The records, in collection order.
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert into the serializable dataset form.
    pub fn into_dataset(self) -> SourceDataset {
        SourceDataset {
            max_generation: self.max_generation,
            records: self.records,
        }
    }

    /// Copy into the serializable dataset form.
    pub fn to_dataset(&self) -> SourceDataset {
        self.clone().into_dataset()
    }
}

impl TryFrom<SourceDataset> for RecordSet {
    type Error = BuildError;

    fn try_from(dataset: SourceDataset) -> Result<Self, Self::Error> {
        Self::new(dataset.records, dataset.max_generation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use typedex_types::{TypeName, Typing};

    use super::*;

    fn record(identity: &str, catalog_number: u32, generations: u32) -> CanonicalRecord {
        CanonicalRecord {
            identity: SpeciesName::from(identity),
            introduced_generation: 1,
            catalog_number,
            region_exclusive: false,
            types_by_generation: (1..=generations)
                .map(|generation| (generation, Typing::Mono(TypeName::from("normal"))))
                .collect(),
        }
    }

    #[test]
    fn accepts_valid_records() {
        let set = RecordSet::new(vec![record("a", 1, 3), record("b", 2, 3)], 3);
        assert!(set.is_ok_and(|set| set.len() == 2 && set.max_generation() == 3));
    }

    #[test]
    fn rejects_gaps() {
        let mut gappy = record("a", 1, 3);
        gappy.types_by_generation.remove(&2);
        assert_eq!(
            RecordSet::new(vec![gappy], 3),
            Err(BuildError::IncompleteCoverage {
                identity: SpeciesName::from("a"),
                generation: 2,
            })
        );
    }

    #[test]
    fn rejects_short_coverage() {
        assert!(matches!(
            RecordSet::new(vec![record("a", 1, 2)], 3),
            Err(BuildError::IncompleteCoverage { generation: 3, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_catalog_numbers() {
        assert!(matches!(
            RecordSet::new(vec![record("a", 7, 3), record("b", 7, 3)], 3),
            Err(BuildError::DuplicateCatalogNumber { catalog_number: 7, .. })
        ));
    }

    #[test]
    fn rejects_introduction_after_last_generation() {
        let mut late = record("a", 1, 9);
        late.introduced_generation = 10;
        assert_eq!(
            RecordSet::new(vec![late], 9),
            Err(BuildError::IntroducedOutOfRange {
                identity: SpeciesName::from("a"),
                introduced_generation: 10,
                max_generation: 9,
            })
        );
    }

    #[test]
    fn rejects_generation_zero_introduction() {
        let mut unborn = record("a", 1, 3);
        unborn.introduced_generation = 0;
        assert!(matches!(
            RecordSet::new(vec![unborn], 3),
            Err(BuildError::IntroducedOutOfRange {
                introduced_generation: 0,
                ..
            })
        ));
    }

    #[test]
    fn accepts_introduction_in_last_generation() {
        let mut newest = record("a", 1, 3);
        newest.introduced_generation = 3;
        assert!(RecordSet::new(vec![newest], 3).is_ok());
    }

    #[test]
    fn dataset_round_trip() {
        let set = RecordSet::new(vec![record("a", 1, 2)], 2).unwrap();
        let restored = RecordSet::try_from(set.to_dataset());
        assert_eq!(restored, Ok(set));
    }
}
