//! Counting and weighting over the canonical record set.
//!
//! Counts are integers: how many counted records match a type filter.
//! Weights split a dual-typed record evenly between its two types so that
//! partial weights over all types sum to the number of counted records.
//! Strict weights are plain counts; an exact typing match needs no split.

use typedex_types::{CanonicalRecord, MatchMode, TemporalMode, TypeName};

use crate::availability::is_counted;
use crate::error::QueryError;

/// A single counting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountingQuery {
    /// Generation whose typings are inspected.
    pub generation: u32,
    /// One type (partial), or one or two types (strict).
    pub filter: Vec<TypeName>,
    /// Membership or exact-set matching.
    pub match_mode: MatchMode,
    /// Snapshot or accumulated visibility.
    pub temporal_mode: TemporalMode,
}

impl CountingQuery {
    /// Membership query for one type.
    pub fn partial(generation: u32, type_name: TypeName, temporal_mode: TemporalMode) -> Self {
        Self {
            generation,
            filter: vec![type_name],
            match_mode: MatchMode::Partial,
            temporal_mode,
        }
    }

    /// Exact-typing query for one or two types.
    pub const fn strict(generation: u32, filter: Vec<TypeName>, temporal_mode: TemporalMode) -> Self {
        Self {
            generation,
            filter,
            match_mode: MatchMode::Strict,
            temporal_mode,
        }
    }

    /// Reject filters with the wrong arity for the match mode.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.match_mode.accepts_arity(self.filter.len()) {
            Ok(())
        } else {
            Err(QueryError::InvalidQueryArity {
                match_mode: self.match_mode,
                received: self.filter.len(),
            })
        }
    }

    fn matches(&self, record: &CanonicalRecord) -> bool {
        let Some(typing) = record.typing_at(self.generation) else {
            return false;
        };
        match (self.match_mode, self.filter.as_slice()) {
            (MatchMode::Partial, [type_name]) => typing.contains(type_name),
            (MatchMode::Partial, _) => false,
            (MatchMode::Strict, filter) => typing.matches_set(filter),
        }
    }
}

/// Number of counted records matching `query`.
pub fn count(records: &[CanonicalRecord], query: &CountingQuery) -> Result<u32, QueryError> {
    query.validate()?;
    Ok(records
        .iter()
        .filter(|record| query.matches(record))
        .filter(|record| is_counted(record, query.generation, query.temporal_mode))
        .fold(0_u32, |total, _| total.saturating_add(1)))
}

/// Summed weight of `type_name` at `generation`.
///
/// Each counted record containing the type adds 1.0 if mono-typed and 0.5
/// if dual-typed.
pub fn total_weight(
    records: &[CanonicalRecord],
    generation: u32,
    type_name: &TypeName,
    temporal_mode: TemporalMode,
) -> f64 {
    records
        .iter()
        .filter(|record| is_counted(record, generation, temporal_mode))
        .filter_map(|record| record.typing_at(generation))
        .filter(|typing| typing.contains(type_name))
        .map(typedex_types::Typing::share)
        .sum()
}

/// Weight of the query's filter: the split weight for partial queries, the
/// count for strict ones.
pub fn query_weight(records: &[CanonicalRecord], query: &CountingQuery) -> Result<f64, QueryError> {
    query.validate()?;
    match (query.match_mode, query.filter.as_slice()) {
        (MatchMode::Partial, [type_name]) => Ok(total_weight(
            records,
            query.generation,
            type_name,
            query.temporal_mode,
        )),
        _ => count(records, query).map(f64::from),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use typedex_types::{SpeciesName, Typing};

    use super::*;

    fn record(
        identity: &str,
        introduced_generation: u32,
        region_exclusive: bool,
        typing: &[&str],
    ) -> CanonicalRecord {
        let typing = Typing::new(typing.iter().copied().map(TypeName::from).collect()).unwrap();
        CanonicalRecord {
            identity: SpeciesName::from(identity),
            introduced_generation,
            catalog_number: 0,
            region_exclusive,
            types_by_generation: (1..=3).map(|g| (g, typing.clone())).collect::<BTreeMap<_, _>>(),
        }
    }

    fn sample() -> Vec<CanonicalRecord> {
        vec![
            record("charizard", 1, false, &["fire", "flying"]),
            record("arcanine", 1, false, &["fire"]),
            record("typhlosion", 2, false, &["fire"]),
            record("pidgeot", 1, false, &["normal", "flying"]),
            record("regional", 2, true, &["fire"]),
        ]
    }

    fn fire() -> TypeName {
        TypeName::from("fire")
    }

    #[test]
    fn partial_counts() {
        let records = sample();
        let acc = CountingQuery::partial(2, fire(), TemporalMode::Accumulated);
        let snap = CountingQuery::partial(2, fire(), TemporalMode::Snapshot);
        assert_eq!(count(&records, &acc), Ok(4));
        assert_eq!(count(&records, &snap), Ok(2));

        let later = CountingQuery::partial(3, fire(), TemporalMode::Accumulated);
        assert_eq!(count(&records, &later), Ok(3));
    }

    #[test]
    fn strict_counts_ignore_order() {
        let records = sample();
        let pair = vec![TypeName::from("flying"), fire()];
        let query = CountingQuery::strict(1, pair, TemporalMode::Accumulated);
        assert_eq!(count(&records, &query), Ok(1));

        let mono = CountingQuery::strict(1, vec![fire()], TemporalMode::Accumulated);
        assert_eq!(count(&records, &mono), Ok(1));
    }

    #[test]
    fn weights_split_dual_types() {
        let records = sample();
        let weight = total_weight(&records, 1, &fire(), TemporalMode::Accumulated);
        assert!((weight - 1.5).abs() < 1e-9);

        let flying = total_weight(&records, 1, &TypeName::from("flying"), TemporalMode::Accumulated);
        assert!((flying - 1.0).abs() < 1e-9);
    }

    #[test]
    fn strict_weight_is_count() {
        let records = sample();
        let query = CountingQuery::strict(2, vec![fire()], TemporalMode::Accumulated);
        let weight = query_weight(&records, &query).unwrap();
        assert!((weight - 3.0).abs() < 1e-9);
    }

    #[test]
    fn arity_violations_are_rejected() {
        let records = sample();
        let bad_partial = CountingQuery {
            generation: 1,
            filter: vec![fire(), TypeName::from("flying")],
            match_mode: MatchMode::Partial,
            temporal_mode: TemporalMode::Snapshot,
        };
        assert_eq!(
            count(&records, &bad_partial),
            Err(QueryError::InvalidQueryArity {
                match_mode: MatchMode::Partial,
                received: 2
            })
        );

        let bad_strict = CountingQuery::strict(
            1,
            vec![fire(), TypeName::from("flying"), TypeName::from("dragon")],
            TemporalMode::Snapshot,
        );
        assert!(query_weight(&records, &bad_strict).is_err());
        let empty = CountingQuery::strict(1, Vec::new(), TemporalMode::Snapshot);
        assert!(count(&records, &empty).is_err());
    }

    #[test]
    fn accumulated_never_below_snapshot() {
        let records = sample();
        for generation in 1..=3 {
            for name in ["fire", "flying", "normal"] {
                let acc = CountingQuery::partial(generation, name.into(), TemporalMode::Accumulated);
                let snap = CountingQuery::partial(generation, name.into(), TemporalMode::Snapshot);
                assert!(count(&records, &acc).unwrap() >= count(&records, &snap).unwrap());
            }
        }
    }
}
