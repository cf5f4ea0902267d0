//! The aggregation matrix.
//!
//! For every generation and every match/temporal combination, one
//! [`GenerationResource`] holds a counter per applicable type filter plus
//! the balance and diversity of the filter weights. A second pass emits
//! one [`TypeResource`] per type and temporal mode with membership counts
//! across all generations.

use tracing::{debug, info, warn};
use typedex_types::{
    GenerationCounter, GenerationResource, MatchMode, TemporalMode, TypeCounter, TypeName,
    TypeResource,
};

use crate::counting::{CountingQuery, count, query_weight};
use crate::error::QueryError;
use crate::indices::{IndexError, balance, diversity};
use crate::records::RecordSet;
use crate::rules::TaxonomyRules;

/// Match/temporal combinations emitted per generation, in output order.
pub const GENERATION_MODES: [(MatchMode, TemporalMode); 4] = [
    (MatchMode::Partial, TemporalMode::Accumulated),
    (MatchMode::Partial, TemporalMode::Snapshot),
    (MatchMode::Strict, TemporalMode::Snapshot),
    (MatchMode::Strict, TemporalMode::Accumulated),
];

/// Every resource produced by one aggregation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationReport {
    /// Resources keyed by generation, in generation then mode order.
    pub generation_resources: Vec<GenerationResource>,
    /// Resources keyed by type, in catalog then mode order.
    pub type_resources: Vec<TypeResource>,
}

/// Type filters for one generation.
///
/// Partial mode uses each available type alone. Strict mode lists every
/// unordered pair first, then every single type.
pub fn type_filters(available: &[TypeName], match_mode: MatchMode) -> Vec<Vec<TypeName>> {
    let singles = available.iter().map(|name| vec![name.clone()]);
    match match_mode {
        MatchMode::Partial => singles.collect(),
        MatchMode::Strict => {
            let pairs = available.iter().enumerate().flat_map(|(position, first)| {
                available
                    .iter()
                    .skip(position.saturating_add(1))
                    .map(move |second| vec![first.clone(), second.clone()])
            });
            pairs.chain(singles).collect()
        }
    }
}

/// Build the resource for one generation and mode combination.
pub fn build_generation_resource(
    records: &RecordSet,
    generation: u32,
    available: &[TypeName],
    match_mode: MatchMode,
    temporal_mode: TemporalMode,
) -> Result<GenerationResource, QueryError> {
    let filters = type_filters(available, match_mode);
    let mut counters = Vec::with_capacity(filters.len());
    let mut weights = Vec::with_capacity(filters.len());

    for filter in filters {
        let query = CountingQuery {
            generation,
            filter,
            match_mode,
            temporal_mode,
        };
        let matched = count(records.records(), &query)?;
        weights.push(query_weight(records.records(), &query)?);
        counters.push(TypeCounter {
            types: query.filter,
            count: matched,
        });
    }

    let balance = defined_or_warn(
        balance(&weights),
        "balance",
        generation,
        match_mode,
        temporal_mode,
    );
    let diversity = defined_or_warn(
        diversity(&weights),
        "diversity",
        generation,
        match_mode,
        temporal_mode,
    );

    debug!(
        generation,
        match_mode = match_mode.label(),
        temporal_mode = temporal_mode.label(),
        counters = counters.len(),
        "generation resource built"
    );

    Ok(GenerationResource {
        generation,
        match_mode,
        temporal_mode,
        counters,
        balance,
        diversity,
    })
}

fn defined_or_warn(
    value: Result<f64, IndexError>,
    index: &'static str,
    generation: u32,
    match_mode: MatchMode,
    temporal_mode: TemporalMode,
) -> Option<f64> {
    match value {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(
                generation,
                index,
                match_mode = match_mode.label(),
                temporal_mode = temporal_mode.label(),
                %error,
                "index undefined for this resource"
            );
            None
        }
    }
}

/// Build the membership history of one type.
pub fn build_type_resource(
    records: &RecordSet,
    type_name: &TypeName,
    temporal_mode: TemporalMode,
) -> Result<TypeResource, QueryError> {
    let counters = (1..=records.max_generation())
        .map(|generation| {
            let query = CountingQuery::partial(generation, type_name.clone(), temporal_mode);
            count(records.records(), &query).map(|count| GenerationCounter { generation, count })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TypeResource {
        type_name: type_name.clone(),
        temporal_mode,
        counters,
    })
}

/// Run the full matrix over `records`.
///
/// `raw_type_catalog` is the provider's type list; pseudo-types are
/// dropped and late types are withheld from generations before their
/// introduction.
pub fn aggregate(
    records: &RecordSet,
    raw_type_catalog: &[TypeName],
    rules: &TaxonomyRules,
) -> Result<AggregationReport, QueryError> {
    let catalog = rules.type_catalog(raw_type_catalog);
    let mut report = AggregationReport::default();

    for generation in 1..=records.max_generation() {
        let available = rules.available_types(&catalog, generation);
        for (match_mode, temporal_mode) in GENERATION_MODES {
            report.generation_resources.push(build_generation_resource(
                records,
                generation,
                &available,
                match_mode,
                temporal_mode,
            )?);
        }
    }

    for type_name in &catalog {
        for temporal_mode in TemporalMode::ALL {
            report
                .type_resources
                .push(build_type_resource(records, type_name, temporal_mode)?);
        }
    }

    info!(
        generations = records.max_generation(),
        types = catalog.len(),
        generation_resources = report.generation_resources.len(),
        type_resources = report.type_resources.len(),
        "aggregation complete"
    );

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use typedex_types::{CanonicalRecord, SpeciesName, Typing};

    use super::*;

    fn types(names: &[&str]) -> Vec<TypeName> {
        names.iter().copied().map(TypeName::from).collect()
    }

    fn record(
        identity: &str,
        number: u32,
        introduced: u32,
        exclusive: bool,
        typing: &[&str],
    ) -> CanonicalRecord {
        let typing = Typing::new(types(typing)).unwrap();
        CanonicalRecord {
            identity: SpeciesName::from(identity),
            introduced_generation: introduced,
            catalog_number: number,
            region_exclusive: exclusive,
            types_by_generation: (1..=3).map(|g| (g, typing.clone())).collect::<BTreeMap<_, _>>(),
        }
    }

    fn records() -> RecordSet {
        let list = vec![
            record("charizard", 6, 1, false, &["fire", "flying"]),
            record("arcanine", 59, 1, false, &["fire"]),
            record("scizor", 212, 2, false, &["bug", "steel"]),
            record("heracross", 214, 2, false, &["bug", "fighting"]),
            record("regional", 900, 2, true, &["fighting"]),
            record("pidgeot", 18, 1, false, &["normal", "flying"]),
        ];
        RecordSet::new(list, 3).unwrap()
    }

    fn catalog() -> Vec<TypeName> {
        types(&["normal", "fire", "flying", "bug", "fighting", "steel", "unknown"])
    }

    #[test]
    fn filters_list_pairs_before_singles() {
        let filters = type_filters(&types(&["a", "b", "c"]), MatchMode::Strict);
        let rendered: Vec<String> = filters
            .iter()
            .map(|f| f.iter().map(TypeName::as_str).collect::<Vec<_>>().join("/"))
            .collect();
        assert_eq!(rendered, ["a/b", "a/c", "b/c", "a", "b", "c"]);

        assert_eq!(type_filters(&types(&["a", "b"]), MatchMode::Partial).len(), 2);
        assert!(type_filters(&[], MatchMode::Strict).is_empty());
    }

    #[test]
    fn matrix_shape() {
        let report = aggregate(&records(), &catalog(), &TaxonomyRules::default()).unwrap();
        assert_eq!(report.generation_resources.len(), 3 * 4);
        // six real types, two temporal modes each
        assert_eq!(report.type_resources.len(), 12);
        assert!(report.type_resources.iter().all(|r| r.counters.len() == 3));

        let first = report.generation_resources.first();
        assert!(first.is_some_and(|r| r.generation == 1
            && r.match_mode == MatchMode::Partial
            && r.temporal_mode == TemporalMode::Accumulated));
    }

    #[test]
    fn steel_is_withheld_before_generation_two() {
        let report = aggregate(&records(), &catalog(), &TaxonomyRules::default()).unwrap();
        let steel = TypeName::from("steel");
        for resource in &report.generation_resources {
            let mentions_steel = resource.counters.iter().any(|c| c.types.contains(&steel));
            assert_eq!(mentions_steel, resource.generation >= 2);
        }
    }

    #[test]
    fn strict_counters_partition_counted_records() {
        let set = records();
        let rules = TaxonomyRules::default();
        let report = aggregate(&set, &catalog(), &rules).unwrap();
        for resource in report
            .generation_resources
            .iter()
            .filter(|r| r.match_mode == MatchMode::Strict)
        {
            let counted = set
                .records()
                .iter()
                .filter(|r| {
                    crate::availability::is_counted(r, resource.generation, resource.temporal_mode)
                })
                .count();
            let total: u32 = resource.counters.iter().map(|c| c.count).sum();
            assert_eq!(usize::try_from(total).ok(), Some(counted));
        }
    }

    #[test]
    fn empty_snapshot_has_undefined_indices() {
        let report = aggregate(&records(), &catalog(), &TaxonomyRules::default()).unwrap();
        // Nothing is introduced in generation 3.
        let snapshot = report.generation_resources.iter().find(|r| {
            r.generation == 3
                && r.match_mode == MatchMode::Partial
                && r.temporal_mode == TemporalMode::Snapshot
        });
        assert!(snapshot.is_some_and(|r| r.balance.is_none() && r.diversity.is_none()));
        assert!(snapshot.is_some_and(|r| r.counters.iter().all(|c| c.count == 0)));
    }

    #[test]
    fn type_resource_tracks_regional_visibility() {
        let set = records();
        let fighting = TypeName::from("fighting");
        let resource = build_type_resource(&set, &fighting, TemporalMode::Accumulated).unwrap();
        let counts: Vec<u32> = resource.counters.iter().map(|c| c.count).collect();
        assert_eq!(counts, [0, 2, 1]);
    }

    fn resource(
        report: &AggregationReport,
        generation: u32,
        match_mode: MatchMode,
        temporal_mode: TemporalMode,
    ) -> &GenerationResource {
        report
            .generation_resources
            .iter()
            .find(|r| {
                r.generation == generation
                    && r.match_mode == match_mode
                    && r.temporal_mode == temporal_mode
            })
            .unwrap()
    }

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|value| (value - expected).abs() < 1e-9)
    }

    #[test]
    fn partial_indices_use_split_weights() {
        let report = aggregate(&records(), &catalog(), &TaxonomyRules::default()).unwrap();
        let partial = resource(&report, 1, MatchMode::Partial, TemporalMode::Accumulated);

        // normal: pidgeot half; fire: charizard half + arcanine;
        // flying: charizard half + pidgeot half; bug and fighting: none yet.
        let expected = [0.5, 1.5, 1.0, 0.0, 0.0];
        let counts: Vec<u32> = partial.counters.iter().map(|c| c.count).collect();
        assert_eq!(counts, [1, 2, 2, 0, 0]);

        assert!(approx(partial.balance, balance(&expected).unwrap()));
        assert!(approx(partial.diversity, diversity(&expected).unwrap()));
        // Feeding raw counts would give a different balance.
        assert!(!approx(partial.balance, balance(&[1.0, 2.0, 2.0, 0.0, 0.0]).unwrap()));
    }

    #[test]
    fn strict_indices_use_counts_with_zero_categories() {
        let report = aggregate(&records(), &catalog(), &TaxonomyRules::default()).unwrap();
        let strict = resource(&report, 1, MatchMode::Strict, TemporalMode::Accumulated);

        // Ten pairs over normal, fire, flying, bug, fighting, then five singles.
        let mut expected = [0.0; 15];
        for (position, weight) in expected.iter_mut().enumerate() {
            // normal/flying, fire/flying, fire
            if matches!(position, 1 | 4 | 11) {
                *weight = 1.0;
            }
        }
        assert_eq!(strict.counters.len(), expected.len());
        for (counter, weight) in strict.counters.iter().zip(expected) {
            assert!((f64::from(counter.count) - weight).abs() < 1e-9);
        }

        assert!(approx(strict.balance, balance(&expected).unwrap()));
        assert!(approx(strict.diversity, diversity(&expected).unwrap()));
        // Zero categories stay in the denominator.
        assert!(!approx(strict.diversity, 100.0));
    }
}
