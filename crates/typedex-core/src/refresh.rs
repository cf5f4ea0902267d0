//! Entry points that run the whole pipeline against a provider.

use tracing::info;

use crate::aggregate::{AggregationReport, aggregate};
use crate::builder::collect_records;
use crate::config::TypedexConfig;
use crate::error::PipelineError;
use crate::provider::DataProvider;
use crate::records::RecordSet;
use crate::rules::TaxonomyRules;

/// Inputs for a full refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSettings {
    /// Rule tables.
    pub rules: TaxonomyRules,
    /// `limit` for the species catalog request.
    pub species_limit: u32,
}

impl RefreshSettings {
    /// Settings derived from loaded configuration.
    pub fn from_config(config: &TypedexConfig) -> Self {
        Self {
            rules: config.rules.to_rules(),
            species_limit: config.source.species_limit,
        }
    }
}

/// Records and resources from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    /// The canonical record set aggregated.
    pub records: RecordSet,
    /// Every resource built from it.
    pub report: AggregationReport,
}

/// Fetch everything, build records, and aggregate.
pub async fn run_full_aggregation<P: DataProvider>(
    provider: &P,
    settings: &RefreshSettings,
) -> Result<RefreshOutcome, PipelineError> {
    let records = collect_records(provider, &settings.rules, settings.species_limit).await?;
    info!(records = records.len(), "canonical records built");
    let report = aggregate_existing(provider, &records, &settings.rules).await?;
    Ok(RefreshOutcome { records, report })
}

/// Aggregate previously built records; only the type catalog is fetched.
pub async fn aggregate_existing<P: DataProvider>(
    provider: &P,
    records: &RecordSet,
    rules: &TaxonomyRules,
) -> Result<AggregationReport, PipelineError> {
    let type_catalog = provider.fetch_type_catalog().await?;
    info!(
        types = type_catalog.len(),
        max_generation = records.max_generation(),
        "aggregating"
    );
    Ok(aggregate(records, &type_catalog, rules)?)
}
