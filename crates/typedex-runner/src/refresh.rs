//! One aggregation run: obtain records, aggregate, persist, record a manifest.

use chrono::Utc;
use tracing::info;
use typedex_core::config::TypedexConfig;
use typedex_core::{
    DataProvider, RecordSet, RefreshSettings, aggregate_existing, run_full_aggregation,
};
use typedex_store::ResourceStore;
use typedex_types::{DatasetOrigin, RunId, RunManifest};

use crate::error::RunnerError;

/// Whether a run may reuse the stored source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePolicy {
    /// Use `source.json` when present; fetch only if it is missing.
    ReuseStored,
    /// Always fetch from the provider and overwrite `source.json`.
    FetchFresh,
}

/// Execute one run and return its manifest.
pub async fn run_once<P: DataProvider>(
    provider: &P,
    store: &ResourceStore,
    config: &TypedexConfig,
    policy: SourcePolicy,
) -> Result<RunManifest, RunnerError> {
    let run_id = RunId::new();
    let started_at = Utc::now();
    info!(run_id = %run_id, policy = ?policy, "run started");

    let settings = RefreshSettings::from_config(config);
    let stored = match policy {
        SourcePolicy::ReuseStored => store.read_source().await?,
        SourcePolicy::FetchFresh => None,
    };

    let (records, report, source) = if let Some(records) = stored {
        info!(run_id = %run_id, records = records.len(), "reusing stored source dataset");
        let report = aggregate_existing(provider, &records, &settings.rules).await?;
        (records, report, DatasetOrigin::Reused)
    } else {
        let outcome = run_full_aggregation(provider, &settings).await?;
        store.write_source(&outcome.records).await?;
        (outcome.records, outcome.report, DatasetOrigin::Fetched)
    };

    let counts = store.persist_report(&report).await?;
    let manifest = RunManifest {
        run_id,
        started_at,
        finished_at: Utc::now(),
        generation_count: records.max_generation(),
        record_count: record_count(&records),
        generation_resources: counts.generation_resources,
        type_resources: counts.type_resources,
        source,
    };
    store.write_manifest(&manifest).await?;

    info!(
        run_id = %run_id,
        records = manifest.record_count,
        generation_resources = manifest.generation_resources,
        type_resources = manifest.type_resources,
        "run finished"
    );
    Ok(manifest)
}

fn record_count(records: &RecordSet) -> u32 {
    u32::try_from(records.len()).unwrap_or(u32::MAX)
}
