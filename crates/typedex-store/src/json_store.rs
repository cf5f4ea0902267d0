//! Resource persistence as pretty-printed JSON files.
//!
//! Every resource is written whole; a later run overwrites it in place.
//! Reads of missing files return `Ok(None)`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use typedex_core::{AggregationReport, RecordSet};
use typedex_types::{GenerationResource, RunManifest, SourceDataset, TypeResource};

use crate::error::StoreError;
use crate::keys::{GenerationKey, MANIFEST_FILE, SOURCE_FILE, TypeKey};

/// Number of resources written by [`ResourceStore::persist_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistedCounts {
    /// Generation resources written.
    pub generation_resources: u32,
    /// Type resources written.
    pub type_resources: u32,
}

/// JSON-file store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    root: PathBuf,
}

impl ResourceStore {
    /// Create a store rooted at `root`. Nothing is touched until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // =========================================================================
    // Generation and type resources
    // =========================================================================

    /// Write a generation resource under its key.
    pub async fn put_generation(&self, resource: &GenerationResource) -> Result<(), StoreError> {
        self.write_json(&GenerationKey::of(resource).relative_path(), resource)
            .await
    }

    /// Read a generation resource; `None` if it was never written.
    pub async fn get_generation(
        &self,
        key: &GenerationKey,
    ) -> Result<Option<GenerationResource>, StoreError> {
        self.read_json(&key.relative_path()).await
    }

    /// Write a type resource under its key.
    pub async fn put_type(&self, resource: &TypeResource) -> Result<(), StoreError> {
        self.write_json(&TypeKey::of(resource).relative_path()?, resource)
            .await
    }

    /// Read a type resource; `None` if it was never written.
    pub async fn get_type(&self, key: &TypeKey) -> Result<Option<TypeResource>, StoreError> {
        self.read_json(&key.relative_path()?).await
    }

    /// Write every resource of a report.
    pub async fn persist_report(
        &self,
        report: &AggregationReport,
    ) -> Result<PersistedCounts, StoreError> {
        let mut counts = PersistedCounts::default();
        for resource in &report.generation_resources {
            self.put_generation(resource).await?;
            counts.generation_resources = counts.generation_resources.saturating_add(1);
        }
        for resource in &report.type_resources {
            self.put_type(resource).await?;
            counts.type_resources = counts.type_resources.saturating_add(1);
        }
        info!(
            root = %self.root.display(),
            generation_resources = counts.generation_resources,
            type_resources = counts.type_resources,
            "report persisted"
        );
        Ok(counts)
    }

    // =========================================================================
    // Source dataset and manifest
    // =========================================================================

    /// Write the canonical record set to `source.json`.
    pub async fn write_source(&self, records: &RecordSet) -> Result<(), StoreError> {
        self.write_json(Path::new(SOURCE_FILE), &records.to_dataset())
            .await
    }

    /// Read and re-validate `source.json`; `None` if it does not exist.
    pub async fn read_source(&self) -> Result<Option<RecordSet>, StoreError> {
        let dataset: Option<SourceDataset> = self.read_json(Path::new(SOURCE_FILE)).await?;
        Ok(dataset.map(RecordSet::try_from).transpose()?)
    }

    /// Write the run manifest to `manifest.json`.
    pub async fn write_manifest(&self, manifest: &RunManifest) -> Result<(), StoreError> {
        self.write_json(Path::new(MANIFEST_FILE), manifest).await
    }

    /// Read `manifest.json`; `None` if no run has finished yet.
    pub async fn read_manifest(&self) -> Result<Option<RunManifest>, StoreError> {
        self.read_json(Path::new(MANIFEST_FILE)).await
    }

    // =========================================================================
    // File helpers
    // =========================================================================

    async fn write_json<T: Serialize + Sync>(
        &self,
        relative: &Path,
        value: &T,
    ) -> Result<(), StoreError> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "resource written");
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        relative: &Path,
    ) -> Result<Option<T>, StoreError> {
        let path = self.root.join(relative);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}
