//! Remote data provider seam.
//!
//! The pipeline never talks to the network itself. It asks a
//! [`DataProvider`] for catalog, species, chain, form, and type payloads.
//! `typedex-fetch` implements the trait over HTTP; [`StaticProvider`] serves
//! payloads from memory for tests and offline runs.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use typedex_types::{
    ChainLink, EvolutionChainPayload, FormPayload, NamedResource, SpeciesName, SpeciesPayload,
    TypeName,
};

use crate::error::TransportError;

/// Reference used to fetch a species discovered inside an evolution chain.
pub fn species_reference(identity: &SpeciesName) -> String {
    format!("pokemon-species/{identity}")
}

/// A source of raw species, chain, form, and catalog payloads.
///
/// References are either absolute URLs taken from earlier payloads or
/// provider-relative paths such as `pokemon-species/eevee`.
pub trait DataProvider {
    /// List up to `limit` species with their detail references.
    fn fetch_species_catalog(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<NamedResource>, TransportError>> + Send;

    /// Fetch one species payload.
    fn fetch_species_detail(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<SpeciesPayload, TransportError>> + Send;

    /// Fetch one evolution chain payload.
    fn fetch_evolution_chain(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<EvolutionChainPayload, TransportError>> + Send;

    /// Fetch the detail payload of a species' default form.
    fn fetch_form_detail(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<FormPayload, TransportError>> + Send;

    /// List every type label the provider knows, pseudo-types included.
    fn fetch_type_catalog(&self)
    -> impl Future<Output = Result<Vec<TypeName>, TransportError>> + Send;

    /// Number of game generations released so far.
    fn fetch_generation_count(&self) -> impl Future<Output = Result<u32, TransportError>> + Send;
}

// ---------------------------------------------------------------------------
// In-memory provider
// ---------------------------------------------------------------------------

/// A provider that serves pre-registered payloads.
///
/// Unknown references answer with a 404 [`TransportError::Status`]. Every
/// request is recorded so callers can check how many fetches a run made.
#[derive(Debug, Default)]
pub struct StaticProvider {
    catalog: Vec<NamedResource>,
    species: BTreeMap<String, SpeciesPayload>,
    chains: BTreeMap<String, EvolutionChainPayload>,
    forms: BTreeMap<String, FormPayload>,
    types: Vec<TypeName>,
    generation_count: u32,
    requests: Mutex<Vec<String>>,
}

impl StaticProvider {
    /// An empty provider reporting `generation_count` generations.
    pub fn new(generation_count: u32) -> Self {
        Self {
            generation_count,
            ..Self::default()
        }
    }

    /// Register the type catalog.
    #[must_use]
    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().copied().map(TypeName::from).collect();
        self
    }

    /// Register a species under [`species_reference`]. Listed species also
    /// appear in the catalog, in registration order.
    #[must_use]
    pub fn with_species(mut self, species: SpeciesPayload, listed: bool) -> Self {
        let reference = species_reference(&SpeciesName::from(species.name.as_str()));
        if listed {
            self.catalog.push(NamedResource {
                name: species.name.clone(),
                url: reference.clone(),
            });
        }
        self.species.insert(reference, species);
        self
    }

    /// Register an evolution chain rooted at `root`.
    #[must_use]
    pub fn with_chain(mut self, reference: &str, root: ChainLink) -> Self {
        self.chains.insert(
            reference.to_owned(),
            EvolutionChainPayload {
                id: None,
                chain: root,
            },
        );
        self
    }

    /// Register a form payload.
    #[must_use]
    pub fn with_form(mut self, reference: &str, form: FormPayload) -> Self {
        self.forms.insert(reference.to_owned(), form);
        self
    }

    /// Every reference requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    fn record(&self, reference: &str) {
        if let Ok(mut log) = self.requests.lock() {
            log.push(reference.to_owned());
        }
    }

    fn lookup<T: Clone>(
        &self,
        table: &BTreeMap<String, T>,
        reference: &str,
    ) -> Result<T, TransportError> {
        self.record(reference);
        table
            .get(reference)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: reference.to_owned(),
                status: 404,
            })
    }
}

impl DataProvider for StaticProvider {
    async fn fetch_species_catalog(&self, limit: u32) -> Result<Vec<NamedResource>, TransportError> {
        self.record(&format!("pokemon-species?limit={limit}"));
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.catalog.iter().take(limit).cloned().collect())
    }

    async fn fetch_species_detail(&self, reference: &str) -> Result<SpeciesPayload, TransportError> {
        self.lookup(&self.species, reference)
    }

    async fn fetch_evolution_chain(
        &self,
        reference: &str,
    ) -> Result<EvolutionChainPayload, TransportError> {
        self.lookup(&self.chains, reference)
    }

    async fn fetch_form_detail(&self, reference: &str) -> Result<FormPayload, TransportError> {
        self.lookup(&self.forms, reference)
    }

    async fn fetch_type_catalog(&self) -> Result<Vec<TypeName>, TransportError> {
        self.record("type");
        Ok(self.types.clone())
    }

    async fn fetch_generation_count(&self) -> Result<u32, TransportError> {
        self.record("generation");
        Ok(self.generation_count)
    }
}
