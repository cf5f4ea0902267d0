//! Canonical record construction.
//!
//! [`build_record`] turns one terminal identity's species and default-form
//! payloads into a [`CanonicalRecord`]. [`collect_records`] drives the whole
//! fetch loop: it walks the species catalog, resolves each unseen evolution
//! chain, and builds a record for every terminal it finds.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};
use typedex_types::{CanonicalRecord, FormPayload, NamedResource, SpeciesName, SpeciesPayload};

use crate::chain::{EvolutionNode, resolve_chain};
use crate::error::{BuildError, PipelineError, TransportError};
use crate::history::{HistoryError, TypeHistoryDelta, reconstruct_history, typing_from_slots};
use crate::numeral::parse_generation_tag;
use crate::provider::{DataProvider, species_reference};
use crate::records::RecordSet;
use crate::rules::TaxonomyRules;

/// Name of the dex whose numbers become catalog numbers.
const NATIONAL_DEX: &str = "national";

// ---------------------------------------------------------------------------
// Payload extraction
// ---------------------------------------------------------------------------

/// The species' single national catalog number.
pub fn national_catalog_number(
    identity: &SpeciesName,
    species: &SpeciesPayload,
) -> Result<u32, BuildError> {
    let national: Vec<u32> = species
        .pokedex_numbers
        .iter()
        .filter(|number| number.pokedex.name == NATIONAL_DEX)
        .map(|number| number.entry_number)
        .collect();

    match national.as_slice() {
        [number] => Ok(*number),
        other => Err(BuildError::AmbiguousCatalogEntry {
            identity: identity.clone(),
            found: other.len(),
        }),
    }
}

/// The species' single default variety.
pub fn select_default_variety<'a>(
    identity: &SpeciesName,
    species: &'a SpeciesPayload,
) -> Result<&'a NamedResource, BuildError> {
    let defaults: Vec<&NamedResource> = species
        .varieties
        .iter()
        .filter(|variety| variety.is_default)
        .map(|variety| &variety.pokemon)
        .collect();

    match defaults.as_slice() {
        [variety] => Ok(variety),
        other => Err(BuildError::AmbiguousDefaultForm {
            identity: identity.clone(),
            found: other.len(),
        }),
    }
}

/// Build the canonical record for a terminal identity.
pub fn build_record(
    identity: &SpeciesName,
    species: &SpeciesPayload,
    form: &FormPayload,
    max_generation: u32,
    rules: &TaxonomyRules,
) -> Result<CanonicalRecord, BuildError> {
    let malformed = |source: HistoryError| BuildError::MalformedHistory {
        identity: identity.clone(),
        source,
    };

    let introduced_generation =
        parse_generation_tag(&species.generation.name).map_err(|e| malformed(e.into()))?;
    let catalog_number = national_catalog_number(identity, species)?;

    let current = typing_from_slots(&form.types).map_err(|e| malformed(e.into()))?;
    let deltas = form
        .past_types
        .iter()
        .map(TypeHistoryDelta::from_payload)
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;
    let types_by_generation =
        reconstruct_history(&deltas, &current, max_generation).map_err(malformed)?;

    Ok(CanonicalRecord {
        identity: identity.clone(),
        introduced_generation,
        catalog_number,
        region_exclusive: rules.is_region_exclusive(identity),
        types_by_generation,
    })
}

// ---------------------------------------------------------------------------
// Run-scoped cache
// ---------------------------------------------------------------------------

/// Identities and species payloads already seen during one run.
///
/// Discarded when the run ends.
#[derive(Debug, Default)]
pub struct SpeciesCache {
    members: BTreeSet<SpeciesName>,
    species: BTreeMap<SpeciesName, SpeciesPayload>,
}

impl SpeciesCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `identity` belongs to a chain that was already resolved.
    pub fn is_member(&self, identity: &SpeciesName) -> bool {
        self.members.contains(identity)
    }

    /// Record every identity of a resolved chain.
    pub fn mark_members(&mut self, members: impl IntoIterator<Item = SpeciesName>) {
        self.members.extend(members);
    }

    /// Remember a fetched species payload.
    pub fn insert_species(&mut self, identity: SpeciesName, species: SpeciesPayload) {
        self.species.insert(identity, species);
    }

    /// A previously fetched species payload.
    pub fn species(&self, identity: &SpeciesName) -> Option<&SpeciesPayload> {
        self.species.get(identity)
    }

    /// Number of identities marked as chain members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

// ---------------------------------------------------------------------------
// Collection loop
// ---------------------------------------------------------------------------

/// Fetch every terminal species and build the canonical record set.
///
/// Any transport or integrity error aborts the whole collection.
pub async fn collect_records<P: DataProvider>(
    provider: &P,
    rules: &TaxonomyRules,
    species_limit: u32,
) -> Result<RecordSet, PipelineError> {
    let catalog = provider.fetch_species_catalog(species_limit).await?;
    if catalog.is_empty() {
        return Err(TransportError::EmptyCatalog.into());
    }
    let max_generation = provider.fetch_generation_count().await?;
    info!(
        catalog_size = catalog.len(),
        max_generation, "species catalog fetched"
    );

    let mut cache = SpeciesCache::new();
    let mut records = Vec::new();

    for entry in &catalog {
        let identity = SpeciesName::from(entry.name.as_str());
        if cache.is_member(&identity) {
            continue;
        }

        let species = provider.fetch_species_detail(&entry.url).await?;
        let chain_url = species.evolution_chain.url.clone();
        cache.insert_species(identity.clone(), species);

        let chain = provider.fetch_evolution_chain(&chain_url).await?;
        let resolution = resolve_chain(&EvolutionNode::from(&chain.chain), &rules.forced_terminals);
        debug!(
            identity = %identity,
            members = resolution.members.len(),
            terminals = resolution.terminals.len(),
            "evolution chain resolved"
        );
        cache.mark_members(resolution.members);

        for terminal in &resolution.terminals {
            let cached = cache.species(terminal).cloned();
            let species = match cached {
                Some(species) => species,
                None => {
                    let fetched = provider
                        .fetch_species_detail(&species_reference(terminal))
                        .await?;
                    cache.insert_species(terminal.clone(), fetched.clone());
                    fetched
                }
            };

            let variety = select_default_variety(terminal, &species)?;
            let form = provider.fetch_form_detail(&variety.url).await?;
            let record = build_record(terminal, &species, &form, max_generation, rules)?;
            debug!(
                identity = %record.identity,
                introduced_generation = record.introduced_generation,
                catalog_number = record.catalog_number,
                "canonical record built"
            );
            records.push(record);
        }
    }

    let records = RecordSet::new(records, max_generation)?;
    info!(
        record_count = records.len(),
        identities_seen = cache.member_count(),
        "canonical records collected"
    );
    Ok(records)
}
