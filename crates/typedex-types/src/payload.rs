//! Raw payload shapes returned by the remote data provider.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! provider's JSON is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A named link to another provider resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Slug of the linked resource.
    pub name: String,
    /// Absolute URL of the linked resource.
    pub url: String,
}

/// An unnamed link to another provider resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Absolute URL of the linked resource.
    pub url: String,
}

/// A paginated list endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResourceList {
    /// Total number of entries the provider knows about.
    #[serde(default)]
    pub count: Option<u32>,
    /// Entries on this page.
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// Species detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesPayload {
    /// Species slug.
    pub name: String,
    /// Generation tag, e.g. `generation-iv`.
    pub generation: NamedResource,
    /// Catalog numbers in every regional and national dex.
    #[serde(default)]
    pub pokedex_numbers: Vec<PokedexNumber>,
    /// Forms of the species; exactly one should be the default.
    #[serde(default)]
    pub varieties: Vec<SpeciesVariety>,
    /// Link to the evolution chain containing this species.
    pub evolution_chain: ResourceRef,
}

/// A species' entry number in one dex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokedexNumber {
    /// Entry number within `pokedex`.
    pub entry_number: u32,
    /// The dex this number belongs to (`national`, `kanto`, ...).
    pub pokedex: NamedResource,
}

/// One form of a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesVariety {
    /// Whether this is the species' default form.
    pub is_default: bool,
    /// Link to the form's detail payload.
    pub pokemon: NamedResource,
}

/// Evolution chain payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChainPayload {
    /// Provider-assigned chain id.
    #[serde(default)]
    pub id: Option<u32>,
    /// Root of the chain.
    pub chain: ChainLink,
}

/// One node of an evolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// The species at this node.
    pub species: NamedResource,
    /// Species this node evolves into.
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// Default-form detail payload (current types plus historical deltas).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPayload {
    /// Form slug.
    pub name: String,
    /// Current type slots.
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    /// Typings that applied up to and including a past generation.
    #[serde(default)]
    pub past_types: Vec<PastTypes>,
}

/// A type occupying one slot of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    /// 1 for the primary type, 2 for the secondary.
    pub slot: u8,
    /// The type.
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

/// A historical typing valid up to and including `generation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastTypes {
    /// Last generation with this typing, e.g. `generation-v`.
    pub generation: NamedResource,
    /// Type slots in effect.
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}
