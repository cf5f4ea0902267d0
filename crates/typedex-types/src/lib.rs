//! Shared type definitions for the Typedex taxonomy pipeline.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace: canonical species records, counting modes, the output
//! resources handed to persistence, and the raw payload shapes returned by
//! the remote provider. Output types flow to `TypeScript` via `ts-rs` for
//! API clients.
//!
//! # Modules
//!
//! - [`ids`] -- UUID wrappers (run identifiers)
//! - [`labels`] -- Species and type name newtypes
//! - [`enums`] -- Match and temporal modes
//! - [`typing`] -- One- or two-type assignment at a generation
//! - [`structs`] -- Canonical records and output resources
//! - [`payload`] -- Raw provider payloads

pub mod enums;
pub mod ids;
pub mod labels;
pub mod payload;
pub mod structs;
pub mod typing;

// Re-export all public types at crate root for convenience.
pub use enums::{MatchMode, TemporalMode};
pub use ids::RunId;
pub use labels::{SpeciesName, TypeName};
pub use payload::{
    ChainLink, EvolutionChainPayload, FormPayload, NamedResource, NamedResourceList, PastTypes,
    PokedexNumber, ResourceRef, SpeciesPayload, SpeciesVariety, TypeSlot,
};
pub use structs::{
    CanonicalRecord, DatasetOrigin, GenerationCounter, GenerationResource, RunManifest,
    SourceDataset, TypeCounter, TypeResource,
};
pub use typing::{Typing, TypingError};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for client-facing types.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::RunId::export_all();
        let _ = crate::labels::SpeciesName::export_all();
        let _ = crate::labels::TypeName::export_all();
        let _ = crate::enums::MatchMode::export_all();
        let _ = crate::enums::TemporalMode::export_all();
        let _ = crate::structs::TypeCounter::export_all();
        let _ = crate::structs::GenerationResource::export_all();
        let _ = crate::structs::GenerationCounter::export_all();
        let _ = crate::structs::TypeResource::export_all();
        let _ = crate::structs::DatasetOrigin::export_all();
        let _ = crate::structs::RunManifest::export_all();
    }
}
