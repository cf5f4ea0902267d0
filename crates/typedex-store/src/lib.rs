//! JSON-file persistence for Typedex.
//!
//! Resources are plain files under one data directory so any static file
//! server can expose them. The canonical record set is kept alongside as
//! `source.json` so later runs can re-aggregate without refetching.
//!
//! # Modules
//!
//! - [`keys`] -- Resource keys and file layout
//! - [`json_store`] -- Reads and writes
//! - [`error`] -- Shared error types

pub mod error;
pub mod json_store;
pub mod keys;

pub use error::StoreError;
pub use json_store::{PersistedCounts, ResourceStore};
pub use keys::{GenerationKey, TypeKey};
