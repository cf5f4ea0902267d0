//! HTTP data provider for the Typedex pipeline.
//!
//! [`PokeApiClient`] implements [`typedex_core::DataProvider`] over
//! `reqwest`. Every call waits on a shared [`RequestPacer`] first, so a run
//! never issues requests closer together than the configured delay.
//!
//! # Modules
//!
//! - [`client`] -- Provider client and URL resolution
//! - [`pacer`] -- Fixed-interval request spacing

pub mod client;
pub mod pacer;

pub use client::PokeApiClient;
pub use pacer::RequestPacer;
