//! `PokeAPI`-compatible provider client.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use typedex_core::config::SourceConfig;
use typedex_core::{DataProvider, TransportError};
use typedex_types::{
    EvolutionChainPayload, FormPayload, NamedResource, NamedResourceList, SpeciesPayload, TypeName,
};

use crate::pacer::RequestPacer;

/// Page size requested from the type list; larger than the full catalog.
const TYPE_PAGE_LIMIT: u32 = 100;

/// HTTP client for a `PokeAPI`-compatible provider.
///
/// References that are already absolute URLs are requested as-is; anything
/// else is joined to the base URL.
#[derive(Debug)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
    pacer: RequestPacer,
    fallback_generation_count: u32,
}

impl PokeApiClient {
    /// Create a client from the `source` configuration section.
    pub fn new(config: &SourceConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client around an existing `reqwest` client.
    pub fn with_client(client: reqwest::Client, config: &SourceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            pacer: RequestPacer::new(config.request_delay()),
            fallback_generation_count: config.fallback_generation_count,
        }
    }

    /// The absolute URL for `reference`.
    pub fn resolve_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return reference.to_owned();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            reference.trim_start_matches('/')
        )
    }

    /// Paced GET returning the decoded JSON body.
    async fn get_json<T: DeserializeOwned>(&self, reference: &str) -> Result<T, TransportError> {
        let url = self.resolve_url(reference);
        self.pacer.wait().await;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "provider returned an error status");
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.json().await.map_err(|e| TransportError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;
        debug!(url = %url, "provider call succeeded");
        Ok(body)
    }
}

impl DataProvider for PokeApiClient {
    async fn fetch_species_catalog(&self, limit: u32) -> Result<Vec<NamedResource>, TransportError> {
        let list: NamedResourceList = self
            .get_json(&format!("pokemon-species?limit={limit}"))
            .await?;
        Ok(list.results)
    }

    async fn fetch_species_detail(&self, reference: &str) -> Result<SpeciesPayload, TransportError> {
        self.get_json(reference).await
    }

    async fn fetch_evolution_chain(
        &self,
        reference: &str,
    ) -> Result<EvolutionChainPayload, TransportError> {
        self.get_json(reference).await
    }

    async fn fetch_form_detail(&self, reference: &str) -> Result<FormPayload, TransportError> {
        self.get_json(reference).await
    }

    async fn fetch_type_catalog(&self) -> Result<Vec<TypeName>, TransportError> {
        let list: NamedResourceList = self
            .get_json(&format!("type?limit={TYPE_PAGE_LIMIT}"))
            .await?;
        Ok(list
            .results
            .into_iter()
            .map(|entry| TypeName::new(entry.name))
            .collect())
    }

    async fn fetch_generation_count(&self) -> Result<u32, TransportError> {
        let list: NamedResourceList = self.get_json("generation").await?;
        Ok(list.count.unwrap_or(self.fallback_generation_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> PokeApiClient {
        PokeApiClient::new(&SourceConfig {
            base_url: base_url.to_owned(),
            ..SourceConfig::default()
        })
    }

    #[test]
    fn relative_references_join_the_base() {
        let client = client("https://pokeapi.co/api/v2/");
        assert_eq!(
            client.resolve_url("pokemon-species/eevee"),
            "https://pokeapi.co/api/v2/pokemon-species/eevee"
        );
        assert_eq!(
            client.resolve_url("/type?limit=100"),
            "https://pokeapi.co/api/v2/type?limit=100"
        );
    }

    #[test]
    fn base_without_trailing_slash() {
        let client = client("http://localhost:8000/api/v2");
        assert_eq!(
            client.resolve_url("generation"),
            "http://localhost:8000/api/v2/generation"
        );
    }

    #[test]
    fn absolute_references_pass_through() {
        let client = client("https://pokeapi.co/api/v2/");
        let url = "https://pokeapi.co/api/v2/evolution-chain/1/";
        assert_eq!(client.resolve_url(url), url);
    }
}
