use super::{RegistryPort, RegistryRecord};
use crate::common::error::Result;
use crate::config::RegistryConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP adapter for the NPPES NPI registry.
///
/// A single attempt with a request timeout; every failure mode degrades to
/// `None` per the `RegistryPort` contract.
pub struct NpiRegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl NpiRegistryClient {
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl RegistryPort for NpiRegistryClient {
    async fn lookup(&self, npi: &str) -> Option<RegistryRecord> {
        let url = format!("{}?version=2.1&number={}", self.base_url, npi);
        debug!("NPI registry lookup: {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("NPI registry request failed for {}: {}", npi, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "NPI registry returned status {} for {}",
                response.status(),
                npi
            );
            return None;
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("NPI registry response for {} was not valid JSON: {}", npi, e);
                return None;
            }
        };

        let result_count = body["result_count"].as_u64().unwrap_or(0);
        if result_count == 0 {
            debug!("NPI {} not found in registry", npi);
            return None;
        }

        Some(RegistryRecord::new(body["results"][0].clone()))
    }
}
