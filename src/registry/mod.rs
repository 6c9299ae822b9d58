pub mod client;

pub use self::client::NpiRegistryClient;

use async_trait::async_trait;
use std::collections::HashMap;

/// An authoritative registry hit for a provider identifier. The response
/// shape is collaborator-defined, so the record is carried opaquely.
#[derive(Debug, Clone)]
pub struct RegistryRecord(serde_json::Value);

impl RegistryRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Outbound lookup against an external provider-identifier registry.
///
/// Never raises: network errors, non-success responses, timeouts, and zero
/// results are all folded into `None`. Callers treat a miss as "no
/// authoritative data available", not as a failure.
#[async_trait]
pub trait RegistryPort: Send + Sync {
    async fn lookup(&self, npi: &str) -> Option<RegistryRecord>;
}

/// Fixture-backed registry for tests and offline demo runs. Empty by
/// default, which makes every lookup a miss.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    records: HashMap<String, serde_json::Value>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, npi: impl Into<String>, record: serde_json::Value) -> Self {
        self.records.insert(npi.into(), record);
        self
    }
}

#[async_trait]
impl RegistryPort for StaticRegistry {
    async fn lookup(&self, npi: &str) -> Option<RegistryRecord> {
        self.records.get(npi).cloned().map(RegistryRecord::new)
    }
}
