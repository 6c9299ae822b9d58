use super::traits::Storage;
use crate::common::error::Result;
use crate::domain::*;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// In-memory storage implementation for development/testing.
///
/// Each entity map sits behind its own mutex; a patch is applied under a
/// single lock acquisition, which gives the read-modify-write atomicity the
/// pipeline relies on.
pub struct InMemoryStorage {
    providers: Arc<Mutex<HashMap<Uuid, Provider>>>,
    review_items: Arc<Mutex<HashMap<Uuid, ReviewQueueItem>>>,
    email_drafts: Arc<Mutex<HashMap<Uuid, EmailDraft>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            providers: Arc::new(Mutex::new(HashMap::new())),
            review_items: Arc::new(Mutex::new(HashMap::new())),
            email_drafts: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

/// Confidence buckets for the distribution view, highest band first.
const CONFIDENCE_RANGES: [(&str, f64, f64); 5] = [
    ("90-100%", 90.0, 100.0),
    ("80-89%", 80.0, 89.0),
    ("70-79%", 70.0, 79.0),
    ("60-69%", 60.0, 69.0),
    ("0-59%", 0.0, 59.0),
];

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get_all_providers(&self) -> Result<Vec<Provider>> {
        let providers = self.providers.lock().unwrap();
        let mut all: Vec<Provider> = providers.values().cloned().collect();
        // Newest-first default listing
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn get_provider(&self, id: Uuid) -> Result<Option<Provider>> {
        let providers = self.providers.lock().unwrap();
        Ok(providers.get(&id).cloned())
    }

    async fn get_provider_by_npi(&self, npi: &str) -> Result<Option<Provider>> {
        let providers = self.providers.lock().unwrap();
        Ok(providers.values().find(|p| p.npi == npi).cloned())
    }

    async fn create_provider(&self, provider: Provider) -> Result<Provider> {
        let mut providers = self.providers.lock().unwrap();
        providers.insert(provider.id, provider.clone());
        debug!(
            "Created provider: {} {} with id {}",
            provider.first_name, provider.last_name, provider.id
        );
        Ok(provider)
    }

    async fn update_provider(&self, id: Uuid, patch: ProviderPatch) -> Result<Option<Provider>> {
        let mut providers = self.providers.lock().unwrap();
        let Some(provider) = providers.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(status) = patch.status {
            provider.status = status;
        }
        if let Some(confidence) = patch.overall_confidence {
            provider.overall_confidence = confidence;
        }
        if let Some(fields) = patch.field_confidences {
            provider.field_confidences = Some(fields);
        }
        if let Some(notes) = patch.validation_notes {
            provider.validation_notes = notes;
        }
        if let Some(validated_at) = patch.last_validated {
            provider.last_validated = Some(validated_at);
        }
        provider.updated_at = Utc::now();
        debug!("Updated provider {}", id);
        Ok(Some(provider.clone()))
    }

    async fn delete_provider(&self, id: Uuid) -> Result<bool> {
        let mut providers = self.providers.lock().unwrap();
        Ok(providers.remove(&id).is_some())
    }

    async fn bulk_create_providers(&self, new_providers: Vec<Provider>) -> Result<Vec<Provider>> {
        let mut providers = self.providers.lock().unwrap();
        for provider in &new_providers {
            providers.insert(provider.id, provider.clone());
        }
        debug!("Bulk created {} providers", new_providers.len());
        Ok(new_providers)
    }

    async fn clear_all_providers(&self) -> Result<()> {
        // Review items reference providers, so both go
        self.providers.lock().unwrap().clear();
        self.review_items.lock().unwrap().clear();
        Ok(())
    }

    async fn get_all_review_items(&self) -> Result<Vec<ReviewQueueItem>> {
        let items = self.review_items.lock().unwrap();
        let mut all: Vec<ReviewQueueItem> = items.values().cloned().collect();
        all.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.created_at.cmp(&b.created_at)));
        Ok(all)
    }

    async fn get_review_item(&self, id: Uuid) -> Result<Option<ReviewQueueItem>> {
        let items = self.review_items.lock().unwrap();
        Ok(items.get(&id).cloned())
    }

    async fn pending_review_item_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<ReviewQueueItem>> {
        let items = self.review_items.lock().unwrap();
        let item = items
            .values()
            .find(|i| i.provider_id == provider_id && i.status == ReviewStatus::Pending)
            .cloned();
        Ok(item)
    }

    async fn create_review_item(&self, item: ReviewQueueItem) -> Result<ReviewQueueItem> {
        let mut items = self.review_items.lock().unwrap();
        items.insert(item.id, item.clone());
        debug!(
            "Created review item {} for provider {} ({:?})",
            item.id, item.provider_id, item.priority
        );
        Ok(item)
    }

    async fn update_review_item(
        &self,
        id: Uuid,
        patch: ReviewItemPatch,
    ) -> Result<Option<ReviewQueueItem>> {
        let mut items = self.review_items.lock().unwrap();
        let Some(item) = items.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(status) = patch.status {
            item.status = status;
        }
        if let Some(resolved_at) = patch.resolved_at {
            item.resolved_at = Some(resolved_at);
        }
        debug!("Updated review item {}", id);
        Ok(Some(item.clone()))
    }

    async fn delete_review_item(&self, id: Uuid) -> Result<bool> {
        let mut items = self.review_items.lock().unwrap();
        Ok(items.remove(&id).is_some())
    }

    async fn create_email_draft(&self, draft: EmailDraft) -> Result<EmailDraft> {
        let mut drafts = self.email_drafts.lock().unwrap();
        drafts.insert(draft.id, draft.clone());
        debug!("Created email draft {} for provider {}", draft.id, draft.provider_id);
        Ok(draft)
    }

    async fn get_email_draft(&self, id: Uuid) -> Result<Option<EmailDraft>> {
        let drafts = self.email_drafts.lock().unwrap();
        Ok(drafts.get(&id).cloned())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let providers = self.providers.lock().unwrap();
        let total = providers.len();
        let verified = providers
            .values()
            .filter(|p| p.status == ProviderStatus::Verified)
            .count();
        let flagged = providers
            .values()
            .filter(|p| p.status == ProviderStatus::Flagged)
            .count();
        let pending = providers
            .values()
            .filter(|p| p.status == ProviderStatus::Pending)
            .count();

        let total_confidence: f64 = providers.values().map(|p| p.overall_confidence).sum();
        let average_confidence = if total > 0 {
            total_confidence / total as f64
        } else {
            0.0
        };

        let items = self.review_items.lock().unwrap();
        let needing_review = items
            .values()
            .filter(|i| i.status == ReviewStatus::Pending)
            .count();

        Ok(DashboardStats {
            total_providers: total,
            verified_providers: verified,
            flagged_providers: flagged,
            pending_providers: pending,
            average_confidence,
            validation_accuracy: if total > 0 {
                verified as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            providers_needing_review: needing_review,
        })
    }

    async fn status_breakdown(&self) -> Result<Vec<StatusBreakdown>> {
        let providers = self.providers.lock().unwrap();
        let total = providers.len().max(1);

        let statuses = [
            ProviderStatus::Verified,
            ProviderStatus::Flagged,
            ProviderStatus::Pending,
            ProviderStatus::Error,
        ];
        let breakdown = statuses
            .iter()
            .map(|&status| {
                let count = providers.values().filter(|p| p.status == status).count();
                StatusBreakdown {
                    status,
                    count,
                    percentage: count as f64 / total as f64 * 100.0,
                }
            })
            .collect();
        Ok(breakdown)
    }

    async fn confidence_distribution(&self) -> Result<Vec<ConfidenceDistribution>> {
        let providers = self.providers.lock().unwrap();
        let total = providers.len().max(1);

        let distribution = CONFIDENCE_RANGES
            .iter()
            .map(|&(range, min, max)| {
                let count = providers
                    .values()
                    .filter(|p| p.overall_confidence >= min && p.overall_confidence <= max)
                    .count();
                ConfidenceDistribution {
                    range: range.to_string(),
                    count,
                    percentage: count as f64 / total as f64 * 100.0,
                }
            })
            .collect();
        Ok(distribution)
    }
}
