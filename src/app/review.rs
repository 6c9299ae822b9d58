use crate::common::error::{Result, ValidationError};
use crate::domain::{
    Provider, ProviderPatch, ProviderStatus, ReviewItemPatch, ReviewQueueItem, ReviewStatus,
};
use crate::storage::Storage;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Manual disposition of review queue items: pending -> approved | rejected,
/// both terminal.
pub struct ReviewUseCase {
    storage: Arc<dyn Storage>,
}

impl ReviewUseCase {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Approves an item and cascades the linked provider to verified. The
    /// item holds only a weak reference, so a deleted provider is tolerated.
    pub async fn approve(&self, item_id: Uuid) -> Result<ReviewQueueItem> {
        let item = self
            .storage
            .get_review_item(item_id)
            .await?
            .ok_or_else(|| ValidationError::not_found("review item", item_id))?;

        let updated = self
            .storage
            .update_review_item(
                item_id,
                ReviewItemPatch {
                    status: Some(ReviewStatus::Approved),
                    resolved_at: Some(Utc::now()),
                },
            )
            .await?
            .ok_or_else(|| ValidationError::not_found("review item", item_id))?;

        let provider = self
            .storage
            .update_provider(item.provider_id, ProviderPatch::status(ProviderStatus::Verified))
            .await?;
        if provider.is_none() {
            debug!(
                "Approved review item {} for missing provider {}",
                item_id, item.provider_id
            );
        }

        Ok(updated)
    }

    /// Rejects an item, meaning the flag itself was wrong. The provider's
    /// status is deliberately left unchanged.
    pub async fn reject(&self, item_id: Uuid) -> Result<ReviewQueueItem> {
        self.storage
            .update_review_item(
                item_id,
                ReviewItemPatch {
                    status: Some(ReviewStatus::Rejected),
                    resolved_at: Some(Utc::now()),
                },
            )
            .await?
            .ok_or_else(|| ValidationError::not_found("review item", item_id))
    }

    /// Approves each id independently; unknown ids are skipped, not fatal.
    /// Returns the number actually approved.
    pub async fn bulk_approve(&self, item_ids: &[Uuid]) -> Result<usize> {
        let mut approved = 0;
        for &id in item_ids {
            match self.approve(id).await {
                Ok(_) => approved += 1,
                Err(e) => warn!("Skipping review item {} in bulk approve: {}", id, e),
            }
        }
        Ok(approved)
    }

    /// Rejects each id independently; unknown ids are skipped.
    pub async fn bulk_reject(&self, item_ids: &[Uuid]) -> Result<usize> {
        let mut rejected = 0;
        for &id in item_ids {
            match self.reject(id).await {
                Ok(_) => rejected += 1,
                Err(e) => warn!("Skipping review item {} in bulk reject: {}", id, e),
            }
        }
        Ok(rejected)
    }

    /// Updates a provider's status directly. Setting verified through any
    /// path auto-resolves a pending review item to approved.
    pub async fn set_provider_status(
        &self,
        provider_id: Uuid,
        status: ProviderStatus,
    ) -> Result<Provider> {
        let updated = self
            .storage
            .update_provider(provider_id, ProviderPatch::status(status))
            .await?
            .ok_or_else(|| ValidationError::not_found("provider", provider_id))?;

        if status == ProviderStatus::Verified {
            if let Some(item) = self
                .storage
                .pending_review_item_for_provider(provider_id)
                .await?
            {
                self.storage
                    .update_review_item(
                        item.id,
                        ReviewItemPatch {
                            status: Some(ReviewStatus::Approved),
                            resolved_at: Some(Utc::now()),
                        },
                    )
                    .await?;
            }
        }

        Ok(updated)
    }

    /// The pending review queue, highest priority first.
    pub async fn pending_queue(&self) -> Result<Vec<ReviewQueueItem>> {
        let items = self.storage.get_all_review_items().await?;
        Ok(items
            .into_iter()
            .filter(|i| i.status == ReviewStatus::Pending)
            .collect())
    }
}
