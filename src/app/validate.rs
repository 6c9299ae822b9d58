use crate::common::error::{Result, ValidationError};
use crate::domain::{Priority, Provider, ProviderStatus, ReviewQueueItem};
use crate::pipeline::{ValidationOutcome, ValidationPipeline};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const DEFAULT_FLAG_REASON: &str = "Flagged during validation";

/// Overall confidence below this admits a flagged provider at high priority.
const HIGH_PRIORITY_THRESHOLD: f64 = 50.0;

/// Outcome counts for a validate-all run. `processed` reflects actual
/// successes, never the attempted total.
#[derive(Debug, Clone, Copy)]
pub struct BulkValidationReport {
    pub processed: usize,
    pub total: usize,
}

/// Runs the validation pipeline against stored providers and admits flagged
/// ones into the review queue.
pub struct ValidateUseCase {
    storage: Arc<dyn Storage>,
    pipeline: ValidationPipeline,
}

impl ValidateUseCase {
    pub fn new(storage: Arc<dyn Storage>, pipeline: ValidationPipeline) -> Self {
        Self { storage, pipeline }
    }

    /// Validates a single provider by id and persists the outcome.
    pub async fn validate_provider(&self, id: Uuid) -> Result<Provider> {
        let provider = self
            .storage
            .get_provider(id)
            .await?
            .ok_or_else(|| ValidationError::not_found("provider", id))?;

        let outcome = self.pipeline.run(&provider).await;
        let updated = self
            .storage
            .update_provider(id, outcome.clone().into_patch())
            .await?
            .ok_or_else(|| ValidationError::not_found("provider", id))?;

        self.admit_if_flagged(id, &outcome).await?;
        Ok(updated)
    }

    /// Validates every stored provider sequentially. A failure on one
    /// provider is logged and excluded from the processed count; it never
    /// aborts the batch.
    pub async fn validate_all(&self) -> Result<BulkValidationReport> {
        let providers = self.storage.get_all_providers().await?;
        let total = providers.len();
        let mut processed = 0;

        for provider in providers {
            match self.validate_provider(provider.id).await {
                Ok(_) => processed += 1,
                Err(e) => {
                    warn!("Validation failed for provider {}: {}", provider.id, e);
                }
            }
        }

        info!("Bulk validation finished: {}/{} providers", processed, total);
        Ok(BulkValidationReport { processed, total })
    }

    /// Creates a review queue entry for a flagged outcome unless the
    /// provider already has a pending one (at-most-one-pending invariant).
    async fn admit_if_flagged(&self, provider_id: Uuid, outcome: &ValidationOutcome) -> Result<()> {
        if outcome.status != ProviderStatus::Flagged {
            return Ok(());
        }
        if self
            .storage
            .pending_review_item_for_provider(provider_id)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let priority = if outcome.overall_confidence < HIGH_PRIORITY_THRESHOLD {
            Priority::High
        } else {
            Priority::Medium
        };
        let reason = outcome
            .validation_notes
            .clone()
            .unwrap_or_else(|| DEFAULT_FLAG_REASON.to_string());

        self.storage
            .create_review_item(ReviewQueueItem::new(provider_id, priority, reason))
            .await?;
        Ok(())
    }
}
