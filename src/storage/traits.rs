use crate::common::error::Result;
use crate::domain::*;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage trait for persisting providers, review queue items, and email
/// drafts, plus the aggregate queries the dashboard collaborator consumes.
///
/// Updates are partial: the store applies a patch read-modify-write under
/// its own serialization so overlapping approve/flag requests for the same
/// id cannot lose writes.
#[async_trait]
pub trait Storage: Send + Sync {
    // Provider operations
    async fn get_all_providers(&self) -> Result<Vec<Provider>>;
    async fn get_provider(&self, id: Uuid) -> Result<Option<Provider>>;
    async fn get_provider_by_npi(&self, npi: &str) -> Result<Option<Provider>>;
    async fn create_provider(&self, provider: Provider) -> Result<Provider>;
    async fn update_provider(&self, id: Uuid, patch: ProviderPatch) -> Result<Option<Provider>>;
    async fn delete_provider(&self, id: Uuid) -> Result<bool>;
    async fn bulk_create_providers(&self, providers: Vec<Provider>) -> Result<Vec<Provider>>;
    async fn clear_all_providers(&self) -> Result<()>;

    // Review queue operations
    async fn get_all_review_items(&self) -> Result<Vec<ReviewQueueItem>>;
    async fn get_review_item(&self, id: Uuid) -> Result<Option<ReviewQueueItem>>;
    /// The at-most-one pending item for a provider, if any.
    async fn pending_review_item_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<ReviewQueueItem>>;
    async fn create_review_item(&self, item: ReviewQueueItem) -> Result<ReviewQueueItem>;
    async fn update_review_item(
        &self,
        id: Uuid,
        patch: ReviewItemPatch,
    ) -> Result<Option<ReviewQueueItem>>;
    async fn delete_review_item(&self, id: Uuid) -> Result<bool>;

    // Email drafts
    async fn create_email_draft(&self, draft: EmailDraft) -> Result<EmailDraft>;
    async fn get_email_draft(&self, id: Uuid) -> Result<Option<EmailDraft>>;

    // Aggregate queries
    async fn dashboard_stats(&self) -> Result<DashboardStats>;
    async fn status_breakdown(&self) -> Result<Vec<StatusBreakdown>>;
    async fn confidence_distribution(&self) -> Result<Vec<ConfidenceDistribution>>;
}
