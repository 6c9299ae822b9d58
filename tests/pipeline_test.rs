use anyhow::Result;
use mediveri::app::{ReviewUseCase, ValidateUseCase};
use mediveri::common::error::ValidationError;
use mediveri::domain::{Priority, Provider, ProviderStatus, ReviewStatus};
use mediveri::email::build_draft;
use mediveri::pipeline::confidence::FixedFallback;
use mediveri::pipeline::ValidationPipeline;
use mediveri::registry::StaticRegistry;
use mediveri::storage::{InMemoryStorage, Storage};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// A complete, well-formed provider. With no registry record its overall
/// confidence lands in the 70-85 band, so validation flags it.
fn complete_provider(npi: &str) -> Provider {
    let mut provider = Provider::new(npi, "Jane", "Doe");
    provider.credential = Some("MD".to_string());
    provider.specialty = Some("Cardiology".to_string());
    provider.phone = Some("2125551234".to_string());
    provider.fax = Some("2125551235".to_string());
    provider.email = Some("jane.doe@clinic.com".to_string());
    provider.address_line1 = Some("123 Main St".to_string());
    provider.city = Some("Boston".to_string());
    provider.state = Some("MA".to_string());
    provider.zip_code = Some("02108".to_string());
    provider.organization_name = Some("Doe Medical Group".to_string());
    provider
}

struct Harness {
    storage: Arc<dyn Storage>,
    validate: ValidateUseCase,
    review: ReviewUseCase,
}

fn harness(registry: StaticRegistry) -> Harness {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    let pipeline = ValidationPipeline::new(Arc::new(registry), Arc::new(FixedFallback(70.0)));
    Harness {
        validate: ValidateUseCase::new(Arc::clone(&storage), pipeline),
        review: ReviewUseCase::new(Arc::clone(&storage)),
        storage,
    }
}

#[tokio::test]
async fn validation_persists_outcome_and_admits_to_queue() -> Result<()> {
    let h = harness(StaticRegistry::new());
    let provider = h.storage.create_provider(complete_provider("1234567890")).await?;

    let validated = h.validate.validate_provider(provider.id).await?;

    assert_eq!(validated.status, ProviderStatus::Flagged);
    assert!(validated.overall_confidence > 70.0 && validated.overall_confidence < 85.0);
    assert_eq!(validated.field_confidences.as_ref().map(|f| f.len()), Some(13));
    assert!(validated.last_validated.is_some());

    let queue = h.review.pending_queue().await?;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].provider_id, provider.id);
    assert_eq!(queue[0].priority, Priority::Medium);
    Ok(())
}

#[tokio::test]
async fn revalidation_does_not_create_a_second_pending_item() -> Result<()> {
    let h = harness(StaticRegistry::new());
    let provider = h.storage.create_provider(complete_provider("1234567890")).await?;

    h.validate.validate_provider(provider.id).await?;
    h.validate.validate_provider(provider.id).await?;

    let queue = h.review.pending_queue().await?;
    assert_eq!(queue.len(), 1);
    Ok(())
}

#[tokio::test]
async fn sparse_provider_is_admitted_at_high_priority() -> Result<()> {
    let h = harness(StaticRegistry::new());
    // Only the required fields; everything else floors at the missing-value
    // confidence, pulling the overall score below 50
    let provider = h.storage.create_provider(Provider::new("1234567890", "Jane", "Doe")).await?;

    let validated = h.validate.validate_provider(provider.id).await?;
    assert!(validated.overall_confidence < 50.0);

    let queue = h.review.pending_queue().await?;
    assert_eq!(queue[0].priority, Priority::High);
    Ok(())
}

#[tokio::test]
async fn registry_backed_provider_verifies_without_queue_entry() -> Result<()> {
    let registry = StaticRegistry::new().with_record("1234567890", json!({"number": "1234567890"}));
    let h = harness(registry);
    let provider = h.storage.create_provider(complete_provider("1234567890")).await?;

    let validated = h.validate.validate_provider(provider.id).await?;

    assert_eq!(validated.status, ProviderStatus::Verified);
    assert!(h.review.pending_queue().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn approve_round_trip_cascades_to_provider() -> Result<()> {
    let h = harness(StaticRegistry::new());
    let provider = h.storage.create_provider(complete_provider("1234567890")).await?;
    h.validate.validate_provider(provider.id).await?;

    let item = h.review.pending_queue().await?.remove(0);
    h.review.approve(item.id).await?;

    let provider = h.storage.get_provider(provider.id).await?.unwrap();
    assert_eq!(provider.status, ProviderStatus::Verified);

    let item = h.storage.get_review_item(item.id).await?.unwrap();
    assert_eq!(item.status, ReviewStatus::Approved);
    assert!(item.resolved_at.is_some());
    Ok(())
}

#[tokio::test]
async fn reject_resolves_item_but_leaves_provider_flagged() -> Result<()> {
    let h = harness(StaticRegistry::new());
    let provider = h.storage.create_provider(complete_provider("1234567890")).await?;
    h.validate.validate_provider(provider.id).await?;

    let item = h.review.pending_queue().await?.remove(0);
    let rejected = h.review.reject(item.id).await?;

    assert_eq!(rejected.status, ReviewStatus::Rejected);
    assert!(rejected.resolved_at.is_some());

    let provider = h.storage.get_provider(provider.id).await?.unwrap();
    assert_eq!(provider.status, ProviderStatus::Flagged);
    Ok(())
}

#[tokio::test]
async fn bulk_approve_skips_unknown_ids() -> Result<()> {
    let h = harness(StaticRegistry::new());
    let a = h.storage.create_provider(complete_provider("1111111111")).await?;
    let c = h.storage.create_provider(complete_provider("2222222222")).await?;
    h.validate.validate_all().await?;

    let queue = h.review.pending_queue().await?;
    assert_eq!(queue.len(), 2);
    let mut ids: Vec<Uuid> = queue.iter().map(|i| i.id).collect();
    ids.insert(1, Uuid::new_v4()); // B does not exist

    let approved = h.review.bulk_approve(&ids).await?;
    assert_eq!(approved, 2);

    for provider_id in [a.id, c.id] {
        let provider = h.storage.get_provider(provider_id).await?.unwrap();
        assert_eq!(provider.status, ProviderStatus::Verified);
    }
    Ok(())
}

#[tokio::test]
async fn direct_verified_update_auto_resolves_pending_item() -> Result<()> {
    let h = harness(StaticRegistry::new());
    let provider = h.storage.create_provider(complete_provider("1234567890")).await?;
    h.validate.validate_provider(provider.id).await?;
    let item = h.review.pending_queue().await?.remove(0);

    h.review
        .set_provider_status(provider.id, ProviderStatus::Verified)
        .await?;

    let item = h.storage.get_review_item(item.id).await?.unwrap();
    assert_eq!(item.status, ReviewStatus::Approved);
    assert!(item.resolved_at.is_some());
    assert!(h.review.pending_queue().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn approving_an_orphaned_item_is_tolerated() -> Result<()> {
    let h = harness(StaticRegistry::new());
    let provider = h.storage.create_provider(complete_provider("1234567890")).await?;
    h.validate.validate_provider(provider.id).await?;
    let item = h.review.pending_queue().await?.remove(0);

    // Provider deletion is an external operation; the weak reference must
    // not break resolution
    h.storage.delete_provider(provider.id).await?;
    let approved = h.review.approve(item.id).await?;
    assert_eq!(approved.status, ReviewStatus::Approved);
    Ok(())
}

#[tokio::test]
async fn unknown_provider_is_a_not_found_error() {
    let h = harness(StaticRegistry::new());
    let err = h.validate.validate_provider(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ValidationError::NotFound { entity: "provider", .. }));
}

#[tokio::test]
async fn validate_all_reports_actual_counts() -> Result<()> {
    let h = harness(StaticRegistry::new());
    for npi in ["1111111111", "2222222222", "3333333333"] {
        h.storage.create_provider(complete_provider(npi)).await?;
    }

    let report = h.validate.validate_all().await?;
    assert_eq!(report.total, 3);
    assert_eq!(report.processed, 3);
    Ok(())
}

#[tokio::test]
async fn email_draft_round_trips_through_storage() -> Result<()> {
    let h = harness(StaticRegistry::new());
    let provider = h.storage.create_provider(complete_provider("1234567890")).await?;

    let draft = h.storage.create_email_draft(build_draft(&provider)).await?;
    let fetched = h.storage.get_email_draft(draft.id).await?.unwrap();
    assert_eq!(fetched.provider_id, provider.id);
    assert_eq!(fetched.recipient_email.as_deref(), Some("jane.doe@clinic.com"));
    Ok(())
}
