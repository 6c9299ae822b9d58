use crate::domain::{FieldConfidence, ProviderStatus};
use std::collections::BTreeMap;

pub const NOTE_LOW_CONFIDENCE: &str = "Low confidence score - manual review required";
pub const NOTE_REVIEW_RECOMMENDED: &str = "Some fields have low confidence - review recommended";
pub const NOTE_DISCREPANCIES: &str = "Data discrepancies detected";

/// Maps an overall confidence and the per-field results to a provider
/// status and note.
///
/// Below 70 and below 85 are both flagged, with different notes. A score of
/// 85 or better is only provisionally verified: any field carrying a
/// discrepancy downgrades it to flagged.
pub fn classify(
    overall_confidence: f64,
    field_confidences: &BTreeMap<String, FieldConfidence>,
) -> (ProviderStatus, Option<String>) {
    let (mut status, mut note) = if overall_confidence < 70.0 {
        (ProviderStatus::Flagged, Some(NOTE_LOW_CONFIDENCE.to_string()))
    } else if overall_confidence < 85.0 {
        (ProviderStatus::Flagged, Some(NOTE_REVIEW_RECOMMENDED.to_string()))
    } else {
        (ProviderStatus::Verified, None)
    };

    let has_discrepancies = field_confidences
        .values()
        .any(|f| !f.discrepancies.is_empty());
    if has_discrepancies && status == ProviderStatus::Verified {
        status = ProviderStatus::Flagged;
        note = Some(NOTE_DISCREPANCIES.to_string());
    }

    (status, note)
}
