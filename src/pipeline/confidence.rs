use super::validators::{validate_email, validate_phone};
use crate::domain::{DataSource, FieldConfidence, ValidatedField};
use crate::registry::RegistryRecord;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Confidence assigned when a field is absent, regardless of source.
pub const MISSING_VALUE_CONFIDENCE: f64 = 20.0;
/// Base confidence for a registry-backed field without dedicated rules.
pub const REGISTRY_MATCH_CONFIDENCE: f64 = 85.0;

/// Source of the neutral "self-reported, unverified" confidence used for
/// generic fields with no registry backing. Injectable so tests stay
/// deterministic.
pub trait FallbackConfidence: Send + Sync {
    fn confidence(&self) -> f64;
}

/// Production fallback: uniform draw from [60, 80).
pub struct UniformFallback;

impl FallbackConfidence for UniformFallback {
    fn confidence(&self) -> f64 {
        rand::thread_rng().gen_range(60.0..80.0)
    }
}

/// Deterministic fallback for tests.
pub struct FixedFallback(pub f64);

impl FallbackConfidence for FixedFallback {
    fn confidence(&self) -> f64 {
        self.0
    }
}

/// Scores one field against the registry lookup result.
///
/// Priority order: a missing value short-circuits to the fixed low floor;
/// a registry hit grants the base 85 except for phone and email, whose
/// dedicated validators apply even when the registry matched; on a miss,
/// phone and email still use their validators and everything else takes the
/// fallback confidence.
pub fn score_field(
    field: ValidatedField,
    value: Option<&str>,
    registry: Option<&RegistryRecord>,
    source: DataSource,
    fallback: &dyn FallbackConfidence,
    now: DateTime<Utc>,
) -> FieldConfidence {
    let value = value.filter(|v| !v.is_empty());

    let (confidence, discrepancies) = match value {
        None => (MISSING_VALUE_CONFIDENCE, Vec::new()),
        Some(value) => match field {
            ValidatedField::Phone => {
                let validation = validate_phone(Some(value));
                (validation.confidence, validation.issues)
            }
            ValidatedField::Email => {
                let validation = validate_email(Some(value));
                (validation.confidence, validation.issues)
            }
            _ if registry.is_some() => (REGISTRY_MATCH_CONFIDENCE, Vec::new()),
            _ => (fallback.confidence(), Vec::new()),
        },
    };

    FieldConfidence {
        value: value.map(str::to_string),
        confidence,
        source,
        last_verified: now,
        discrepancies,
    }
}

/// The npi field is scored straight off the registry lookup: a hit is full
/// confidence sourced from the registry, a miss drops to 50 with a
/// discrepancy.
pub fn npi_confidence(npi: &str, registry_hit: bool, now: DateTime<Utc>) -> FieldConfidence {
    if registry_hit {
        FieldConfidence {
            value: Some(npi.to_string()),
            confidence: 100.0,
            source: DataSource::NpiRegistry,
            last_verified: now,
            discrepancies: Vec::new(),
        }
    } else {
        FieldConfidence {
            value: Some(npi.to_string()),
            confidence: 50.0,
            source: DataSource::CsvUpload,
            last_verified: now,
            discrepancies: vec!["NPI not found in registry".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit() -> RegistryRecord {
        RegistryRecord::new(json!({"number": "1234567890"}))
    }

    #[test]
    fn missing_value_floors_at_20_even_with_registry_hit() {
        let record = hit();
        let fc = score_field(
            ValidatedField::Specialty,
            None,
            Some(&record),
            DataSource::CsvUpload,
            &FixedFallback(70.0),
            Utc::now(),
        );
        assert_eq!(fc.confidence, MISSING_VALUE_CONFIDENCE);
        assert!(fc.discrepancies.is_empty());
        assert!(fc.value.is_none());
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let fc = score_field(
            ValidatedField::City,
            Some(""),
            None,
            DataSource::CsvUpload,
            &FixedFallback(70.0),
            Utc::now(),
        );
        assert_eq!(fc.confidence, MISSING_VALUE_CONFIDENCE);
        assert!(fc.value.is_none());
    }

    #[test]
    fn registry_hit_grants_base_confidence_for_generic_fields() {
        let record = hit();
        let fc = score_field(
            ValidatedField::LastName,
            Some("Doe"),
            Some(&record),
            DataSource::CsvUpload,
            &FixedFallback(70.0),
            Utc::now(),
        );
        assert_eq!(fc.confidence, REGISTRY_MATCH_CONFIDENCE);
    }

    #[test]
    fn registry_hit_does_not_exempt_phone_format_problems() {
        let record = hit();
        let fc = score_field(
            ValidatedField::Phone,
            Some("5551234567"),
            Some(&record),
            DataSource::CsvUpload,
            &FixedFallback(70.0),
            Utc::now(),
        );
        assert!(fc.confidence <= 50.0);
        assert!(!fc.discrepancies.is_empty());
    }

    #[test]
    fn registry_miss_uses_fallback_for_generic_fields() {
        let fc = score_field(
            ValidatedField::OrganizationName,
            Some("Acme Medical Group"),
            None,
            DataSource::CsvUpload,
            &FixedFallback(66.0),
            Utc::now(),
        );
        assert_eq!(fc.confidence, 66.0);
    }

    #[test]
    fn registry_miss_still_validates_email() {
        let fc = score_field(
            ValidatedField::Email,
            Some("a@b.com"),
            None,
            DataSource::CsvUpload,
            &FixedFallback(70.0),
            Utc::now(),
        );
        assert_eq!(fc.confidence, 85.0);
    }

    #[test]
    fn uniform_fallback_stays_in_band() {
        let fallback = UniformFallback;
        for _ in 0..100 {
            let c = fallback.confidence();
            assert!((60.0..80.0).contains(&c));
        }
    }

    #[test]
    fn npi_hit_is_full_confidence_from_registry() {
        let fc = npi_confidence("1234567890", true, Utc::now());
        assert_eq!(fc.confidence, 100.0);
        assert_eq!(fc.source, DataSource::NpiRegistry);
        assert!(fc.discrepancies.is_empty());
    }

    #[test]
    fn npi_miss_halves_confidence_with_discrepancy() {
        let fc = npi_confidence("1234567890", false, Utc::now());
        assert_eq!(fc.confidence, 50.0);
        assert_eq!(fc.discrepancies, vec!["NPI not found in registry".to_string()]);
    }
}
