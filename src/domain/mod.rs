use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Lifecycle status of a provider record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Pending,
    Verified,
    Flagged,
    Error,
}

/// Review queue priority. Declaration order doubles as sort order
/// (high before medium before low).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

/// Where a field value originally came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    CsvUpload,
    PdfExtraction,
    NpiRegistry,
    WebScrape,
    ManualEntry,
}

/// Per-field confidence record produced by a validation pass.
///
/// Non-empty `discrepancies` always come with a confidence below the
/// field's clean baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfidence {
    pub value: Option<String>,
    pub confidence: f64,
    pub source: DataSource,
    pub last_verified: DateTime<Utc>,
    pub discrepancies: Vec<String>,
}

/// A provider-directory record. Root entity of the model; review queue
/// items and email drafts point at it by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    /// 10-digit National Provider Identifier.
    pub npi: String,
    pub first_name: String,
    pub last_name: String,
    pub credential: Option<String>,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub organization_name: Option<String>,
    pub taxonomy_code: Option<String>,
    pub license_number: Option<String>,
    pub license_state: Option<String>,
    pub status: ProviderStatus,
    /// 0-100; arithmetic mean of the per-field confidences.
    pub overall_confidence: f64,
    /// Present only after at least one validation pass.
    pub field_confidences: Option<BTreeMap<String, FieldConfidence>>,
    pub validation_notes: Option<String>,
    pub last_validated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Provider {
    /// Creates a pending provider with no confidence data yet.
    pub fn new(npi: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            npi: npi.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            credential: None,
            specialty: None,
            phone: None,
            fax: None,
            email: None,
            address_line1: None,
            address_line2: None,
            city: None,
            state: None,
            zip_code: None,
            organization_name: None,
            taxonomy_code: None,
            license_number: None,
            license_state: None,
            status: ProviderStatus::Pending,
            overall_confidence: 0.0,
            field_confidences: None,
            validation_notes: None,
            last_validated: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a provider, applied read-modify-write by the store.
/// `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProviderPatch {
    pub status: Option<ProviderStatus>,
    pub overall_confidence: Option<f64>,
    pub field_confidences: Option<BTreeMap<String, FieldConfidence>>,
    /// Outer `Some` replaces the notes, including clearing them with `None`.
    pub validation_notes: Option<Option<String>>,
    pub last_validated: Option<DateTime<Utc>>,
}

impl ProviderPatch {
    pub fn status(status: ProviderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// One pending manual-review task for a flagged provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewQueueItem {
    pub id: Uuid,
    /// Weak reference; the provider may have been deleted out from under us.
    pub provider_id: Uuid,
    pub priority: Priority,
    pub reason: String,
    pub status: ReviewStatus,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ReviewQueueItem {
    pub fn new(provider_id: Uuid, priority: Priority, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_id,
            priority,
            reason: reason.into(),
            status: ReviewStatus::Pending,
            resolved_at: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewItemPatch {
    pub status: Option<ReviewStatus>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Outreach email derived from a provider's current field state. A side
/// output of the pipeline's consumers, not part of its decision logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailDraft {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub subject: String,
    pub body: String,
    pub recipient_email: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counters for the dashboard collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_providers: usize,
    pub verified_providers: usize,
    pub flagged_providers: usize,
    pub pending_providers: usize,
    pub average_confidence: f64,
    pub validation_accuracy: f64,
    pub providers_needing_review: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub status: ProviderStatus,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    pub range: String,
    pub count: usize,
    pub percentage: f64,
}

/// The closed set of provider fields a validation pass scores, each mapped
/// to the validator that applies to it. Phone and email get dedicated
/// format rules; npi is scored straight off the registry lookup; everything
/// else takes the generic registry-presence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedField {
    Npi,
    FirstName,
    LastName,
    Credential,
    Specialty,
    Phone,
    Fax,
    Email,
    AddressLine1,
    City,
    State,
    ZipCode,
    OrganizationName,
}

impl ValidatedField {
    pub const ALL: [ValidatedField; 13] = [
        ValidatedField::Npi,
        ValidatedField::FirstName,
        ValidatedField::LastName,
        ValidatedField::Credential,
        ValidatedField::Specialty,
        ValidatedField::Phone,
        ValidatedField::Fax,
        ValidatedField::Email,
        ValidatedField::AddressLine1,
        ValidatedField::City,
        ValidatedField::State,
        ValidatedField::ZipCode,
        ValidatedField::OrganizationName,
    ];

    /// Key used in the provider's `field_confidences` map.
    pub fn name(self) -> &'static str {
        match self {
            ValidatedField::Npi => "npi",
            ValidatedField::FirstName => "first_name",
            ValidatedField::LastName => "last_name",
            ValidatedField::Credential => "credential",
            ValidatedField::Specialty => "specialty",
            ValidatedField::Phone => "phone",
            ValidatedField::Fax => "fax",
            ValidatedField::Email => "email",
            ValidatedField::AddressLine1 => "address_line1",
            ValidatedField::City => "city",
            ValidatedField::State => "state",
            ValidatedField::ZipCode => "zip_code",
            ValidatedField::OrganizationName => "organization_name",
        }
    }

    /// Reads this field's current value off a provider.
    pub fn value(self, provider: &Provider) -> Option<&str> {
        match self {
            ValidatedField::Npi => Some(&provider.npi),
            ValidatedField::FirstName => Some(&provider.first_name),
            ValidatedField::LastName => Some(&provider.last_name),
            ValidatedField::Credential => provider.credential.as_deref(),
            ValidatedField::Specialty => provider.specialty.as_deref(),
            ValidatedField::Phone => provider.phone.as_deref(),
            ValidatedField::Fax => provider.fax.as_deref(),
            ValidatedField::Email => provider.email.as_deref(),
            ValidatedField::AddressLine1 => provider.address_line1.as_deref(),
            ValidatedField::City => provider.city.as_deref(),
            ValidatedField::State => provider.state.as_deref(),
            ValidatedField::ZipCode => provider.zip_code.as_deref(),
            ValidatedField::OrganizationName => provider.organization_name.as_deref(),
        }
    }
}
