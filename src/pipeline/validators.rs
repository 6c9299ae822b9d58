use once_cell::sync::Lazy;
use regex::Regex;

static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());
static STATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Outcome of a single-field format/sanity check.
#[derive(Debug, Clone)]
pub struct FieldValidation {
    pub valid: bool,
    pub confidence: f64,
    pub issues: Vec<String>,
}

impl FieldValidation {
    fn from_issues(issues: Vec<String>, clean_baseline: f64, floor: f64, penalty: f64) -> Self {
        let confidence = if issues.is_empty() {
            clean_baseline
        } else {
            (floor - issues.len() as f64 * penalty).max(0.0)
        };
        FieldValidation {
            valid: issues.is_empty(),
            confidence,
            issues,
        }
    }
}

/// Phone numbers score 95 when clean; a missing number is a hard zero.
pub fn validate_phone(phone: Option<&str>) -> FieldValidation {
    let Some(phone) = phone else {
        return FieldValidation {
            valid: false,
            confidence: 0.0,
            issues: vec!["Phone number missing".to_string()],
        };
    };

    let cleaned: String = phone.chars().filter(char::is_ascii_digit).collect();
    let mut issues = Vec::new();

    if cleaned.len() != 10 {
        issues.push("Invalid phone number length".to_string());
    }
    if cleaned.starts_with("555") {
        issues.push("Potential fake number (555 prefix)".to_string());
    }
    if cleaned == "0000000000" || is_repeating(&cleaned) {
        issues.push("Invalid repeating digits".to_string());
    }

    FieldValidation::from_issues(issues, 95.0, 70.0, 20.0)
}

/// A digit string made of one repeated character (e.g. "1111111111").
fn is_repeating(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) if digits.len() >= 2 => chars.all(|c| c == first),
        _ => false,
    }
}

/// Multi-field address check; each missing component and each format
/// problem is its own issue.
pub fn validate_address(
    address_line1: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    zip_code: Option<&str>,
) -> FieldValidation {
    let mut issues = Vec::new();

    if address_line1.is_none() {
        issues.push("Address line 1 missing".to_string());
    }
    if city.is_none() {
        issues.push("City missing".to_string());
    }
    if state.is_none() {
        issues.push("State missing".to_string());
    }
    if zip_code.is_none() {
        issues.push("ZIP code missing".to_string());
    }

    if let Some(zip) = zip_code {
        if !ZIP_RE.is_match(zip) {
            issues.push("Invalid ZIP code format".to_string());
        }
        if zip == "00000" {
            issues.push("Invalid ZIP code value".to_string());
        }
    }
    if let Some(state) = state {
        if !STATE_RE.is_match(state) {
            issues.push("Invalid state format".to_string());
        }
    }

    FieldValidation::from_issues(issues, 90.0, 80.0, 15.0)
}

/// Email scores 85 when clean. Absence is distinguished from malformation
/// with a non-zero floor of 30.
pub fn validate_email(email: Option<&str>) -> FieldValidation {
    let Some(email) = email else {
        return FieldValidation {
            valid: false,
            confidence: 30.0,
            issues: vec!["Email missing".to_string()],
        };
    };

    let mut issues = Vec::new();
    if !EMAIL_RE.is_match(email) {
        issues.push("Invalid email format".to_string());
    }

    FieldValidation::from_issues(issues, 85.0, 60.0, 20.0)
}
