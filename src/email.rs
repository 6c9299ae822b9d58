use crate::domain::{EmailDraft, Provider};
use chrono::Utc;
use uuid::Uuid;

/// Builds a verification-request draft from the provider's current field
/// state. A draft is created even when no email is on file; the recipient
/// is filled in later by whoever sends it.
pub fn build_draft(provider: &Provider) -> EmailDraft {
    let subject = format!(
        "Provider Data Verification Request - {} {}",
        provider.first_name, provider.last_name
    );
    let body = format!(
        "Dear {first} {last},\n\n\
         We are conducting a routine verification of provider information in our healthcare directory. \
         We have the following information on file and would appreciate your confirmation or correction of these details:\n\n\
         Name: {first} {last}, {credential}\n\
         NPI: {npi}\n\
         Specialty: {specialty}\n\
         Phone: {phone}\n\
         Address: {line1} {line2}\n         {city}, {state} {zip}\n\n\
         Please reply to this email with any corrections or to confirm that the information above is accurate.\n\n\
         Thank you for your cooperation in maintaining accurate provider data.\n\n\
         Best regards,\n\
         Provider Directory Management Team\n\
         MediveriAI",
        first = provider.first_name,
        last = provider.last_name,
        credential = provider.credential.as_deref().unwrap_or(""),
        npi = provider.npi,
        specialty = provider.specialty.as_deref().unwrap_or("Not specified"),
        phone = provider.phone.as_deref().unwrap_or("Not on file"),
        line1 = provider.address_line1.as_deref().unwrap_or(""),
        line2 = provider.address_line2.as_deref().unwrap_or(""),
        city = provider.city.as_deref().unwrap_or(""),
        state = provider.state.as_deref().unwrap_or(""),
        zip = provider.zip_code.as_deref().unwrap_or(""),
    );

    EmailDraft {
        id: Uuid::new_v4(),
        provider_id: provider.id,
        subject,
        body,
        recipient_email: provider.email.clone(),
        status: "draft".to_string(),
        created_at: Utc::now(),
    }
}
