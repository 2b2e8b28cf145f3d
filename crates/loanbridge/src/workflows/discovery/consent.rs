use super::domain::{
    AlternativeSignals, BusinessProfile, PrivacyConsent, ProfileId, ProfileSubmission,
};

/// Validation errors raised by the consent guard.
#[derive(Debug, thiserror::Error)]
pub enum ConsentViolation {
    #[error("data-processing consent is required before a profile can be scored")]
    DataProcessingNotGranted,
    #[error("visa merchant lookup was not authorized for this profile")]
    VisaLookupNotAuthorized,
}

const MIN_ESTABLISHED_YEAR: i32 = 1900;

/// Guard responsible for producing `BusinessProfile` instances.
///
/// All numeric intake fields are free text; the guard parses them with safe
/// fallbacks (0 for revenue, the current year for establishment) so scoring
/// downstream is total and never fails on malformed input.
#[derive(Debug, Clone, Default)]
pub struct ConsentGuard;

impl ConsentGuard {
    /// Convert an inbound submission into a sanitized business profile.
    pub fn profile_from_submission(
        &self,
        submission: ProfileSubmission,
        current_year: i32,
    ) -> Result<BusinessProfile, ConsentViolation> {
        if !submission.consent.data_processing {
            return Err(ConsentViolation::DataProcessingNotGranted);
        }

        let year_established = parse_year(submission.year_established.as_deref(), current_year);
        let monthly_revenue = parse_amount(submission.monthly_revenue.as_deref());
        let employee_count = submission
            .employee_count
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok());

        let signals = if submission.consent.alternative_data {
            normalize_signals(submission.signals)
        } else {
            // Without consent the volunteered signals are dropped entirely
            // rather than silently contributing bonuses.
            AlternativeSignals::default()
        };

        Ok(BusinessProfile {
            profile_id: ProfileId("pending".to_string()),
            name: submission.name.trim().to_string(),
            owner_name: submission.owner_name.trim().to_string(),
            location: submission.location.trim().to_string(),
            industry: submission.industry,
            year_established,
            monthly_revenue,
            registration_number: normalize(submission.registration_number),
            employee_count,
            signals,
            visa: None,
            consent: submission.consent,
        })
    }

    /// Gate for the mocked merchant lookup.
    pub fn authorize_visa_lookup(&self, consent: &PrivacyConsent) -> Result<(), ConsentViolation> {
        if consent.visa_lookup {
            Ok(())
        } else {
            Err(ConsentViolation::VisaLookupNotAuthorized)
        }
    }
}

fn parse_year(raw: Option<&str>, current_year: i32) -> i32 {
    raw.and_then(|value| value.trim().parse::<i32>().ok())
        .filter(|year| (MIN_ESTABLISHED_YEAR..=current_year).contains(year))
        .unwrap_or(current_year)
}

fn parse_amount(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn normalize_signals(signals: AlternativeSignals) -> AlternativeSignals {
    AlternativeSignals {
        mobile_money_phone: normalize(signals.mobile_money_phone),
        whatsapp_business: normalize(signals.whatsapp_business),
        facebook_page: normalize(signals.facebook_page),
        instagram_account: normalize(signals.instagram_account),
        community_references: normalize(signals.community_references),
    }
}
