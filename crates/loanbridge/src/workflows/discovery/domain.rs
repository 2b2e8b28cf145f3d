use serde::{Deserialize, Serialize};

/// Identifier wrapper for discovery sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// Industry sectors offered by the intake form. Every scoring table in the
/// crate is keyed on this enum so a new variant fails to compile until each
/// table handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    Retail,
    Food,
    Services,
    Manufacturing,
    Agriculture,
    Crafts,
    Technology,
    Other,
}

impl Industry {
    pub const fn label(self) -> &'static str {
        match self {
            Industry::Retail => "Retail",
            Industry::Food => "Food & Beverage",
            Industry::Services => "Services",
            Industry::Manufacturing => "Manufacturing",
            Industry::Agriculture => "Agriculture",
            Industry::Crafts => "Crafts & Artisanal",
            Industry::Technology => "Technology",
            Industry::Other => "Other",
        }
    }
}

/// Raw intake payload as collected by the multi-step form. Numeric fields
/// arrive as free text and are parsed defensively by the consent guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub name: String,
    pub owner_name: String,
    pub location: String,
    pub industry: Industry,
    #[serde(default)]
    pub year_established: Option<String>,
    #[serde(default)]
    pub monthly_revenue: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub employee_count: Option<String>,
    #[serde(default)]
    pub signals: AlternativeSignals,
    pub consent: PrivacyConsent,
}

/// Optional non-traditional data points volunteered by the owner. Each one
/// contributes an independent scoring bonus when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeSignals {
    #[serde(default)]
    pub mobile_money_phone: Option<String>,
    #[serde(default)]
    pub whatsapp_business: Option<String>,
    #[serde(default)]
    pub facebook_page: Option<String>,
    #[serde(default)]
    pub instagram_account: Option<String>,
    #[serde(default)]
    pub community_references: Option<String>,
}

impl AlternativeSignals {
    pub fn is_empty(&self) -> bool {
        self.mobile_money_phone.is_none()
            && self.whatsapp_business.is_none()
            && self.facebook_page.is_none()
            && self.instagram_account.is_none()
            && self.community_references.is_none()
    }
}

/// Consent flags collected before any derived processing runs. Only
/// `data_processing` is mandatory; the rest gate individual data sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyConsent {
    pub data_processing: bool,
    #[serde(default)]
    pub visa_lookup: bool,
    #[serde(default)]
    pub alternative_data: bool,
    #[serde(default)]
    pub data_sharing: bool,
}

/// The sanitized canonical record every derivation consumes. Built only by
/// the consent guard, so numeric fields are already parsed and alternative
/// signals already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub profile_id: ProfileId,
    pub name: String,
    pub owner_name: String,
    pub location: String,
    pub industry: Industry,
    pub year_established: i32,
    pub monthly_revenue: u32,
    pub registration_number: Option<String>,
    pub employee_count: Option<u32>,
    pub signals: AlternativeSignals,
    pub visa: Option<VisaPayload>,
    pub consent: PrivacyConsent,
}

impl BusinessProfile {
    /// A merchant account is "held" exactly when a lookup payload is
    /// attached, so the flag can never disagree with the data.
    pub fn has_visa_merchant(&self) -> bool {
        self.visa.is_some()
    }
}

/// Synthetic merchant-account snapshot produced by the lookup simulator.
/// Immutable once attached to a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaPayload {
    pub merchant_id: String,
    pub monthly_volume: u32,
    pub transaction_count: u32,
    pub merchant_category: String,
    pub account_age_years: u8,
    pub risk_score: f32,
}

/// How far along a discovery session is, for status views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscoveryStage {
    ProfileCaptured,
    Assessed,
    ProductSelected,
}

impl DiscoveryStage {
    pub const fn label(self) -> &'static str {
        match self {
            DiscoveryStage::ProfileCaptured => "profile_captured",
            DiscoveryStage::Assessed => "assessed",
            DiscoveryStage::ProductSelected => "product_selected",
        }
    }
}
