use super::domain::{BusinessProfile, Industry, VisaPayload};
use std::time::Duration;
use uuid::Uuid;

// Placeholder heuristic for the demo environment: there is no VisaNet call
// behind this module. A merchant account "exists" for businesses clearing a
// revenue bar or operating in card-heavy sectors, and the payload is
// synthesized from the profile itself.
const FOUND_REVENUE_FLOOR: u32 = 2000;
const VOLUME_SHARE: f64 = 0.7;
const AVERAGE_TICKET: u32 = 25;
const MAX_ACCOUNT_AGE_YEARS: i32 = 3;
const MOCK_RISK_SCORE: f32 = 0.12;

const MCC_EATING_PLACES: &str = "5812";
const MCC_MISC_RETAIL: &str = "5999";

/// Simulated merchant-account lookup with an artificial latency standing in
/// for the network round trip. The decision itself is the pure
/// [`VisaLookupSimulator::evaluate`]; `lookup` only adds the delay.
pub struct VisaLookupSimulator {
    latency: Duration,
}

impl VisaLookupSimulator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Resolve a lookup after the configured delay. Callers holding mutable
    /// session state should prefer `simulate_latency` followed by a fresh
    /// `evaluate` so a profile edited mid-flight can never receive a stale
    /// payload.
    pub async fn lookup(&self, profile: &BusinessProfile, current_year: i32) -> Option<VisaPayload> {
        self.simulate_latency().await;
        Self::evaluate(profile, current_year)
    }

    /// The artificial latency window on its own.
    pub async fn simulate_latency(&self) {
        tokio::time::sleep(self.latency).await;
    }

    /// Pure decision rule plus payload synthesis.
    pub fn evaluate(profile: &BusinessProfile, current_year: i32) -> Option<VisaPayload> {
        let card_heavy_sector = matches!(profile.industry, Industry::Food | Industry::Retail);
        if profile.monthly_revenue <= FOUND_REVENUE_FLOOR && !card_heavy_sector {
            return None;
        }

        let account_age_years = (current_year - profile.year_established)
            .clamp(0, MAX_ACCOUNT_AGE_YEARS) as u8;

        let merchant_category = if profile.industry == Industry::Food {
            MCC_EATING_PLACES
        } else {
            MCC_MISC_RETAIL
        };

        Some(VisaPayload {
            merchant_id: format!("VM-{}", Uuid::new_v4().simple()),
            monthly_volume: (f64::from(profile.monthly_revenue) * VOLUME_SHARE).floor() as u32,
            transaction_count: profile.monthly_revenue / AVERAGE_TICKET,
            merchant_category: merchant_category.to_string(),
            account_age_years,
            risk_score: MOCK_RISK_SCORE,
        })
    }
}
