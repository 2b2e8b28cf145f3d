use std::collections::HashSet;
use std::time::Duration;

use super::common::*;
use crate::workflows::discovery::domain::Industry;
use crate::workflows::discovery::VisaLookupSimulator;

#[test]
fn food_business_above_revenue_floor_has_merchant_account() {
    let profile = profile(Industry::Food, "3000");

    let payload = VisaLookupSimulator::evaluate(&profile, TEST_YEAR)
        .expect("revenue above the floor resolves a merchant account");

    assert_eq!(payload.monthly_volume, 2100);
    assert_eq!(payload.transaction_count, 120);
    assert_eq!(payload.merchant_category, "5812");
    assert_eq!(payload.account_age_years, 3);
    assert!((payload.risk_score - 0.12).abs() < f32::EPSILON);
    assert!(payload.merchant_id.starts_with("VM-"));
}

#[test]
fn low_revenue_service_business_has_no_merchant_account() {
    let profile = profile(Industry::Services, "400");

    assert!(VisaLookupSimulator::evaluate(&profile, TEST_YEAR).is_none());
}

#[test]
fn card_heavy_sectors_resolve_even_below_the_revenue_floor() {
    let retail = profile(Industry::Retail, "400");

    let payload = VisaLookupSimulator::evaluate(&retail, TEST_YEAR)
        .expect("retail resolves regardless of revenue");

    assert_eq!(payload.merchant_category, "5999");
    assert_eq!(payload.monthly_volume, 280);
    assert_eq!(payload.transaction_count, 16);
}

#[test]
fn low_revenue_agriculture_profile_is_not_found() {
    let profile = profile(Industry::Agriculture, "500");

    assert!(VisaLookupSimulator::evaluate(&profile, TEST_YEAR).is_none());
}

#[test]
fn revenue_exactly_at_floor_is_not_found() {
    let profile = profile(Industry::Services, "2000");

    assert!(VisaLookupSimulator::evaluate(&profile, TEST_YEAR).is_none());
}

#[test]
fn account_age_is_clamped_to_three_years() {
    let mut profile = profile(Industry::Food, "3000");
    profile.year_established = 2010;

    let payload = VisaLookupSimulator::evaluate(&profile, TEST_YEAR).expect("merchant found");
    assert_eq!(payload.account_age_years, 3);

    profile.year_established = TEST_YEAR;
    let payload = VisaLookupSimulator::evaluate(&profile, TEST_YEAR).expect("merchant found");
    assert_eq!(payload.account_age_years, 0);
}

#[test]
fn merchant_ids_are_unique_per_evaluation() {
    let profile = profile(Industry::Food, "3000");

    let ids: HashSet<String> = (0..8)
        .map(|_| {
            VisaLookupSimulator::evaluate(&profile, TEST_YEAR)
                .expect("merchant found")
                .merchant_id
        })
        .collect();

    assert_eq!(ids.len(), 8);
}

#[tokio::test]
async fn lookup_resolves_after_the_latency_window() {
    let simulator = VisaLookupSimulator::new(Duration::ZERO);
    let profile = profile(Industry::Food, "3000");

    let payload = simulator.lookup(&profile, TEST_YEAR).await;

    assert!(payload.is_some());
}
