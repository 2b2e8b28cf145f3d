use super::super::domain::BusinessProfile;
use super::config::AssessmentConfig;
use serde::{Deserialize, Serialize};

/// Tier classification derived from the overall score. Drives approval
/// probability wording and the loan ceiling multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

pub(crate) fn risk_level(score: u16, config: &AssessmentConfig) -> RiskLevel {
    if score >= config.low_risk_threshold {
        RiskLevel::Low
    } else if score >= config.medium_risk_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

// Approval probability is a step function of the score, not a per-product
// figure. The breakpoints differ from the tier thresholds on purpose.
pub(crate) fn approval_probability(score: u16) -> f64 {
    if score >= 720 {
        0.92
    } else if score >= 680 {
        0.78
    } else if score >= 640 {
        0.65
    } else {
        0.45
    }
}

pub(crate) fn max_loan_amount(
    level: RiskLevel,
    profile: &BusinessProfile,
    config: &AssessmentConfig,
) -> u64 {
    let multiplier = match level {
        RiskLevel::Low => config.low_risk_loan_multiplier,
        RiskLevel::Medium => config.medium_risk_loan_multiplier,
        RiskLevel::High => config.high_risk_loan_multiplier,
    };

    (f64::from(profile.monthly_revenue) * multiplier).round() as u64
}

pub(crate) fn interest_rate_adjustment(profile: &BusinessProfile, config: &AssessmentConfig) -> i8 {
    if profile.has_visa_merchant() {
        config.visa_rate_discount
    } else {
        0
    }
}
