use serde::{Deserialize, Serialize};

/// Policy dials for the additive scoring model. Defaults carry the
/// production rubric; tests narrow or widen individual dials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Every profile starts here before bonuses are added.
    pub base_score: u16,
    /// Hard ceiling of the score scale.
    pub score_ceiling: u16,
    /// Scores at or above this are low risk.
    pub low_risk_threshold: u16,
    /// Scores at or above this (but below low) are medium risk.
    pub medium_risk_threshold: u16,
    /// Loan ceiling as a multiple of monthly revenue, per risk tier.
    pub low_risk_loan_multiplier: f64,
    pub medium_risk_loan_multiplier: f64,
    pub high_risk_loan_multiplier: f64,
    /// Percentage-point rate discount when a merchant account is attached.
    pub visa_rate_discount: i8,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            base_score: 600,
            score_ceiling: 850,
            low_risk_threshold: 720,
            medium_risk_threshold: 650,
            low_risk_loan_multiplier: 6.0,
            medium_risk_loan_multiplier: 4.0,
            high_risk_loan_multiplier: 2.5,
            visa_rate_discount: -3,
        }
    }
}
