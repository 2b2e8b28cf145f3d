mod esg;

pub use esg::EsgScores;

use super::assessment::RiskAssessment;
use super::domain::BusinessProfile;
use serde::{Deserialize, Serialize};

// Score growth at 3/6/12 months. Non-Visa profiles are granted the larger
// deltas: the model assumes they have more catch-up headroom once they start
// collecting data.
const SCORE_DELTAS_WITH_VISA: [u16; 3] = [25, 45, 70];
const SCORE_DELTAS_WITHOUT_VISA: [u16; 3] = [35, 65, 95];
const SCORE_CEILING: u16 = 850;

const SUCCESS_INCREMENTS: [f64; 3] = [0.15, 0.25, 0.30];
const SUCCESS_CEILINGS: [f64; 3] = [0.95, 0.98, 0.99];

const REVENUE_MULTIPLIERS: [f64; 4] = [1.15, 1.3, 1.6, 2.1];

/// Projected credit-style score at the standard horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreProjection {
    pub three_months: u16,
    pub six_months: u16,
    pub twelve_months: u16,
}

/// Approval-probability trajectory relative to the current baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuccessProjection {
    pub current: f64,
    pub three_months: f64,
    pub six_months: f64,
    pub twelve_months: f64,
}

/// Revenue trajectory, including the long 24-month horizon shown on the
/// growth dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueProjection {
    pub current: u64,
    pub three_months: u64,
    pub six_months: u64,
    pub twelve_months: u64,
    pub twenty_four_months: u64,
}

/// Everything the improvement-plan dashboards render. Derived fresh on each
/// request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBundle {
    pub current_score: u16,
    pub projected_score: ScoreProjection,
    pub loan_success_probability: SuccessProjection,
    pub business_growth: RevenueProjection,
    pub esg: EsgScores,
}

/// Project trajectories from the current assessment and profile.
pub fn project(assessment: &RiskAssessment, profile: &BusinessProfile) -> ProjectionBundle {
    let deltas = if profile.has_visa_merchant() {
        SCORE_DELTAS_WITH_VISA
    } else {
        SCORE_DELTAS_WITHOUT_VISA
    };

    let score_at = |delta: u16| (assessment.overall_score + delta).min(SCORE_CEILING);

    let baseline = assessment.approval_probability;
    let success_at =
        |index: usize| (baseline + SUCCESS_INCREMENTS[index]).min(SUCCESS_CEILINGS[index]);

    let revenue_at =
        |multiplier: f64| (f64::from(profile.monthly_revenue) * multiplier).round() as u64;

    ProjectionBundle {
        current_score: assessment.overall_score,
        projected_score: ScoreProjection {
            three_months: score_at(deltas[0]),
            six_months: score_at(deltas[1]),
            twelve_months: score_at(deltas[2]),
        },
        loan_success_probability: SuccessProjection {
            current: baseline,
            three_months: success_at(0),
            six_months: success_at(1),
            twelve_months: success_at(2),
        },
        business_growth: RevenueProjection {
            current: u64::from(profile.monthly_revenue),
            three_months: revenue_at(REVENUE_MULTIPLIERS[0]),
            six_months: revenue_at(REVENUE_MULTIPLIERS[1]),
            twelve_months: revenue_at(REVENUE_MULTIPLIERS[2]),
            twenty_four_months: revenue_at(REVENUE_MULTIPLIERS[3]),
        },
        esg: esg::esg_scores(profile),
    }
}
