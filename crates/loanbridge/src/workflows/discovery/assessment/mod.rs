mod config;
mod policy;
mod rules;

pub use config::AssessmentConfig;
pub use policy::RiskLevel;

use super::domain::{BusinessProfile, ProfileId};
use serde::{Deserialize, Serialize};

/// Stateless engine applying the additive point model to a profile.
///
/// `assess` is a pure function of `(profile, current_year)`: no randomness,
/// no clock reads. Hosts pass the year themselves so the same snapshot always
/// scores identically.
pub struct RiskEngine {
    config: AssessmentConfig,
}

impl RiskEngine {
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, profile: &BusinessProfile, current_year: i32) -> RiskAssessment {
        let (components, breakdown) = rules::score_profile(profile, current_year);

        let raw = u32::from(self.config.base_score) + u32::from(breakdown.total());
        // All bonuses are non-negative, so the base doubles as the floor.
        let overall_score = raw.min(u32::from(self.config.score_ceiling)) as u16;

        let risk_level = policy::risk_level(overall_score, &self.config);
        let approval_probability = policy::approval_probability(overall_score);
        let max_loan_amount = policy::max_loan_amount(risk_level, profile, &self.config);
        let interest_rate_adjustment = policy::interest_rate_adjustment(profile, &self.config);

        RiskAssessment {
            profile_id: profile.profile_id.clone(),
            overall_score,
            breakdown,
            components,
            risk_level,
            approval_probability,
            max_loan_amount,
            interest_rate_adjustment,
        }
    }
}

/// Factors permitted in the scoring rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFactor {
    Experience,
    Revenue,
    Industry,
    VisaHistory,
    AlternativeData,
}

/// Discrete contribution to an assessment, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u16,
    pub notes: String,
}

/// Aggregated bonus totals shown in the score-breakdown view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub business_fundamentals: u16,
    pub visa_data: u16,
    pub alternative_data: u16,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u16 {
        self.business_fundamentals + self.visa_data + self.alternative_data
    }
}

/// Assessment output describing the score, its composition, and the loan
/// terms it unlocks. Replaced wholesale whenever the profile changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub profile_id: ProfileId,
    pub overall_score: u16,
    pub breakdown: ScoreBreakdown,
    pub components: Vec<ScoreComponent>,
    pub risk_level: RiskLevel,
    pub approval_probability: f64,
    pub max_loan_amount: u64,
    pub interest_rate_adjustment: i8,
}
