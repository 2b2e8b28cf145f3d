use super::super::domain::{BusinessProfile, Industry};
use serde::{Deserialize, Serialize};

const COMMUNITY_SOCIAL_BONUS: u8 = 10;
const COMMUNITY_GOVERNANCE_BONUS: u8 = 5;

/// Composite Environmental/Social/Governance rating, industry-indexed with
/// community-reference adjustments. Independent of the score and revenue
/// projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsgScores {
    pub environmental: u8,
    pub social: u8,
    pub governance: u8,
    pub overall: u8,
}

pub(crate) fn esg_scores(profile: &BusinessProfile) -> EsgScores {
    let (environmental, mut social, mut governance) = industry_baseline(profile.industry);

    if profile.signals.community_references.is_some() {
        social = social.saturating_add(COMMUNITY_SOCIAL_BONUS).min(100);
        governance = governance.saturating_add(COMMUNITY_GOVERNANCE_BONUS).min(100);
    }

    let overall = ((u16::from(environmental) + u16::from(social) + u16::from(governance)) as f64
        / 3.0)
        .round() as u8;

    EsgScores {
        environmental,
        social,
        governance,
        overall,
    }
}

fn industry_baseline(industry: Industry) -> (u8, u8, u8) {
    match industry {
        Industry::Food => (75, 85, 70),
        Industry::Crafts => (85, 90, 65),
        Industry::Agriculture => (90, 80, 60),
        Industry::Retail => (65, 75, 80),
        Industry::Services => (70, 85, 75),
        Industry::Manufacturing => (60, 70, 70),
        Industry::Technology => (75, 80, 85),
        Industry::Other => (70, 75, 70),
    }
}
