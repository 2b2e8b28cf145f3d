use super::super::domain::{BusinessProfile, Industry};
use super::{ScoreBreakdown, ScoreComponent, ScoreFactor};

const EXPERIENCE_POINTS_PER_YEAR: u16 = 15;
const EXPERIENCE_CAP: u16 = 60;

const VISA_BASE_BONUS: u16 = 80;
const VISA_TENURE_BONUS: u16 = 20;
const VISA_LOW_RISK_BONUS: u16 = 15;
const VISA_LOW_RISK_CUTOFF: f32 = 0.15;

const MOBILE_MONEY_BONUS: u16 = 15;
const FACEBOOK_BONUS: u16 = 10;
const INSTAGRAM_BONUS: u16 = 10;
const COMMUNITY_REFERENCE_BONUS: u16 = 20;

pub(crate) fn score_profile(
    profile: &BusinessProfile,
    current_year: i32,
) -> (Vec<ScoreComponent>, ScoreBreakdown) {
    let mut components = Vec::new();

    let years_active = (current_year - profile.year_established).max(0) as u16;
    let experience = (years_active * EXPERIENCE_POINTS_PER_YEAR).min(EXPERIENCE_CAP);
    components.push(ScoreComponent {
        factor: ScoreFactor::Experience,
        points: experience,
        notes: format!("{years_active} year(s) in operation"),
    });

    let revenue = revenue_bonus(profile.monthly_revenue);
    components.push(ScoreComponent {
        factor: ScoreFactor::Revenue,
        points: revenue,
        notes: format!("monthly revenue {}", profile.monthly_revenue),
    });

    let industry = industry_bonus(profile.industry);
    components.push(ScoreComponent {
        factor: ScoreFactor::Industry,
        points: industry,
        notes: format!("industry {}", profile.industry.label()),
    });

    let mut visa_data = 0u16;
    if let Some(payload) = &profile.visa {
        visa_data += VISA_BASE_BONUS;
        let mut detail = vec!["merchant account on file".to_string()];
        if payload.account_age_years > 1 {
            visa_data += VISA_TENURE_BONUS;
            detail.push(format!("{} year(s) of account history", payload.account_age_years));
        }
        if payload.risk_score < VISA_LOW_RISK_CUTOFF {
            visa_data += VISA_LOW_RISK_BONUS;
            detail.push(format!("merchant risk score {:.2}", payload.risk_score));
        }
        components.push(ScoreComponent {
            factor: ScoreFactor::VisaHistory,
            points: visa_data,
            notes: detail.join("; "),
        });
    }

    let mut alternative_data = 0u16;
    let signals = &profile.signals;
    if signals.mobile_money_phone.is_some() {
        alternative_data += MOBILE_MONEY_BONUS;
        components.push(ScoreComponent {
            factor: ScoreFactor::AlternativeData,
            points: MOBILE_MONEY_BONUS,
            notes: "mobile money history".to_string(),
        });
    }
    if signals.facebook_page.is_some() {
        alternative_data += FACEBOOK_BONUS;
        components.push(ScoreComponent {
            factor: ScoreFactor::AlternativeData,
            points: FACEBOOK_BONUS,
            notes: "Facebook business page".to_string(),
        });
    }
    if signals.instagram_account.is_some() {
        alternative_data += INSTAGRAM_BONUS;
        components.push(ScoreComponent {
            factor: ScoreFactor::AlternativeData,
            points: INSTAGRAM_BONUS,
            notes: "Instagram business account".to_string(),
        });
    }
    if signals.community_references.is_some() {
        alternative_data += COMMUNITY_REFERENCE_BONUS;
        components.push(ScoreComponent {
            factor: ScoreFactor::AlternativeData,
            points: COMMUNITY_REFERENCE_BONUS,
            notes: "community references provided".to_string(),
        });
    }

    let breakdown = ScoreBreakdown {
        business_fundamentals: experience + revenue + industry,
        visa_data,
        alternative_data,
    };

    (components, breakdown)
}

fn revenue_bonus(monthly_revenue: u32) -> u16 {
    if monthly_revenue > 5000 {
        40
    } else if monthly_revenue > 2000 {
        25
    } else if monthly_revenue > 1000 {
        15
    } else {
        0
    }
}

fn industry_bonus(industry: Industry) -> u16 {
    match industry {
        Industry::Technology => 30,
        Industry::Crafts => 25,
        Industry::Food => 20,
        Industry::Retail => 15,
        Industry::Services => 10,
        Industry::Agriculture => 5,
        Industry::Manufacturing | Industry::Other => 0,
    }
}
