use super::domain::{BusinessProfile, Industry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// A recommended data-collection or behavior-change action. List position is
/// the display priority; completion is tracked on the session, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementTask {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub impact: Impact,
}

fn task(title: &str, description: &str, difficulty: Difficulty, impact: Impact) -> ImprovementTask {
    ImprovementTask {
        title: title.to_string(),
        description: description.to_string(),
        difficulty,
        impact,
    }
}

/// Build the prioritized plan for a profile. Deterministic and stable:
/// identical profiles yield identical lists, always 3 or 4 entries.
pub fn generate(profile: &BusinessProfile) -> Vec<ImprovementTask> {
    let mut tasks = vec![
        task(
            "Digital Transaction History",
            "Start using digital payment platforms and keep records of all transactions",
            Difficulty::Easy,
            Impact::High,
        ),
        task(
            "Social Media Presence",
            "Create business profiles on social platforms to establish online presence",
            Difficulty::Easy,
            Impact::Medium,
        ),
    ];

    match profile.industry {
        Industry::Retail => tasks.push(task(
            "Inventory Management",
            "Use a digital inventory system to track products and sales",
            Difficulty::Medium,
            Impact::High,
        )),
        Industry::Services => tasks.push(task(
            "Customer Reviews",
            "Collect and document customer testimonials and reviews",
            Difficulty::Easy,
            Impact::High,
        )),
        _ => {}
    }

    if profile.monthly_revenue < 1000 {
        tasks.push(task(
            "Revenue Tracking",
            "Keep detailed daily sales records even if handwritten",
            Difficulty::Easy,
            Impact::High,
        ));
    } else {
        tasks.push(task(
            "Financial Software",
            "Invest in simple accounting software to track income and expenses",
            Difficulty::Medium,
            Impact::High,
        ));
    }

    tasks
}
