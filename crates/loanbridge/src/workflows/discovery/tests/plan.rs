use super::common::*;
use crate::workflows::discovery::domain::Industry;
use crate::workflows::discovery::plan;

#[test]
fn base_plan_has_three_tasks() {
    let tasks = plan::generate(&profile(Industry::Food, "3000"));

    let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Digital Transaction History",
            "Social Media Presence",
            "Financial Software",
        ]
    );
}

#[test]
fn low_revenue_agriculture_plan_has_three_tasks_and_no_industry_extra() {
    let tasks = plan::generate(&profile(Industry::Agriculture, "500"));

    let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Digital Transaction History",
            "Social Media Presence",
            "Revenue Tracking",
        ]
    );
}

#[test]
fn retail_gets_an_inventory_task() {
    let tasks = plan::generate(&profile(Industry::Retail, "3000"));

    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[2].title, "Inventory Management");
}

#[test]
fn services_get_a_customer_reviews_task() {
    let tasks = plan::generate(&profile(Industry::Services, "3000"));

    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[2].title, "Customer Reviews");
}

#[test]
fn low_revenue_swaps_software_for_revenue_tracking() {
    let tasks = plan::generate(&profile(Industry::Food, "800"));

    assert_eq!(tasks.last().map(|task| task.title.as_str()), Some("Revenue Tracking"));
    assert!(tasks.iter().all(|task| task.title != "Financial Software"));
}

#[test]
fn revenue_boundary_keeps_the_software_task() {
    let tasks = plan::generate(&profile(Industry::Food, "1000"));

    assert_eq!(tasks.last().map(|task| task.title.as_str()), Some("Financial Software"));
}

#[test]
fn identical_profiles_get_identical_plans() {
    let first = plan::generate(&profile(Industry::Retail, "700"));
    let second = plan::generate(&profile(Industry::Retail, "700"));

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn plan_length_is_always_three_or_four() {
    for industry in [
        Industry::Retail,
        Industry::Food,
        Industry::Services,
        Industry::Manufacturing,
        Industry::Agriculture,
        Industry::Crafts,
        Industry::Technology,
        Industry::Other,
    ] {
        for revenue in ["0", "999", "1000", "9000"] {
            let len = plan::generate(&profile(industry, revenue)).len();
            assert!((3..=4).contains(&len), "{industry:?}/{revenue} produced {len} tasks");
        }
    }
}
