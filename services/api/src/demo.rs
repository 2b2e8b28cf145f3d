use crate::infra::{default_assessment_config, parse_industry, InMemorySessionStore};
use chrono::{Datelike, Local};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

use loanbridge::error::AppError;
use loanbridge::workflows::discovery::{
    AlternativeSignals, ConsentGuard, DiscoveryServiceError, Industry, LoanDiscoveryService,
    PrivacyConsent, ProfileSubmission, RiskEngine, VisaLookupSimulator,
};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Business name used in the printed report
    #[arg(long, default_value = "Sample Business")]
    pub(crate) name: String,
    /// Industry sector (retail, food, services, manufacturing, agriculture,
    /// crafts, technology, other)
    #[arg(long, value_parser = parse_industry)]
    pub(crate) industry: Industry,
    /// Average monthly revenue in dollars
    #[arg(long, default_value_t = 0)]
    pub(crate) monthly_revenue: u32,
    /// Year the business was established (defaults to the current year)
    #[arg(long)]
    pub(crate) year_established: Option<i32>,
    /// Mobile money account phone number, if any
    #[arg(long)]
    pub(crate) mobile_money: Option<String>,
    /// Facebook business page, if any
    #[arg(long)]
    pub(crate) facebook: Option<String>,
    /// Instagram business account, if any
    #[arg(long)]
    pub(crate) instagram: Option<String>,
    /// Community reference description, if any
    #[arg(long)]
    pub(crate) community_reference: Option<String>,
    /// Also run the merchant-account check and include its bonus
    #[arg(long)]
    pub(crate) with_visa_check: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Industry sector for the demo business (defaults to food)
    #[arg(long, value_parser = parse_industry)]
    pub(crate) industry: Option<Industry>,
    /// Monthly revenue for the demo business
    #[arg(long, default_value_t = 3000)]
    pub(crate) monthly_revenue: u32,
    /// Skip the merchant lookup portion of the demo
    #[arg(long)]
    pub(crate) skip_lookup: bool,
}

fn submission_from(
    name: String,
    industry: Industry,
    monthly_revenue: u32,
    year_established: Option<i32>,
    signals: AlternativeSignals,
) -> ProfileSubmission {
    ProfileSubmission {
        name,
        owner_name: "Demo Owner".to_string(),
        location: "Dakar, Senegal".to_string(),
        industry,
        year_established: year_established.map(|year| year.to_string()),
        monthly_revenue: Some(monthly_revenue.to_string()),
        registration_number: None,
        employee_count: None,
        signals,
        consent: PrivacyConsent {
            data_processing: true,
            visa_lookup: true,
            alternative_data: true,
            data_sharing: false,
        },
    }
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        name,
        industry,
        monthly_revenue,
        year_established,
        mobile_money,
        facebook,
        instagram,
        community_reference,
        with_visa_check,
    } = args;

    let current_year = Local::now().year();
    let signals = AlternativeSignals {
        mobile_money_phone: mobile_money,
        whatsapp_business: None,
        facebook_page: facebook,
        instagram_account: instagram,
        community_references: community_reference,
    };

    let guard = ConsentGuard;
    let mut profile = guard
        .profile_from_submission(
            submission_from(name, industry, monthly_revenue, year_established, signals),
            current_year,
        )
        .map_err(DiscoveryServiceError::Consent)?;

    if with_visa_check {
        profile.visa = VisaLookupSimulator::evaluate(&profile, current_year);
    }

    let engine = RiskEngine::new(default_assessment_config());
    let assessment = engine.assess(&profile, current_year);

    println!(
        "Assessment for {} ({})",
        profile.name,
        profile.industry.label()
    );
    println!(
        "- Overall score {} | {} risk | {:.0}% approval probability",
        assessment.overall_score,
        assessment.risk_level.label(),
        assessment.approval_probability * 100.0
    );
    println!(
        "- Maximum recommended loan ${} | rate adjustment {} pts",
        assessment.max_loan_amount, assessment.interest_rate_adjustment
    );
    if with_visa_check {
        match &profile.visa {
            Some(payload) => println!(
                "- Merchant account {} found (category {}, {} yr history)",
                payload.merchant_id, payload.merchant_category, payload.account_age_years
            ),
            None => println!("- No merchant account found"),
        }
    }
    println!("Score components:");
    for component in &assessment.components {
        println!(
            "  - {:?}: +{} ({})",
            component.factor, component.points, component.notes
        );
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        industry,
        monthly_revenue,
        skip_lookup,
    } = args;

    let industry = industry.unwrap_or(Industry::Food);
    let current_year = Local::now().year();

    println!("Loan discovery demo");

    let store = Arc::new(InMemorySessionStore::default());
    let service = LoanDiscoveryService::new(
        store,
        default_assessment_config(),
        VisaLookupSimulator::new(Duration::from_millis(400)),
    );

    let submission = submission_from(
        "Amara's Kitchen".to_string(),
        industry,
        monthly_revenue,
        Some(current_year - 4),
        AlternativeSignals {
            mobile_money_phone: Some("+221771234567".to_string()),
            whatsapp_business: None,
            facebook_page: Some("facebook.com/amaraskitchen".to_string()),
            instagram_account: None,
            community_references: Some("Neighborhood traders association".to_string()),
        },
    );

    let record = match service.submit(submission, current_year) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    let id = record.profile.profile_id.clone();
    println!(
        "- Opened session {} for {} ({})",
        id.0,
        record.profile.name,
        record.profile.industry.label()
    );

    if !skip_lookup {
        match service.visa_lookup(&id, current_year).await {
            Ok(outcome) if outcome.found => {
                let payload = outcome.visa.expect("found outcome carries a payload");
                println!(
                    "- Merchant lookup: account {} (category {}, ${} monthly volume)",
                    payload.merchant_id, payload.merchant_category, payload.monthly_volume
                );
            }
            Ok(_) => println!("- Merchant lookup: no account found"),
            Err(err) => println!("- Merchant lookup unavailable: {err}"),
        }
    }

    let assessment = service.assess(&id, current_year)?;
    println!(
        "- Risk assessment: score {} | {} risk | {:.0}% approval probability",
        assessment.overall_score,
        assessment.risk_level.label(),
        assessment.approval_probability * 100.0
    );
    println!("  Score breakdown:");
    println!(
        "    - Business fundamentals: +{}",
        assessment.breakdown.business_fundamentals
    );
    println!("    - Merchant data: +{}", assessment.breakdown.visa_data);
    println!(
        "    - Alternative data: +{}",
        assessment.breakdown.alternative_data
    );

    let offers = service.offers(&id, current_year)?;
    println!("- Adjusted loan offers:");
    for offer in &offers {
        println!(
            "    - {}: {} at {} over {}{}",
            offer.name,
            offer.amount,
            offer.interest_rate,
            offer.term,
            if offer.visa_discount {
                " (merchant discount applied)"
            } else {
                ""
            }
        );
    }

    let selected = &offers[0].product_id;
    service.select_product(&id, selected)?;
    println!("- Selected product {selected}");

    let plan = service.improvement_plan(&id)?;
    println!("- Improvement plan ({} tasks):", plan.len());
    for task in &plan {
        println!(
            "    - {} [{:?} difficulty, {:?} impact]: {}",
            task.title, task.difficulty, task.impact, task.description
        );
    }
    service.set_task_completion(&id, &plan[0].title, true)?;
    println!("- Marked '{}' complete", plan[0].title);

    let projections = service.projections(&id, current_year)?;
    println!(
        "- Projected score: {} now -> {} in 12 months",
        projections.current_score, projections.projected_score.twelve_months
    );
    println!(
        "- Projected revenue: ${} now -> ${} in 24 months",
        projections.business_growth.current, projections.business_growth.twenty_four_months
    );
    println!(
        "- ESG profile: E {} / S {} / G {} (overall {})",
        projections.esg.environmental,
        projections.esg.social,
        projections.esg.governance,
        projections.esg.overall
    );

    let status = service.get(&id)?.status_view();
    match serde_json::to_string_pretty(&status) {
        Ok(json) => println!("- Public status payload:\n{json}"),
        Err(err) => println!("- Public status payload unavailable: {err}"),
    }

    Ok(())
}
