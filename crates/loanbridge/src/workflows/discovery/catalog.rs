use super::assessment::{RiskAssessment, RiskLevel};
use serde::{Deserialize, Serialize};

/// Floor for any displayed interest rate, however large the discount.
const MIN_INTEREST_RATE: i32 = 8;
/// Width of an adjusted rate range in percentage points.
const RATE_RANGE_SPREAD: i32 = 4;

/// A catalog entry. The catalog is read-only configuration; adjustments
/// produce transient offers and never touch these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub term: String,
    pub interest_rate: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub alternative_data_used: Vec<String>,
}

/// The three-product catalog shipped with the discovery flow.
pub fn standard_catalog() -> Vec<LoanProduct> {
    vec![
        LoanProduct {
            id: "micro-loan".to_string(),
            name: "Micro Enterprise Loan".to_string(),
            amount: "$500 - $5,000".to_string(),
            term: "6 - 12 months".to_string(),
            interest_rate: "12% - 18%".to_string(),
            description: "Small loans designed for business owners just starting their journey."
                .to_string(),
            requirements: vec![
                "Business owner identification".to_string(),
                "Basic business information".to_string(),
                "Active business for at least 3 months".to_string(),
                "Simple business plan or description".to_string(),
            ],
            alternative_data_used: vec![
                "Mobile money transaction history".to_string(),
                "Business social media presence".to_string(),
                "Customer references".to_string(),
                "Community standing".to_string(),
            ],
        },
        LoanProduct {
            id: "growth-loan".to_string(),
            name: "Business Growth Loan".to_string(),
            amount: "$5,000 - $25,000".to_string(),
            term: "1 - 3 years".to_string(),
            interest_rate: "10% - 15%".to_string(),
            description:
                "Medium-sized loans for established businesses looking to expand operations."
                    .to_string(),
            requirements: vec![
                "Business registration documents".to_string(),
                "Proof of business operations for at least 1 year".to_string(),
                "Simple financial records".to_string(),
                "Business bank account (preferred but not required)".to_string(),
            ],
            alternative_data_used: vec![
                "Digital payment platform history".to_string(),
                "Supplier references and relationships".to_string(),
                "Inventory management records".to_string(),
                "Photos of business premises".to_string(),
                "Employee records".to_string(),
            ],
        },
        LoanProduct {
            id: "expansion-loan".to_string(),
            name: "Market Expansion Loan".to_string(),
            amount: "$25,000 - $100,000".to_string(),
            term: "3 - 5 years".to_string(),
            interest_rate: "8% - 12%".to_string(),
            description:
                "Larger loans for successful businesses ready to enter new markets or add locations."
                    .to_string(),
            requirements: vec![
                "Complete business registration".to_string(),
                "Formal financial records for at least 2 years".to_string(),
                "Business plan".to_string(),
                "Business bank account".to_string(),
                "Proof of industry compliance".to_string(),
            ],
            alternative_data_used: vec![
                "Digital sales platform analytics".to_string(),
                "Business-to-business transaction records".to_string(),
                "Supply chain relationships".to_string(),
                "Tax compliance history".to_string(),
                "Environmental sustainability practices".to_string(),
            ],
        },
    ]
}

/// Transient per-assessment view of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedLoanOffer {
    pub product_id: String,
    pub name: String,
    pub amount: String,
    pub term: String,
    pub interest_rate: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub alternative_data_used: Vec<String>,
    /// Copied from the assessment: approval odds are per applicant, not per
    /// product.
    pub approval_probability: f64,
    pub risk_level: RiskLevel,
    pub visa_discount: bool,
}

/// Rewrite the catalog through the lens of one assessment.
pub fn adjust(
    catalog: &[LoanProduct],
    assessment: &RiskAssessment,
    has_visa_merchant: bool,
) -> Vec<AdjustedLoanOffer> {
    catalog
        .iter()
        .map(|product| AdjustedLoanOffer {
            product_id: product.id.clone(),
            name: product.name.clone(),
            amount: widened_amount(product, assessment.max_loan_amount),
            term: product.term.clone(),
            interest_rate: adjusted_rate(
                &product.interest_rate,
                i32::from(assessment.interest_rate_adjustment),
            ),
            description: product.description.clone(),
            requirements: product.requirements.clone(),
            alternative_data_used: product.alternative_data_used.clone(),
            approval_probability: assessment.approval_probability,
            risk_level: assessment.risk_level,
            visa_discount: has_visa_merchant,
        })
        .collect()
}

/// The displayed amount range widens once the applicant's ceiling reaches a
/// per-product threshold (inclusive).
fn widened_amount(product: &LoanProduct, max_loan_amount: u64) -> String {
    let widened = match product.id.as_str() {
        "micro-loan" if max_loan_amount >= 5_000 => Some("$500 - $8,000"),
        "growth-loan" if max_loan_amount >= 25_000 => Some("$5,000 - $35,000"),
        "expansion-loan" if max_loan_amount >= 50_000 => Some("$25,000 - $150,000"),
        _ => None,
    };

    widened
        .map(str::to_string)
        .unwrap_or_else(|| product.amount.clone())
}

/// Apply the rate adjustment to the lower bound of a "12% - 18%" style range.
/// A range that does not parse is displayed unchanged.
fn adjusted_rate(base_range: &str, adjustment: i32) -> String {
    match parse_rate_floor(base_range) {
        Some(base) => {
            let adjusted = (base + adjustment).max(MIN_INTEREST_RATE);
            format!("{adjusted}% - {}%", adjusted + RATE_RANGE_SPREAD)
        }
        None => base_range.to_string(),
    }
}

fn parse_rate_floor(range: &str) -> Option<i32> {
    let lower = range.split(" - ").next()?;
    let digits: String = lower.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
