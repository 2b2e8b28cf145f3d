//! Loan-discovery workflow: profile intake, mocked merchant lookup, risk
//! scoring, catalog adjustment, improvement planning, and projections.
//!
//! Every derivation is a pure function of the sanitized profile snapshot plus
//! an explicit `current_year`; the only asynchrony is the artificial latency
//! in front of the merchant-lookup mock.

pub mod assessment;
pub mod catalog;
pub(crate) mod consent;
pub mod domain;
pub mod plan;
pub mod projection;
pub mod repository;
pub mod router;
pub mod service;
pub mod visa;

#[cfg(test)]
mod tests;

pub use assessment::{
    AssessmentConfig, RiskAssessment, RiskEngine, RiskLevel, ScoreBreakdown, ScoreComponent,
    ScoreFactor,
};
pub use catalog::{standard_catalog, AdjustedLoanOffer, LoanProduct};
pub use consent::{ConsentGuard, ConsentViolation};
pub use domain::{
    AlternativeSignals, BusinessProfile, DiscoveryStage, Industry, PrivacyConsent, ProfileId,
    ProfileSubmission, VisaPayload,
};
pub use plan::{Difficulty, Impact, ImprovementTask};
pub use projection::{EsgScores, ProjectionBundle};
pub use repository::{SessionError, SessionRecord, SessionStatusView, SessionStore};
pub use router::discovery_router;
pub use visa::VisaLookupSimulator;
pub use service::{DiscoveryServiceError, LoanDiscoveryService, VisaLookupOutcome};
