//! Loan-discovery scoring library for small businesses without traditional
//! credit history.
//!
//! The heart of the crate is a pipeline of pure derivation functions that
//! consume a sanitized [`workflows::discovery::BusinessProfile`] and produce
//! derived views: a credit-style risk assessment, per-product loan offers, a
//! prioritized improvement plan, and score/revenue/ESG projections. Hosts
//! (the `loanbridge-api` service, tests, CLIs) wrap these functions; the
//! library itself performs no I/O beyond the simulated Visa-lookup latency.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
