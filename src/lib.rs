//! Mortgage Planner - Loan amortization and buy-vs-rent simulation engine
//!
//! This library provides:
//! - Month-by-month amortization schedules for amortizing and interest-only loans
//! - Total cost of home ownership with 7 and 10 year checkpoints
//! - Buy-vs-rent net worth simulation with per-year rate series
//! - Affordability sweeps across home prices and interest rates
//! - Parallel scenario batches, CSV export and text reports

pub mod error;
pub mod amortization;
pub mod buy_rent;
pub mod affordability;
pub mod scenario;
pub mod input;
pub mod export;
pub mod report;

// Re-export commonly used types
pub use error::{EngineError, ExportError, ParseError};
pub use amortization::{compute_schedule, HomePurchase, LoanParameters, LoanSchedule, LoanType, PurchaseSummary};
pub use buy_rent::{simulate, BuyRentParameters, BuyRentResult, BuyRentSummary, RateSeries};
pub use affordability::{AffordabilityGrid, AffordabilityQuery};
pub use scenario::{Scenario, ScenarioRunner};
