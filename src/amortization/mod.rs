//! Amortization engine for fixed-rate and interest-only loans

mod loan;
mod payment;
mod engine;
mod schedule;
mod purchase;

pub use loan::{LoanParameters, LoanType, MAX_TERM_MONTHS};
pub use payment::{monthly_payment, monthly_rate, PaymentBreakdown};
pub use engine::compute_schedule;
pub use schedule::{
    Checkpoint, CheckpointEntry, LoanSchedule, LoanSummary, MonthlyLoanRecord,
    DEFAULT_CHECKPOINT_MONTHS,
};
pub use purchase::{
    CostBreakdown, CostComponent, HomePurchase, PurchaseSummary, HOME_INSURANCE_TO_PROPERTY_TAX,
};
