//! Loan parameters for a single amortization run

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Longest supported loan term (100 years)
pub const MAX_TERM_MONTHS: u32 = 1_200;

/// Repayment style of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoanType {
    /// Level payment blending interest and principal
    #[default]
    Amortizing,
    /// Payment covers interest only; the balance never falls
    InterestOnly,
}

/// Parameters of one amortization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed
    pub principal: f64,

    /// Fixed annual interest rate in percent (6.0 = 6%)
    pub annual_rate_percent: f64,

    /// Loan term in months
    pub term_months: u32,

    pub loan_type: LoanType,

    /// Additional principal paid every month on top of the level payment
    #[serde(default)]
    pub extra_principal: f64,
}

impl LoanParameters {
    pub fn new(principal: f64, term_months: u32, annual_rate_percent: f64, loan_type: LoanType) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
            loan_type,
            extra_principal: 0.0,
        }
    }

    /// Same loan with an extra monthly principal payment
    pub fn with_extra_principal(mut self, extra_principal: f64) -> Self {
        self.extra_principal = extra_principal;
        self
    }

    /// Reject parameters the recurrence cannot run on
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(EngineError::invalid(
                "principal",
                format!("must be a positive amount, got {}", self.principal),
            ));
        }
        if self.term_months == 0 || self.term_months > MAX_TERM_MONTHS {
            return Err(EngineError::invalid(
                "term_months",
                format!("must be within 1-{}, got {}", MAX_TERM_MONTHS, self.term_months),
            ));
        }
        if !self.annual_rate_percent.is_finite() {
            return Err(EngineError::invalid(
                "annual_rate_percent",
                format!("must be finite, got {}", self.annual_rate_percent),
            ));
        }
        if !self.extra_principal.is_finite() || self.extra_principal < 0.0 {
            return Err(EngineError::invalid(
                "extra_principal",
                format!("must be a non-negative amount, got {}", self.extra_principal),
            ));
        }
        Ok(())
    }
}
