//! Month-by-month amortization of a single loan

use log::{debug, warn};

use super::loan::{LoanParameters, LoanType};
use super::payment::{monthly_payment, monthly_rate};
use super::schedule::{LoanSchedule, MonthlyLoanRecord};
use crate::error::EngineError;

/// Compute the payment schedule for a loan
pub fn compute_schedule(
    principal: f64,
    term_months: u32,
    annual_rate_percent: f64,
    loan_type: LoanType,
) -> Result<LoanSchedule, EngineError> {
    LoanParameters::new(principal, term_months, annual_rate_percent, loan_type).schedule()
}

impl LoanParameters {
    /// Run the amortization recurrence
    ///
    /// Each month re-derives the level payment from the current balance and
    /// the months left (`term_months - n + 1`, counting the current one).
    /// Stops after the month the balance reaches zero.
    pub fn schedule(&self) -> Result<LoanSchedule, EngineError> {
        self.validate()?;

        let rate = monthly_rate(self.annual_rate_percent);
        let mut schedule = LoanSchedule::new(self.clone());
        let mut outstanding = self.principal;

        debug!(
            "Amortizing {:.2} over {} months at {:.4}% ({:?})",
            self.principal, self.term_months, self.annual_rate_percent, self.loan_type
        );

        for month in 1..=self.term_months {
            let remaining = self.term_months - month + 1;
            let mut pay = monthly_payment(outstanding, remaining, rate);

            match self.loan_type {
                LoanType::InterestOnly => {
                    pay.principal = 0.0;
                    pay.payment = pay.interest;
                }
                LoanType::Amortizing if self.extra_principal > 0.0 => {
                    let principal = (pay.principal + self.extra_principal).min(outstanding);
                    pay.payment = pay.interest + principal;
                    pay.principal = principal;
                }
                LoanType::Amortizing => {}
            }

            outstanding -= pay.principal;

            let record = MonthlyLoanRecord {
                month,
                payment: pay.payment,
                interest: pay.interest,
                principal: pay.principal,
                outstanding_principal: outstanding,
            };
            if let Some(quantity) = record.first_non_finite() {
                return Err(EngineError::NumericOverflow { month, quantity });
            }
            schedule.records.push(record);

            if outstanding <= 0.0 {
                if month < self.term_months {
                    warn!("Loan retired in month {} of {}", month, self.term_months);
                }
                break;
            }
        }

        Ok(schedule)
    }
}
