//! Amortization schedule output structures

use serde::{Deserialize, Serialize};

use super::loan::LoanParameters;

/// Checkpoints reported in the loan summary (7 and 10 years)
pub const DEFAULT_CHECKPOINT_MONTHS: [u32; 2] = [84, 120];

/// One month of a loan schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLoanRecord {
    /// Payment month (1-indexed)
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance after this month's payment
    pub outstanding_principal: f64,
}

impl MonthlyLoanRecord {
    /// Name of the first non-finite field, if any
    pub(crate) fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("payment", self.payment),
            ("interest", self.interest),
            ("principal", self.principal),
            ("outstanding principal", self.outstanding_principal),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
    }
}

/// Complete schedule for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub params: LoanParameters,
    pub records: Vec<MonthlyLoanRecord>,
}

impl LoanSchedule {
    pub(crate) fn new(params: LoanParameters) -> Self {
        let capacity = params.term_months as usize;
        Self {
            params,
            records: Vec::with_capacity(capacity),
        }
    }

    /// Number of payments actually made
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the loan was retired before the end of its term
    pub fn paid_off_early(&self) -> bool {
        self.records.len() < self.params.term_months as usize
    }

    /// First month's bank payment
    pub fn first_payment(&self) -> f64 {
        self.records.first().map(|r| r.payment).unwrap_or(0.0)
    }

    pub fn total_interest(&self) -> f64 {
        self.records.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.records.iter().map(|r| r.principal).sum()
    }

    pub fn total_payments(&self) -> f64 {
        self.records.iter().map(|r| r.payment).sum()
    }

    /// Cumulative figures after `month` payments
    ///
    /// `None` when the loan term does not reach `month`. A loan retired early
    /// reports its final position for any later month.
    pub fn checkpoint(&self, month: u32) -> Option<Checkpoint> {
        if month == 0 || month > self.params.term_months {
            return None;
        }
        let covered = &self.records[..self.records.len().min(month as usize)];
        let last = covered.last()?;

        let cumulative_interest: f64 = covered.iter().map(|r| r.interest).sum();
        let total_interest = self.total_interest();

        Some(Checkpoint {
            month,
            cumulative_interest,
            share_of_total_interest: if total_interest > 0.0 {
                cumulative_interest / total_interest
            } else {
                0.0
            },
            outstanding_principal: last.outstanding_principal,
            principal_repaid: self.params.principal - last.outstanding_principal,
        })
    }

    /// Life-of-loan aggregates with the default checkpoints
    pub fn summary(&self) -> LoanSummary {
        self.summary_with_checkpoints(&DEFAULT_CHECKPOINT_MONTHS)
    }

    pub fn summary_with_checkpoints(&self, months: &[u32]) -> LoanSummary {
        let total_interest = self.total_interest();

        LoanSummary {
            loan_amount: self.params.principal,
            months_paid: self.records.len() as u32,
            total_interest,
            total_principal: self.total_principal(),
            total_payments: self.total_payments(),
            interest_to_loan_ratio: total_interest / self.params.principal,
            final_outstanding_principal: self
                .records
                .last()
                .map(|r| r.outstanding_principal)
                .unwrap_or(self.params.principal),
            checkpoints: months
                .iter()
                .map(|&month| CheckpointEntry {
                    month,
                    figures: self.checkpoint(month),
                })
                .collect(),
        }
    }
}

/// Position of the loan after a given number of payments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub month: u32,
    pub cumulative_interest: f64,
    /// Fraction of life-of-loan interest paid by this month
    pub share_of_total_interest: f64,
    pub outstanding_principal: f64,
    pub principal_repaid: f64,
}

/// Checkpoint request and its result (`None` past the loan term)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointEntry {
    pub month: u32,
    pub figures: Option<Checkpoint>,
}

/// Summary statistics for a loan schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub loan_amount: f64,
    pub months_paid: u32,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_payments: f64,
    /// Total interest divided by the amount borrowed
    pub interest_to_loan_ratio: f64,
    pub final_outstanding_principal: f64,
    pub checkpoints: Vec<CheckpointEntry>,
}

impl LoanSummary {
    pub fn checkpoint(&self, month: u32) -> Option<&Checkpoint> {
        self.checkpoints
            .iter()
            .find(|c| c.month == month)
            .and_then(|c| c.figures.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{compute_schedule, LoanType};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summary_totals() {
        let schedule = compute_schedule(300_000.0, 360, 5.0, LoanType::Amortizing).unwrap();
        let summary = schedule.summary();

        assert_eq!(summary.months_paid, 360);
        assert_abs_diff_eq!(summary.total_principal, 300_000.0, epsilon = 1e-4);
        assert_abs_diff_eq!(
            summary.total_payments,
            summary.total_interest + summary.total_principal,
            epsilon = 1e-4
        );
        assert_abs_diff_eq!(
            summary.interest_to_loan_ratio,
            summary.total_interest / 300_000.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_checkpoints_within_term() {
        let schedule = compute_schedule(300_000.0, 360, 5.0, LoanType::Amortizing).unwrap();
        let seven = schedule.checkpoint(84).unwrap();
        let ten = schedule.checkpoint(120).unwrap();

        let expected: f64 = schedule.records[..84].iter().map(|r| r.interest).sum();
        assert_abs_diff_eq!(seven.cumulative_interest, expected, epsilon = 1e-6);
        assert_eq!(seven.outstanding_principal, schedule.records[83].outstanding_principal);
        assert!(ten.cumulative_interest > seven.cumulative_interest);
        assert!(ten.share_of_total_interest > seven.share_of_total_interest);
        assert!(ten.share_of_total_interest < 1.0);
        assert_abs_diff_eq!(
            ten.principal_repaid + ten.outstanding_principal,
            300_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_checkpoints_past_term_are_omitted() {
        // Five-year loan never reaches the 7 or 10 year marks
        let schedule = compute_schedule(50_000.0, 60, 4.0, LoanType::Amortizing).unwrap();
        let summary = schedule.summary();

        assert!(schedule.checkpoint(84).is_none());
        assert!(summary.checkpoint(84).is_none());
        assert!(summary.checkpoint(120).is_none());
        assert_eq!(summary.checkpoints.len(), 2);
    }

    #[test]
    fn test_checkpoint_after_early_payoff_uses_final_position() {
        let params = LoanParameters::new(100_000.0, 360, 5.0, LoanType::Amortizing)
            .with_extra_principal(2_000.0);
        let schedule = params.schedule().unwrap();
        assert!(schedule.len() < 84);

        let seven = schedule.checkpoint(84).unwrap();
        assert_eq!(seven.outstanding_principal, 0.0);
        assert_abs_diff_eq!(seven.share_of_total_interest, 1.0, epsilon = 1e-12);
    }
}
