//! Ownership costs around a mortgage: HOA, property tax, insurance, upkeep

use serde::{Deserialize, Serialize};

use super::loan::{LoanParameters, LoanType, MAX_TERM_MONTHS};
use super::schedule::{LoanSchedule, LoanSummary};
use crate::error::EngineError;

/// Home insurance is modeled as a tenth of property tax
pub const HOME_INSURANCE_TO_PROPERTY_TAX: f64 = 0.1;

/// A home bought with a mortgage, plus its recurring costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomePurchase {
    pub home_value: f64,
    pub down_payment: f64,
    pub term_years: u32,
    pub annual_rate_percent: f64,
    #[serde(default)]
    pub loan_type: LoanType,
    /// Monthly HOA and Mello-Roos
    #[serde(default)]
    pub monthly_hoa: f64,
    #[serde(default)]
    pub monthly_maintenance: f64,
    /// Annual property tax as a percent of home value
    pub property_tax_rate_percent: f64,
    #[serde(default)]
    pub extra_principal: f64,
}

impl HomePurchase {
    pub fn loan_amount(&self) -> f64 {
        self.home_value - self.down_payment
    }

    pub fn term_months(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    pub fn monthly_property_tax(&self) -> f64 {
        self.home_value * self.property_tax_rate_percent / 100.0 / 12.0
    }

    pub fn monthly_home_insurance(&self) -> f64 {
        self.monthly_property_tax() * HOME_INSURANCE_TO_PROPERTY_TAX
    }

    /// Recurring costs other than the bank payment
    pub fn monthly_carrying_costs(&self) -> f64 {
        self.monthly_hoa + self.monthly_home_insurance() + self.monthly_property_tax() + self.monthly_maintenance
    }

    pub fn loan_parameters(&self) -> LoanParameters {
        LoanParameters::new(
            self.loan_amount(),
            self.term_months(),
            self.annual_rate_percent,
            self.loan_type,
        )
        .with_extra_principal(self.extra_principal)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if !self.home_value.is_finite() || self.home_value <= 0.0 {
            return Err(EngineError::invalid("home_value", "must be a positive amount"));
        }
        if !self.down_payment.is_finite() || self.down_payment < 0.0 {
            return Err(EngineError::invalid("down_payment", "must be a non-negative amount"));
        }
        let max_term_years = MAX_TERM_MONTHS / 12;
        if self.term_years == 0 || self.term_years > max_term_years {
            return Err(EngineError::invalid(
                "term_years",
                format!("must be within 1-{}, got {}", max_term_years, self.term_years),
            ));
        }
        for (name, value) in [
            ("monthly_hoa", self.monthly_hoa),
            ("monthly_maintenance", self.monthly_maintenance),
            ("property_tax_rate_percent", self.property_tax_rate_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::invalid(name, format!("must be non-negative, got {}", value)));
            }
        }
        Ok(())
    }

    /// Validate the purchase and amortize its loan
    pub fn schedule(&self) -> Result<LoanSchedule, EngineError> {
        self.validate()?;
        self.loan_parameters().schedule()
    }

    /// Amortize the loan and total up the cost of ownership
    pub fn analyze(&self) -> Result<PurchaseSummary, EngineError> {
        let schedule = self.schedule()?;
        Ok(self.summarize(&schedule))
    }

    /// Totals for an already computed schedule of this purchase's loan
    ///
    /// Carrying costs run for the full term; bank payments stop when the loan
    /// is retired.
    pub fn summarize(&self, schedule: &LoanSchedule) -> PurchaseSummary {
        let term_months = self.term_months();
        let months = term_months as f64;
        let bank_payment = schedule.first_payment();
        let monthly_commitment = bank_payment + self.monthly_carrying_costs();
        let loan = schedule.summary();

        PurchaseSummary {
            home_value: self.home_value,
            down_payment: self.down_payment,
            loan_amount: self.loan_amount(),
            loan_type: self.loan_type,
            term_months,
            monthly_bank_payment: bank_payment,
            monthly_property_tax: self.monthly_property_tax(),
            monthly_home_insurance: self.monthly_home_insurance(),
            monthly_hoa: self.monthly_hoa,
            monthly_maintenance: self.monthly_maintenance,
            monthly_commitment,
            total_property_tax: self.monthly_property_tax() * months,
            total_home_insurance: self.monthly_home_insurance() * months,
            total_hoa: self.monthly_hoa * months,
            total_maintenance: self.monthly_maintenance * months,
            total_payment: self.down_payment + loan.total_payments + months * self.monthly_carrying_costs(),
            loan,
        }
    }
}

/// Cost of ownership over the life of the loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseSummary {
    pub home_value: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub loan_type: LoanType,
    pub term_months: u32,

    // Monthly figures
    pub monthly_bank_payment: f64,
    pub monthly_property_tax: f64,
    pub monthly_home_insurance: f64,
    pub monthly_hoa: f64,
    pub monthly_maintenance: f64,
    pub monthly_commitment: f64,

    // Life-of-loan totals
    pub total_property_tax: f64,
    pub total_home_insurance: f64,
    pub total_hoa: f64,
    pub total_maintenance: f64,
    /// Down payment, every bank payment made, and carrying costs over the term
    pub total_payment: f64,

    pub loan: LoanSummary,
}

impl PurchaseSummary {
    /// Components of total spend, for proportion charts
    pub fn cost_breakdown(&self) -> CostBreakdown {
        let components = vec![
            CostComponent::new("Interest", self.loan.total_interest),
            CostComponent::new("Home Insurance", self.total_home_insurance),
            CostComponent::new("Home Value", self.home_value),
            CostComponent::new("HOA", self.total_hoa),
            CostComponent::new("Property Tax", self.total_property_tax),
            CostComponent::new("Maintenance", self.total_maintenance),
        ];
        let total: f64 = components.iter().map(|c| c.amount).sum();

        CostBreakdown {
            components: components
                .into_iter()
                .map(|c| CostComponent {
                    share: if total > 0.0 { c.amount / total } else { 0.0 },
                    ..c
                })
                .collect(),
            total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostComponent {
    pub label: &'static str,
    pub amount: f64,
    /// Fraction of the breakdown total
    pub share: f64,
}

impl CostComponent {
    fn new(label: &'static str, amount: f64) -> Self {
        Self { label, amount, share: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub components: Vec<CostComponent>,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn purchase() -> HomePurchase {
        HomePurchase {
            home_value: 600_000.0,
            down_payment: 100_000.0,
            term_years: 30,
            annual_rate_percent: 6.0,
            loan_type: LoanType::Amortizing,
            monthly_hoa: 250.0,
            monthly_maintenance: 150.0,
            property_tax_rate_percent: 1.25,
            extra_principal: 0.0,
        }
    }

    #[test]
    fn test_monthly_costs() {
        let p = purchase();

        assert_eq!(p.loan_amount(), 500_000.0);
        assert_abs_diff_eq!(p.monthly_property_tax(), 625.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.monthly_home_insurance(), 62.5, epsilon = 1e-9);
        assert_abs_diff_eq!(p.monthly_carrying_costs(), 1087.5, epsilon = 1e-9);
    }

    #[test]
    fn test_purchase_summary() {
        let summary = purchase().analyze().unwrap();

        assert_abs_diff_eq!(summary.monthly_bank_payment, 2997.75, epsilon = 0.01);
        assert_abs_diff_eq!(summary.monthly_commitment, 2997.75 + 1087.5, epsilon = 0.01);
        assert_abs_diff_eq!(summary.total_property_tax, 625.0 * 360.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.total_hoa, 90_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            summary.total_payment,
            100_000.0 + 360.0 * summary.monthly_commitment,
            epsilon = 1e-4
        );
        assert_eq!(summary.loan.months_paid, 360);
        assert_eq!(summary.term_months, 360);
    }

    #[test]
    fn test_total_payment_after_early_payoff() {
        let p = HomePurchase {
            home_value: 200_000.0,
            down_payment: 100_000.0,
            extra_principal: 1_500.0,
            ..purchase()
        };
        let summary = p.analyze().unwrap();
        let carrying = p.monthly_carrying_costs() * 360.0;

        assert!(summary.loan.months_paid < 360);
        assert_abs_diff_eq!(
            summary.total_payment,
            100_000.0 + summary.loan.total_payments + carrying,
            epsilon = 1e-6
        );
        // No bank payments after the loan is retired
        assert!(summary.total_payment < 100_000.0 + 360.0 * summary.monthly_commitment);
        assert_abs_diff_eq!(summary.loan.total_principal, 100_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_oversized_term_is_rejected() {
        let p = HomePurchase {
            term_years: 400_000_000,
            ..purchase()
        };
        assert!(matches!(
            p.analyze(),
            Err(EngineError::InvalidParameter { name: "term_years", .. })
        ));
    }

    #[test]
    fn test_interest_only_bank_payment() {
        let p = HomePurchase {
            loan_type: LoanType::InterestOnly,
            ..purchase()
        };
        let summary = p.analyze().unwrap();

        assert_abs_diff_eq!(summary.monthly_bank_payment, 2500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.loan.final_outstanding_principal, 500_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cost_breakdown_shares() {
        let breakdown = purchase().analyze().unwrap().cost_breakdown();

        assert_eq!(breakdown.components.len(), 6);
        let share_sum: f64 = breakdown.components.iter().map(|c| c.share).sum();
        assert_abs_diff_eq!(share_sum, 1.0, epsilon = 1e-12);
        assert_eq!(breakdown.components[2].label, "Home Value");
        assert_abs_diff_eq!(breakdown.components[2].amount, 600_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_down_payment_covering_price_is_rejected() {
        let p = HomePurchase {
            down_payment: 600_000.0,
            ..purchase()
        };
        assert!(matches!(
            p.analyze(),
            Err(EngineError::InvalidParameter { name: "principal", .. })
        ));
    }
}
