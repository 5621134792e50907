//! Monthly commitment across a grid of home prices and interest rates
//!
//! Answers "what can I afford at which rate": for every price between two
//! bounds and every rate in a range, the full monthly commitment (bank payment
//! plus HOA, insurance, property tax and maintenance) against a budget.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::amortization::{monthly_payment, monthly_rate, HOME_INSURANCE_TO_PROPERTY_TAX};
use crate::amortization::MAX_TERM_MONTHS;
use crate::error::EngineError;

/// Most home prices one sweep may evaluate
pub const MAX_HOME_VALUES: usize = 10_000;

/// Price range, loan terms and budget to sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityQuery {
    pub min_home_value: f64,
    pub max_home_value: f64,
    pub home_value_step: f64,
    /// Maximum down payment available
    pub down_payment: f64,
    pub term_years: u32,
    pub monthly_hoa: f64,
    pub monthly_maintenance: f64,
    pub property_tax_rate_percent: f64,
    pub monthly_budget: f64,
    /// Annual rates in percent
    pub rates_percent: Vec<f64>,
}

impl AffordabilityQuery {
    fn validate(&self) -> Result<(), EngineError> {
        if !self.min_home_value.is_finite() || self.min_home_value <= 0.0 {
            return Err(EngineError::invalid("min_home_value", "must be a positive amount"));
        }
        if !self.max_home_value.is_finite() || self.max_home_value < self.min_home_value {
            return Err(EngineError::invalid(
                "max_home_value",
                format!("must be at least {}, got {}", self.min_home_value, self.max_home_value),
            ));
        }
        if !self.home_value_step.is_finite() || self.home_value_step <= 0.0 {
            return Err(EngineError::invalid("home_value_step", "must be a positive amount"));
        }
        if self.step_count() >= MAX_HOME_VALUES as f64 {
            return Err(EngineError::invalid(
                "home_value_step",
                format!("range would exceed {} home values", MAX_HOME_VALUES),
            ));
        }
        let max_term_years = MAX_TERM_MONTHS / 12;
        if self.term_years == 0 || self.term_years > max_term_years {
            return Err(EngineError::invalid(
                "term_years",
                format!("must be within 1-{}, got {}", max_term_years, self.term_years),
            ));
        }
        if self.rates_percent.is_empty() {
            return Err(EngineError::invalid("rates_percent", "at least one rate is required"));
        }
        if let Some(bad) = self.rates_percent.iter().find(|r| !r.is_finite()) {
            return Err(EngineError::invalid("rates_percent", format!("rate {} is not finite", bad)));
        }
        for (name, value) in [
            ("down_payment", self.down_payment),
            ("monthly_hoa", self.monthly_hoa),
            ("monthly_maintenance", self.monthly_maintenance),
            ("property_tax_rate_percent", self.property_tax_rate_percent),
            ("monthly_budget", self.monthly_budget),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::invalid(name, format!("must be non-negative, got {}", value)));
            }
        }
        Ok(())
    }

    /// Steps between the bounds, before the cap is applied
    fn step_count(&self) -> f64 {
        ((self.max_home_value - self.min_home_value) / self.home_value_step + 1e-9).floor()
    }

    /// Home prices from the lower bound up to and including the upper bound
    pub fn home_values(&self) -> Vec<f64> {
        let count = (self.step_count() as usize).min(MAX_HOME_VALUES - 1);
        (0..=count)
            .map(|i| self.min_home_value + i as f64 * self.home_value_step)
            .collect()
    }

    /// Monthly commitment for one price and rate
    fn monthly_commitment(&self, home_value: f64, rate_percent: f64) -> f64 {
        let loan = home_value - self.down_payment;
        let bank_payment = if loan > 0.0 {
            monthly_payment(loan, self.term_years.saturating_mul(12), monthly_rate(rate_percent)).payment
        } else {
            0.0
        };
        let property_tax = self.property_tax_rate_percent / (12.0 * 100.0) * home_value;
        let home_insurance = property_tax * HOME_INSURANCE_TO_PROPERTY_TAX;

        bank_payment + self.monthly_hoa + home_insurance + property_tax + self.monthly_maintenance
    }

    /// Evaluate every price against every rate
    pub fn evaluate(&self) -> Result<AffordabilityGrid, EngineError> {
        self.validate()?;

        let rows: Vec<AffordabilityRow> = self
            .home_values()
            .into_par_iter()
            .map(|home_value| AffordabilityRow {
                home_value,
                monthly_commitment: self
                    .rates_percent
                    .iter()
                    .map(|&rate| self.monthly_commitment(home_value, rate))
                    .collect(),
            })
            .collect();

        if rows.iter().any(|row| row.monthly_commitment.iter().any(|c| !c.is_finite())) {
            return Err(EngineError::NumericOverflow {
                month: 1,
                quantity: "monthly commitment",
            });
        }

        Ok(AffordabilityGrid {
            rates_percent: self.rates_percent.clone(),
            monthly_budget: self.monthly_budget,
            rows,
        })
    }
}

/// Monthly commitments for one home price, aligned with the grid's rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityRow {
    pub home_value: f64,
    pub monthly_commitment: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityGrid {
    pub rates_percent: Vec<f64>,
    pub monthly_budget: f64,
    /// Ascending by home value
    pub rows: Vec<AffordabilityRow>,
}

impl AffordabilityGrid {
    /// Highest price whose commitment fits the budget at the given rate
    pub fn max_affordable_home_value(&self, rate_index: usize) -> Option<f64> {
        self.rows
            .iter()
            .filter(|row| {
                row.monthly_commitment
                    .get(rate_index)
                    .is_some_and(|&c| c <= self.monthly_budget)
            })
            .map(|row| row.home_value)
            .last()
    }

    /// Whether a price fits the budget at a rate
    pub fn is_affordable(&self, row_index: usize, rate_index: usize) -> bool {
        self.rows
            .get(row_index)
            .and_then(|row| row.monthly_commitment.get(rate_index))
            .is_some_and(|&c| c <= self.monthly_budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_schedule;
    use crate::amortization::LoanType;
    use approx::assert_abs_diff_eq;

    fn query() -> AffordabilityQuery {
        AffordabilityQuery {
            min_home_value: 500_000.0,
            max_home_value: 900_000.0,
            home_value_step: 50_000.0,
            down_payment: 100_000.0,
            term_years: 30,
            monthly_hoa: 200.0,
            monthly_maintenance: 100.0,
            property_tax_rate_percent: 1.25,
            monthly_budget: 4_500.0,
            rates_percent: vec![3.0, 3.25, 3.5, 3.75, 4.0, 4.25, 4.5, 4.75, 5.0],
        }
    }

    #[test]
    fn test_grid_shape() {
        let grid = query().evaluate().unwrap();

        assert_eq!(grid.rows.len(), 9);
        assert_eq!(grid.rows[0].home_value, 500_000.0);
        assert_eq!(grid.rows[8].home_value, 900_000.0);
        assert!(grid.rows.iter().all(|r| r.monthly_commitment.len() == 9));
    }

    #[test]
    fn test_commitment_matches_schedule() {
        let grid = query().evaluate().unwrap();
        let schedule = compute_schedule(400_000.0, 360, 4.0, LoanType::Amortizing).unwrap();
        let carrying = 200.0 + 100.0 + 500_000.0 * 0.0125 / 12.0 * 1.1;

        assert_abs_diff_eq!(
            grid.rows[0].monthly_commitment[4],
            schedule.first_payment() + carrying,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_commitment_rises_with_price_and_rate() {
        let grid = query().evaluate().unwrap();

        for row in &grid.rows {
            for pair in row.monthly_commitment.windows(2) {
                assert!(pair[1] > pair[0]);
            }
        }
        for pair in grid.rows.windows(2) {
            assert!(pair[1].monthly_commitment[0] > pair[0].monthly_commitment[0]);
        }
    }

    #[test]
    fn test_max_affordable_home_value() {
        let grid = query().evaluate().unwrap();
        let at_low = grid.max_affordable_home_value(0);
        let at_high = grid.max_affordable_home_value(8);

        assert!(at_low.is_some());
        assert!(at_low >= at_high);
        if let Some(price) = at_low {
            let index = grid.rows.iter().position(|r| r.home_value == price).unwrap();
            assert!(grid.is_affordable(index, 0));
            if index + 1 < grid.rows.len() {
                assert!(!grid.is_affordable(index + 1, 0));
            }
        }
    }

    #[test]
    fn test_price_below_down_payment_has_no_loan() {
        let q = AffordabilityQuery {
            min_home_value: 50_000.0,
            max_home_value: 100_000.0,
            ..query()
        };
        let grid = q.evaluate().unwrap();
        let carrying = 200.0 + 100.0 + 50_000.0 * 0.0125 / 12.0 * 1.1;

        assert_abs_diff_eq!(grid.rows[0].monthly_commitment[0], carrying, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_query() {
        let q = AffordabilityQuery {
            home_value_step: 0.0,
            ..query()
        };
        assert!(matches!(
            q.evaluate(),
            Err(EngineError::InvalidParameter { name: "home_value_step", .. })
        ));

        let q = AffordabilityQuery {
            home_value_step: 0.01,
            ..query()
        };
        assert!(matches!(
            q.evaluate(),
            Err(EngineError::InvalidParameter { name: "home_value_step", .. })
        ));

        let q = AffordabilityQuery {
            term_years: u32::MAX,
            ..query()
        };
        assert!(matches!(
            q.evaluate(),
            Err(EngineError::InvalidParameter { name: "term_years", .. })
        ));

        let q = AffordabilityQuery {
            max_home_value: 100_000.0,
            ..query()
        };
        assert!(matches!(
            q.evaluate(),
            Err(EngineError::InvalidParameter { name: "max_home_value", .. })
        ));
    }
}
