//! Month-by-month buying vs renting simulation

use log::debug;

use super::params::BuyRentParameters;
use super::rates::{MonthRates, MonthlyRates};
use super::records::{BuyRentResult, MonthlyBuyRentRecord};
use super::state::SimulationState;
use crate::amortization::{monthly_payment, HOME_INSURANCE_TO_PROPERTY_TAX};
use crate::error::EngineError;

/// Realtor and closing costs when selling, as a fraction of home value
pub const SELLING_COST_RATE: f64 = 0.06;

/// Run a buy-vs-rent simulation
pub fn simulate(params: &BuyRentParameters) -> Result<BuyRentResult, EngineError> {
    BuyRentEngine::new(params.clone())?.run()
}

/// Validated parameters with their monthly rate table
#[derive(Debug, Clone)]
pub struct BuyRentEngine {
    params: BuyRentParameters,
    rates: MonthlyRates,
}

impl BuyRentEngine {
    pub fn new(params: BuyRentParameters) -> Result<Self, EngineError> {
        params.validate()?;
        let rates = MonthlyRates::from_params(&params)?;
        Ok(Self { params, rates })
    }

    pub fn params(&self) -> &BuyRentParameters {
        &self.params
    }

    /// Fold the monthly recurrence over the simulation horizon
    pub fn run(&self) -> Result<BuyRentResult, EngineError> {
        let mut result = BuyRentResult::new(self.params.clone());
        let mut state = SimulationState::from_params(&self.params);

        debug!(
            "Simulating {} months: home {:.2}, loan {:.2}, rent {:.2}",
            self.rates.len(),
            self.params.home_value,
            self.params.loan_amount(),
            self.params.monthly_rent
        );

        for index in 0..self.rates.len() {
            let record = self.calculate_month(&state, self.rates.month(index));
            if let Some(quantity) = record.first_non_finite() {
                return Err(EngineError::NumericOverflow {
                    month: record.month,
                    quantity,
                });
            }
            state.advance(&record);
            result.records.push(record);
        }

        Ok(result)
    }

    /// Calculate one month from the prior month's state
    fn calculate_month(&self, state: &SimulationState, rates: MonthRates) -> MonthlyBuyRentRecord {
        let p = &self.params;
        let first_month = state.months_elapsed == 0;

        let home_value = state.home_value * (1.0 + rates.home_appreciation);

        // Loan: re-amortize the prior balance over the months left. Past the
        // end of the term the loan is retired and any float residue cleared.
        let remaining = state.remaining_term(p.loan_term_months());
        let (interest, principal) = if remaining > 0 && state.outstanding_principal > 0.0 {
            let pay = monthly_payment(state.outstanding_principal, remaining, rates.interest);
            (pay.interest, pay.principal)
        } else {
            (0.0, state.outstanding_principal)
        };
        let outstanding_principal = state.outstanding_principal - principal;

        // Property tax is assessed on the prior month's value
        let property_tax = p.property_tax_rate_percent / (12.0 * 100.0) * state.home_value;
        let home_insurance = property_tax * HOME_INSURANCE_TO_PROPERTY_TAX;
        let tax_break = p.tax_bracket_percent / 100.0 * (property_tax + interest);

        let buy_cash_outflow = principal
            + interest
            + property_tax
            + p.monthly_hoa
            + home_insurance
            + p.monthly_maintenance
            - tax_break;

        let net_worth_buying = home_value - outstanding_principal;

        let rent = state.rent * (1.0 + rates.rent_appreciation);
        let monthly_savings_from_renting = buy_cash_outflow - rent;

        // The renter invests the down payment up front, then each month's savings
        let grown_portfolio = state.net_worth_renting * (1.0 + rates.investment_return);
        let net_worth_renting = if first_month {
            grown_portfolio
        } else {
            monthly_savings_from_renting + grown_portfolio
        };

        MonthlyBuyRentRecord {
            month: state.months_elapsed + 1,
            home_value,
            interest,
            principal,
            outstanding_principal,
            property_tax,
            hoa: p.monthly_hoa,
            tax_break,
            maintenance: p.monthly_maintenance,
            home_insurance,
            buy_cash_outflow,
            net_worth_buying,
            net_worth_buying_after_sale: net_worth_buying - SELLING_COST_RATE * home_value,
            rent,
            monthly_savings_from_renting,
            net_worth_renting,
        }
    }
}
