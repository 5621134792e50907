//! Prior-month carry for the buy-vs-rent recurrence

use super::params::BuyRentParameters;
use super::records::MonthlyBuyRentRecord;

/// Values the next month is computed from
///
/// Before month 1 these hold the purchase-day figures: price, loan amount,
/// quoted rent and the down payment the renter invests instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Months completed so far
    pub months_elapsed: u32,
    pub home_value: f64,
    pub outstanding_principal: f64,
    pub rent: f64,
    pub net_worth_renting: f64,
}

impl SimulationState {
    pub fn from_params(params: &BuyRentParameters) -> Self {
        Self {
            months_elapsed: 0,
            home_value: params.home_value,
            outstanding_principal: params.loan_amount(),
            rent: params.monthly_rent,
            net_worth_renting: params.down_payment,
        }
    }

    /// Carry a finished month forward
    pub fn advance(&mut self, record: &MonthlyBuyRentRecord) {
        self.months_elapsed = record.month;
        self.home_value = record.home_value;
        self.outstanding_principal = record.outstanding_principal;
        self.rent = record.rent;
        self.net_worth_renting = record.net_worth_renting;
    }

    /// Loan months left including the upcoming one
    pub fn remaining_term(&self, loan_term_months: u32) -> u32 {
        loan_term_months.saturating_sub(self.months_elapsed)
    }
}
