//! Annual rate series resampled to monthly decimals

use super::params::BuyRentParameters;
use crate::error::EngineError;

/// The four rates applying in one simulated month, as monthly decimals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthRates {
    pub interest: f64,
    pub home_appreciation: f64,
    pub rent_appreciation: f64,
    pub investment_return: f64,
}

/// Monthly rate table covering the whole simulation
#[derive(Debug, Clone)]
pub struct MonthlyRates {
    interest: Vec<f64>,
    home_appreciation: Vec<f64>,
    rent_appreciation: Vec<f64>,
    investment_return: Vec<f64>,
}

impl MonthlyRates {
    /// Expand every annual series in `params` to `simulation_years * 12` months
    pub fn from_params(params: &BuyRentParameters) -> Result<Self, EngineError> {
        let years = params.simulation_years;
        let to_decimal = |percents: Vec<f64>| -> Vec<f64> { percents.into_iter().map(|p| p / 100.0).collect() };

        Ok(Self {
            interest: to_decimal(params.interest_rate.expand_monthly(years, "interest_rate")?),
            home_appreciation: to_decimal(params.home_appreciation.expand_monthly(years, "home_appreciation")?),
            rent_appreciation: to_decimal(params.rent_appreciation.expand_monthly(years, "rent_appreciation")?),
            investment_return: to_decimal(params.investment_return.expand_monthly(years, "investment_return")?),
        })
    }

    pub fn len(&self) -> usize {
        self.interest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interest.is_empty()
    }

    /// Rates for a 0-based month
    pub fn month(&self, index: usize) -> MonthRates {
        MonthRates {
            interest: self.interest[index],
            home_appreciation: self.home_appreciation[index],
            rent_appreciation: self.rent_appreciation[index],
            investment_return: self.investment_return[index],
        }
    }
}
