//! Inputs to a buy-vs-rent simulation

use serde::{Deserialize, Serialize};

use crate::amortization::MAX_TERM_MONTHS;
use crate::error::EngineError;

/// Longest supported simulation horizon
pub const MAX_SIMULATION_YEARS: u32 = 100;

/// Per-year annual percentages, or one value held for every year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RateSeriesInput", into = "Vec<f64>")]
pub struct RateSeries(Vec<f64>);

/// JSON accepts either `6.5` or `[6.5, 6.0, 5.5]`
#[derive(Deserialize)]
#[serde(untagged)]
enum RateSeriesInput {
    Fixed(f64),
    PerYear(Vec<f64>),
}

impl From<RateSeriesInput> for RateSeries {
    fn from(input: RateSeriesInput) -> Self {
        match input {
            RateSeriesInput::Fixed(rate) => RateSeries::fixed(rate),
            RateSeriesInput::PerYear(rates) => RateSeries::per_year(rates),
        }
    }
}

impl From<RateSeries> for Vec<f64> {
    fn from(series: RateSeries) -> Self {
        series.0
    }
}

impl RateSeries {
    /// Same annual rate every year
    pub fn fixed(annual_percent: f64) -> Self {
        Self(vec![annual_percent])
    }

    /// One annual rate per simulated year
    pub fn per_year(annual_percents: Vec<f64>) -> Self {
        Self(annual_percents)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Annual rate applying in a 0-based simulation year
    fn annual_for_year(&self, year: usize) -> f64 {
        if self.0.len() == 1 {
            self.0[0]
        } else {
            self.0[year]
        }
    }

    /// Check the series can cover `years` and holds finite values
    pub fn validate(&self, years: u32, name: &'static str) -> Result<(), EngineError> {
        let len = self.0.len();
        if len != 1 && len != years as usize {
            return Err(EngineError::invalid(
                name,
                format!("expected 1 or {} annual rates, got {}", years, len),
            ));
        }
        if let Some(bad) = self.0.iter().find(|v| !v.is_finite()) {
            return Err(EngineError::invalid(name, format!("rate {} is not finite", bad)));
        }
        Ok(())
    }

    /// Resample to one entry per month: each year's annual percent / 12
    pub fn expand_monthly(&self, years: u32, name: &'static str) -> Result<Vec<f64>, EngineError> {
        self.validate(years, name)?;

        Ok((0..years as usize * 12)
            .map(|month| self.annual_for_year(month / 12) / 12.0)
            .collect())
    }
}

/// Buying and renting inputs for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyRentParameters {
    /// Purchase price
    pub home_value: f64,
    pub down_payment: f64,
    pub loan_term_years: u32,

    /// Monthly HOA and Mello-Roos
    pub monthly_hoa: f64,
    pub monthly_maintenance: f64,

    /// Annual property tax as a percent of home value
    pub property_tax_rate_percent: f64,

    /// Marginal bracket applied to deductible interest and property tax
    pub tax_bracket_percent: f64,

    /// Rent for a comparable home, before the first month's appreciation
    pub monthly_rent: f64,

    pub simulation_years: u32,

    // Annual percentages, one value or one per simulated year
    pub interest_rate: RateSeries,
    pub home_appreciation: RateSeries,
    pub rent_appreciation: RateSeries,
    pub investment_return: RateSeries,
}

impl Default for BuyRentParameters {
    fn default() -> Self {
        Self {
            home_value: 800_000.0,
            down_payment: 160_000.0,
            loan_term_years: 30,
            monthly_hoa: 0.0,
            monthly_maintenance: 0.0,
            property_tax_rate_percent: 1.25, // typical San Diego rate
            tax_bracket_percent: 24.0,
            monthly_rent: 3_000.0,
            simulation_years: 10,
            interest_rate: RateSeries::fixed(6.5),
            home_appreciation: RateSeries::fixed(3.0),
            rent_appreciation: RateSeries::fixed(3.0),
            investment_return: RateSeries::fixed(7.0),
        }
    }
}

impl BuyRentParameters {
    pub fn loan_amount(&self) -> f64 {
        self.home_value - self.down_payment
    }

    pub fn total_months(&self) -> u32 {
        self.simulation_years.saturating_mul(12)
    }

    pub fn loan_term_months(&self) -> u32 {
        self.loan_term_years.saturating_mul(12)
    }

    /// Reject inputs the recurrence cannot run on
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.home_value.is_finite() || self.home_value <= 0.0 {
            return Err(EngineError::invalid(
                "home_value",
                format!("must be a positive amount, got {}", self.home_value),
            ));
        }
        if !self.down_payment.is_finite() || self.down_payment < 0.0 || self.down_payment > self.home_value {
            return Err(EngineError::invalid(
                "down_payment",
                format!("must be between 0 and the home value, got {}", self.down_payment),
            ));
        }
        let max_term_years = MAX_TERM_MONTHS / 12;
        if self.loan_term_years == 0 || self.loan_term_years > max_term_years {
            return Err(EngineError::invalid(
                "loan_term_years",
                format!("must be within 1-{}, got {}", max_term_years, self.loan_term_years),
            ));
        }
        if self.simulation_years == 0 || self.simulation_years > MAX_SIMULATION_YEARS {
            return Err(EngineError::invalid(
                "simulation_years",
                format!("must be within 1-{}, got {}", MAX_SIMULATION_YEARS, self.simulation_years),
            ));
        }
        for (name, value) in [
            ("monthly_hoa", self.monthly_hoa),
            ("monthly_maintenance", self.monthly_maintenance),
            ("monthly_rent", self.monthly_rent),
            ("property_tax_rate_percent", self.property_tax_rate_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::invalid(name, format!("must be non-negative, got {}", value)));
            }
        }
        if !(0.0..=100.0).contains(&self.tax_bracket_percent) {
            return Err(EngineError::invalid(
                "tax_bracket_percent",
                format!("must be within 0-100, got {}", self.tax_bracket_percent),
            ));
        }

        for (name, series) in self.rate_series() {
            series.validate(self.simulation_years, name)?;
        }
        Ok(())
    }

    pub(crate) fn rate_series(&self) -> [(&'static str, &RateSeries); 4] {
        [
            ("interest_rate", &self.interest_rate),
            ("home_appreciation", &self.home_appreciation),
            ("rent_appreciation", &self.rent_appreciation),
            ("investment_return", &self.investment_return),
        ]
    }
}
