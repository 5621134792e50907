//! Buy-vs-rent output structures

use serde::{Deserialize, Serialize};

use super::params::BuyRentParameters;

/// One month of the buying and renting trajectories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBuyRentRecord {
    /// Simulation month (1-indexed)
    pub month: u32,

    // Buying
    pub home_value: f64,
    pub interest: f64,
    pub principal: f64,
    pub outstanding_principal: f64,
    pub property_tax: f64,
    pub hoa: f64,
    pub tax_break: f64,
    pub maintenance: f64,
    pub home_insurance: f64,
    pub buy_cash_outflow: f64,
    pub net_worth_buying: f64,
    /// Equity after paying selling costs
    pub net_worth_buying_after_sale: f64,

    // Renting
    pub rent: f64,
    /// Buying outflow minus rent, reinvested by the renter
    pub monthly_savings_from_renting: f64,
    pub net_worth_renting: f64,
}

impl MonthlyBuyRentRecord {
    /// Name of the first non-finite field, if any
    pub(crate) fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("home value", self.home_value),
            ("interest", self.interest),
            ("principal", self.principal),
            ("outstanding principal", self.outstanding_principal),
            ("property tax", self.property_tax),
            ("tax break", self.tax_break),
            ("home insurance", self.home_insurance),
            ("buy cash outflow", self.buy_cash_outflow),
            ("net worth buying", self.net_worth_buying),
            ("net worth buying after sale", self.net_worth_buying_after_sale),
            ("rent", self.rent),
            ("monthly savings from renting", self.monthly_savings_from_renting),
            ("net worth renting", self.net_worth_renting),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
    }
}

/// Complete simulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyRentResult {
    pub params: BuyRentParameters,
    pub records: Vec<MonthlyBuyRentRecord>,
}

impl BuyRentResult {
    pub(crate) fn new(params: BuyRentParameters) -> Self {
        let capacity = params.total_months() as usize;
        Self {
            params,
            records: Vec::with_capacity(capacity),
        }
    }

    /// First month where selling the home beats the renter's portfolio
    pub fn breakeven_month(&self) -> Option<u32> {
        self.records
            .iter()
            .find(|r| r.net_worth_buying_after_sale >= r.net_worth_renting)
            .map(|r| r.month)
    }

    /// Get summary statistics
    pub fn summary(&self) -> BuyRentSummary {
        let last = self.records.last();
        let final_after_sale = last.map(|r| r.net_worth_buying_after_sale).unwrap_or(0.0);
        let final_renting = last.map(|r| r.net_worth_renting).unwrap_or(self.params.down_payment);

        BuyRentSummary {
            months: self.records.len() as u32,
            loan_amount: self.params.loan_amount(),
            final_home_value: last.map(|r| r.home_value).unwrap_or(self.params.home_value),
            final_outstanding_principal: last
                .map(|r| r.outstanding_principal)
                .unwrap_or(self.params.loan_amount()),
            final_net_worth_buying: last.map(|r| r.net_worth_buying).unwrap_or(0.0),
            final_net_worth_buying_after_sale: final_after_sale,
            final_net_worth_renting: final_renting,
            renting_advantage: final_renting - final_after_sale,
            breakeven_month: self.breakeven_month(),
            total_buy_cash_outflow: self.records.iter().map(|r| r.buy_cash_outflow).sum(),
            total_rent: self.records.iter().map(|r| r.rent).sum(),
            total_tax_break: self.records.iter().map(|r| r.tax_break).sum(),
        }
    }
}

/// Summary statistics for a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyRentSummary {
    pub months: u32,
    pub loan_amount: f64,
    pub final_home_value: f64,
    pub final_outstanding_principal: f64,
    pub final_net_worth_buying: f64,
    pub final_net_worth_buying_after_sale: f64,
    pub final_net_worth_renting: f64,
    /// Renting net worth minus buying net worth after sale; negative favors buying
    pub renting_advantage: f64,
    pub breakeven_month: Option<u32>,
    pub total_buy_cash_outflow: f64,
    pub total_rent: f64,
    pub total_tax_break: f64,
}
