//! Buy-vs-rent simulation: home equity against an invested down payment

mod params;
mod rates;
mod state;
mod engine;
mod records;

pub use params::{BuyRentParameters, RateSeries, MAX_SIMULATION_YEARS};
pub use rates::{MonthRates, MonthlyRates};
pub use state::SimulationState;
pub use engine::{simulate, BuyRentEngine, SELLING_COST_RATE};
pub use records::{BuyRentResult, BuyRentSummary, MonthlyBuyRentRecord};
