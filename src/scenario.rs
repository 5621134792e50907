//! Scenario runner for batches of buy-vs-rent simulations
//!
//! Every simulation is hermetic, so batches fan out across threads while each
//! individual run stays a single sequential fold.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buy_rent::{simulate, BuyRentParameters, BuyRentResult, BuyRentSummary, RateSeries};
use crate::error::EngineError;

/// A labelled parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub params: BuyRentParameters,
}

/// Summary of one scenario in a batch
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Summary(BuyRentSummary),
    Error(String),
}

/// Runner around a base parameter set
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(BuyRentParameters::default());
///
/// for (rate, result) in runner.sweep_interest_rates(&[5.0, 6.0, 7.0]) {
///     println!("{}: {:?}", rate, result.map(|r| r.summary().renting_advantage));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_params: BuyRentParameters,
}

impl ScenarioRunner {
    pub fn new(base_params: BuyRentParameters) -> Self {
        Self { base_params }
    }

    /// Simulate the base parameters
    pub fn run(&self) -> Result<BuyRentResult, EngineError> {
        simulate(&self.base_params)
    }

    /// Simulate several parameter sets in parallel, results in input order
    pub fn run_batch(&self, params: &[BuyRentParameters]) -> Vec<Result<BuyRentResult, EngineError>> {
        params.par_iter().map(simulate).collect()
    }

    /// Simulate named scenarios in parallel and keep only their summaries
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                outcome: match simulate(&scenario.params) {
                    Ok(result) => Outcome::Summary(result.summary()),
                    Err(e) => Outcome::Error(e.to_string()),
                },
            })
            .collect();

        let failed = outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Error(_)))
            .count();
        info!("Ran {} scenarios ({} failed)", outcomes.len(), failed);

        outcomes
    }

    /// Base parameters re-run with each fixed interest rate
    pub fn sweep_interest_rates(&self, rates_percent: &[f64]) -> Vec<(f64, Result<BuyRentResult, EngineError>)> {
        let variants: Vec<BuyRentParameters> = rates_percent
            .iter()
            .map(|&rate| BuyRentParameters {
                interest_rate: RateSeries::fixed(rate),
                ..self.base_params.clone()
            })
            .collect();

        rates_percent.iter().copied().zip(self.run_batch(&variants)).collect()
    }

    pub fn params(&self) -> &BuyRentParameters {
        &self.base_params
    }

    pub fn params_mut(&mut self) -> &mut BuyRentParameters {
        &mut self.base_params
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(BuyRentParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_matches_individual_runs() {
        let runner = ScenarioRunner::default();
        let params: Vec<_> = [3.0, 5.0, 7.0]
            .iter()
            .map(|&r| BuyRentParameters {
                investment_return: RateSeries::fixed(r),
                ..BuyRentParameters::default()
            })
            .collect();

        let results = runner.run_batch(&params);
        assert_eq!(results.len(), 3);

        for (p, result) in params.iter().zip(&results) {
            assert_eq!(result.as_ref().unwrap(), &simulate(p).unwrap());
        }

        // Higher returns leave the renter better off
        let worth = |i: usize| results[i].as_ref().unwrap().summary().final_net_worth_renting;
        assert!(worth(2) > worth(0));
    }

    #[test]
    fn test_rate_sweep() {
        let runner = ScenarioRunner::default();
        let sweep = runner.sweep_interest_rates(&[4.0, 6.0, 8.0]);

        assert_eq!(sweep.len(), 3);
        assert_eq!(sweep[0].0, 4.0);

        // Pricier loans mean larger buying outflows
        let outflow = |i: usize| sweep[i].1.as_ref().unwrap().summary().total_buy_cash_outflow;
        assert!(outflow(0) < outflow(1));
        assert!(outflow(1) < outflow(2));
    }

    #[test]
    fn test_failed_scenario_does_not_stop_batch() {
        let runner = ScenarioRunner::default();
        let scenarios = vec![
            Scenario {
                name: "base".to_string(),
                params: BuyRentParameters::default(),
            },
            Scenario {
                name: "broken".to_string(),
                params: BuyRentParameters {
                    simulation_years: 0,
                    ..BuyRentParameters::default()
                },
            },
        ];

        let outcomes = runner.run_scenarios(&scenarios);
        assert!(matches!(outcomes[0].outcome, Outcome::Summary(_)));
        assert!(matches!(outcomes[1].outcome, Outcome::Error(_)));
        assert_eq!(outcomes[1].name, "broken");
    }
}
