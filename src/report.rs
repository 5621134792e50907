//! Plain-text reports for the terminal

use std::fmt::{self, Write};

use crate::affordability::AffordabilityGrid;
use crate::amortization::PurchaseSummary;
use crate::buy_rent::BuyRentResult;

/// Ownership cost summary with checkpoints and the cost breakdown
pub fn render_loan_report(summary: &PurchaseSummary) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_loan_report(&mut out, summary);
    out
}

fn write_loan_report(out: &mut String, s: &PurchaseSummary) -> fmt::Result {
    writeln!(out, "Home Purchase Summary")?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "  Home Value:           ${:>14.2}", s.home_value)?;
    writeln!(out, "  Down Payment:         ${:>14.2}", s.down_payment)?;
    writeln!(out, "  Loan Amount:          ${:>14.2}", s.loan_amount)?;
    writeln!(out, "  Loan Type:            {:>15}", format!("{:?}", s.loan_type))?;
    writeln!(out)?;

    writeln!(out, "Monthly:")?;
    writeln!(out, "  Bank Payment:         ${:>14.2}", s.monthly_bank_payment)?;
    writeln!(out, "  Property Tax:         ${:>14.2}", s.monthly_property_tax)?;
    writeln!(out, "  Home Insurance:       ${:>14.2}", s.monthly_home_insurance)?;
    writeln!(out, "  HOA:                  ${:>14.2}", s.monthly_hoa)?;
    writeln!(out, "  Maintenance:          ${:>14.2}", s.monthly_maintenance)?;
    writeln!(out, "  Total Commitment:     ${:>14.2}", s.monthly_commitment)?;
    writeln!(out)?;

    writeln!(out, "Over {} months:", s.term_months)?;
    if s.loan.months_paid < s.term_months {
        writeln!(out, "  Loan retired after {} payments", s.loan.months_paid)?;
    }
    writeln!(out, "  Total Interest:       ${:>14.2}", s.loan.total_interest)?;
    writeln!(out, "  Total Property Tax:   ${:>14.2}", s.total_property_tax)?;
    writeln!(out, "  Total Home Insurance: ${:>14.2}", s.total_home_insurance)?;
    writeln!(out, "  Total HOA:            ${:>14.2}", s.total_hoa)?;
    writeln!(out, "  Total Maintenance:    ${:>14.2}", s.total_maintenance)?;
    writeln!(out, "  Total Payment:        ${:>14.2}", s.total_payment)?;
    writeln!(out, "  Interest/Loan:        {:>14.2}%", s.loan.interest_to_loan_ratio * 100.0)?;
    writeln!(out)?;

    writeln!(out, "Checkpoints:")?;
    for entry in &s.loan.checkpoints {
        let years = entry.month / 12;
        match &entry.figures {
            Some(c) => writeln!(
                out,
                "  Year {:>2}: interest ${:.2} ({:.2}% of total), outstanding ${:.2}",
                years,
                c.cumulative_interest,
                c.share_of_total_interest * 100.0,
                c.outstanding_principal
            )?,
            None => writeln!(out, "  Year {:>2}: n/a (term too short)", years)?,
        }
    }
    writeln!(out)?;

    let breakdown = s.cost_breakdown();
    writeln!(out, "Cost Breakdown:")?;
    for c in &breakdown.components {
        writeln!(out, "  {:<16} ${:>14.2} {:>6.2}%", c.label, c.amount, c.share * 100.0)?;
    }
    writeln!(out, "  {:<16} ${:>14.2}", "Total", breakdown.total)?;

    Ok(())
}

/// Buy-vs-rent outcome; `monthly` adds the full month-by-month table
pub fn render_buy_rent_report(result: &BuyRentResult, monthly: bool) -> String {
    let mut out = String::new();
    let _ = write_buy_rent_report(&mut out, result, monthly);
    out
}

fn write_buy_rent_report(out: &mut String, result: &BuyRentResult, monthly: bool) -> fmt::Result {
    let summary = result.summary();

    if monthly {
        writeln!(
            out,
            "{:>5} {:>12} {:>12} {:>10} {:>10} {:>10} {:>12} {:>14} {:>14}",
            "Month", "HomeValue", "Outstanding", "Interest", "TaxBreak", "Rent", "BuyOutflow", "NW Buying", "NW Renting"
        )?;
        writeln!(out, "{}", "-".repeat(107))?;
        for r in &result.records {
            writeln!(
                out,
                "{:>5} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>10.2} {:>12.2} {:>14.2} {:>14.2}",
                r.month,
                r.home_value,
                r.outstanding_principal,
                r.interest,
                r.tax_break,
                r.rent,
                r.buy_cash_outflow,
                r.net_worth_buying_after_sale,
                r.net_worth_renting,
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Buy vs Rent after {} months", summary.months)?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "  Loan Amount:               ${:>14.2}", summary.loan_amount)?;
    writeln!(out, "  Final Home Value:          ${:>14.2}", summary.final_home_value)?;
    writeln!(out, "  Outstanding Principal:     ${:>14.2}", summary.final_outstanding_principal)?;
    writeln!(out, "  Net Worth Buying:          ${:>14.2}", summary.final_net_worth_buying)?;
    writeln!(out, "  Net Worth Buying (sold):   ${:>14.2}", summary.final_net_worth_buying_after_sale)?;
    writeln!(out, "  Net Worth Renting:         ${:>14.2}", summary.final_net_worth_renting)?;
    writeln!(out, "  Total Buying Outflow:      ${:>14.2}", summary.total_buy_cash_outflow)?;
    writeln!(out, "  Total Rent:                ${:>14.2}", summary.total_rent)?;
    writeln!(out, "  Total Tax Break:           ${:>14.2}", summary.total_tax_break)?;
    writeln!(out)?;

    if summary.renting_advantage > 0.0 {
        writeln!(out, "Renting comes out ahead by ${:.2}", summary.renting_advantage)?;
    } else {
        writeln!(out, "Buying comes out ahead by ${:.2}", -summary.renting_advantage)?;
    }
    match summary.breakeven_month {
        Some(month) => writeln!(out, "Buying overtakes renting from month {}", month)?,
        None => writeln!(out, "Buying never overtakes renting")?,
    }

    Ok(())
}

/// Price-by-rate table; affordable cells are marked with `*`
pub fn render_affordability(grid: &AffordabilityGrid) -> String {
    let mut out = String::new();
    let _ = write_affordability(&mut out, grid);
    out
}

fn write_affordability(out: &mut String, grid: &AffordabilityGrid) -> fmt::Result {
    writeln!(out, "Monthly commitment (budget ${:.2}, * = within budget)", grid.monthly_budget)?;

    write!(out, "{:>12}", "Home Value")?;
    for rate in &grid.rates_percent {
        write!(out, " {:>10}", format!("{:.2}%", rate))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(12 + 11 * grid.rates_percent.len()))?;

    for (row_index, row) in grid.rows.iter().enumerate() {
        write!(out, "{:>12.0}", row.home_value)?;
        for (rate_index, &commitment) in row.monthly_commitment.iter().enumerate() {
            let mark = if grid.is_affordable(row_index, rate_index) { "*" } else { " " };
            write!(out, " {:>9.0}{}", commitment, mark)?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    for (i, rate) in grid.rates_percent.iter().enumerate() {
        match grid.max_affordable_home_value(i) {
            Some(price) => writeln!(out, "  At {:.2}%: up to ${:.0}", rate, price)?,
            None => writeln!(out, "  At {:.2}%: nothing in range", rate)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affordability::AffordabilityQuery;
    use crate::amortization::{HomePurchase, LoanType};
    use crate::buy_rent::{simulate, BuyRentParameters, RateSeries};

    fn purchase(term_years: u32) -> HomePurchase {
        HomePurchase {
            home_value: 600_000.0,
            down_payment: 100_000.0,
            term_years,
            annual_rate_percent: 6.0,
            loan_type: LoanType::Amortizing,
            monthly_hoa: 250.0,
            monthly_maintenance: 150.0,
            property_tax_rate_percent: 1.25,
            extra_principal: 0.0,
        }
    }

    #[test]
    fn test_loan_report() {
        let report = render_loan_report(&purchase(30).analyze().unwrap());

        assert!(report.contains("Bank Payment:         $       2997.75"));
        assert!(report.contains("Year  7: interest $"));
        assert!(report.contains("Year 10: interest $"));
        assert!(report.contains("Home Value"));
        assert!(report.contains("Over 360 months:"));
    }

    #[test]
    fn test_loan_report_early_payoff() {
        let p = HomePurchase {
            extra_principal: 5_000.0,
            ..purchase(30)
        };
        let summary = p.analyze().unwrap();
        let report = render_loan_report(&summary);

        assert!(report.contains("Over 360 months:"));
        assert!(report.contains(&format!("Loan retired after {} payments", summary.loan.months_paid)));
    }

    #[test]
    fn test_loan_report_short_term() {
        let report = render_loan_report(&purchase(5).analyze().unwrap());

        assert!(report.contains("Year  7: n/a"));
        assert!(report.contains("Year 10: n/a"));
    }

    #[test]
    fn test_buy_rent_report() {
        let params = BuyRentParameters {
            simulation_years: 3,
            ..BuyRentParameters::default()
        };
        let result = simulate(&params).unwrap();

        let brief = render_buy_rent_report(&result, false);
        assert!(brief.starts_with("Buy vs Rent after 36 months"));
        assert!(brief.contains("comes out ahead by $"));

        let full = render_buy_rent_report(&result, true);
        assert!(full.starts_with("Month"));
        // Header, rule, 36 months
        assert!(full.lines().count() >= 38 + brief.lines().count());
    }

    #[test]
    fn test_buy_rent_report_names_the_winner() {
        let params = BuyRentParameters {
            simulation_years: 5,
            investment_return: RateSeries::fixed(0.0),
            home_appreciation: RateSeries::fixed(8.0),
            ..BuyRentParameters::default()
        };
        let result = simulate(&params).unwrap();
        let report = render_buy_rent_report(&result, false);

        if result.summary().renting_advantage > 0.0 {
            assert!(report.contains("Renting comes out ahead"));
        } else {
            assert!(report.contains("Buying comes out ahead"));
        }
    }

    #[test]
    fn test_affordability_table() {
        let grid = AffordabilityQuery {
            min_home_value: 400_000.0,
            max_home_value: 600_000.0,
            home_value_step: 100_000.0,
            down_payment: 100_000.0,
            term_years: 30,
            monthly_hoa: 0.0,
            monthly_maintenance: 0.0,
            property_tax_rate_percent: 1.0,
            monthly_budget: 2_500.0,
            rates_percent: vec![3.0, 3.25],
        }
        .evaluate()
        .unwrap();

        let table = render_affordability(&grid);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[1].contains("3.00%"));
        assert!(lines[1].contains("3.25%"));
        assert!(lines[3].trim_start().starts_with("400000"));
        assert!(lines[3].contains('*'));
        assert!(table.contains("At 3.00%: up to $"));

        let marked: usize = lines[3..3 + grid.rows.len()].iter().map(|l| l.matches('*').count()).sum();
        let affordable = (0..grid.rows.len())
            .flat_map(|r| (0..grid.rates_percent.len()).map(move |c| (r, c)))
            .filter(|&(r, c)| grid.is_affordable(r, c))
            .count();
        assert_eq!(marked, affordable);
        assert!(marked < grid.rows.len() * grid.rates_percent.len());
    }
}
