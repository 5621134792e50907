//! CSV export of loan schedules and buy-vs-rent simulations
//!
//! One row per month, plus a label/value block for the figures a spreadsheet
//! reader wants next to the schedule.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use log::info;
use serde::Serialize;

use crate::amortization::{LoanSchedule, PurchaseSummary, DEFAULT_CHECKPOINT_MONTHS};
use crate::buy_rent::BuyRentResult;
use crate::error::ExportError;

/// Loan schedule row, with ownership costs when the purchase is known
#[derive(Debug, Serialize)]
struct LoanRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Payment")]
    payment: f64,
    #[serde(rename = "OutstandingPrincipal")]
    outstanding_principal: f64,
}

#[derive(Debug, Serialize)]
struct PurchaseLoanRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "HOA")]
    hoa: f64,
    #[serde(rename = "HomeInsurance")]
    home_insurance: f64,
    #[serde(rename = "PropertyTax")]
    property_tax: f64,
    #[serde(rename = "Maintenance")]
    maintenance: f64,
    #[serde(rename = "Payment")]
    payment: f64,
    #[serde(rename = "MonthlyCommitment")]
    monthly_commitment: f64,
    #[serde(rename = "OutstandingPrincipal")]
    outstanding_principal: f64,
}

#[derive(Debug, Serialize)]
struct BuyRentRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "HomeValue")]
    home_value: f64,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "OutstandingPrincipal")]
    outstanding_principal: f64,
    #[serde(rename = "PropertyTax")]
    property_tax: f64,
    #[serde(rename = "HOA")]
    hoa: f64,
    #[serde(rename = "TaxBreak")]
    tax_break: f64,
    #[serde(rename = "Maintenance")]
    maintenance: f64,
    #[serde(rename = "HomeInsurance")]
    home_insurance: f64,
    #[serde(rename = "BuyCashOutflow")]
    buy_cash_outflow: f64,
    #[serde(rename = "NetWorthBuying")]
    net_worth_buying: f64,
    #[serde(rename = "NetWorthAfterSale")]
    net_worth_buying_after_sale: f64,
    #[serde(rename = "Rent")]
    rent: f64,
    #[serde(rename = "MonthlySavingsRenting")]
    monthly_savings_from_renting: f64,
    #[serde(rename = "NetWorthRenting")]
    net_worth_renting: f64,
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Write a loan schedule followed by its summary block
pub fn write_loan_schedule<W: Write>(
    writer: W,
    schedule: &LoanSchedule,
    purchase: Option<&PurchaseSummary>,
) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    match purchase {
        Some(p) => {
            for r in &schedule.records {
                wtr.serialize(PurchaseLoanRow {
                    month: r.month,
                    interest: r.interest,
                    principal: r.principal,
                    hoa: p.monthly_hoa,
                    home_insurance: p.monthly_home_insurance,
                    property_tax: p.monthly_property_tax,
                    maintenance: p.monthly_maintenance,
                    payment: r.payment,
                    monthly_commitment: r.payment + p.monthly_commitment - p.monthly_bank_payment,
                    outstanding_principal: r.outstanding_principal,
                })?;
            }
        }
        None => {
            for r in &schedule.records {
                wtr.serialize(LoanRow {
                    month: r.month,
                    interest: r.interest,
                    principal: r.principal,
                    payment: r.payment,
                    outstanding_principal: r.outstanding_principal,
                })?;
            }
        }
    }

    // Blank separator, then label/value pairs
    wtr.write_record(None::<&[u8]>)?;

    let summary = schedule.summary();
    let mut block: Vec<(String, String)> = Vec::new();
    if let Some(p) = purchase {
        block.push(("Home Value".into(), money(p.home_value)));
        block.push(("Down Payment".into(), money(p.down_payment)));
    }
    block.push(("Loan Amount".into(), money(summary.loan_amount)));
    block.push(("Total Interest".into(), money(summary.total_interest)));
    if let Some(p) = purchase {
        block.push(("Total Property Tax".into(), money(p.total_property_tax)));
        block.push(("Total Home Insurance".into(), money(p.total_home_insurance)));
        block.push(("Total HOA".into(), money(p.total_hoa)));
        block.push(("Total Maintenance".into(), money(p.total_maintenance)));
        block.push(("Total Payment".into(), money(p.total_payment)));
    } else {
        block.push(("Total Payment".into(), money(summary.total_payments)));
    }
    block.push(("Interest-Loan Ratio".into(), percent(summary.interest_to_loan_ratio)));

    for month in DEFAULT_CHECKPOINT_MONTHS {
        let years = month / 12;
        match summary.checkpoint(month) {
            Some(c) => {
                block.push((format!("{}yr Interest", years), money(c.cumulative_interest)));
                block.push((format!("Int {}yr-Total Ratio", years), percent(c.share_of_total_interest)));
                block.push((format!("Out. Prin. {}yr", years), money(c.outstanding_principal)));
            }
            None => {
                block.push((format!("{}yr Interest", years), "n/a".into()));
                block.push((format!("Int {}yr-Total Ratio", years), "n/a".into()));
                block.push((format!("Out. Prin. {}yr", years), "n/a".into()));
            }
        }
    }

    for (label, value) in &block {
        wtr.write_record([label.as_str(), value.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a buy-vs-rent simulation: purchase header, then one row per month
pub fn write_buy_rent<W: Write>(writer: W, result: &BuyRentResult) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
    let p = &result.params;

    wtr.write_record(["Home Value", money(p.home_value).as_str()])?;
    wtr.write_record(["Down Payment", money(p.down_payment).as_str()])?;
    wtr.write_record(["Loan Amount", money(p.loan_amount()).as_str()])?;
    wtr.write_record(["Rent", money(p.monthly_rent).as_str()])?;
    wtr.write_record(None::<&[u8]>)?;

    for r in &result.records {
        wtr.serialize(BuyRentRow {
            month: r.month,
            home_value: r.home_value,
            interest: r.interest,
            principal: r.principal,
            outstanding_principal: r.outstanding_principal,
            property_tax: r.property_tax,
            hoa: r.hoa,
            tax_break: r.tax_break,
            maintenance: r.maintenance,
            home_insurance: r.home_insurance,
            buy_cash_outflow: r.buy_cash_outflow,
            net_worth_buying: r.net_worth_buying,
            net_worth_buying_after_sale: r.net_worth_buying_after_sale,
            rent: r.rent,
            monthly_savings_from_renting: r.monthly_savings_from_renting,
            net_worth_renting: r.net_worth_renting,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_loan_schedule_to_path(
    path: &Path,
    schedule: &LoanSchedule,
    purchase: Option<&PurchaseSummary>,
) -> Result<(), ExportError> {
    write_loan_schedule(File::create(path)?, schedule, purchase)?;
    info!("Wrote {} months to {}", schedule.len(), path.display());
    Ok(())
}

pub fn write_buy_rent_to_path(path: &Path, result: &BuyRentResult) -> Result<(), ExportError> {
    write_buy_rent(File::create(path)?, result)?;
    info!("Wrote {} months to {}", result.records.len(), path.display());
    Ok(())
}
