//! Closed-form monthly payment shared by both engines

use serde::{Deserialize, Serialize};

/// Split of one month's bank payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
}

/// Convert an annual percentage to a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / (12.0 * 100.0)
}

/// Level payment that retires `balance` over `remaining_months` at `rate`
///
/// `rate` is the monthly decimal rate. At zero rate the annuity formula is
/// undefined and the balance is repaid straight-line instead.
pub fn monthly_payment(balance: f64, remaining_months: u32, rate: f64) -> PaymentBreakdown {
    let months = remaining_months as f64;

    if rate == 0.0 {
        return PaymentBreakdown {
            payment: balance / months,
            interest: 0.0,
            principal: balance / months,
        };
    }

    let payment = balance * rate / (1.0 - (1.0 + rate).powf(-months));
    let interest = rate * balance;

    PaymentBreakdown {
        payment,
        interest,
        principal: payment - interest,
    }
}
