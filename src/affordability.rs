use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::amortization::compound_factor;
use crate::decimal::{Money, Rate};
use crate::errors::{AffordabilityError, Result};
use crate::types::{validate_income, validate_monthly, validate_rate_and_term, DsrThresholds};

/// debt-service ratio: annual debt payments over annual income
pub fn debt_service_ratio(
    annual_income: Money,
    existing_monthly: Money,
    new_monthly: Money,
) -> Result<Rate> {
    validate_income(annual_income)?;
    validate_monthly("existing_monthly", existing_monthly)?;
    validate_monthly("new_monthly", new_monthly)?;

    let annual_payments = (existing_monthly + new_monthly).as_decimal() * dec!(12);
    Ok(Rate::from_decimal(annual_payments / annual_income.as_decimal()))
}

/// largest principal keeping the dsr at the default regulatory cap
pub fn max_loan_amount(
    annual_income: Money,
    existing_monthly: Money,
    annual_rate: Rate,
    months: u32,
) -> Result<Money> {
    max_loan_amount_with_limit(
        annual_income,
        existing_monthly,
        annual_rate,
        months,
        DsrThresholds::default().limit,
    )
}

/// largest principal keeping the dsr at exactly `limit`; zero when already at or over it
pub fn max_loan_amount_with_limit(
    annual_income: Money,
    existing_monthly: Money,
    annual_rate: Rate,
    months: u32,
    limit: Rate,
) -> Result<Money> {
    validate_income(annual_income)?;
    validate_monthly("existing_monthly", existing_monthly)?;
    validate_rate_and_term(annual_rate, months)?;
    if limit.is_negative() {
        return Err(AffordabilityError::invalid("limit", format!("must not be negative, got {limit}")));
    }

    let max_monthly = annual_income.apply_rate(limit) / dec!(12) - existing_monthly;
    if !max_monthly.is_positive() {
        return Ok(Money::ZERO);
    }

    let r = annual_rate.monthly_rate().as_decimal();
    if r.is_zero() {
        return Ok(max_monthly * Decimal::from(months));
    }

    // principal = M * ((1 + r)^n - 1) / (r * (1 + r)^n)
    let compound = compound_factor(r, months)?;
    let growth = compound - Decimal::ONE;
    if growth.is_zero() {
        return Ok(max_monthly * Decimal::from(months));
    }

    let principal = max_monthly
        .as_decimal()
        .checked_mul(growth)
        .and_then(|x| r.checked_mul(compound).and_then(|d| x.checked_div(d)))
        .ok_or_else(|| AffordabilityError::invalid("annual_rate", "compounding overflows for this income, rate and term"))?;

    Ok(Money::from_decimal(principal))
}
