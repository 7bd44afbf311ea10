pub mod comparison;
pub mod schedule;

use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{AffordabilityError, Result};
use crate::types::validate_loan;

pub use comparison::compare_repayment_methods;
pub use schedule::{balance_schedule, BalanceSchedule, Installment, RepaymentSchedule};

/// equal-payment (annuity) monthly installment
pub fn monthly_payment(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    validate_loan(principal, annual_rate, months)?;

    let r = annual_rate.monthly_rate().as_decimal();
    if r.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    // payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let compound = compound_factor(r, months)?;
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        // rate too small to register over this term
        return Ok(principal / Decimal::from(months));
    }

    let numerator = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|x| x.checked_mul(compound))
        .ok_or_else(|| AffordabilityError::invalid("principal", "too large for this rate and term"))?;

    Ok(Money::from_decimal(numerator / denominator))
}

/// total interest paid over the term under equal payments
pub fn total_interest(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    let payment = monthly_payment(principal, annual_rate, months)?;
    Ok(payment * Decimal::from(months) - principal)
}

/// (1 + r)^n by repeated multiplication
pub(crate) fn compound_factor(monthly_rate: Decimal, months: u32) -> Result<Decimal> {
    let base = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        compound = compound
            .checked_mul(base)
            .ok_or_else(|| AffordabilityError::invalid("months", "compounding overflows for this rate and term"))?;
    }
    Ok(compound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_mortgage_payment() {
        // 100,000,000 at 4.5% over 20 years
        let payment = monthly_payment(
            Money::from_major(100_000_000),
            Rate::from_percent(dec!(4.5)),
            240,
        )
        .unwrap();

        assert_eq!(payment.trunc_whole(), 632_649);
        assert_eq!(payment.round_dp(2), Money::from_decimal(dec!(632649.38)));
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        let principal = Money::from_major(100_000_000);
        let payment = monthly_payment(principal, Rate::ZERO, 240).unwrap();
        assert_eq!(payment, principal / Decimal::from(240));

        let interest = total_interest(principal, Rate::ZERO, 240).unwrap();
        assert!(interest.abs() < Money::from_decimal(dec!(0.00001)));
    }

    #[test]
    fn test_interest_identity() {
        let cases = [
            (Money::from_major(1_000_000), dec!(0.1), 60),
            (Money::from_major(50_000_000), dec!(7.25), 120),
            (Money::from_major(5_000_000_000), dec!(30.0), 360),
            (Money::from_major(3_000_000), dec!(0), 12),
        ];

        for (principal, pct, months) in cases {
            let rate = Rate::from_percent(pct);
            let payment = monthly_payment(principal, rate, months).unwrap();
            let interest = total_interest(principal, rate, months).unwrap();
            assert_eq!(payment * Decimal::from(months) - principal, interest);
        }
    }

    #[test]
    fn test_single_month_repays_principal_plus_interest() {
        let payment = monthly_payment(Money::from_major(1_200), Rate::from_percentage(12), 1).unwrap();
        assert_eq!(payment, Money::from_major(1_212));
    }

    #[test]
    fn test_rejects_invalid_input() {
        let rate = Rate::from_percent(dec!(4.5));

        let err = monthly_payment(Money::from_major(1_000), rate, 0).unwrap_err();
        assert!(err.is_invalid_input());

        assert!(monthly_payment(Money::from_major(-1), rate, 12).is_err());
        assert!(monthly_payment(Money::from_major(1_000), Rate::from_percent(dec!(-0.5)), 12).is_err());
        assert!(total_interest(Money::from_major(1_000), rate, 0).is_err());
    }

    #[test]
    fn test_compound_factor_overflow_is_reported() {
        let err = compound_factor(dec!(1), 200).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
