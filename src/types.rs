use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{AffordabilityError, Result};

/// loan terms under evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub months: u32,
}

impl LoanTerms {
    /// create validated loan terms
    pub fn new(principal: Money, annual_rate: Rate, months: u32) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate,
            months,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// create from a term expressed in whole years
    pub fn from_years(principal: Money, annual_rate: Rate, years: u32) -> Result<Self> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| AffordabilityError::invalid("years", "term too long"))?;
        Self::new(principal, annual_rate, months)
    }

    /// check the preconditions every calculation relies on
    pub fn validate(&self) -> Result<()> {
        validate_loan(self.principal, self.annual_rate, self.months)
    }

    /// monthly rate as a fraction
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }
}

/// longest term any calculation accepts, 100 years
pub const MAX_TERM_MONTHS: u32 = 1_200;

pub(crate) fn validate_loan(principal: Money, annual_rate: Rate, months: u32) -> Result<()> {
    if principal.is_negative() {
        return Err(AffordabilityError::invalid("principal", format!("must not be negative, got {principal}")));
    }
    validate_rate_and_term(annual_rate, months)
}

pub(crate) fn validate_rate_and_term(annual_rate: Rate, months: u32) -> Result<()> {
    if annual_rate.is_negative() {
        return Err(AffordabilityError::invalid("annual_rate", format!("must not be negative, got {annual_rate}")));
    }
    if months == 0 {
        return Err(AffordabilityError::invalid("months", "must be greater than zero"));
    }
    if months > MAX_TERM_MONTHS {
        return Err(AffordabilityError::invalid(
            "months",
            format!("must be at most {MAX_TERM_MONTHS}, got {months}"),
        ));
    }
    Ok(())
}

/// convert a term given as a decimal number of months, rejecting fractions
pub fn months_from_decimal(months: Decimal) -> Result<u32> {
    if months <= Decimal::ZERO {
        return Err(AffordabilityError::invalid("months", format!("must be positive, got {months}")));
    }
    if !months.fract().is_zero() {
        return Err(AffordabilityError::invalid("months", format!("must be a whole number, got {months}")));
    }
    months
        .to_u32()
        .filter(|m| *m <= MAX_TERM_MONTHS)
        .ok_or_else(|| AffordabilityError::invalid("months", format!("too large: {months}")))
}

/// borrower income and existing debt service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub annual_income: Money,
    pub existing_monthly_payment: Money,
}

impl IncomeProfile {
    /// create validated income profile
    pub fn new(annual_income: Money, existing_monthly_payment: Money) -> Result<Self> {
        let profile = Self {
            annual_income,
            existing_monthly_payment,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        validate_income(self.annual_income)?;
        validate_monthly("existing_monthly_payment", self.existing_monthly_payment)
    }
}

pub(crate) fn validate_income(annual_income: Money) -> Result<()> {
    if !annual_income.is_positive() {
        return Err(AffordabilityError::invalid("annual_income", format!("must be positive, got {annual_income}")));
    }
    Ok(())
}

pub(crate) fn validate_monthly(field: &'static str, amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(AffordabilityError::invalid(field, format!("must not be negative, got {amount}")));
    }
    Ok(())
}

/// repayment method, always listed in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentMethod {
    /// equal payment amounts throughout term
    EqualPayment,
    /// equal principal each period, interest on remaining
    EqualPrincipal,
    /// pay interest only, principal at maturity
    InterestOnly,
}

impl RepaymentMethod {
    pub const ALL: [RepaymentMethod; 3] = [
        RepaymentMethod::EqualPayment,
        RepaymentMethod::EqualPrincipal,
        RepaymentMethod::InterestOnly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPayment => "equal payment",
            RepaymentMethod::EqualPrincipal => "equal principal",
            RepaymentMethod::InterestOnly => "interest only (bullet)",
        }
    }
}

/// debt-service ratio band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DsrStatus {
    Safe,
    Caution,
    Danger,
}

impl DsrStatus {
    /// indicator tag shown next to the ratio
    pub fn indicator(&self) -> &'static str {
        match self {
            DsrStatus::Safe => "🟢",
            DsrStatus::Caution => "🟡",
            DsrStatus::Danger => "🔴",
        }
    }

    /// band name
    pub fn name(&self) -> &'static str {
        match self {
            DsrStatus::Safe => "safe",
            DsrStatus::Caution => "caution",
            DsrStatus::Danger => "danger",
        }
    }
}

/// dsr band thresholds, lower bound inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsrThresholds {
    pub caution: Rate,
    pub limit: Rate,
}

impl Default for DsrThresholds {
    fn default() -> Self {
        Self {
            caution: Rate::from_percentage(35),
            limit: Rate::from_percentage(40),
        }
    }
}

/// remaining balance after a given month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month_index: u32,
    pub remaining_balance: Money,
}

impl ScheduleEntry {
    /// balance in whole display units (e.g. 10,000), rounded half to even
    pub fn balance_in_units(&self, unit: Decimal) -> Decimal {
        (self.remaining_balance.as_decimal() / unit).round()
    }
}

/// one row of the repayment method comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub method: RepaymentMethod,
    pub first_month_payment: Money,
    pub total_interest: Money,
    /// total interest minus the equal-payment total; negative means saved
    pub interest_vs_equal_payment: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_terms_validation() {
        let rate = Rate::from_percent(dec!(4.5));
        assert!(LoanTerms::new(Money::from_major(1_000), rate, 12).is_ok());
        assert!(LoanTerms::new(Money::ZERO, Rate::ZERO, 1).is_ok());

        let err = LoanTerms::new(Money::from_major(1_000), rate, 0).unwrap_err();
        assert!(err.is_invalid_input());

        assert!(LoanTerms::new(Money::from_major(-1), rate, 12).is_err());
        assert!(LoanTerms::new(Money::from_major(1_000), Rate::from_percent(dec!(-1)), 12).is_err());
    }

    #[test]
    fn test_from_years() {
        let terms = LoanTerms::from_years(Money::from_major(1_000), Rate::ZERO, 20).unwrap();
        assert_eq!(terms.months, 240);
        assert!(LoanTerms::from_years(Money::from_major(1_000), Rate::ZERO, 0).is_err());

        assert_eq!(
            LoanTerms::from_years(Money::from_major(1_000), Rate::ZERO, 100).unwrap().months,
            MAX_TERM_MONTHS
        );
        let err = LoanTerms::from_years(Money::from_major(1_000), Rate::ZERO, 101).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(LoanTerms::from_years(Money::from_major(1_000), Rate::ZERO, u32::MAX).is_err());
    }

    #[test]
    fn test_months_from_decimal() {
        assert_eq!(months_from_decimal(dec!(240)).unwrap(), 240);
        assert_eq!(months_from_decimal(dec!(12.0)).unwrap(), 12);
        assert!(months_from_decimal(dec!(12.5)).is_err());
        assert!(months_from_decimal(dec!(0)).is_err());
        assert!(months_from_decimal(dec!(-12)).is_err());
        assert_eq!(months_from_decimal(dec!(1200)).unwrap(), MAX_TERM_MONTHS);
        assert!(months_from_decimal(dec!(1201)).is_err());
    }

    #[test]
    fn test_income_profile_validation() {
        assert!(IncomeProfile::new(Money::from_major(40_000_000), Money::ZERO).is_ok());
        assert!(IncomeProfile::new(Money::ZERO, Money::ZERO).is_err());
        assert!(IncomeProfile::new(Money::from_major(1), Money::from_major(-1)).is_err());
    }

    #[test]
    fn test_method_order_is_fixed() {
        assert_eq!(
            RepaymentMethod::ALL,
            [
                RepaymentMethod::EqualPayment,
                RepaymentMethod::EqualPrincipal,
                RepaymentMethod::InterestOnly
            ]
        );
    }

    #[test]
    fn test_balance_in_units() {
        let entry = ScheduleEntry {
            month_index: 3,
            remaining_balance: Money::from_major(98_765_000),
        };
        assert_eq!(entry.balance_in_units(dec!(10000)), dec!(9876));

        let entry = ScheduleEntry {
            month_index: 4,
            remaining_balance: Money::from_major(98_765_001),
        };
        assert_eq!(entry.balance_in_units(dec!(10000)), dec!(9877));
    }
}
