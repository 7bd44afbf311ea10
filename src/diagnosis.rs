use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::affordability::{debt_service_ratio, max_loan_amount_with_limit};
use crate::amortization::{balance_schedule, monthly_payment, total_interest, BalanceSchedule};
use crate::config::DiagnosisConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::format::{advice, classify_with, format_ratio};
use crate::types::{DsrStatus, IncomeProfile, LoanTerms};

/// snapshot produced by one diagnosis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub debt_service_ratio: Rate,
    pub max_loan_amount: Money,
    pub status: DsrStatus,
    pub principal: Money,
    pub annual_rate: Rate,
    pub months: u32,
}

/// run the full affordability check for one borrower and one loan
pub fn diagnose(
    terms: &LoanTerms,
    income: &IncomeProfile,
    config: &DiagnosisConfig,
) -> Result<DiagnosisResult> {
    terms.validate()?;
    income.validate()?;

    let payment = monthly_payment(terms.principal, terms.annual_rate, terms.months)?;
    let interest = total_interest(terms.principal, terms.annual_rate, terms.months)?;
    let dsr = debt_service_ratio(income.annual_income, income.existing_monthly_payment, payment)?;
    let max_loan = max_loan_amount_with_limit(
        income.annual_income,
        income.existing_monthly_payment,
        terms.annual_rate,
        terms.months,
        config.thresholds.limit,
    )?;
    let status = classify_with(dsr, &config.thresholds);

    debug!(
        "diagnosis: principal {} at {} over {} months -> payment {}, dsr {} ({}), max loan {}",
        terms.principal,
        terms.annual_rate,
        terms.months,
        payment,
        format_ratio(dsr),
        status.name(),
        max_loan
    );

    Ok(DiagnosisResult {
        monthly_payment: payment,
        total_interest: interest,
        debt_service_ratio: dsr,
        max_loan_amount: max_loan,
        status,
        principal: terms.principal,
        annual_rate: terms.annual_rate,
        months: terms.months,
    })
}

impl DiagnosisResult {
    /// dsr as a percentage
    pub fn dsr_percentage(&self) -> Decimal {
        self.debt_service_ratio.as_percentage()
    }

    /// the loan terms this result was computed for
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            annual_rate: self.annual_rate,
            months: self.months,
        }
    }

    /// balance over time for the diagnosed loan under equal payments
    pub fn balance_schedule(&self) -> Result<BalanceSchedule> {
        balance_schedule(self.principal, self.annual_rate, self.months, self.monthly_payment)
    }

    /// one-line status, e.g. "DSR 🟢 19.0% (safe)"
    pub fn summary_line(&self) -> String {
        format!(
            "DSR {} {} ({})",
            self.status.indicator(),
            format_ratio(self.debt_service_ratio),
            self.status.name()
        )
    }

    /// advisory message against the configured cap
    pub fn advice(&self, config: &DiagnosisConfig) -> String {
        advice(self.status, self.debt_service_ratio, config.thresholds.limit)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
