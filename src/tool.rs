//! json request/response boundary for invoking the calculator as a tool
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::compare_repayment_methods;
use crate::config::DiagnosisConfig;
use crate::decimal::{Money, Rate};
use crate::diagnosis::{diagnose, DiagnosisResult};
use crate::errors::Result;
use crate::format::{format_money_with, format_ratio};
use crate::types::{ComparisonRow, IncomeProfile, LoanTerms, RepaymentMethod};

/// diagnosis request, amounts in the configured input unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub annual_income: Decimal,
    #[serde(default)]
    pub existing_monthly_payment: Decimal,
    pub principal: Decimal,
    pub annual_rate_pct: Decimal,
    pub term_years: u32,
    /// reject values outside the configured input ranges
    #[serde(default)]
    pub enforce_input_limits: bool,
}

impl DiagnosisRequest {
    /// scale to base currency units and build validated inputs
    pub fn to_inputs(&self, config: &DiagnosisConfig) -> Result<(LoanTerms, IncomeProfile)> {
        if self.enforce_input_limits {
            config.limits.check(
                self.annual_income,
                self.existing_monthly_payment,
                self.principal,
                self.annual_rate_pct,
                self.term_years,
            )?;
        }

        let unit = config.input_unit;
        let terms = LoanTerms::from_years(
            Money::from_units(self.principal, unit),
            Rate::from_percent(self.annual_rate_pct),
            self.term_years,
        )?;
        let income = IncomeProfile::new(
            Money::from_units(self.annual_income, unit),
            Money::from_units(self.existing_monthly_payment, unit),
        )?;

        Ok((terms, income))
    }
}

/// formatted strings for direct display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisDisplay {
    pub dsr: String,
    pub indicator: String,
    pub status: String,
    pub monthly_payment: String,
    pub total_interest: String,
    pub max_loan_amount: String,
    pub advice: String,
}

/// comparison row with formatted columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonView {
    #[serde(flatten)]
    pub row: ComparisonRow,
    pub method_name: String,
    pub first_month_payment_display: String,
    pub total_interest_display: String,
    pub difference_display: String,
}

/// balance point in input units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub month_index: u32,
    pub balance_units: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    pub diagnosis: DiagnosisResult,
    pub display: DiagnosisDisplay,
    pub comparison: Vec<ComparisonView>,
    pub balance_points: Vec<BalancePoint>,
}

/// answer a typed request
pub fn respond(request: &DiagnosisRequest, config: &DiagnosisConfig) -> Result<DiagnosisResponse> {
    let (terms, income) = request.to_inputs(config)?;
    let result = diagnose(&terms, &income, config)?;

    let labels = &config.currency;
    let display = DiagnosisDisplay {
        dsr: format_ratio(result.debt_service_ratio),
        indicator: result.status.indicator().to_string(),
        status: result.status.name().to_string(),
        monthly_payment: format_money_with(result.monthly_payment, labels),
        total_interest: format_money_with(result.total_interest, labels),
        max_loan_amount: format_money_with(result.max_loan_amount, labels),
        advice: result.advice(config),
    };

    let comparison = compare_repayment_methods(terms.principal, terms.annual_rate, terms.months)?
        .into_iter()
        .map(|row| ComparisonView {
            row,
            method_name: row.method.name().to_string(),
            first_month_payment_display: format_money_with(row.first_month_payment, labels),
            total_interest_display: format_money_with(row.total_interest, labels),
            difference_display: difference_display(&row, config),
        })
        .collect();

    let balance_points = result
        .balance_schedule()?
        .downsample(config.max_chart_points)
        .into_iter()
        .map(|entry| BalancePoint {
            month_index: entry.month_index,
            balance_units: entry.balance_in_units(config.input_unit),
        })
        .collect();

    Ok(DiagnosisResponse {
        diagnosis: result,
        display,
        comparison,
        balance_points,
    })
}

/// parse a json request, run it, and render the json response
pub fn handle_tool_call(request_json: &str, config: &DiagnosisConfig) -> Result<String> {
    config.validate()?;

    let request: DiagnosisRequest = serde_json::from_str(request_json)?;
    debug!("tool call: {:?}", request);

    let response = respond(&request, config).map_err(|e| {
        warn!("tool call rejected: {}", e);
        e
    })?;

    Ok(serde_json::to_string(&response)?)
}

fn difference_display(row: &ComparisonRow, config: &DiagnosisConfig) -> String {
    let difference = row.interest_vs_equal_payment;
    if row.method == RepaymentMethod::EqualPayment {
        "-".to_string()
    } else if difference.is_negative() {
        format!("{} saved", format_money_with(difference.abs(), &config.currency))
    } else {
        format!("{} extra", format_money_with(difference, &config.currency))
    }
}
