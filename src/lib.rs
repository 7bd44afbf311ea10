pub mod affordability;
pub mod amortization;
pub mod config;
pub mod decimal;
pub mod diagnosis;
pub mod errors;
pub mod format;
pub mod tool;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{AffordabilityError, Result};
pub use affordability::{debt_service_ratio, max_loan_amount, max_loan_amount_with_limit};
pub use amortization::{
    balance_schedule, compare_repayment_methods, monthly_payment, total_interest,
    BalanceSchedule, Installment, RepaymentSchedule,
};
pub use config::{CurrencyLabels, DiagnosisConfig, InputLimits, RangeLimit};
pub use diagnosis::{diagnose, DiagnosisResult};
pub use format::{classify_ratio, classify_with, format_currency, format_money, format_ratio};
pub use tool::{handle_tool_call, DiagnosisRequest, DiagnosisResponse};
pub use types::{
    months_from_decimal, ComparisonRow, DsrStatus, DsrThresholds, IncomeProfile, LoanTerms,
    RepaymentMethod, ScheduleEntry, MAX_TERM_MONTHS,
};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
