//! diagnose a 100,000,000 won mortgage and compare repayment methods
use loan_affordability_rs::{
    compare_repayment_methods, diagnose, format_money, handle_tool_call, DiagnosisConfig,
    IncomeProfile, LoanTerms, Money, Rate,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = DiagnosisConfig::default();

    // 40,000,000 a year, no existing debt, 20 years at 4.5%
    let terms = LoanTerms::from_years(
        Money::from_major(100_000_000),
        Rate::from_percent(dec!(4.5)),
        20,
    )?;
    let income = IncomeProfile::new(Money::from_major(40_000_000), Money::ZERO)?;

    let result = diagnose(&terms, &income, &config)?;
    println!("{}", result.summary_line());
    println!("monthly payment: {}", format_money(result.monthly_payment));
    println!("total interest:  {}", format_money(result.total_interest));
    println!("max loan:        {}", format_money(result.max_loan_amount));
    println!("{}", result.advice(&config));

    println!();
    for row in compare_repayment_methods(terms.principal, terms.annual_rate, terms.months)? {
        println!(
            "{:<24} first month {:>16}  total interest {:>16}",
            row.method.name(),
            format_money(row.first_month_payment),
            format_money(row.total_interest)
        );
    }

    println!();
    for entry in result.balance_schedule()?.downsample(12) {
        println!("month {:>3}: {}", entry.month_index, format_money(entry.remaining_balance));
    }

    // same question as an assistant would send it, amounts in units of 10,000
    let request = r#"{"annual_income": 4000, "existing_monthly_payment": 50, "principal": 10000, "annual_rate_pct": 4.5, "term_years": 20}"#;
    println!();
    println!("{}", handle_tool_call(request, &config)?);

    Ok(())
}
