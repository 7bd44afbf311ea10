use rust_decimal::Decimal;

use crate::amortization::{monthly_payment, total_interest};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{validate_loan, ComparisonRow, RepaymentMethod};

/// first-month payment and total interest for each repayment method, in fixed method order
pub fn compare_repayment_methods(
    principal: Money,
    annual_rate: Rate,
    months: u32,
) -> Result<[ComparisonRow; 3]> {
    validate_loan(principal, annual_rate, months)?;

    let monthly_rate = annual_rate.monthly_rate();

    let equal_payment = (
        monthly_payment(principal, annual_rate, months)?,
        total_interest(principal, annual_rate, months)?,
    );

    // interest on the balance left after i equal principal slices
    let principal_slice = principal / Decimal::from(months);
    let equal_principal = (
        principal_slice + principal.apply_rate(monthly_rate),
        (0..months)
            .map(|i| (principal - principal_slice * Decimal::from(i)).apply_rate(monthly_rate))
            .sum::<Money>(),
    );

    let interest_only = (
        principal.apply_rate(monthly_rate),
        Money::from_decimal(principal.as_decimal() * monthly_rate.as_decimal() * Decimal::from(months)),
    );

    let baseline = equal_payment.1;
    let row = |method, (first_month_payment, interest): (Money, Money)| ComparisonRow {
        method,
        first_month_payment,
        total_interest: interest,
        interest_vs_equal_payment: interest - baseline,
    };

    Ok([
        row(RepaymentMethod::EqualPayment, equal_payment),
        row(RepaymentMethod::EqualPrincipal, equal_principal),
        row(RepaymentMethod::InterestOnly, interest_only),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::RepaymentSchedule;
    use crate::types::LoanTerms;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_comparison() {
        let rows = compare_repayment_methods(
            Money::from_major(100_000_000),
            Rate::from_percent(dec!(4.5)),
            240,
        )
        .unwrap();

        let methods: Vec<_> = rows.iter().map(|r| r.method).collect();
        assert_eq!(methods, RepaymentMethod::ALL.to_vec());

        assert_eq!(rows[0].first_month_payment.trunc_whole(), 632_649);
        assert_eq!(rows[0].interest_vs_equal_payment, Money::ZERO);

        // 100,000,000 / 240 + 375,000
        assert_eq!(rows[1].first_month_payment.round_dp(2), Money::from_decimal(dec!(791666.67)));
        // P * r * (n + 1) / 2
        assert!((rows[1].total_interest - Money::from_major(45_187_500)).abs() < Money::ONE);
        assert!(rows[1].interest_vs_equal_payment.is_negative());

        assert_eq!(rows[2].first_month_payment, Money::from_major(375_000));
        assert_eq!(rows[2].total_interest, Money::from_major(90_000_000));
        assert!(rows[2].interest_vs_equal_payment.is_positive());
    }

    #[test]
    fn test_interest_ordering() {
        let cases = [
            (Money::from_major(10_000_000), dec!(0.1), 2),
            (Money::from_major(10_000_000), dec!(3.9), 60),
            (Money::from_major(500_000_000), dec!(12.0), 180),
            (Money::from_major(1_000_000_000), dec!(30.0), 360),
        ];

        for (principal, pct, months) in cases {
            let rows = compare_repayment_methods(principal, Rate::from_percent(pct), months).unwrap();
            assert!(rows[1].total_interest <= rows[0].total_interest);
            assert!(rows[0].total_interest <= rows[2].total_interest);
        }
    }

    #[test]
    fn test_zero_rate_comparison() {
        let rows = compare_repayment_methods(Money::from_major(1_200_000), Rate::ZERO, 12).unwrap();

        assert_eq!(rows[0].first_month_payment, Money::from_major(100_000));
        assert_eq!(rows[1].first_month_payment, Money::from_major(100_000));
        assert_eq!(rows[2].first_month_payment, Money::ZERO);
        for row in &rows {
            assert_eq!(row.total_interest, Money::ZERO);
        }
    }

    #[test]
    fn test_matches_full_schedules() {
        let terms = LoanTerms::from_years(Money::from_major(30_000_000), Rate::from_percent(dec!(5.2)), 10).unwrap();
        let rows = compare_repayment_methods(terms.principal, terms.annual_rate, terms.months).unwrap();

        for row in &rows {
            let schedule = RepaymentSchedule::generate(&terms, row.method).unwrap();
            assert!((schedule.total_interest - row.total_interest).abs() < Money::ONE);
            assert_eq!(schedule.get_installment(1).unwrap().payment_amount, row.first_month_payment);
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(compare_repayment_methods(Money::from_major(1_000), Rate::ZERO, 0).is_err());
        assert!(compare_repayment_methods(Money::from_major(-1), Rate::ZERO, 12).is_err());

        // terms past the ceiling are refused before any per-month work
        let err = compare_repayment_methods(Money::from_major(100_000_000), Rate::ZERO, u32::MAX).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
