use crate::config::CurrencyLabels;
use crate::decimal::{Money, Rate};
use crate::types::{DsrStatus, DsrThresholds};

const HUNDRED_MILLION: u128 = 100_000_000;
const TEN_THOUSAND: u128 = 10_000;

/// whole currency amount in 10^8 / 10^4 tiers, e.g. 123456789 -> "1억 2,345만 6,789원"
pub fn format_currency(amount: i64) -> String {
    format_currency_with(amount as i128, &CurrencyLabels::default())
}

/// format with custom tier labels; negative amounts keep a leading '-'
pub fn format_currency_with(amount: i128, labels: &CurrencyLabels) -> String {
    let magnitude = amount.unsigned_abs();
    if magnitude == 0 {
        return format!("0{}", labels.unit);
    }

    let tiers = [
        (magnitude / HUNDRED_MILLION, &labels.hundred_million),
        ((magnitude % HUNDRED_MILLION) / TEN_THOUSAND, &labels.ten_thousand),
        (magnitude % TEN_THOUSAND, &labels.unit),
    ];

    let parts: Vec<String> = tiers
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, label)| format!("{}{}", group_thousands(*value), label))
        .collect();

    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}", sign, parts.join(" "))
}

/// money truncated toward zero to whole units, then formatted
pub fn format_money(amount: Money) -> String {
    format_money_with(amount, &CurrencyLabels::default())
}

pub fn format_money_with(amount: Money, labels: &CurrencyLabels) -> String {
    format_currency_with(amount.trunc_whole(), labels)
}

/// ratio as a percentage with one decimal, e.g. "19.0%"
pub fn format_ratio(ratio: Rate) -> String {
    format!("{:.1}%", ratio.as_percentage().round_dp(1))
}

/// classify a debt-service ratio with the default 35% / 40% bands
pub fn classify_ratio(ratio: Rate) -> DsrStatus {
    classify_with(ratio, &DsrThresholds::default())
}

/// classify a debt-service ratio; each band includes its lower bound
pub fn classify_with(ratio: Rate, thresholds: &DsrThresholds) -> DsrStatus {
    if ratio >= thresholds.limit {
        DsrStatus::Danger
    } else if ratio >= thresholds.caution {
        DsrStatus::Caution
    } else {
        DsrStatus::Safe
    }
}

/// advisory message for a classified ratio
pub fn advice(status: DsrStatus, ratio: Rate, limit: Rate) -> String {
    let dsr = format_ratio(ratio);
    match status {
        DsrStatus::Safe => format!(
            "DSR {dsr} is within the {limit} regulatory cap; the loan is likely to pass screening."
        ),
        DsrStatus::Caution => format!(
            "DSR {dsr} is close to the {limit} cap; watch for rate changes."
        ),
        DsrStatus::Danger => format!(
            "DSR {dsr} exceeds the {limit} regulatory cap; repay existing debt or reduce the loan amount."
        ),
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_token() {
        assert_eq!(format_currency(0), "0원");
        assert_eq!(format_money(Money::from_decimal(dec!(0.75))), "0원");
    }

    #[test]
    fn test_three_tiers() {
        assert_eq!(format_currency(123_456_789), "1억 2,345만 6,789원");
    }

    #[test]
    fn test_skips_zero_tiers() {
        assert_eq!(format_currency(100_000_000), "1억");
        assert_eq!(format_currency(100_000_001), "1억 1원");
        assert_eq!(format_currency(50_000), "5만");
        assert_eq!(format_currency(9_999), "9,999원");
        assert_eq!(format_currency(1_234_5678), "1,234만 5,678원");
    }

    #[test]
    fn test_large_amounts_group_hundred_millions() {
        assert_eq!(format_currency(123_456_700_000_000), "1,234,567억");
        assert_eq!(
            format_currency(i64::MAX),
            "92,233,720,368억 5,477만 5,807원"
        );
    }

    #[test]
    fn test_negative_mirrors_sign() {
        assert_eq!(format_currency(-123_456_789), "-1억 2,345만 6,789원");
        assert_eq!(format_currency(i64::MIN), "-92,233,720,368억 5,477만 5,808원");
    }

    #[test]
    fn test_format_money_truncates() {
        let payment = Money::from_decimal(dec!(632649.37621996));
        assert_eq!(format_money(payment), "63만 2,649원");
    }

    #[test]
    fn test_custom_labels() {
        let labels = CurrencyLabels {
            hundred_million: " hundred-million".to_string(),
            ten_thousand: " ten-thousand".to_string(),
            unit: " won".to_string(),
        };
        assert_eq!(
            format_currency_with(100_020_003, &labels),
            "1 hundred-million 2 ten-thousand 3 won"
        );
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Rate::from_percent(dec!(18.979))), "19.0%");
        assert_eq!(format_ratio(Rate::from_percentage(40)), "40.0%");
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify_ratio(Rate::from_percent(dec!(34.999))), DsrStatus::Safe);
        assert_eq!(classify_ratio(Rate::from_percent(dec!(35.0))), DsrStatus::Caution);
        assert_eq!(classify_ratio(Rate::from_percent(dec!(39.999))), DsrStatus::Caution);
        assert_eq!(classify_ratio(Rate::from_percent(dec!(40.0))), DsrStatus::Danger);
        assert_eq!(classify_ratio(Rate::ZERO), DsrStatus::Safe);
        assert_eq!(classify_ratio(Rate::from_percentage(250)), DsrStatus::Danger);
    }

    #[test]
    fn test_band_tags() {
        let status = classify_ratio(Rate::from_percent(dec!(37)));
        assert_eq!((status.indicator(), status.name()), ("🟡", "caution"));
        assert_eq!(DsrStatus::Safe.name(), "safe");
        assert_eq!(DsrStatus::Danger.indicator(), "🔴");
    }

    #[test]
    fn test_advice_mentions_ratio_and_cap() {
        let limit = Rate::from_percentage(40);
        let message = advice(DsrStatus::Danger, Rate::from_percent(dec!(52.34)), limit);
        assert!(message.contains("52.3%"));
        assert!(message.contains("40%"));
    }
}
