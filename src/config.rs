use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{AffordabilityError, Result};
use crate::types::DsrThresholds;

/// diagnosis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    pub thresholds: DsrThresholds,
    /// cap on balance points handed to a chart
    pub max_chart_points: usize,
    /// multiplier from input/display units to base currency units
    pub input_unit: Decimal,
    pub currency: CurrencyLabels,
    pub limits: InputLimits,
}

/// labels for the 10^8 / 10^4 / 1 currency tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyLabels {
    pub hundred_million: String,
    pub ten_thousand: String,
    pub unit: String,
}

impl Default for CurrencyLabels {
    fn default() -> Self {
        Self {
            hundred_million: "억".to_string(),
            ten_thousand: "만".to_string(),
            unit: "원".to_string(),
        }
    }
}

/// inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeLimit {
    pub min: Decimal,
    pub max: Decimal,
}

impl RangeLimit {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }

    /// error naming `field` when `value` falls outside the range
    pub fn check(&self, field: &'static str, value: Decimal) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(AffordabilityError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// advisory input ranges for a presentation layer, amounts in input units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    pub annual_income: RangeLimit,
    pub existing_monthly_payment: RangeLimit,
    pub principal: RangeLimit,
    pub annual_rate_pct: RangeLimit,
    pub term_years: Vec<u32>,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            annual_income: RangeLimit::new(dec!(100), dec!(100000)),
            existing_monthly_payment: RangeLimit::new(dec!(0), dec!(5000)),
            principal: RangeLimit::new(dec!(100), dec!(500000)),
            annual_rate_pct: RangeLimit::new(dec!(0.1), dec!(30.0)),
            term_years: vec![5, 10, 15, 20, 25, 30],
        }
    }
}

impl InputLimits {
    /// check raw inputs, amounts in input units and rate in percent
    pub fn check(
        &self,
        annual_income: Decimal,
        existing_monthly_payment: Decimal,
        principal: Decimal,
        annual_rate_pct: Decimal,
        term_years: u32,
    ) -> Result<()> {
        self.annual_income.check("annual_income", annual_income)?;
        self.existing_monthly_payment
            .check("existing_monthly_payment", existing_monthly_payment)?;
        self.principal.check("principal", principal)?;
        self.annual_rate_pct.check("annual_rate_pct", annual_rate_pct)?;

        if !self.term_years.contains(&term_years) {
            return Err(AffordabilityError::invalid(
                "term_years",
                format!("must be one of {:?}, got {}", self.term_years, term_years),
            ));
        }

        Ok(())
    }
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self::korean_retail()
    }
}

impl DiagnosisConfig {
    /// 40% dsr cap, amounts entered in units of 10,000 won
    pub fn korean_retail() -> Self {
        Self {
            thresholds: DsrThresholds::default(),
            max_chart_points: 60,
            input_unit: dec!(10000),
            currency: CurrencyLabels::default(),
            limits: InputLimits::default(),
        }
    }

    /// same configuration with a different regulatory cap
    pub fn with_limit(mut self, limit: Rate) -> Self {
        self.thresholds.limit = limit;
        self
    }

    /// validate configuration
    pub fn validate(&self) -> Result<()> {
        let DsrThresholds { caution, limit } = self.thresholds;

        if caution.is_negative() {
            return Err(AffordabilityError::InvalidConfiguration {
                message: format!("caution threshold must not be negative, got {caution}"),
            });
        }
        if caution > limit {
            return Err(AffordabilityError::InvalidConfiguration {
                message: format!("caution threshold {caution} above limit {limit}"),
            });
        }
        if limit.is_zero() || limit > Rate::ONE {
            return Err(AffordabilityError::InvalidConfiguration {
                message: format!("dsr limit must be within (0%, 100%], got {limit}"),
            });
        }
        if self.max_chart_points == 0 {
            return Err(AffordabilityError::InvalidConfiguration {
                message: "max_chart_points must be at least 1".to_string(),
            });
        }
        if self.input_unit <= Decimal::ZERO {
            return Err(AffordabilityError::InvalidConfiguration {
                message: format!("input_unit must be positive, got {}", self.input_unit),
            });
        }

        let ranges = [
            ("annual_income", self.limits.annual_income),
            ("existing_monthly_payment", self.limits.existing_monthly_payment),
            ("principal", self.limits.principal),
            ("annual_rate_pct", self.limits.annual_rate_pct),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(AffordabilityError::InvalidConfiguration {
                    message: format!("{name} range is empty: {}..={}", range.min, range.max),
                });
            }
        }
        if self.limits.term_years.is_empty() || self.limits.term_years.contains(&0) {
            return Err(AffordabilityError::InvalidConfiguration {
                message: "term_years must list at least one positive term".to_string(),
            });
        }

        Ok(())
    }

    /// parse and validate a json configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
