use log::trace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::monthly_payment;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{validate_loan, validate_monthly, LoanTerms, RepaymentMethod, ScheduleEntry};

/// remaining balance month by month under a fixed monthly payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSchedule {
    pub monthly_payment: Money,
    pub entries: Vec<ScheduleEntry>,
}

/// generate the balance schedule, entry 0 through entry `months`
pub fn balance_schedule(
    principal: Money,
    annual_rate: Rate,
    months: u32,
    monthly_payment: Money,
) -> Result<BalanceSchedule> {
    validate_loan(principal, annual_rate, months)?;
    validate_monthly("monthly_payment", monthly_payment)?;

    let monthly_rate = annual_rate.monthly_rate();
    let mut entries = Vec::with_capacity(months as usize + 1);
    let mut balance = principal;

    entries.push(ScheduleEntry {
        month_index: 0,
        remaining_balance: balance,
    });

    for month_index in 1..=months {
        let interest_portion = balance.apply_rate(monthly_rate);
        let principal_portion = monthly_payment - interest_portion;
        balance -= principal_portion;

        entries.push(ScheduleEntry {
            month_index,
            remaining_balance: balance,
        });
    }

    trace!(
        "balance schedule: {} months, payment {}, final balance {}",
        months,
        monthly_payment,
        balance
    );

    Ok(BalanceSchedule {
        monthly_payment,
        entries,
    })
}

impl BalanceSchedule {
    /// number of months covered (entries minus the opening balance)
    pub fn months(&self) -> u32 {
        self.entries.len().saturating_sub(1) as u32
    }

    /// balance after the last month
    pub fn final_balance(&self) -> Money {
        self.entries
            .last()
            .map(|e| e.remaining_balance)
            .unwrap_or(Money::ZERO)
    }

    /// balance after a given month
    pub fn balance_at(&self, month_index: u32) -> Option<Money> {
        self.entries
            .get(month_index as usize)
            .map(|e| e.remaining_balance)
    }

    /// every k-th entry with k = max(1, months / max_points), always starting at month 0
    pub fn downsample(&self, max_points: usize) -> Vec<ScheduleEntry> {
        let step = (self.months() as usize / max_points.max(1)).max(1);
        self.entries.iter().step_by(step).copied().collect()
    }
}

/// one installment of a full repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub number: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// full repayment schedule for one method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub terms: LoanTerms,
    pub method: RepaymentMethod,
    pub installments: Vec<Installment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl RepaymentSchedule {
    /// generate installment table
    pub fn generate(terms: &LoanTerms, method: RepaymentMethod) -> Result<Self> {
        terms.validate()?;

        let installments = match method {
            RepaymentMethod::EqualPayment => equal_payment_installments(terms)?,
            RepaymentMethod::EqualPrincipal => equal_principal_installments(terms),
            RepaymentMethod::InterestOnly => interest_only_installments(terms),
        };

        let total_interest = installments.iter().map(|p| p.interest_portion).sum();
        let total_payment = installments.iter().map(|p| p.payment_amount).sum();

        Ok(Self {
            terms: *terms,
            method,
            installments,
            total_interest,
            total_payment,
        })
    }

    /// get installment by its 1-based number
    pub fn get_installment(&self, number: u32) -> Option<&Installment> {
        let index = number.checked_sub(1)?;
        self.installments.get(index as usize)
    }

    /// remaining balance after an installment; the principal before the first
    pub fn balance_after(&self, number: u32) -> Money {
        self.get_installment(number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.terms.principal)
    }

    /// balance schedule view, entry 0 through the last installment
    pub fn balances(&self) -> Vec<ScheduleEntry> {
        std::iter::once(ScheduleEntry {
            month_index: 0,
            remaining_balance: self.terms.principal,
        })
        .chain(self.installments.iter().map(|p| ScheduleEntry {
            month_index: p.number,
            remaining_balance: p.ending_balance,
        }))
        .collect()
    }
}

fn equal_payment_installments(terms: &LoanTerms) -> Result<Vec<Installment>> {
    let monthly_rate = terms.monthly_rate();
    let payment = monthly_payment(terms.principal, terms.annual_rate, terms.months)?;

    let mut installments = Vec::with_capacity(terms.months as usize);
    let mut balance = terms.principal;
    let mut cumulative_interest = Money::ZERO;
    let mut cumulative_principal = Money::ZERO;

    for number in 1..=terms.months {
        let interest_portion = balance.apply_rate(monthly_rate);
        let mut principal_portion = payment - interest_portion;
        let mut payment_amount = payment;

        // an overshoot on the last step only pays off what is left
        if principal_portion > balance {
            principal_portion = balance;
            payment_amount = interest_portion + balance;
        }

        cumulative_interest += interest_portion;
        cumulative_principal += principal_portion;

        let ending_balance = balance - principal_portion;

        installments.push(Installment {
            number,
            beginning_balance: balance,
            payment_amount,
            principal_portion,
            interest_portion,
            ending_balance,
            cumulative_interest,
            cumulative_principal,
        });

        balance = ending_balance;
    }

    // fold rounding residue into the last installment
    if let Some(last) = installments.last_mut() {
        if last.ending_balance > Money::ZERO && last.ending_balance < Money::ONE {
            last.principal_portion += last.ending_balance;
            last.payment_amount += last.ending_balance;
            last.cumulative_principal += last.ending_balance;
            last.ending_balance = Money::ZERO;
        }
    }

    Ok(installments)
}

fn equal_principal_installments(terms: &LoanTerms) -> Vec<Installment> {
    let monthly_rate = terms.monthly_rate();
    let principal_slice = terms.principal / Decimal::from(terms.months);

    let mut installments = Vec::with_capacity(terms.months as usize);
    let mut balance = terms.principal;
    let mut cumulative_interest = Money::ZERO;
    let mut cumulative_principal = Money::ZERO;

    for number in 1..=terms.months {
        let interest_portion = balance.apply_rate(monthly_rate);
        // the last slice clears whatever the per-month division left behind
        let principal_portion = if number == terms.months {
            balance
        } else {
            principal_slice.min(balance)
        };
        let payment_amount = principal_portion + interest_portion;

        cumulative_interest += interest_portion;
        cumulative_principal += principal_portion;

        let ending_balance = balance - principal_portion;

        installments.push(Installment {
            number,
            beginning_balance: balance,
            payment_amount,
            principal_portion,
            interest_portion,
            ending_balance,
            cumulative_interest,
            cumulative_principal,
        });

        balance = ending_balance;
    }

    installments
}

fn interest_only_installments(terms: &LoanTerms) -> Vec<Installment> {
    let principal = terms.principal;
    let interest_payment = principal.apply_rate(terms.monthly_rate());

    let mut installments = Vec::with_capacity(terms.months as usize);
    let mut cumulative_interest = Money::ZERO;

    for number in 1..=terms.months {
        let is_last = number == terms.months;

        cumulative_interest += interest_payment;

        let (payment_amount, principal_portion, ending_balance) = if is_last {
            // balloon
            (interest_payment + principal, principal, Money::ZERO)
        } else {
            (interest_payment, Money::ZERO, principal)
        };

        installments.push(Installment {
            number,
            beginning_balance: principal,
            payment_amount,
            principal_portion,
            interest_portion: interest_payment,
            ending_balance,
            cumulative_interest,
            cumulative_principal: principal_portion,
        });
    }

    installments
}
