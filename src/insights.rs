// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Transaction};
use crate::stats::{expense_totals, percent_of, savings_rate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Aggregates over a trailing window of whole months.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodInsights {
    pub months: u32,
    pub since: NaiveDate,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    pub avg_monthly_income: Decimal,
    pub avg_monthly_expenses: Decimal,
    pub top_category: Option<CategoryTotal>,
    pub transaction_count: usize,
    pub savings_rate: Option<Decimal>,
}

/// First day of a trailing window of `months` months ending `today`.
/// Day-of-month clamps to the end of shorter months (Mar 31 - 1 = Feb 28/29).
pub fn window_start(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Transactions on or after `since`. There is no upper bound, so
/// future-dated entries are kept.
pub fn in_window(transactions: &[Transaction], since: NaiveDate) -> Vec<&Transaction> {
    transactions.iter().filter(|t| t.date >= since).collect()
}

/// Highest total wins; on ties the earliest entry in `totals` wins.
pub fn top_category(totals: &[(String, Decimal)]) -> Option<CategoryTotal> {
    let mut ranked: Vec<&(String, Decimal)> = totals.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.first().map(|(category, total)| CategoryTotal {
        category: category.clone(),
        total: *total,
    })
}

/// Averages divide by the window length in calendar months, not by the
/// number of months that actually hold data.
pub fn period_insights(transactions: &[Transaction], months: u32, today: NaiveDate) -> PeriodInsights {
    let since = window_start(today, months);
    let window = in_window(transactions, since);

    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    for t in &window {
        if t.is_income() {
            total_income = total_income.saturating_add(t.amount);
        } else {
            total_expenses = total_expenses.saturating_add(t.amount);
        }
    }
    let net_income = total_income.saturating_sub(total_expenses);

    let divisor = Decimal::from(months);
    let (avg_monthly_income, avg_monthly_expenses) = if divisor.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (total_income / divisor, total_expenses / divisor)
    };

    let totals = expense_totals(window.iter().copied());

    PeriodInsights {
        months,
        since,
        total_income,
        total_expenses,
        net_income,
        avg_monthly_income,
        avg_monthly_expenses,
        top_category: top_category(&totals),
        transaction_count: window.len(),
        savings_rate: savings_rate(total_income, net_income),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub total: Decimal,
    /// Percent of `reference_total` passed to [`category_breakdown`].
    pub share: Decimal,
    pub transaction_count: usize,
}

/// Expense totals for each known category, largest first.
/// Transactions naming an unknown category are not attributed anywhere.
pub fn category_breakdown<'a, I>(
    transactions: I,
    categories: &[Category],
    reference_total: Decimal,
) -> Vec<CategoryBreakdown>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let expenses: Vec<&Transaction> = transactions.into_iter().filter(|t| t.is_expense()).collect();
    let mut rows: Vec<CategoryBreakdown> = categories
        .iter()
        .map(|category| {
            let mine = expenses.iter().filter(|t| t.category == category.name);
            let (total, count) = mine.fold((Decimal::ZERO, 0usize), |(sum, n), t| {
                (sum.saturating_add(t.amount), n + 1)
            });
            let share = percent_of(total, reference_total).unwrap_or(Decimal::ZERO);
            CategoryBreakdown {
                category: category.clone(),
                total,
                share,
                transaction_count: count,
            }
        })
        .filter(|row| row.total > Decimal::ZERO)
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}
