// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::insights::{top_category, CategoryTotal};
use crate::models::{MonthKey, Transaction};

/// Income/expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub month: MonthKey,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    /// Expense totals keyed by the literal category string of each transaction.
    pub category_spending: BTreeMap<String, Decimal>,
    /// Largest spending category; ties go to the one spent in first.
    pub top_category: Option<CategoryTotal>,
    pub transaction_count: usize,
}

impl MonthlyStats {
    pub fn savings_rate(&self) -> Option<Decimal> {
        savings_rate(self.total_income, self.net_income)
    }
}

pub fn monthly_stats(transactions: &[Transaction], month: MonthKey) -> MonthlyStats {
    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.month() == month)
        .collect();

    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut category_spending: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in &in_month {
        if t.is_income() {
            total_income = total_income.saturating_add(t.amount);
        } else {
            total_expenses = total_expenses.saturating_add(t.amount);
            let slot = category_spending
                .entry(t.category.clone())
                .or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(t.amount);
        }
    }
    let totals = expense_totals(in_month.iter().copied());

    MonthlyStats {
        month,
        total_income,
        total_expenses,
        net_income: total_income.saturating_sub(total_expenses),
        category_spending,
        top_category: top_category(&totals),
        transaction_count: in_month.len(),
    }
}

/// `part` as a percentage of `whole`. `None` when `whole` is not positive
/// or the ratio does not fit in a `Decimal`.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole <= Decimal::ZERO {
        return None;
    }
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// Share of income kept, in percent. `None` when there was no income.
pub fn savings_rate(total_income: Decimal, net_income: Decimal) -> Option<Decimal> {
    percent_of(net_income, total_income)
}

/// Expense totals per category name, in order of first appearance.
pub(crate) fn expense_totals<'a, I>(transactions: I) -> Vec<(String, Decimal)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for t in transactions.into_iter().filter(|t| t.is_expense()) {
        match index.get(t.category.as_str()) {
            Some(&i) => totals[i].1 = totals[i].1.saturating_add(t.amount),
            None => {
                index.insert(t.category.as_str(), totals.len());
                totals.push((t.category.clone(), t.amount));
            }
        }
    }
    totals
}

/// The `limit` most recent transactions, newest first.
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    sorted.truncate(limit);
    sorted
}
