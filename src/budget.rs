// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Budget, Category, MonthKey, Transaction};
use crate::resolve::find_budget;
use crate::stats::{monthly_stats, percent_of};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgressItem {
    pub category: Category,
    pub budget: Option<Budget>,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub is_over_budget: bool,
}

impl BudgetProgressItem {
    fn compute(category: &Category, budget: Option<&Budget>, spent: Decimal) -> Self {
        let (remaining, percentage, is_over_budget) = match budget {
            Some(b) => {
                let limit = b.monthly_limit;
                let pct = if limit > Decimal::ZERO {
                    percent_of(spent, limit).unwrap_or(Decimal::MAX)
                } else {
                    Decimal::ZERO
                };
                (limit.saturating_sub(spent).max(Decimal::ZERO), pct, spent > limit)
            }
            None => (Decimal::ZERO, Decimal::ZERO, false),
        };
        Self {
            category: category.clone(),
            budget: budget.cloned(),
            spent,
            remaining,
            percentage,
            is_over_budget,
        }
    }
}

/// Spend against budget for every category that either has a budget in
/// `month` or spent something in it. Categories keep collection order.
pub fn budget_progress(
    transactions: &[Transaction],
    categories: &[Category],
    budgets: &[Budget],
    month: MonthKey,
) -> Vec<BudgetProgressItem> {
    let stats = monthly_stats(transactions, month);
    categories
        .iter()
        .map(|category| {
            let budget = find_budget(budgets, category.id, month);
            let spent = stats
                .category_spending
                .get(&category.name)
                .copied()
                .unwrap_or(Decimal::ZERO);
            BudgetProgressItem::compute(category, budget, spent)
        })
        .filter(|item| item.budget.is_some() || item.spent > Decimal::ZERO)
        .collect()
}

/// Totals across a month's budget progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
    pub utilization: Decimal,
    pub over_budget_count: usize,
}

pub fn overview(items: &[BudgetProgressItem]) -> BudgetOverview {
    let total_budget = items
        .iter()
        .filter_map(|i| i.budget.as_ref().map(|b| b.monthly_limit))
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let total_spent = items
        .iter()
        .map(|i| i.spent)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let utilization = if total_budget > Decimal::ZERO {
        percent_of(total_spent, total_budget).unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };
    BudgetOverview {
        total_budget,
        total_spent,
        total_remaining: total_budget.saturating_sub(total_spent).max(Decimal::ZERO),
        utilization,
        over_budget_count: items.iter().filter(|i| i.is_over_budget).count(),
    }
}
