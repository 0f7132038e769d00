// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Lenient lookups between records. Transactions name their category by a
//! free string and budgets point at a category id; neither is validated at
//! write time, so every cross-reference goes through this module and
//! degrades to a default instead of failing.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::{Budget, Category, MonthKey, Snapshot};

pub const FALLBACK_COLOR: &str = "#64748b";
pub const FALLBACK_ICON: &str = "Tag";

/// Exact, case-sensitive name match.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name == name)
}

pub fn category_color<'a>(categories: &'a [Category], name: &str) -> &'a str {
    find_category(categories, name)
        .map(|c| c.color.as_str())
        .unwrap_or(FALLBACK_COLOR)
}

pub fn category_icon<'a>(categories: &'a [Category], name: &str) -> &'a str {
    find_category(categories, name)
        .map(|c| c.icon.as_str())
        .unwrap_or(FALLBACK_ICON)
}

/// The budget for `category_id` in `month`.
///
/// Duplicate budgets for the same pair are an accepted data anomaly: the
/// first one in collection order wins and the rest are ignored.
pub fn find_budget<'a>(
    budgets: &'a [Budget],
    category_id: i64,
    month: MonthKey,
) -> Option<&'a Budget> {
    let mut matches = budgets
        .iter()
        .filter(|b| b.category_id == category_id && b.month == month);
    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            category_id,
            %month,
            budget_id = first.id,
            ignored = extra,
            "duplicate budgets for category/month, using the first"
        );
    }
    Some(first)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    UnknownTransactionCategory {
        transaction_id: i64,
        category: String,
    },
    UnknownBudgetCategory {
        budget_id: i64,
        category_id: i64,
    },
    DuplicateBudget {
        category_id: i64,
        month: MonthKey,
        budget_ids: Vec<i64>,
    },
}

/// Every soft reference in the snapshot that does not resolve, plus
/// duplicate budgets. Informational only.
pub fn dangling_references(snapshot: &Snapshot) -> Vec<Anomaly> {
    let mut out = Vec::new();

    for t in &snapshot.transactions {
        if find_category(&snapshot.categories, &t.category).is_none() {
            out.push(Anomaly::UnknownTransactionCategory {
                transaction_id: t.id,
                category: t.category.clone(),
            });
        }
    }

    let known_ids: HashSet<i64> = snapshot.categories.iter().map(|c| c.id).collect();
    let mut by_pair: BTreeMap<(i64, MonthKey), Vec<i64>> = BTreeMap::new();
    for b in &snapshot.budgets {
        if !known_ids.contains(&b.category_id) {
            out.push(Anomaly::UnknownBudgetCategory {
                budget_id: b.id,
                category_id: b.category_id,
            });
        }
        by_pair.entry((b.category_id, b.month)).or_default().push(b.id);
    }
    for ((category_id, month), budget_ids) in by_pair {
        if budget_ids.len() > 1 {
            out.push(Anomaly::DuplicateBudget {
                category_id,
                month,
                budget_ids,
            });
        }
    }
    out
}
