// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repository::{FinanceRepository, SqliteRepository};
use crate::resolve::{dangling_references, Anomaly};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let snapshot = SqliteRepository::new(conn).snapshot()?;
    let rows: Vec<Vec<String>> = dangling_references(&snapshot)
        .into_iter()
        .map(|a| match a {
            Anomaly::UnknownTransactionCategory {
                transaction_id,
                category,
            } => vec![
                "txn_unknown_category".into(),
                format!("transaction {} -> '{}'", transaction_id, category),
            ],
            Anomaly::UnknownBudgetCategory {
                budget_id,
                category_id,
            } => vec![
                "budget_unknown_category".into(),
                format!("budget {} -> category #{}", budget_id, category_id),
            ],
            Anomaly::DuplicateBudget {
                category_id,
                month,
                budget_ids,
            } => vec![
                "duplicate_budget".into(),
                format!(
                    "category #{} in {}: budgets {:?} (first one is used)",
                    category_id, month, budget_ids
                ),
            ],
        })
        .collect();

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
