// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, MonthKey, NewBudget};
use crate::repository::{FinanceRepository, SqliteRepository};
use crate::resolve::{find_budget, find_category};
use crate::utils::{maybe_print_json, parse_amount, pretty_table, resolve_locale};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let removed = SqliteRepository::new(conn).delete_budget(id)?;
            println!("Removed budget {} for {}", removed.id, removed.month);
        }
        _ => {}
    }
    Ok(())
}

/// Update the budget for (category, month) if one exists, otherwise create it.
pub fn set_budget(
    repo: &impl FinanceRepository,
    category: &str,
    month: MonthKey,
    limit: rust_decimal::Decimal,
) -> Result<Budget> {
    if limit <= rust_decimal::Decimal::ZERO {
        anyhow::bail!("Monthly limit must be greater than zero");
    }
    let categories = repo.list_categories()?;
    let cat = find_category(&categories, category)
        .with_context(|| format!("Category '{}' not found", category))?;
    let new = NewBudget {
        category_id: cat.id,
        monthly_limit: limit,
        month,
    };
    let budgets = repo.list_budgets()?;
    let saved = match find_budget(&budgets, cat.id, month) {
        Some(existing) => repo.update_budget(existing.id, &new)?,
        None => repo.create_budget(&new)?,
    };
    Ok(saved)
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub.get_one::<String>("month").unwrap().parse::<MonthKey>()?;
    let cat = sub.get_one::<String>("category").unwrap();
    let limit = parse_amount(sub.get_one::<String>("limit").unwrap())?;
    let saved = set_budget(&SqliteRepository::new(conn), cat, month, limit)?;
    println!("Budget set for {} / {} = {}", saved.month, cat, saved.monthly_limit);
    Ok(())
}

#[derive(Serialize)]
struct BudgetRow {
    id: i64,
    month: String,
    category: String,
    monthly_limit: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
    let month = sub
        .get_one::<String>("month")
        .map(|s| s.parse::<MonthKey>())
        .transpose()?;

    let repo = SqliteRepository::new(conn);
    let categories = repo.list_categories()?;
    let mut budgets = repo.list_budgets()?;
    budgets.retain(|b| month.is_none_or(|m| b.month == m));
    budgets.sort_by(|a, b| b.month.cmp(&a.month).then(a.id.cmp(&b.id)));

    let data: Vec<BudgetRow> = budgets
        .into_iter()
        .map(|b| BudgetRow {
            id: b.id,
            month: b.month.to_string(),
            category: categories
                .iter()
                .find(|c| c.id == b.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("(unknown #{})", b.category_id)),
            monthly_limit: locale.format_currency(b.monthly_limit),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.id.to_string(), r.month, r.category, r.monthly_limit])
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Month", "Category", "Monthly limit"], rows)
        );
    }
    Ok(())
}
