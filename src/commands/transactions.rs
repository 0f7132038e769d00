// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{MonthKey, NewTransaction, TransactionType};
use crate::money::Locale;
use crate::repository::{FinanceRepository, SqliteRepository};
use crate::resolve::find_category;
use crate::stats::recent;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table, resolve_locale};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let removed = SqliteRepository::new(conn).delete_transaction(id)?;
            println!(
                "Removed transaction {} ({} {} on {})",
                removed.id, removed.kind, removed.amount, removed.date
            );
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let repo = SqliteRepository::new(conn);
    let new = NewTransaction {
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        kind: sub.get_one::<String>("type").unwrap().parse::<TransactionType>()?,
        category: sub.get_one::<String>("category").unwrap().to_string(),
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
    };

    let categories = repo.list_categories()?;
    match find_category(&categories, &new.category) {
        None => tracing::warn!(category = %new.category, "recording against an unknown category"),
        Some(c) if !c.kind.accepts(new.kind) => tracing::warn!(
            category = %c.name,
            category_type = %c.kind,
            kind = %new.kind,
            "category is not meant for this transaction type"
        ),
        Some(_) => {}
    }

    let created = repo.create_transaction(&new)?;
    println!(
        "Recorded {} {} on {} under '{}'",
        created.kind, created.amount, created.date, created.category
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
    let data = query_rows(conn, sub, &locale)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

/// Newest first, optionally narrowed to `--month` and capped by `--limit`.
pub fn query_rows(
    conn: &Connection,
    sub: &clap::ArgMatches,
    locale: &Locale,
) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| s.parse::<MonthKey>())
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let mut matching = SqliteRepository::new(conn).list_transactions()?;
    matching.retain(|t| month.is_none_or(|m| m.contains(t.date)));

    let data = recent(&matching, limit)
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            category: t.category,
            amount: locale.format_currency(t.amount),
            description: t.description.unwrap_or_default(),
        })
        .collect();
    Ok(data)
}
