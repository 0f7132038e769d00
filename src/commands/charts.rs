// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::{chart, ChartKind, ChartSeries, TimeRange};
use crate::repository::{FinanceRepository, SqliteRepository};
use crate::utils::{maybe_print_json, pretty_table, resolve_locale, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let (kind, sub) = match m.subcommand() {
        Some(("distribution", sub)) => {
            let range = sub.get_one::<String>("range").unwrap().parse::<TimeRange>()?;
            (ChartKind::Distribution(range), sub)
        }
        Some(("trend", sub)) => (ChartKind::Trend, sub),
        _ => return Ok(()),
    };
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
    let snapshot = SqliteRepository::new(conn).snapshot()?;

    let series = chart(kind, &snapshot.transactions, &snapshot.categories, today());
    if maybe_print_json(json_flag, jsonl_flag, &series)? {
        return Ok(());
    }

    match series {
        ChartSeries::Distribution(d) => {
            if d.is_empty() {
                println!("No expenses to display for this period");
                return Ok(());
            }
            let rows = d
                .labels
                .into_iter()
                .zip(d.values)
                .zip(d.colors)
                .map(|((label, value), color)| vec![label, locale.format_currency(value), color])
                .collect();
            println!("{}", pretty_table(&["Category", "Spent", "Color"], rows));
        }
        ChartSeries::Trend(t) => {
            let rows = t
                .months
                .into_iter()
                .zip(t.income_values)
                .zip(t.expense_values)
                .map(|((month, income), expense)| {
                    vec![
                        month,
                        locale.format_currency(income),
                        locale.format_currency(expense),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));
        }
    }
    Ok(())
}
