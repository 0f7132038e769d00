// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{budget_progress, overview};
use crate::insights::{category_breakdown, in_window, period_insights, window_start};
use crate::money::format_percent;
use crate::repository::{FinanceRepository, SqliteRepository};
use crate::resolve::category_icon;
use crate::stats::monthly_stats;
use crate::utils::{maybe_print_json, parse_month, pretty_table, resolve_locale, today};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("stats", sub)) => stats(conn, sub)?,
        Some(("budgets", sub)) => budgets(conn, sub)?,
        Some(("insights", sub)) => insights(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
    let month = parse_month(sub.get_one::<String>("month"))?;
    let snapshot = SqliteRepository::new(conn).snapshot()?;

    let stats = monthly_stats(&snapshot.transactions, month);
    if maybe_print_json(json_flag, jsonl_flag, &stats)? {
        return Ok(());
    }

    let mut data = vec![
        vec!["Income".into(), locale.format_currency(stats.total_income)],
        vec!["Expenses".into(), locale.format_currency(stats.total_expenses)],
        vec!["Net income".into(), locale.format_currency(stats.net_income)],
        vec!["Transactions".into(), stats.transaction_count.to_string()],
        vec![
            "Savings rate".into(),
            stats
                .savings_rate()
                .map(format_percent)
                .unwrap_or_else(|| "-".into()),
        ],
    ];
    if let Some(top) = &stats.top_category {
        data.push(vec![
            "Top category".into(),
            format!("{} ({})", top.category, locale.format_currency(top.total)),
        ]);
    }
    let title = month.to_string();
    println!("{}", pretty_table(&[title.as_str(), ""], data));

    let spending = stats
        .category_spending
        .iter()
        .map(|(name, total)| {
            vec![
                format!("{} {}", category_icon(&snapshot.categories, name), name),
                locale.format_currency(*total),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], spending));
    Ok(())
}

fn budgets(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
    let month = parse_month(sub.get_one::<String>("month"))?;
    let snapshot = SqliteRepository::new(conn).snapshot()?;

    let items = budget_progress(
        &snapshot.transactions,
        &snapshot.categories,
        &snapshot.budgets,
        month,
    );
    let totals = overview(&items);
    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &json!({ "month": month, "items": items, "overview": totals }),
    )? {
        return Ok(());
    }

    let data = items
        .iter()
        .map(|i| {
            vec![
                i.category.name.clone(),
                i.budget
                    .as_ref()
                    .map(|b| locale.format_currency(b.monthly_limit))
                    .unwrap_or_else(|| "-".into()),
                locale.format_currency(i.spent),
                locale.format_currency(i.remaining),
                format_percent(i.percentage),
                if i.is_over_budget { "OVER".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Budget", "Spent", "Remaining", "Used", ""],
            data
        )
    );
    println!(
        "Budgeted {} | spent {} | remaining {} | {} used | {} over budget",
        locale.format_currency(totals.total_budget),
        locale.format_currency(totals.total_spent),
        locale.format_currency(totals.total_remaining),
        format_percent(totals.utilization),
        totals.over_budget_count
    );
    Ok(())
}

fn insights(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
    let months = *sub.get_one::<u32>("months").unwrap_or(&6);
    let snapshot = SqliteRepository::new(conn).snapshot()?;

    let insights = period_insights(&snapshot.transactions, months, today());
    if maybe_print_json(json_flag, jsonl_flag, &insights)? {
        return Ok(());
    }

    let data = vec![
        vec!["Since".into(), insights.since.to_string()],
        vec!["Total income".into(), locale.format_currency(insights.total_income)],
        vec!["Total expenses".into(), locale.format_currency(insights.total_expenses)],
        vec!["Net income".into(), locale.format_currency(insights.net_income)],
        vec![
            "Avg monthly income".into(),
            locale.format_currency(insights.avg_monthly_income),
        ],
        vec![
            "Avg monthly expenses".into(),
            locale.format_currency(insights.avg_monthly_expenses),
        ],
        vec![
            "Top category".into(),
            insights
                .top_category
                .as_ref()
                .map(|t| format!("{} ({})", t.category, locale.format_currency(t.total)))
                .unwrap_or_else(|| "None".into()),
        ],
        vec!["Transactions".into(), insights.transaction_count.to_string()],
        vec![
            "Savings rate".into(),
            insights
                .savings_rate
                .map(format_percent)
                .unwrap_or_else(|| "-".into()),
        ],
    ];
    let title = format!("Last {} months", months);
    println!("{}", pretty_table(&[title.as_str(), ""], data));
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
    let months = *sub.get_one::<u32>("months").unwrap_or(&6);
    let snapshot = SqliteRepository::new(conn).snapshot()?;

    let today = today();
    let insights = period_insights(&snapshot.transactions, months, today);
    let window = in_window(&snapshot.transactions, window_start(today, months));
    let rows = category_breakdown(window, &snapshot.categories, insights.total_expenses);
    if maybe_print_json(json_flag, jsonl_flag, &rows)? {
        return Ok(());
    }

    let data = rows
        .iter()
        .map(|r| {
            vec![
                format!("{} {}", r.category.icon, r.category.name),
                r.transaction_count.to_string(),
                locale.format_currency(r.total),
                format_percent(r.share),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Transactions", "Spent", "Share"], data)
    );
    Ok(())
}
