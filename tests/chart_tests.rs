// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use pocketbook::charts::{chart, distribution, trend, ChartKind, ChartSeries, TimeRange};
use pocketbook::models::{Category, CategoryType, MonthKey, Transaction, TransactionType};
use pocketbook::resolve::FALLBACK_COLOR;
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: i64, amount: &str, kind: TransactionType, category: &str, on: &str) -> Transaction {
    Transaction {
        id,
        amount: amount.parse().unwrap(),
        kind,
        category: category.into(),
        date: date(on),
        description: None,
        created_at: Utc::now(),
    }
}

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            name: "Food".into(),
            color: "#f97316".into(),
            icon: "Utensils".into(),
            kind: CategoryType::Expense,
        },
        Category {
            id: 2,
            name: "Salary".into(),
            color: "#10b981".into(),
            icon: "Briefcase".into(),
            kind: CategoryType::Income,
        },
    ]
}

#[test]
fn empty_trend_still_has_six_zero_months() {
    let today = date("2024-03-10");
    let t = trend(&[], today);
    assert_eq!(t.months.len(), 6);
    assert_eq!(t.income_values, vec![Decimal::ZERO; 6]);
    assert_eq!(t.expense_values, vec![Decimal::ZERO; 6]);
    assert_eq!(
        t.months,
        vec!["Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024", "Mar 2024"]
    );
    assert!(t.keys.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*t.keys.last().unwrap(), MonthKey::of(today));
}

#[test]
fn trend_buckets_by_month_and_type() {
    let today = date("2024-03-10");
    let txs = vec![
        tx(1, "1000", TransactionType::Income, "Salary", "2024-03-01"),
        tx(2, "40", TransactionType::Expense, "Food", "2024-03-05"),
        tx(3, "60", TransactionType::Expense, "Food", "2024-01-31"),
        tx(4, "5", TransactionType::Expense, "Food", "2023-10-01"),
        tx(5, "999", TransactionType::Expense, "Food", "2023-09-30"),
        tx(6, "7", TransactionType::Expense, "Food", "2024-04-01"),
    ];
    let t = trend(&txs, today);
    assert_eq!(t.income_values[5], Decimal::from(1000));
    assert_eq!(t.expense_values[5], Decimal::from(40));
    assert_eq!(t.expense_values[3], Decimal::from(60));
    assert_eq!(t.expense_values[0], Decimal::from(5));
    let total: Decimal = t.expense_values.iter().sum();
    assert_eq!(total, Decimal::from(105));
}

#[test]
fn unknown_category_gets_fallback_color() {
    let today = date("2024-03-10");
    let txs = vec![
        tx(1, "12.50", TransactionType::Expense, "Misc-Unlisted", "2024-03-02"),
        tx(2, "30", TransactionType::Expense, "Food", "2024-03-03"),
    ];
    let d = distribution(&txs, &categories(), TimeRange::Current, today);
    assert_eq!(d.labels, vec!["Misc-Unlisted", "Food"]);
    assert_eq!(d.values, vec!["12.50".parse::<Decimal>().unwrap(), Decimal::from(30)]);
    assert_eq!(d.colors, vec![FALLBACK_COLOR.to_string(), "#f97316".to_string()]);
}

#[test]
fn distribution_skips_income_zero_and_out_of_range() {
    let today = date("2024-03-10");
    let txs = vec![
        tx(1, "1000", TransactionType::Income, "Salary", "2024-03-01"),
        tx(2, "0", TransactionType::Expense, "Gifts", "2024-03-02"),
        tx(3, "20", TransactionType::Expense, "Food", "2024-02-20"),
        tx(4, "15", TransactionType::Expense, "Food", "2024-03-04"),
    ];
    let current = distribution(&txs, &categories(), TimeRange::Current, today);
    assert_eq!(current.labels, vec!["Food"]);
    assert_eq!(current.values, vec![Decimal::from(15)]);

    let last3 = distribution(&txs, &categories(), TimeRange::Last3, today);
    assert_eq!(last3.values, vec![Decimal::from(35)]);
}

#[test]
fn empty_distribution_is_empty() {
    let d = distribution(&[], &categories(), TimeRange::Last6, date("2024-03-10"));
    assert!(d.is_empty());
    assert!(d.values.is_empty());
    assert!(d.colors.is_empty());
}

#[test]
fn trailing_ranges_are_inclusive() {
    let today = date("2024-06-15");
    assert!(TimeRange::Last3.contains(date("2024-03-15"), today));
    assert!(!TimeRange::Last3.contains(date("2024-03-14"), today));
    assert!(TimeRange::Last6.contains(date("2023-12-15"), today));
    assert!(TimeRange::Current.contains(date("2024-06-30"), today));
    assert!(!TimeRange::Current.contains(date("2023-06-15"), today));
}

#[test]
fn chart_dispatches_on_kind() {
    let today = date("2024-03-10");
    match chart(ChartKind::Trend, &[], &categories(), today) {
        ChartSeries::Trend(t) => assert_eq!(t.months.len(), 6),
        other => panic!("expected trend, got {:?}", other),
    }
    match chart(
        ChartKind::Distribution(TimeRange::Current),
        &[],
        &categories(),
        today,
    ) {
        ChartSeries::Distribution(d) => assert!(d.is_empty()),
        other => panic!("expected distribution, got {:?}", other),
    }
}

#[test]
fn time_range_parsing() {
    assert_eq!("last3".parse::<TimeRange>().unwrap(), TimeRange::Last3);
    assert_eq!(" Current ".parse::<TimeRange>().unwrap(), TimeRange::Current);
    assert!("last12".parse::<TimeRange>().is_err());
}
