// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use pocketbook::budget::{budget_progress, overview};
use pocketbook::models::{Budget, Category, CategoryType, MonthKey, Transaction, TransactionType};
use rust_decimal::Decimal;

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.into(),
        color: "#f97316".into(),
        icon: "Utensils".into(),
        kind: CategoryType::Expense,
    }
}

fn budget(id: i64, category_id: i64, limit: i64, month: &str) -> Budget {
    Budget {
        id,
        category_id,
        monthly_limit: Decimal::from(limit),
        month: month.parse().unwrap(),
    }
}

fn expense(id: i64, amount: i64, category: &str, date: &str) -> Transaction {
    Transaction {
        id,
        amount: Decimal::from(amount),
        kind: TransactionType::Expense,
        category: category.into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: None,
        created_at: Utc::now(),
    }
}

fn may() -> MonthKey {
    "2024-05".parse().unwrap()
}

#[test]
fn overspent_budget() {
    let cats = vec![category(1, "Food")];
    let budgets = vec![budget(1, 1, 200, "2024-05")];
    let txs = vec![
        expense(1, 150, "Food", "2024-05-04"),
        expense(2, 100, "Food", "2024-05-18"),
    ];
    let items = budget_progress(&txs, &cats, &budgets, may());
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.spent, Decimal::from(250));
    assert_eq!(item.remaining, Decimal::ZERO);
    assert_eq!(item.percentage, Decimal::from(125));
    assert!(item.is_over_budget);
}

#[test]
fn percentage_matches_spent_over_limit() {
    let cats = vec![category(1, "Food"), category(2, "Transport")];
    let budgets = vec![budget(1, 1, 300, "2024-05"), budget(2, 2, 80, "2024-05")];
    let txs = vec![
        expense(1, 75, "Food", "2024-05-04"),
        expense(2, 80, "Transport", "2024-05-05"),
    ];
    for item in budget_progress(&txs, &cats, &budgets, may()) {
        let limit = item.budget.as_ref().unwrap().monthly_limit;
        assert_eq!(item.percentage, item.spent / limit * Decimal::ONE_HUNDRED);
        assert_eq!(item.is_over_budget, item.spent > limit);
        assert_eq!(item.remaining, (limit - item.spent).max(Decimal::ZERO));
    }
}

#[test]
fn keeps_only_budgeted_or_spending_categories() {
    let cats = vec![category(1, "Food"), category(2, "Fun"), category(3, "Rent")];
    let budgets = vec![budget(1, 3, 1000, "2024-05"), budget(2, 2, 50, "2024-04")];
    let txs = vec![
        expense(1, 30, "Food", "2024-05-02"),
        expense(2, 20, "Fun", "2024-04-02"),
    ];
    let items = budget_progress(&txs, &cats, &budgets, may());
    let names: Vec<&str> = items.iter().map(|i| i.category.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Rent"]);

    let food = &items[0];
    assert!(food.budget.is_none());
    assert_eq!(food.spent, Decimal::from(30));
    assert_eq!(food.percentage, Decimal::ZERO);
    assert_eq!(food.remaining, Decimal::ZERO);
    assert!(!food.is_over_budget);

    let rent = &items[1];
    assert_eq!(rent.spent, Decimal::ZERO);
    assert_eq!(rent.remaining, Decimal::from(1000));
}

#[test]
fn non_positive_limit_does_not_divide() {
    let cats = vec![category(1, "Food")];
    let budgets = vec![budget(1, 1, 0, "2024-05")];
    let txs = vec![expense(1, 10, "Food", "2024-05-02")];
    let items = budget_progress(&txs, &cats, &budgets, may());
    assert_eq!(items[0].percentage, Decimal::ZERO);
    assert!(items[0].is_over_budget);
    assert_eq!(items[0].remaining, Decimal::ZERO);
}

#[test]
fn duplicate_budgets_use_the_first() {
    let cats = vec![category(1, "Food")];
    let budgets = vec![budget(7, 1, 100, "2024-05"), budget(8, 1, 500, "2024-05")];
    let txs = vec![expense(1, 50, "Food", "2024-05-02")];
    let items = budget_progress(&txs, &cats, &budgets, may());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].budget.as_ref().unwrap().id, 7);
    assert_eq!(items[0].percentage, Decimal::from(50));
}

#[test]
fn overview_totals() {
    let cats = vec![category(1, "Food"), category(2, "Transport"), category(3, "Gifts")];
    let budgets = vec![budget(1, 1, 200, "2024-05"), budget(2, 2, 100, "2024-05")];
    let txs = vec![
        expense(1, 250, "Food", "2024-05-04"),
        expense(2, 20, "Transport", "2024-05-05"),
        expense(3, 30, "Gifts", "2024-05-06"),
    ];
    let items = budget_progress(&txs, &cats, &budgets, may());
    let o = overview(&items);
    assert_eq!(o.total_budget, Decimal::from(300));
    assert_eq!(o.total_spent, Decimal::from(300));
    assert_eq!(o.total_remaining, Decimal::ZERO);
    assert_eq!(o.utilization, Decimal::from(100));
    assert_eq!(o.over_budget_count, 1);
}

#[test]
fn overview_of_nothing() {
    let o = overview(&[]);
    assert_eq!(o.total_budget, Decimal::ZERO);
    assert_eq!(o.utilization, Decimal::ZERO);
    assert_eq!(o.over_budget_count, 0);
}

#[test]
fn extreme_ratios_stay_total() {
    let cats = vec![category(1, "Food"), category(2, "Rent")];
    let tiny = "0.0000000000000000000000000001".parse::<Decimal>().unwrap();
    let budgets = vec![
        Budget {
            monthly_limit: tiny,
            ..budget(1, 1, 0, "2024-05")
        },
        budget(2, 2, 100, "2024-05"),
    ];
    let big = "50000000000000000000000000000".parse::<Decimal>().unwrap();
    let mut txs = vec![
        expense(1, 10, "Food", "2024-05-04"),
        expense(2, 0, "Rent", "2024-05-05"),
        expense(3, 0, "Rent", "2024-05-06"),
    ];
    txs[1].amount = big;
    txs[2].amount = big;

    let items = budget_progress(&txs, &cats, &budgets, may());
    assert_eq!(items[0].percentage, Decimal::MAX);
    assert!(items[0].is_over_budget);
    assert_eq!(items[1].spent, Decimal::MAX);
    assert!(items[1].percentage > Decimal::from(100));
    assert_eq!(items[1].remaining, Decimal::ZERO);

    let o = overview(&items);
    assert_eq!(o.total_spent, Decimal::MAX);
    assert_eq!(o.total_remaining, Decimal::ZERO);
    assert_eq!(o.over_budget_count, 2);
}
