// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Presentation-ready series for the spending charts.
//!
//! The two shapes have different empty-input contracts: a distribution over
//! no expenses is empty, while a trend always carries its full set of
//! zero-filled months.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ParseError;
use crate::insights::window_start;
use crate::models::{Category, MonthKey, Transaction, TransactionType};
use crate::resolve::category_color;
use crate::stats::expense_totals;

pub const TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Current,
    Last3,
    Last6,
}

impl TimeRange {
    /// `Current` is the calendar month of `today`; the trailing ranges use
    /// the same inclusive lower bound as period insights.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            TimeRange::Current => MonthKey::of(today).contains(date),
            TimeRange::Last3 => date >= window_start(today, 3),
            TimeRange::Last6 => date >= window_start(today, 6),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Current => "current",
            TimeRange::Last3 => "last3",
            TimeRange::Last6 => "last6",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(TimeRange::Current),
            "last3" => Ok(TimeRange::Last3),
            "last6" => Ok(TimeRange::Last6),
            _ => Err(ParseError::TimeRange(s.to_string())),
        }
    }
}

/// Expense breakdown by category: three parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
    pub colors: Vec<String>,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Income vs. expense per month, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub keys: Vec<MonthKey>,
    pub months: Vec<String>,
    pub income_values: Vec<Decimal>,
    pub expense_values: Vec<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Distribution(TimeRange),
    Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSeries {
    Distribution(Distribution),
    Trend(Trend),
}

pub fn chart(
    kind: ChartKind,
    transactions: &[Transaction],
    categories: &[Category],
    today: NaiveDate,
) -> ChartSeries {
    match kind {
        ChartKind::Distribution(range) => {
            ChartSeries::Distribution(distribution(transactions, categories, range, today))
        }
        ChartKind::Trend => ChartSeries::Trend(trend(transactions, today)),
    }
}

/// Slices appear in order of first appearance; zero totals are dropped.
/// Unknown category names get the fallback color.
pub fn distribution(
    transactions: &[Transaction],
    categories: &[Category],
    range: TimeRange,
    today: NaiveDate,
) -> Distribution {
    let totals = expense_totals(
        transactions
            .iter()
            .filter(|t| range.contains(t.date, today)),
    );

    let mut out = Distribution::default();
    for (label, value) in totals {
        if value.is_zero() {
            continue;
        }
        out.colors.push(category_color(categories, &label).to_string());
        out.labels.push(label);
        out.values.push(value);
    }
    out
}

/// Exactly [`TREND_MONTHS`] buckets ending at the month of `today`,
/// whether or not any transaction falls in them.
pub fn trend(transactions: &[Transaction], today: NaiveDate) -> Trend {
    let current = MonthKey::of(today);
    let keys: Vec<MonthKey> = (0..TREND_MONTHS)
        .rev()
        .map(|i| current.minus_months(i))
        .collect();
    let mut income_values = vec![Decimal::ZERO; keys.len()];
    let mut expense_values = vec![Decimal::ZERO; keys.len()];

    for t in transactions {
        let Ok(slot) = keys.binary_search(&t.month()) else {
            continue;
        };
        match t.kind {
            TransactionType::Income => {
                income_values[slot] = income_values[slot].saturating_add(t.amount)
            }
            TransactionType::Expense => {
                expense_values[slot] = expense_values[slot].saturating_add(t.amount)
            }
        }
    }

    Trend {
        months: keys.iter().map(MonthKey::label).collect(),
        keys,
        income_values,
        expense_values,
    }
}
