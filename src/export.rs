// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV rendering of transactions and monthly summaries.
//!
//! The formatters are pure: they build the whole document in memory and
//! return it. Writing it somewhere is [`deliver`]'s job.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;

use crate::error::ExportError;
use crate::models::{MonthKey, Transaction, TransactionType};
use crate::money::Locale;

pub const TRANSACTION_HEADERS: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];
pub const SUMMARY_HEADERS: [&str; 5] = ["Month", "Category", "Income", "Expenses", "Net Income"];
pub const TOTAL_LABEL: &str = "TOTAL";

fn writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// One row per transaction, in the order given. Missing descriptions are
/// written as empty fields; line breaks inside a description become spaces
/// so every record stays on one line.
pub fn transactions_csv(transactions: &[Transaction], locale: &Locale) -> Result<String, ExportError> {
    let mut wtr = writer();
    wtr.write_record(TRANSACTION_HEADERS)?;
    for t in transactions {
        wtr.write_record([
            locale.format_date(t.date),
            single_line(t.description.as_deref().unwrap_or_default()),
            t.category.clone(),
            t.kind.as_str().to_string(),
            locale.format_currency(t.amount),
        ])?;
    }
    finish(wtr)
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[derive(Debug, Default)]
struct MonthGroup {
    income: Decimal,
    expenses: Decimal,
    // first-appearance order
    categories: Vec<(String, Decimal, Decimal)>,
}

impl MonthGroup {
    fn add(&mut self, t: &Transaction) {
        let slot = match self.categories.iter().position(|(name, _, _)| *name == t.category) {
            Some(i) => i,
            None => {
                self.categories
                    .push((t.category.clone(), Decimal::ZERO, Decimal::ZERO));
                self.categories.len() - 1
            }
        };
        match t.kind {
            TransactionType::Income => {
                self.income = self.income.saturating_add(t.amount);
                self.categories[slot].1 = self.categories[slot].1.saturating_add(t.amount);
            }
            TransactionType::Expense => {
                self.expenses = self.expenses.saturating_add(t.amount);
                self.categories[slot].2 = self.categories[slot].2.saturating_add(t.amount);
            }
        }
    }
}

/// Months in ascending calendar order. Each month opens with a `TOTAL` row,
/// followed by every category with activity in that month.
pub fn summary_csv(transactions: &[Transaction], locale: &Locale) -> Result<String, ExportError> {
    let mut months: BTreeMap<MonthKey, MonthGroup> = BTreeMap::new();
    for t in transactions {
        months.entry(t.month()).or_default().add(t);
    }

    let mut wtr = writer();
    wtr.write_record(SUMMARY_HEADERS)?;
    for (month, group) in &months {
        let month = month.to_string();
        wtr.write_record([
            month.clone(),
            TOTAL_LABEL.to_string(),
            locale.format_currency(group.income),
            locale.format_currency(group.expenses),
            locale.format_currency(group.income.saturating_sub(group.expenses)),
        ])?;
        for (category, income, expenses) in &group.categories {
            if income.is_zero() && expenses.is_zero() {
                continue;
            }
            wtr.write_record([
                month.clone(),
                category.clone(),
                locale.format_currency(*income),
                locale.format_currency(*expenses),
                locale.format_currency(income.saturating_sub(*expenses)),
            ])?;
        }
    }
    finish(wtr)
}

pub fn transactions_filename(today: NaiveDate) -> String {
    format!("transactions-export-{}.csv", today.format("%Y-%m-%d"))
}

pub fn summary_filename(today: NaiveDate) -> String {
    format!("financial-summary-{}.csv", today.format("%Y-%m-%d"))
}

/// Write a rendered document into `dir` under `filename`.
pub fn deliver(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf, ExportError> {
    let path = dir.join(filename);
    std::fs::write(&path, contents).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "export written");
    Ok(path)
}
