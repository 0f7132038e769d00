// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use crate::export::{deliver, summary_csv, summary_filename, transactions_csv, transactions_filename};
use crate::money::Locale;
use crate::repository::{FinanceRepository, SqliteRepository};
use crate::utils::{resolve_locale, today};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
            let dir = sub.get_one::<PathBuf>("out-dir").unwrap();
            let path = export_transactions(conn, dir, &locale, today())?;
            println!("Transactions exported to {}", path.display());
        }
        Some(("summary", sub)) => {
            let locale = resolve_locale(conn, sub.get_one::<String>("locale"))?;
            let dir = sub.get_one::<PathBuf>("out-dir").unwrap();
            let path = export_summary(conn, dir, &locale, today())?;
            println!("Financial summary exported to {}", path.display());
        }
        _ => {}
    }
    Ok(())
}

pub fn export_transactions(
    conn: &Connection,
    dir: &Path,
    locale: &Locale,
    today: NaiveDate,
) -> Result<PathBuf> {
    let transactions = SqliteRepository::new(conn).list_transactions()?;
    let path = transactions_csv(&transactions, locale)
        .and_then(|doc| deliver(dir, &transactions_filename(today), &doc))
        .context("Failed to export transactions")?;
    Ok(path)
}

pub fn export_summary(
    conn: &Connection,
    dir: &Path,
    locale: &Locale,
    today: NaiveDate,
) -> Result<PathBuf> {
    let transactions = SqliteRepository::new(conn).list_transactions()?;
    let path = summary_csv(&transactions, locale)
        .and_then(|doc| deliver(dir, &summary_filename(today), &doc))
        .context("Failed to export summary report")?;
    Ok(path)
}
