// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use pocketbook::export::{
    deliver, summary_csv, summary_filename, transactions_csv, transactions_filename,
};
use pocketbook::models::{Transaction, TransactionType};
use pocketbook::money::Locale;
use pocketbook::{cli, commands::exporter, db};
use rusqlite::Connection;
use tempfile::tempdir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(
    id: i64,
    amount: &str,
    kind: TransactionType,
    category: &str,
    on: &str,
    description: Option<&str>,
) -> Transaction {
    Transaction {
        id,
        amount: amount.parse().unwrap(),
        kind,
        category: category.into(),
        date: date(on),
        description: description.map(String::from),
        created_at: Utc::now(),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        tx(1, "1234.5", TransactionType::Expense, "Food", "2024-05-03", Some("Lunch \"deli\", downtown")),
        tx(2, "3000", TransactionType::Income, "Salary", "2024-04-30", None),
        tx(3, "20", TransactionType::Expense, "Food", "2024-04-12", Some("Groceries")),
        tx(4, "250", TransactionType::Income, "Food", "2024-05-20", Some("Refund")),
    ]
}

#[test]
fn transaction_csv_quotes_every_field() {
    let out = transactions_csv(&sample()[..1], &Locale::default()).unwrap();
    assert_eq!(
        out,
        "\"Date\",\"Description\",\"Category\",\"Type\",\"Amount\"\n\
         \"5/3/2024\",\"Lunch \"\"deli\"\", downtown\",\"Food\",\"expense\",\"$1,234.50\"\n"
    );
}

#[test]
fn transaction_csv_has_header_plus_one_line_per_row() {
    let txs = sample();
    let out = transactions_csv(&txs, &Locale::default()).unwrap();
    assert_eq!(out.lines().count(), txs.len() + 1);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(out.as_bytes());
    for rec in rdr.records() {
        assert_eq!(rec.unwrap().len(), 5);
    }
    for line in out.lines() {
        assert!(line.starts_with('"') && line.ends_with('"'));
    }
}

#[test]
fn missing_description_is_an_empty_quoted_field() {
    let out = transactions_csv(&sample()[1..2], &Locale::default()).unwrap();
    let row = out.lines().nth(1).unwrap();
    assert_eq!(row, "\"4/30/2024\",\"\",\"Salary\",\"income\",\"$3,000.00\"");
    assert!(!out.contains("null") && !out.contains("undefined"));
}

#[test]
fn empty_export_is_just_the_header() {
    let out = transactions_csv(&[], &Locale::default()).unwrap();
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn summary_groups_months_in_calendar_order() {
    let out = summary_csv(&sample(), &Locale::default()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "\"Month\",\"Category\",\"Income\",\"Expenses\",\"Net Income\"",
            "\"2024-04\",\"TOTAL\",\"$3,000.00\",\"$20.00\",\"$2,980.00\"",
            "\"2024-04\",\"Salary\",\"$3,000.00\",\"$0.00\",\"$3,000.00\"",
            "\"2024-04\",\"Food\",\"$0.00\",\"$20.00\",\"-$20.00\"",
            "\"2024-05\",\"TOTAL\",\"$250.00\",\"$1,234.50\",\"-$984.50\"",
            "\"2024-05\",\"Food\",\"$250.00\",\"$1,234.50\",\"-$984.50\"",
        ]
    );
}

#[test]
fn summary_omits_categories_without_activity() {
    let txs = vec![
        tx(1, "0", TransactionType::Expense, "Ghost", "2024-05-03", None),
        tx(2, "10", TransactionType::Expense, "Food", "2024-05-04", None),
    ];
    let out = summary_csv(&txs, &Locale::default()).unwrap();
    assert!(!out.contains("Ghost"));
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn summary_respects_locale() {
    let out = summary_csv(&sample()[..1], &Locale::de_de()).unwrap();
    assert!(out.contains("\"1.234,50 €\""));
}

#[test]
fn export_filenames() {
    let today = date("2024-05-09");
    assert_eq!(transactions_filename(today), "transactions-export-2024-05-09.csv");
    assert_eq!(summary_filename(today), "financial-summary-2024-05-09.csv");
}

#[test]
fn deliver_writes_into_directory() {
    let dir = tempdir().unwrap();
    let path = deliver(dir.path(), "out.csv", "\"a\"\n").unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "\"a\"\n");
}

#[test]
fn deliver_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = deliver(&missing, "out.csv", "x").unwrap_err();
    assert!(err.to_string().contains("out.csv"));
}

#[test]
fn export_command_writes_dated_file() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(amount, type, category, date, description, created_at) VALUES \
        ('12.34', 'expense', 'Groceries', '2025-01-02', 'Corner Shop', '2025-01-02 10:00:00+00:00')",
        [],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_str = dir.path().to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "pocketbook",
        "export",
        "transactions",
        "--out-dir",
        &out_str,
    ]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    let Some(("transactions", sub)) = export_m.subcommand() else {
        panic!("no transactions subcommand");
    };
    let dir_arg = sub.get_one::<std::path::PathBuf>("out-dir").unwrap();
    let path = exporter::export_transactions(&conn, dir_arg, &Locale::default(), date("2025-01-03"))
        .unwrap();

    assert!(path.ends_with("transactions-export-2025-01-03.csv"));
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "\"Date\",\"Description\",\"Category\",\"Type\",\"Amount\"\n\
         \"1/2/2025\",\"Corner Shop\",\"Groceries\",\"expense\",\"$12.34\"\n"
    );
}

#[test]
fn export_failure_is_reported_as_export_error() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let err = exporter::export_summary(&conn, &missing, &Locale::default(), date("2025-01-03"))
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to export summary report"));
}

#[test]
fn multi_line_descriptions_stay_on_one_row() {
    let txs = vec![
        tx(1, "5", TransactionType::Expense, "Food", "2024-05-03", Some("two\nlines")),
        tx(2, "6", TransactionType::Expense, "Food", "2024-05-04", Some("crlf\r\nand\rcr")),
    ];
    let out = transactions_csv(&txs, &Locale::default()).unwrap();
    assert_eq!(out.lines().count(), txs.len() + 1);
    assert!(out.contains("\"two lines\""));
    assert!(out.contains("\"crlf and cr\""));
}
