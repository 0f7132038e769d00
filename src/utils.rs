// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::MonthKey;
use crate::money::Locale;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern"));

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: Option<&String>) -> Result<MonthKey> {
    match s {
        Some(s) => Ok(s.parse::<MonthKey>()?),
        None => Ok(MonthKey::of(today())),
    }
}

/// Largest amount accepted on input.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Non-negative magnitude in whole cents, at most [`MAX_AMOUNT`]; the
/// direction of money comes from the type.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))?;
    if d.is_sign_negative() {
        anyhow::bail!("Amount '{}' must not be negative", s);
    }
    if d.normalize().scale() > 2 {
        anyhow::bail!("Amount '{}' has more than two decimal places", s);
    }
    if d > MAX_AMOUNT {
        anyhow::bail!("Amount '{}' exceeds the maximum of {}", s, MAX_AMOUNT);
    }
    Ok(d)
}

pub fn parse_color(s: &str) -> Result<String> {
    if !HEX_COLOR.is_match(s) {
        anyhow::bail!("Invalid color '{}', expected #RRGGBB", s);
    }
    Ok(s.to_lowercase())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

// Locale setting
pub fn get_locale(conn: &Connection) -> Result<Locale> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='locale'", [], |r| {
            r.get(0)
        })
        .optional()?;
    match v {
        Some(tag) => Ok(tag
            .parse::<Locale>()
            .with_context(|| format!("Stored locale '{}' is not supported", tag))?),
        None => Ok(Locale::default()),
    }
}

pub fn set_locale(conn: &Connection, locale: &Locale) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('locale', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![locale.tag],
    )?;
    Ok(())
}

/// `--locale` wins over the stored setting.
pub fn resolve_locale(conn: &Connection, flag: Option<&String>) -> Result<Locale> {
    match flag {
        Some(tag) => Ok(tag.parse::<Locale>()?),
        None => get_locale(conn),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
