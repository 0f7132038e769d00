// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Currency and date rendering. Aggregation code never formats numbers
//! itself; everything user-facing goes through a [`Locale`].

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub tag: String,
    pub currency_symbol: String,
    /// `1.234,56 €` rather than `$1,234.56`.
    pub symbol_after: bool,
    pub thousands_sep: char,
    pub decimal_sep: char,
    /// chrono `strftime` pattern.
    pub date_format: String,
}

impl Locale {
    pub fn en_us() -> Self {
        Self {
            tag: "en-US".into(),
            currency_symbol: "$".into(),
            symbol_after: false,
            thousands_sep: ',',
            decimal_sep: '.',
            date_format: "%-m/%-d/%Y".into(),
        }
    }

    pub fn en_gb() -> Self {
        Self {
            tag: "en-GB".into(),
            currency_symbol: "£".into(),
            symbol_after: false,
            thousands_sep: ',',
            decimal_sep: '.',
            date_format: "%d/%m/%Y".into(),
        }
    }

    pub fn de_de() -> Self {
        Self {
            tag: "de-DE".into(),
            currency_symbol: "€".into(),
            symbol_after: true,
            thousands_sep: '.',
            decimal_sep: ',',
            date_format: "%d.%m.%Y".into(),
        }
    }

    /// Same number formatting, different currency symbol.
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_string();
        self
    }

    /// Two decimal places, half away from zero, grouped thousands,
    /// leading minus for negatives (`-$60.00`).
    pub fn format_currency(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        let number = format!(
            "{}{}{}",
            group_thousands(int_part, self.thousands_sep),
            self.decimal_sep,
            frac_part
        );
        let body = if self.symbol_after {
            format!("{} {}", number, self.currency_symbol)
        } else {
            format!("{}{}", self.currency_symbol, number)
        };
        if negative { format!("-{}", body) } else { body }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en-us" => Ok(Self::en_us()),
            "en-gb" => Ok(Self::en_gb()),
            "de-de" => Ok(Self::de_de()),
            _ => Err(ParseError::Locale(s.to_string())),
        }
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Render a percentage with one decimal place, e.g. `125.0%`.
pub fn format_percent(pct: Decimal) -> String {
    format!("{:.1}%", pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}
