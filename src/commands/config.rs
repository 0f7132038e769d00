// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::money::Locale;
use crate::utils::{get_locale, pretty_table, set_locale};
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-locale", sub)) => {
            let locale = sub.get_one::<String>("tag").unwrap().parse::<Locale>()?;
            set_locale(conn, &locale)?;
            println!("Locale set to {}", locale.tag);
        }
        Some(("show", _)) => {
            let locale = get_locale(conn)?;
            let sample_date = crate::utils::today();
            let data = vec![
                vec!["locale".into(), locale.tag.clone()],
                vec![
                    "currency".into(),
                    locale.format_currency(Decimal::new(123456789, 2)),
                ],
                vec!["date".into(), locale.format_date(sample_date)],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], data));
        }
        _ => {}
    }
    Ok(())
}
