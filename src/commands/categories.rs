// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategoryType, NewCategory};
use crate::repository::{FinanceRepository, SqliteRepository};
use crate::resolve::find_category;
use crate::utils::{parse_color, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let repo = SqliteRepository::new(conn);
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = new_category(sub)?;
            let created = repo
                .create_category(&new)
                .with_context(|| format!("Could not add category '{}'", new.name))?;
            println!("Added category '{}' ({})", created.name, created.kind);
        }
        Some(("list", _)) => {
            let data = repo
                .list_categories()?
                .into_iter()
                .map(|c| vec![c.id.to_string(), c.name, c.kind.to_string(), c.color, c.icon])
                .collect();
            println!(
                "{}",
                pretty_table(&["ID", "Category", "Type", "Color", "Icon"], data)
            );
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let categories = repo.list_categories()?;
            let category = find_category(&categories, name)
                .with_context(|| format!("Category '{}' not found", name))?;
            repo.delete_category(category.id)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

pub fn new_category(sub: &clap::ArgMatches) -> Result<NewCategory> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Category name must not be empty");
    }
    let color = parse_color(sub.get_one::<String>("color").unwrap())?;
    let icon = sub.get_one::<String>("icon").unwrap().to_string();
    let kind = sub.get_one::<String>("type").unwrap().parse::<CategoryType>()?;
    Ok(NewCategory {
        name,
        color,
        icon,
        kind,
    })
}
