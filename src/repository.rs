// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Storage for the three record collections.
//!
//! Every list call returns a freshly allocated `Vec`, so whatever the caller
//! aggregates over can't change underneath it.

use std::str::FromStr;

use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StoreError;
use crate::models::{
    Budget, Category, NewBudget, NewCategory, NewTransaction, Snapshot, Transaction,
};

pub trait FinanceRepository {
    /// Newest first (date, then id).
    fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    fn list_budgets(&self) -> Result<Vec<Budget>, StoreError>;

    fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, StoreError>;
    fn update_transaction(&self, id: i64, new: &NewTransaction) -> Result<Transaction, StoreError>;
    fn delete_transaction(&self, id: i64) -> Result<Transaction, StoreError>;

    fn create_category(&self, new: &NewCategory) -> Result<Category, StoreError>;
    fn update_category(&self, id: i64, new: &NewCategory) -> Result<Category, StoreError>;
    fn delete_category(&self, id: i64) -> Result<Category, StoreError>;

    fn create_budget(&self, new: &NewBudget) -> Result<Budget, StoreError>;
    fn update_budget(&self, id: i64, new: &NewBudget) -> Result<Budget, StoreError>;
    fn delete_budget(&self, id: i64) -> Result<Budget, StoreError>;

    /// All three collections, read one after another.
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot {
            transactions: self.list_transactions()?,
            categories: self.list_categories()?,
            budgets: self.list_budgets()?,
        })
    }
}

pub struct SqliteRepository<'c> {
    conn: &'c Connection,
}

const TRANSACTION_COLUMNS: &str = "id, amount, type, category, date, description, created_at";
const CATEGORY_COLUMNS: &str = "id, name, color, icon, type";
const BUDGET_COLUMNS: &str = "id, category_id, monthly_limit, month";

fn parsed<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn transaction_from_row(r: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        amount: parsed(r, 1)?,
        kind: parsed(r, 2)?,
        category: r.get(3)?,
        date: r.get(4)?,
        description: r.get(5)?,
        created_at: r.get(6)?,
    })
}

fn category_from_row(r: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        color: r.get(2)?,
        icon: r.get(3)?,
        kind: parsed(r, 4)?,
    })
}

fn budget_from_row(r: &Row) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: r.get(0)?,
        category_id: r.get(1)?,
        monthly_limit: parsed(r, 2)?,
        month: parsed(r, 3)?,
    })
}

impl<'c> SqliteRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn list<T>(
        &self,
        sql: &str,
        map: fn(&Row) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], map)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn fetch<T>(
        &self,
        entity: &'static str,
        sql: &str,
        id: i64,
        map: fn(&Row) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        self.conn
            .query_row(sql, params![id], map)
            .optional()?
            .ok_or(StoreError::NotFound { entity, id })
    }

    pub fn transaction(&self, id: i64) -> Result<Transaction, StoreError> {
        let sql = format!("SELECT {} FROM transactions WHERE id=?1", TRANSACTION_COLUMNS);
        self.fetch("transaction", &sql, id, transaction_from_row)
    }

    pub fn category(&self, id: i64) -> Result<Category, StoreError> {
        let sql = format!("SELECT {} FROM categories WHERE id=?1", CATEGORY_COLUMNS);
        self.fetch("category", &sql, id, category_from_row)
    }

    pub fn budget(&self, id: i64) -> Result<Budget, StoreError> {
        let sql = format!("SELECT {} FROM budgets WHERE id=?1", BUDGET_COLUMNS);
        self.fetch("budget", &sql, id, budget_from_row)
    }

    fn ensure_changed(changed: usize, entity: &'static str, id: i64) -> Result<(), StoreError> {
        if changed == 0 {
            return Err(StoreError::NotFound { entity, id });
        }
        Ok(())
    }
}

impl FinanceRepository for SqliteRepository<'_> {
    fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let sql = format!(
            "SELECT {} FROM transactions ORDER BY date DESC, id DESC",
            TRANSACTION_COLUMNS
        );
        let out = self.list(&sql, transaction_from_row)?;
        tracing::debug!(count = out.len(), "loaded transactions");
        Ok(out)
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let sql = format!("SELECT {} FROM categories ORDER BY id", CATEGORY_COLUMNS);
        let out = self.list(&sql, category_from_row)?;
        tracing::debug!(count = out.len(), "loaded categories");
        Ok(out)
    }

    fn list_budgets(&self) -> Result<Vec<Budget>, StoreError> {
        let sql = format!("SELECT {} FROM budgets ORDER BY id", BUDGET_COLUMNS);
        let out = self.list(&sql, budget_from_row)?;
        tracing::debug!(count = out.len(), "loaded budgets");
        Ok(out)
    }

    fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, StoreError> {
        self.conn.execute(
            "INSERT INTO transactions(amount, type, category, date, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.amount.to_string(),
                new.kind.as_str(),
                new.category,
                new.date,
                new.description,
                Utc::now()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, kind = %new.kind, category = %new.category, "transaction created");
        self.transaction(id)
    }

    fn update_transaction(&self, id: i64, new: &NewTransaction) -> Result<Transaction, StoreError> {
        let changed = self.conn.execute(
            "UPDATE transactions SET amount=?1, type=?2, category=?3, date=?4, description=?5
             WHERE id=?6",
            params![
                new.amount.to_string(),
                new.kind.as_str(),
                new.category,
                new.date,
                new.description,
                id
            ],
        )?;
        Self::ensure_changed(changed, "transaction", id)?;
        tracing::info!(id, "transaction updated");
        self.transaction(id)
    }

    fn delete_transaction(&self, id: i64) -> Result<Transaction, StoreError> {
        let existing = self.transaction(id)?;
        self.conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        tracing::info!(id, "transaction deleted");
        Ok(existing)
    }

    fn create_category(&self, new: &NewCategory) -> Result<Category, StoreError> {
        self.conn.execute(
            "INSERT INTO categories(name, color, icon, type) VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.color, new.icon, new.kind.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, name = %new.name, "category created");
        self.category(id)
    }

    fn update_category(&self, id: i64, new: &NewCategory) -> Result<Category, StoreError> {
        let changed = self.conn.execute(
            "UPDATE categories SET name=?1, color=?2, icon=?3, type=?4 WHERE id=?5",
            params![new.name, new.color, new.icon, new.kind.as_str(), id],
        )?;
        Self::ensure_changed(changed, "category", id)?;
        tracing::info!(id, "category updated");
        self.category(id)
    }

    fn delete_category(&self, id: i64) -> Result<Category, StoreError> {
        let existing = self.category(id)?;
        self.conn
            .execute("DELETE FROM categories WHERE id=?1", params![id])?;
        tracing::info!(id, "category deleted");
        Ok(existing)
    }

    fn create_budget(&self, new: &NewBudget) -> Result<Budget, StoreError> {
        self.conn.execute(
            "INSERT INTO budgets(category_id, monthly_limit, month) VALUES (?1, ?2, ?3)",
            params![
                new.category_id,
                new.monthly_limit.to_string(),
                new.month.to_string()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, category_id = new.category_id, month = %new.month, "budget created");
        self.budget(id)
    }

    fn update_budget(&self, id: i64, new: &NewBudget) -> Result<Budget, StoreError> {
        let changed = self.conn.execute(
            "UPDATE budgets SET category_id=?1, monthly_limit=?2, month=?3 WHERE id=?4",
            params![
                new.category_id,
                new.monthly_limit.to_string(),
                new.month.to_string(),
                id
            ],
        )?;
        Self::ensure_changed(changed, "budget", id)?;
        tracing::info!(id, "budget updated");
        self.budget(id)
    }

    fn delete_budget(&self, id: i64) -> Result<Budget, StoreError> {
        let existing = self.budget(id)?;
        self.conn
            .execute("DELETE FROM budgets WHERE id=?1", params![id])?;
        tracing::info!(id, "budget deleted");
        Ok(existing)
    }
}
