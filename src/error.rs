// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected textual input for one of the domain value types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid month '{0}', expected YYYY-MM")]
    Month(String),
    #[error("Invalid transaction type '{0}', expected income|expense")]
    TransactionType(String),
    #[error("Invalid category type '{0}', expected income|expense|both")]
    CategoryType(String),
    #[error("Invalid time range '{0}', expected current|last3|last6")]
    TimeRange(String),
    #[error("Unknown locale '{0}', expected en-US|en-GB|de-DE")]
    Locale(String),
}

/// Failures of the storage layer. Callers only ever see one generic
/// "unavailable" condition for reads; the underlying cause is kept as source.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to load financial data. Please try again.")]
    Unavailable(#[from] rusqlite::Error),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV buffer could not be flushed: {0}")]
    Buffer(#[from] std::io::Error),
    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
