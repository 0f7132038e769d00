// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budget;
pub mod charts;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;
pub mod money;
pub mod repository;
pub mod resolve;
pub mod stats;
pub mod utils;
