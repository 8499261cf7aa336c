// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trick-Catalog: read-oriented API for skateboarding trick data.
//!
//! This crate provides the backend API for listing, filtering, and
//! searching trick records, plus a persisted trick-of-the-day pick
//! that avoids repeating recent picks.

pub mod case_utils;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
