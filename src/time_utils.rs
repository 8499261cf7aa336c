// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Key identifying the current server-local calendar day (`YYYY-MM-DD`).
///
/// The daily pick is keyed by calendar day, not exact timestamp, so two
/// requests at 00:01 and 23:59 of the same local day share a key.
pub fn local_day_key(now: DateTime<Local>) -> String {
    now.date_naive().format("%Y-%m-%d").to_string()
}
