// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Daily trick-of-the-day pick record.

use serde::{Deserialize, Serialize};

/// Stored daily pick in Firestore.
///
/// The document ID is the local calendar day key (`YYYY-MM-DD`), which
/// makes "one canonical pick per day" a storage-level constraint. Picks
/// are append-only: once written for a day they are never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPick {
    /// Day key, populated on reads from the document ID
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Moment the pick was created, RFC3339
    pub date: String,
    /// Document ID of the referenced trick; no trick data is duplicated
    #[serde(rename = "trick")]
    pub trick_id: String,
    /// Creation timestamp, RFC3339. Ordering key for the exclusion window.
    pub created_at: String,
}
