//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

use crate::error::AppError;
use crate::models::{DailyPick, Trick};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const TRICKS: &str = "standard_tricks";
    /// Daily picks, keyed by local day (`YYYY-MM-DD`)
    pub const DAILY_TRICKS: &str = "daily_tricks";
}

/// Store operations consumed by the trick catalog core.
///
/// Implemented by [`FirestoreDb`]; tests substitute an in-memory double
/// so selection logic can run without a live database.
#[async_trait]
pub trait TrickStore {
    /// Load the full trick collection.
    async fn all_tricks(&self) -> Result<Vec<Trick>, AppError>;

    /// Look up a trick by document ID.
    async fn trick_by_id(&self, id: &str) -> Result<Option<Trick>, AppError>;

    /// Look up the pick for a given day key, if one exists.
    async fn pick_for_day(&self, day_key: &str) -> Result<Option<DailyPick>, AppError>;

    /// The most recently created picks, newest first.
    async fn recent_picks(&self, limit: u32) -> Result<Vec<DailyPick>, AppError>;

    /// Create the pick for a day. Returns `false` without writing if a pick
    /// for that day already exists (a concurrent request won the race).
    async fn insert_pick_for_day(&self, day_key: &str, pick: &DailyPick)
        -> Result<bool, AppError>;
}
