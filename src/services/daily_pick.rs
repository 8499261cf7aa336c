// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trick-of-the-day selection.
//!
//! One pick per server-local calendar day, stored append-only and keyed by
//! the day. A new pick avoids the names of the 10 most recently created
//! picks. The eligible set is computed up front and drawn from once, so
//! selection terminates even when the catalog is small; if every trick is
//! inside the exclusion window the draw falls back to the whole pool.

use crate::db::TrickStore;
use crate::error::{AppError, Result};
use crate::models::{DailyPick, Trick};
use crate::time_utils::{format_utc_rfc3339, local_day_key};
use anyhow::anyhow;
use chrono::{Local, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

/// How many recent picks a new pick must not repeat.
const EXCLUSION_WINDOW: u32 = 10;

/// Return today's pick, creating it if this is the first request of the day.
pub async fn get_or_create_todays_pick<S: TrickStore + Sync>(store: &S) -> Result<Trick> {
    let mut rng = StdRng::from_entropy();
    get_or_create_with_rng(store, &mut rng).await
}

/// Same as [`get_or_create_todays_pick`] but with a caller-supplied RNG,
/// so tests can seed the draw.
pub async fn get_or_create_with_rng<S, R>(store: &S, rng: &mut R) -> Result<Trick>
where
    S: TrickStore + Sync,
    R: Rng + Send,
{
    let day_key = local_day_key(Local::now());

    if let Some(pick) = store.pick_for_day(&day_key).await? {
        return resolve_pick(store, &pick).await;
    }

    let pool = store.all_tricks().await?;
    if pool.is_empty() {
        return Err(AppError::Internal(anyhow!(
            "cannot select a trick of the day: trick collection is empty"
        )));
    }

    let recent = store.recent_picks(EXCLUSION_WINDOW).await?;
    let excluded = excluded_names(&pool, &recent);

    let chosen = select_candidate(&pool, &excluded, rng)
        .ok_or_else(|| AppError::Internal(anyhow!("selection from non-empty pool failed")))?
        .clone();

    let trick_id = chosen.id.clone().ok_or_else(|| {
        AppError::Database(format!("trick '{}' has no document id", chosen.name))
    })?;

    let now = format_utc_rfc3339(Utc::now());
    let pick = DailyPick {
        id: None,
        date: now.clone(),
        trick_id,
        created_at: now,
    };

    if store.insert_pick_for_day(&day_key, &pick).await? {
        tracing::info!(day = %day_key, trick = %chosen.name, "Created trick of the day");
        return Ok(chosen);
    }

    // A concurrent request created today's pick between our lookup and the
    // write. Its pick is canonical; ours is discarded.
    let winner = store.pick_for_day(&day_key).await?.ok_or_else(|| {
        AppError::Database(format!("daily pick for {} vanished after conflict", day_key))
    })?;
    resolve_pick(store, &winner).await
}

/// Resolve the trick a pick references. A dangling reference is an error,
/// not something to silently skip.
async fn resolve_pick<S: TrickStore + Sync>(store: &S, pick: &DailyPick) -> Result<Trick> {
    store.trick_by_id(&pick.trick_id).await?.ok_or_else(|| {
        AppError::Database(format!(
            "daily pick references missing trick {}",
            pick.trick_id
        ))
    })
}

/// Names of the tricks the recent picks reference, resolved through the
/// loaded pool. Picks referencing ids no longer in the pool exclude nothing.
fn excluded_names(pool: &[Trick], recent: &[DailyPick]) -> HashSet<String> {
    let names_by_id: HashMap<&str, &str> = pool
        .iter()
        .filter_map(|t| t.id.as_deref().map(|id| (id, t.name.as_str())))
        .collect();

    recent
        .iter()
        .filter_map(|p| names_by_id.get(p.trick_id.as_str()))
        .map(|name| name.to_string())
        .collect()
}

/// Draw one trick uniformly from the pool minus the excluded names.
///
/// Returns `None` only for an empty pool. If exclusion empties the eligible
/// set the draw covers the whole pool instead, trading strict non-repetition
/// for availability.
fn select_candidate<'a, R: Rng>(
    pool: &'a [Trick],
    excluded: &HashSet<String>,
    rng: &mut R,
) -> Option<&'a Trick> {
    let eligible: Vec<&Trick> = pool.iter().filter(|t| !excluded.contains(&t.name)).collect();

    if let Some(trick) = eligible.choose(rng).copied() {
        return Some(trick);
    }

    tracing::warn!(
        pool = pool.len(),
        excluded = excluded.len(),
        "Every trick is inside the exclusion window; drawing from the full pool"
    );
    pool.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    fn trick(id: &str, name: &str) -> Trick {
        Trick {
            id: Some(id.to_string()),
            name: name.to_string(),
            path: name.to_lowercase().replace(' ', "-"),
            difficulty: Difficulty::Beginner,
            flip_trick: false,
            flip_direction: None,
            description: format!("{} description", name),
            board_rotation_direction: None,
            body_rotation_direction: None,
            degree_of_board_rotation: None,
            degree_of_body_rotation: None,
            direction_of_flipping_relative_to_rotation_of_board: None,
            how_to_perform: vec![],
            youtube_links: vec![],
            prerequisites: vec![],
        }
    }

    fn pick(day: &str, trick_id: &str, created_at: &str) -> DailyPick {
        DailyPick {
            id: Some(day.to_string()),
            date: created_at.to_string(),
            trick_id: trick_id.to_string(),
            created_at: created_at.to_string(),
        }
    }

    /// In-memory stand-in for Firestore.
    struct InMemoryStore {
        tricks: Vec<Trick>,
        picks: Mutex<Vec<DailyPick>>,
    }

    impl InMemoryStore {
        fn new(tricks: Vec<Trick>, picks: Vec<DailyPick>) -> Self {
            Self {
                tricks,
                picks: Mutex::new(picks),
            }
        }
    }

    #[async_trait]
    impl TrickStore for InMemoryStore {
        async fn all_tricks(&self) -> std::result::Result<Vec<Trick>, AppError> {
            Ok(self.tricks.clone())
        }

        async fn trick_by_id(&self, id: &str) -> std::result::Result<Option<Trick>, AppError> {
            Ok(self
                .tricks
                .iter()
                .find(|t| t.id.as_deref() == Some(id))
                .cloned())
        }

        async fn pick_for_day(
            &self,
            day_key: &str,
        ) -> std::result::Result<Option<DailyPick>, AppError> {
            Ok(self
                .picks
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id.as_deref() == Some(day_key))
                .cloned())
        }

        async fn recent_picks(&self, limit: u32) -> std::result::Result<Vec<DailyPick>, AppError> {
            let mut picks = self.picks.lock().unwrap().clone();
            picks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            picks.truncate(limit as usize);
            Ok(picks)
        }

        async fn insert_pick_for_day(
            &self,
            day_key: &str,
            pick: &DailyPick,
        ) -> std::result::Result<bool, AppError> {
            let mut picks = self.picks.lock().unwrap();
            if picks.iter().any(|p| p.id.as_deref() == Some(day_key)) {
                return Ok(false);
            }
            let mut stored = pick.clone();
            stored.id = Some(day_key.to_string());
            picks.push(stored);
            Ok(true)
        }
    }

    fn three_trick_pool() -> Vec<Trick> {
        vec![trick("a", "Ollie"), trick("b", "Kickflip"), trick("c", "Heelflip")]
    }

    /// Ten prior picks, all referencing the given trick id, on past days.
    fn ten_picks_for(trick_id: &str) -> Vec<DailyPick> {
        (1..=10)
            .map(|day| {
                pick(
                    &format!("2020-01-{:02}", day),
                    trick_id,
                    &format!("2020-01-{:02}T08:00:00Z", day),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_same_day_calls_return_same_trick() {
        let store = InMemoryStore::new(three_trick_pool(), vec![]);

        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(999);

        let first = get_or_create_with_rng(&store, &mut rng_a).await.unwrap();
        let second = get_or_create_with_rng(&store, &mut rng_b).await.unwrap();

        assert_eq!(first.name, second.name);
        assert_eq!(store.picks.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recent_picks_are_never_repeated() {
        // Pool {Ollie, Kickflip, Heelflip}; every recent pick references
        // Ollie, so the selector must return one of the other two.
        for seed in 0..50 {
            let store = InMemoryStore::new(three_trick_pool(), ten_picks_for("a"));
            let mut rng = StdRng::seed_from_u64(seed);

            let chosen = get_or_create_with_rng(&store, &mut rng).await.unwrap();
            assert_ne!(chosen.name, "Ollie", "seed {} repeated a recent pick", seed);
        }
    }

    #[tokio::test]
    async fn test_falls_back_to_full_pool_when_all_excluded() {
        let store = InMemoryStore::new(vec![trick("a", "Ollie")], ten_picks_for("a"));
        let mut rng = StdRng::seed_from_u64(7);

        let chosen = get_or_create_with_rng(&store, &mut rng).await.unwrap();
        assert_eq!(chosen.name, "Ollie");
    }

    #[tokio::test]
    async fn test_empty_collection_is_an_error() {
        let store = InMemoryStore::new(vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(0);

        let err = get_or_create_with_rng(&store, &mut rng).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_dangling_reference_is_an_error() {
        let today = local_day_key(Local::now());
        let store = InMemoryStore::new(
            three_trick_pool(),
            vec![pick(&today, "gone", "2020-01-01T08:00:00Z")],
        );
        let mut rng = StdRng::seed_from_u64(0);

        let err = get_or_create_with_rng(&store, &mut rng).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    /// Store whose insert always loses the creation race.
    struct RacingStore {
        inner: InMemoryStore,
        raced: AtomicBool,
    }

    #[async_trait]
    impl TrickStore for RacingStore {
        async fn all_tricks(&self) -> std::result::Result<Vec<Trick>, AppError> {
            self.inner.all_tricks().await
        }

        async fn trick_by_id(&self, id: &str) -> std::result::Result<Option<Trick>, AppError> {
            self.inner.trick_by_id(id).await
        }

        async fn pick_for_day(
            &self,
            day_key: &str,
        ) -> std::result::Result<Option<DailyPick>, AppError> {
            self.inner.pick_for_day(day_key).await
        }

        async fn recent_picks(&self, limit: u32) -> std::result::Result<Vec<DailyPick>, AppError> {
            self.inner.recent_picks(limit).await
        }

        async fn insert_pick_for_day(
            &self,
            day_key: &str,
            _pick: &DailyPick,
        ) -> std::result::Result<bool, AppError> {
            // Another request slips in a pick for Kickflip first.
            self.raced.store(true, Ordering::SeqCst);
            let winner = pick(day_key, "b", "2020-02-01T08:00:00Z");
            self.inner.insert_pick_for_day(day_key, &winner).await?;
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_lost_race_returns_the_winners_pick() {
        let store = RacingStore {
            inner: InMemoryStore::new(three_trick_pool(), vec![]),
            raced: AtomicBool::new(false),
        };
        let mut rng = StdRng::seed_from_u64(3);

        let chosen = get_or_create_with_rng(&store, &mut rng).await.unwrap();
        assert!(store.raced.load(Ordering::SeqCst));
        assert_eq!(chosen.name, "Kickflip");
    }

    #[test]
    fn test_select_candidate_uniform_over_eligible() {
        let pool = three_trick_pool();
        let excluded: HashSet<String> = ["Ollie".to_string()].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = HashSet::new();
        for _ in 0..100 {
            let chosen = select_candidate(&pool, &excluded, &mut rng).unwrap();
            assert_ne!(chosen.name, "Ollie");
            seen.insert(chosen.name.clone());
        }
        // Both eligible tricks show up over 100 draws.
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_excluded_names_ignores_unknown_references() {
        let pool = three_trick_pool();
        let recent = vec![
            pick("2020-01-01", "a", "2020-01-01T08:00:00Z"),
            pick("2020-01-02", "deleted", "2020-01-02T08:00:00Z"),
        ];

        let excluded = excluded_names(&pool, &recent);
        assert_eq!(excluded.len(), 1);
        assert!(excluded.contains("Ollie"));
    }
}
