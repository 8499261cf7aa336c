// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Tricks (read-only catalog queries)
//! - Daily picks (append-only trick-of-the-day records)

use crate::db::{collections, TrickStore};
use crate::error::AppError;
use crate::models::filter::{DegreeFilter, FieldFilter};
use crate::models::{DailyPick, Trick, TrickFilter};
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing
        // a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Trick Queries ───────────────────────────────────────────

    /// Load every trick in the catalog.
    pub async fn list_tricks(&self) -> Result<Vec<Trick>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRICKS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find flip tricks, optionally constrained to one flip direction.
    ///
    /// `direction` must already be title-cased to the stored value
    /// ("Kickflip" / "Heelflip").
    pub async fn find_flip_tricks(&self, direction: Option<&str>) -> Result<Vec<Trick>, AppError> {
        let direction = direction.map(|d| d.to_string());

        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRICKS)
            .filter(move |q| {
                q.for_all([
                    q.field("flipTrick").eq(true),
                    direction
                        .clone()
                        .and_then(|d| q.field("flipDirection").eq(d)),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find tricks by exact (normalized) display name.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Trick>, AppError> {
        let name = name.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRICKS)
            .filter(move |q| q.for_all([q.field("name").eq(name.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find tricks matching a [`TrickFilter`] predicate set.
    pub async fn query_tricks(&self, filter: &TrickFilter) -> Result<Vec<Trick>, AppError> {
        let filter = filter.clone();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRICKS)
            .filter(move |q| {
                q.for_all([
                    field_filter(&q, "difficulty", &filter.difficulty),
                    field_filter(
                        &q,
                        "boardRotationDirection",
                        &filter.board_rotation_direction,
                    ),
                    degree_filter(
                        &q,
                        "degreeOfBoardRotation",
                        filter.degree_of_board_rotation,
                    ),
                    field_filter(&q, "bodyRotationDirection", &filter.body_rotation_direction),
                    degree_filter(&q, "degreeOfBodyRotation", filter.degree_of_body_rotation),
                    field_filter(&q, "flipDirection", &filter.flip_direction),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Translate a string-field constraint into a Firestore filter.
fn field_filter(
    q: &firestore::select_filter_builder::FirestoreQueryFilterBuilder,
    field: &str,
    constraint: &FieldFilter,
) -> Option<firestore::FirestoreQueryFilter> {
    match constraint {
        FieldFilter::Exists => q.field(field).is_not_null(),
        FieldFilter::Equals(value) => q.field(field).eq(value.clone()),
    }
}

/// Translate a degree constraint into a Firestore filter.
fn degree_filter(
    q: &firestore::select_filter_builder::FirestoreQueryFilterBuilder,
    field: &str,
    constraint: DegreeFilter,
) -> Option<firestore::FirestoreQueryFilter> {
    match constraint {
        DegreeFilter::NonNegative => q.field(field).greater_than_or_equal(0),
        DegreeFilter::Exactly(n) => q.field(field).eq(n),
    }
}

#[async_trait]
impl TrickStore for FirestoreDb {
    async fn all_tricks(&self) -> Result<Vec<Trick>, AppError> {
        self.list_tricks().await
    }

    async fn trick_by_id(&self, id: &str) -> Result<Option<Trick>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TRICKS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn pick_for_day(&self, day_key: &str) -> Result<Option<DailyPick>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::DAILY_TRICKS)
            .obj()
            .one(day_key)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn recent_picks(&self, limit: u32) -> Result<Vec<DailyPick>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_TRICKS)
            .order_by([(
                "createdAt",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_pick_for_day(
        &self,
        day_key: &str,
        pick: &DailyPick,
    ) -> Result<bool, AppError> {
        // Create-only write: the day key is the document ID, so a concurrent
        // request that already created today's pick surfaces as a conflict
        // instead of a duplicate row.
        let result = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::DAILY_TRICKS)
            .document_id(day_key)
            .object(pick)
            .execute::<()>()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(firestore::errors::FirestoreError::DataConflictError(_)) => {
                tracing::debug!(day_key, "Daily pick already exists (lost creation race)");
                Ok(false)
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }
}
