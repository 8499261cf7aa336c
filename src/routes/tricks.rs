// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routes for the trick catalog, mounted under `/tricks`.
//!
//! Enum and degree validation happens here, before any query runs; the
//! accepted values are named in the 400 responses. Database failures are
//! logged by the error type and surfaced as generic 500s.

use crate::case_utils::{normalize_slug, to_title_case};
use crate::error::{AppError, Result};
use crate::models::{Trick, TrickFilter};
use crate::services::daily_pick;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::sync::Arc;

const ROTATION_DIRECTIONS: [&str; 4] = ["frontside", "backside", "varied", "forward"];
const FLIP_DIRECTIONS: [&str; 2] = ["kickflip", "heelflip"];

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tricks", get(list_tricks))
        .route("/tricks/flip-tricks", get(flip_tricks))
        .route("/tricks/name/{name}", get(trick_by_name))
        .route("/tricks/name", get(name_without_param))
        .route("/tricks/random", get(random_trick))
        .route("/tricks/trick-of-the-day", get(trick_of_the_day))
        .route("/tricks/filter", get(filter_tricks))
}

// ─── Listing ─────────────────────────────────────────────────

/// Get every trick in the catalog.
async fn list_tricks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Trick>>> {
    let tricks = state.db.list_tricks().await?;
    Ok(Json(tricks))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlipTricksQuery {
    flip_direction: Option<String>,
}

/// Get flip tricks, optionally constrained to one flip direction.
async fn flip_tricks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlipTricksQuery>,
) -> Result<Json<Vec<Trick>>> {
    if let Some(direction) = &params.flip_direction {
        if !FLIP_DIRECTIONS.contains(&direction.to_lowercase().as_str()) {
            return Err(AppError::BadRequest(
                "Invalid flip direction. Must be in the form 'kickflip' or 'heelflip' or not specified"
                    .to_string(),
            ));
        }
    }

    let direction = params.flip_direction.as_deref().map(to_title_case);
    let tricks = state.db.find_flip_tricks(direction.as_deref()).await?;
    Ok(Json(tricks))
}

// ─── Name Lookup ─────────────────────────────────────────────

/// Look up tricks by slug-style name ("kick-flip", "switch_flip").
async fn trick_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Trick>>> {
    let normalized = normalize_slug(&name);
    tracing::debug!(raw = %name, normalized = %normalized, "Trick name lookup");

    let tricks = state.db.find_by_name(&normalized).await?;
    if tricks.is_empty() {
        return Err(AppError::NotFound(format!(
            "Trick with name {} not found. Please check the name and try again. \
             Multiword trick names must be in 'snake_case' or dash-case format",
            name
        )));
    }
    Ok(Json(tricks))
}

/// `/name` without a path segment: explain the expected form.
async fn name_without_param() -> AppError {
    AppError::BadRequest(
        "Please provide a name parameter in the URL in the form '/name/trick-name'. \
         Multiword trick names must be in 'snake_case' or dash-case format"
            .to_string(),
    )
}

// ─── Random & Daily Pick ─────────────────────────────────────

/// Get one uniformly random trick.
async fn random_trick(State(state): State<Arc<AppState>>) -> Result<Json<Trick>> {
    let tricks = state.db.list_tricks().await?;

    let mut rng = StdRng::from_entropy();
    let trick = tricks
        .choose(&mut rng)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("trick collection is empty")))?;

    Ok(Json(trick.clone()))
}

/// Get today's trick of the day, selecting one if none exists yet.
async fn trick_of_the_day(State(state): State<Arc<AppState>>) -> Result<Json<Trick>> {
    let trick = daily_pick::get_or_create_todays_pick(&state.db).await?;
    Ok(Json(trick))
}

// ─── Filtering ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterQuery {
    difficulty: Option<String>,
    board_rotation_direction: Option<String>,
    board_rotation_degrees: Option<u32>,
    body_rotation_direction: Option<String>,
    body_rotation_degrees: Option<u32>,
    flip_direction: Option<String>,
}

/// Filter tricks on rotation, degree, difficulty, and flip fields.
///
/// An empty result is not an error: it returns 200 with a message payload
/// so clients can distinguish "nothing matched" from a failed query.
async fn filter_tricks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterQuery>,
) -> Result<Response> {
    validate_rotation_direction(params.board_rotation_direction.as_deref(), "board")?;
    validate_rotation_degrees(params.board_rotation_degrees, "board")?;
    validate_rotation_direction(params.body_rotation_direction.as_deref(), "body")?;
    validate_rotation_degrees(params.body_rotation_degrees, "body")?;

    if let Some(direction) = &params.flip_direction {
        if !FLIP_DIRECTIONS.contains(&direction.to_lowercase().as_str()) {
            return Err(AppError::BadRequest(
                "Invalid flip direction. Must be in the form 'kickflip' or 'heelflip'".to_string(),
            ));
        }
    }

    let filter = TrickFilter::build(
        params.difficulty.as_deref(),
        params.board_rotation_direction.as_deref(),
        params.board_rotation_degrees,
        params.body_rotation_direction.as_deref(),
        params.body_rotation_degrees,
        params.flip_direction.as_deref(),
    );

    let tricks = state.db.query_tricks(&filter).await?;
    Ok(filter_response(tricks))
}

/// Shape the filter result: matches as a plain array, no matches as a 200
/// with a message payload (distinct from a query failure).
fn filter_response(tricks: Vec<Trick>) -> Response {
    if tricks.is_empty() {
        return Json(serde_json::json!({
            "message": "No tricks found for the given filters"
        }))
        .into_response();
    }
    Json(tricks).into_response()
}

fn validate_rotation_direction(value: Option<&str>, which: &str) -> Result<()> {
    if let Some(direction) = value {
        if !ROTATION_DIRECTIONS.contains(&direction.to_lowercase().as_str()) {
            return Err(AppError::BadRequest(format!(
                "Invalid {} rotation direction. Must be in the form 'frontside', 'backside', \
                 'varied' or 'forward'",
                which
            )));
        }
    }
    Ok(())
}

fn validate_rotation_degrees(value: Option<u32>, which: &str) -> Result<()> {
    if let Some(degrees) = value {
        if degrees % 180 != 0 {
            return Err(AppError::BadRequest(format!(
                "Invalid {} rotation degrees. Must be a multiple of 180",
                which
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_empty_filter_result_is_200_with_message() {
        let response = filter_response(vec![]);
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "No tricks found for the given filters");
    }

    #[test]
    fn test_validate_rotation_direction() {
        assert!(validate_rotation_direction(None, "board").is_ok());
        assert!(validate_rotation_direction(Some("frontside"), "board").is_ok());
        assert!(validate_rotation_direction(Some("BACKSIDE"), "body").is_ok());
        assert!(validate_rotation_direction(Some("sideways"), "board").is_err());
    }

    #[test]
    fn test_validate_rotation_degrees() {
        assert!(validate_rotation_degrees(None, "board").is_ok());
        assert!(validate_rotation_degrees(Some(0), "board").is_ok());
        assert!(validate_rotation_degrees(Some(180), "board").is_ok());
        assert!(validate_rotation_degrees(Some(540), "body").is_ok());
        assert!(validate_rotation_degrees(Some(270), "board").is_err());
    }
}
