// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trick record model for storage and API.

use serde::{Deserialize, Serialize};

/// Stored trick record in Firestore.
///
/// Tricks are seeded out-of-band; this service only reads them. Field
/// names in the documents are camelCase. The `name` field is effectively
/// unique within the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trick {
    /// Firestore document ID, populated on reads
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unique display name ("Kickflip", "Switch Flip")
    pub name: String,
    /// Path identifier
    pub path: String,
    pub difficulty: Difficulty,
    /// Whether the board flips during the trick
    pub flip_trick: bool,
    #[serde(default)]
    pub flip_direction: Option<FlipDirection>,
    pub description: String,
    /// Free string, conventionally Frontside/Backside/Varied/Forward
    #[serde(default)]
    pub board_rotation_direction: Option<String>,
    #[serde(default)]
    pub body_rotation_direction: Option<BodyRotationDirection>,
    /// Degrees of board rotation, conventionally a multiple of 180
    #[serde(default)]
    pub degree_of_board_rotation: Option<u32>,
    /// Degrees of body rotation, conventionally a multiple of 180
    #[serde(default)]
    pub degree_of_body_rotation: Option<u32>,
    #[serde(default)]
    pub direction_of_flipping_relative_to_rotation_of_board: Option<FlipRelativeDirection>,
    #[serde(default)]
    pub how_to_perform: Vec<String>,
    #[serde(default)]
    pub youtube_links: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// Trick difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Direction the board flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipDirection {
    Kickflip,
    Heelflip,
    Forward,
}

/// Direction the body rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyRotationDirection {
    Frontside,
    Backside,
    #[serde(rename = "Frontside Or Backside")]
    FrontsideOrBackside,
}

/// Flip direction relative to the board's rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipRelativeDirection {
    Inward,
    Outward,
    Mixed,
}
