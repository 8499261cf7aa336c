// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Canonical filter predicate over stored trick fields.
//!
//! Each optional query parameter tightens one field constraint. An absent
//! parameter does not mean "any value": it degrades to "field is set", so
//! the filter endpoint only ever returns tricks that carry all six fields.

use crate::case_utils::to_title_case;

/// Constraint on a string-valued trick field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFilter {
    /// Field must be present (any value)
    Exists,
    /// Field must equal this stored value exactly
    Equals(String),
}

/// Constraint on a rotation-degree field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeFilter {
    /// Field must be present and non-negative
    NonNegative,
    /// Field must equal this value exactly
    Exactly(u32),
}

/// The full predicate set for the filter endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TrickFilter {
    pub difficulty: FieldFilter,
    pub board_rotation_direction: FieldFilter,
    pub degree_of_board_rotation: DegreeFilter,
    pub body_rotation_direction: FieldFilter,
    pub degree_of_body_rotation: DegreeFilter,
    pub flip_direction: FieldFilter,
}

impl TrickFilter {
    /// Build the predicate set from validated query parameters.
    ///
    /// String values are title-cased to match the stored capitalization
    /// ("frontside" matches stored "Frontside"). Enum and multiple-of-180
    /// validation happens at the HTTP boundary before this runs.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        difficulty: Option<&str>,
        board_rotation_direction: Option<&str>,
        board_rotation_degrees: Option<u32>,
        body_rotation_direction: Option<&str>,
        body_rotation_degrees: Option<u32>,
        flip_direction: Option<&str>,
    ) -> Self {
        Self {
            difficulty: string_filter(difficulty),
            board_rotation_direction: string_filter(board_rotation_direction),
            degree_of_board_rotation: degree_filter(board_rotation_degrees),
            body_rotation_direction: string_filter(body_rotation_direction),
            degree_of_body_rotation: degree_filter(body_rotation_degrees),
            flip_direction: string_filter(flip_direction),
        }
    }
}

fn string_filter(value: Option<&str>) -> FieldFilter {
    match value {
        Some(v) => FieldFilter::Equals(to_title_case(v)),
        None => FieldFilter::Exists,
    }
}

fn degree_filter(value: Option<u32>) -> DegreeFilter {
    match value {
        Some(n) => DegreeFilter::Exactly(n),
        None => DegreeFilter::NonNegative,
    }
}
