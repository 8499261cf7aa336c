// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for tricks, daily picks, and filter predicates.

pub mod daily_pick;
pub mod filter;
pub mod trick;

pub use daily_pick::DailyPick;
pub use filter::TrickFilter;
pub use trick::{BodyRotationDirection, Difficulty, FlipDirection, FlipRelativeDirection, Trick};
