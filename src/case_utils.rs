// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Case normalization for trick names and filter values.
//!
//! Trick names arrive as URL slugs ("kick-flip", "switch_flip") and filter
//! values as lowercase words ("frontside"); stored records use title case
//! ("Kick Flip", "Frontside"). Nothing here validates the result against
//! the catalog; a name that normalizes to something unknown simply fails
//! to match downstream.

/// Title-case a single word: first char uppercased, rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Normalize a slug-style trick name into the stored capitalization.
///
/// Splits on `-` and `_`, title-cases each word, and rejoins with single
/// spaces: `"switch_flip"` becomes `"Switch Flip"`. Empty input stays empty.
pub fn normalize_slug(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    raw.split(['-', '_'])
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title-case a space-separated phrase: `"frontside"` becomes `"Frontside"`.
///
/// Unlike [`normalize_slug`] this splits on spaces only, for filter values
/// that already arrive as words. Empty input stays empty.
pub fn to_title_case(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    raw.split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
