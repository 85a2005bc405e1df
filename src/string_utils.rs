// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Utilities for comparing strings.

use unicode_normalization::UnicodeNormalization;

/// Return the string in a form suitable for case-insensitive comparison.
///
/// This first normalizes to Unicode Normalization Form KC, which composes
/// characters with accents into a single code point, and also replaces things
/// that have the same semantic meaning, such as full-width latin letters with
/// their normal counterparts. Then everything is lowercased. The result is not
/// meant for display, only for comparing against other folded strings.
pub fn fold_case(s: &str) -> String {
    s.nfkc().flat_map(|ch| ch.to_lowercase()).collect()
}

#[cfg(test)]
mod test {
    use super::fold_case;

    #[test]
    pub fn fold_case_lowercases_and_composes() {
        assert_eq!(fold_case("BTS"), "bts");
        assert_eq!(fold_case("Björk"), "björk");
        // Decomposed o + combining diaeresis folds to the same as composed ö.
        assert_eq!(fold_case("Bjo\u{308}rk"), fold_case("Björk"));
        // Full-width letters fold to ascii ones.
        assert_eq!(fold_case("ＢＴＳ"), "bts");
    }
}
