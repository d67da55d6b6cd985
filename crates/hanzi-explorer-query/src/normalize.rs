// SPDX-License-Identifier: Apache-2.0

use unicode_normalization::UnicodeNormalization;

/// Search form of a string: trimmed, NFKC, Unicode-lowercased. NFKC folds
/// full-width Latin so `ＴＷＯ` finds `two`.
#[must_use]
pub fn normalize_text(input: &str) -> String {
    input.trim().nfkc().collect::<String>().to_lowercase()
}

/// Glyph lookup form: trimmed and NFC, case untouched.
#[must_use]
pub fn normalize_glyph(input: &str) -> String {
    input.trim().nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_and_decomposed_forms_compare_equal() {
        assert_eq!(normalize_text("Ye\u{0301}"), normalize_text("y\u{00e9}"));
        assert_eq!(normalize_text("  TWO "), "two");
        assert_eq!(normalize_glyph(" 二\n"), "二");
    }

    #[test]
    fn full_width_latin_folds_to_ascii() {
        assert_eq!(normalize_text("ＴＷＯ"), "two");
        assert_eq!(normalize_text("Ｆｌｏｏｒ　"), "floor");
    }
}
