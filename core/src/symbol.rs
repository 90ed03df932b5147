use crate::CardValue;

/// Display glyphs, indexed by card value starting at 1.
///
/// Value 6 shows 🎬 rather than repeating 🎪, so each of the eight pairs looks different.
pub const GLYPHS: [&str; 8] = ["🎈", "🎯", "🎪", "🎨", "🎭", "🎬", "🎵", "🎸"];

/// Shown for card values outside of [`GLYPHS`].
pub const PLACEHOLDER_GLYPH: &str = "❓";

pub fn has_glyph(value: CardValue) -> bool {
    (1..=GLYPHS.len() as CardValue).contains(&value)
}

pub fn glyph_for(value: CardValue) -> &'static str {
    if has_glyph(value) {
        GLYPHS[(value - 1) as usize]
    } else {
        PLACEHOLDER_GLYPH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_one_based() {
        assert_eq!(glyph_for(1), "🎈");
        assert_eq!(glyph_for(8), "🎸");
    }

    #[test]
    fn out_of_range_values_use_placeholder() {
        assert_eq!(glyph_for(0), PLACEHOLDER_GLYPH);
        assert_eq!(glyph_for(9), PLACEHOLDER_GLYPH);
        assert_eq!(glyph_for(-3), PLACEHOLDER_GLYPH);
        assert_eq!(glyph_for(CardValue::MAX), PLACEHOLDER_GLYPH);
    }

    #[test]
    fn every_value_has_a_distinct_glyph() {
        for (i, a) in GLYPHS.iter().enumerate() {
            assert!(GLYPHS[i + 1..].iter().all(|b| a != b), "duplicate glyph {}", a);
        }
    }
}
