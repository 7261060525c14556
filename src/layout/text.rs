/// Marker appended to truncated labels.
pub const ELLIPSIS: char = '\u{2026}';

/// Source of rendered text extents for the label measurement pass.
pub trait TextMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64;
}

/// Backend-independent width estimate based on per-glyph-class advances.
///
/// Deterministic, so layout and tests do not depend on installed fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' | ';' | '\'' => 0.34,
                '-' | '+' | '%' | '(' | ')' => 0.42,
                ' ' => 0.33,
                'i' | 'j' | 'l' | 'f' | 't' | 'r' | 'I' => 0.34,
                'm' | 'w' | 'M' | 'W' => 0.86,
                'A'..='Z' => 0.68,
                ELLIPSIS => 1.0,
                _ => 0.58,
            }
        });
        units * font_size_px
    }
}

/// Truncates `text` with an ellipsis so it fits into `max_width_px`.
///
/// Text that already fits is returned unchanged. Otherwise the longest
/// prefix whose ellipsized form fits is kept; in the worst case only the
/// ellipsis remains.
#[must_use]
pub fn trim_text(
    text: &str,
    max_width_px: f64,
    font_size_px: f64,
    measurer: &dyn TextMeasurer,
) -> String {
    if !max_width_px.is_finite() || measurer.text_width_px(text, font_size_px) <= max_width_px {
        return text.to_owned();
    }

    let chars: Vec<char> = text.chars().collect();
    let ellipsized = |len: usize| -> String {
        let mut out: String = chars[..len].iter().collect::<String>().trim_end().to_owned();
        out.push(ELLIPSIS);
        out
    };

    // Widths grow with prefix length, so the largest fitting prefix can be bisected.
    let (mut lo, mut hi) = (0_usize, chars.len().saturating_sub(1));
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if measurer.text_width_px(&ellipsized(mid), font_size_px) <= max_width_px {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    ellipsized(lo)
}

#[cfg(test)]
mod tests {
    use super::{ELLIPSIS, EstimatedTextMeasurer, TextMeasurer, trim_text};

    #[test]
    fn short_text_is_untouched() {
        let trimmed = trim_text("db", 120.0, 12.0, &EstimatedTextMeasurer);
        assert_eq!(trimmed, "db");
    }

    #[test]
    fn long_text_is_ellipsized_within_width() {
        let measurer = EstimatedTextMeasurer;
        let text = "a very long service name that will not fit";
        let trimmed = trim_text(text, 60.0, 12.0, &measurer);
        assert!(trimmed.ends_with(ELLIPSIS));
        assert!(trimmed.chars().count() < text.chars().count());
        assert!(measurer.text_width_px(&trimmed, 12.0) <= 60.0);
    }

    #[test]
    fn zero_width_keeps_only_ellipsis() {
        let trimmed = trim_text("abc", 0.0, 12.0, &EstimatedTextMeasurer);
        assert_eq!(trimmed, ELLIPSIS.to_string());
    }

    #[test]
    fn empty_text_measures_zero() {
        assert_eq!(EstimatedTextMeasurer.text_width_px("", 12.0), 0.0);
    }
}
