//! Layout Engine — wraps poem text to a fixed content width and computes the
//! exact pixel height of the body block.
//!
//! Pure function of (text, font metrics, width, spacing ratios): no drawing, no
//! randomness. The composer runs it once per card and reuses the result for both
//! canvas sizing and the draw pass, so the two can never diverge.

use crate::layout::metrics::TextMeasure;

/// Intra-paragraph line gap, as a fraction of the font line height.
pub const LINE_SPACING_RATIO: f32 = 0.6;
/// Inter-paragraph gap, as a fraction of the font line height.
pub const PARA_SPACING_RATIO: f32 = 1.2;

// ────────────────────────────────────────────────────────────────────────────
// Wrap policy
// ────────────────────────────────────────────────────────────────────────────

/// How a paragraph is tokenized for line filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Space-separated words, rejoined with single spaces.
    Word,
    /// Individual characters, rejoined with no separator.
    Character,
}

/// Classifies one paragraph: any ASCII letter makes it Latin-like (word wrap),
/// everything else wraps per character. Decided independently per paragraph.
pub fn classify_wrap_mode(para: &str) -> WrapMode {
    if para.chars().any(|c| c.is_ascii_alphabetic()) {
        WrapMode::Word
    } else {
        WrapMode::Character
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout output types
// ────────────────────────────────────────────────────────────────────────────

/// A single paragraph after wrapping. Read-only once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphLayout {
    /// Wrapped lines, in draw order.
    pub lines: Vec<String>,
    /// Pixel height of the block: n*font_line_height + (n-1)*line_gap.
    pub height: f32,
    pub font_line_height: f32,
    pub line_gap: f32,
}

/// The full body layout for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyLayout {
    pub paragraphs: Vec<ParagraphLayout>,
    /// Sum of paragraph heights plus inter-paragraph gaps.
    pub total_height: f32,
    pub para_gap: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Core layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `text` against `content_width`.
///
/// Splits on explicit line breaks, drops blank paragraphs, wraps each remaining
/// paragraph greedily, and accumulates pixel heights. Empty content yields zero
/// paragraphs and zero total height.
pub fn layout_text<M: TextMeasure>(
    text: &str,
    font: &M,
    content_width: f32,
    line_spacing_ratio: f32,
    para_spacing_ratio: f32,
) -> BodyLayout {
    let font_line_height = font.line_height();
    let line_gap = font_line_height * line_spacing_ratio;
    let para_gap = font_line_height * para_spacing_ratio;

    let mut paragraphs: Vec<ParagraphLayout> = Vec::new();
    let mut total_height = 0.0_f32;

    for para in text.split('\n') {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }

        let mode = classify_wrap_mode(para);
        let lines = wrap_paragraph(para, mode, font, content_width);

        let height =
            lines.len() as f32 * font_line_height + (lines.len() - 1) as f32 * line_gap;

        paragraphs.push(ParagraphLayout {
            lines,
            height,
            font_line_height,
            line_gap,
        });
        total_height += height;
    }

    if paragraphs.len() > 1 {
        total_height += (paragraphs.len() - 1) as f32 * para_gap;
    }

    BodyLayout {
        paragraphs,
        total_height,
        para_gap,
    }
}

/// Greedy line fill for one paragraph.
///
/// Tokens are words (Word mode) or individual characters (Character mode). Each
/// token is appended to the current line if the joined candidate still fits;
/// otherwise the current line is committed and the token starts a new one. The
/// first token of a line is always accepted, so a token wider than
/// `content_width` becomes its own overflowing line rather than an error.
pub fn wrap_paragraph<M: TextMeasure>(
    para: &str,
    mode: WrapMode,
    font: &M,
    content_width: f32,
) -> Vec<String> {
    let separator = match mode {
        WrapMode::Word => " ",
        WrapMode::Character => "",
    };
    let tokens: Vec<&str> = match mode {
        WrapMode::Word => para.split(' ').collect(),
        WrapMode::Character => para
            .char_indices()
            .map(|(i, c)| &para[i..i + c.len_utf8()])
            .collect(),
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for token in tokens {
        let candidate = if current.is_empty() {
            token.to_string()
        } else {
            format!("{current}{separator}{token}")
        };

        if current.is_empty() || font.text_width(&candidate) <= content_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, token.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    /// Every character advances the same fixed amount. With advance 10 and
    /// width 100, exactly 10 characters fit per line.
    struct FixedAdvance {
        advance: f32,
        line_height: f32,
    }

    impl TextMeasure for FixedAdvance {
        fn text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * self.advance
        }
        fn line_height(&self) -> f32 {
            self.line_height
        }
    }

    fn make_font() -> FixedAdvance {
        FixedAdvance {
            advance: 10.0,
            line_height: 20.0,
        }
    }

    fn layout(text: &str) -> BodyLayout {
        layout_text(
            text,
            &make_font(),
            100.0,
            LINE_SPACING_RATIO,
            PARA_SPACING_RATIO,
        )
    }

    // line_gap = 20 * 0.6 = 12, para_gap = 20 * 1.2 = 24 at these settings.

    // ── classification ──────────────────────────────────────────────────────

    #[test]
    fn test_classify_latin_paragraph() {
        assert_eq!(classify_wrap_mode("The rose is red"), WrapMode::Word);
    }

    #[test]
    fn test_classify_cjk_paragraph() {
        assert_eq!(classify_wrap_mode("床前明月光"), WrapMode::Character);
    }

    #[test]
    fn test_classify_cyrillic_wraps_by_character() {
        // No ASCII letters in pure Cyrillic text, so it falls to character wrap.
        assert_eq!(classify_wrap_mode("Безумных лет"), WrapMode::Character);
    }

    #[test]
    fn test_classify_mixed_script_prefers_word_wrap() {
        assert_eq!(classify_wrap_mode("静夜思 by Li Bai"), WrapMode::Word);
    }

    #[test]
    fn test_classify_digits_only_is_character_wrap() {
        assert_eq!(classify_wrap_mode("1905"), WrapMode::Character);
    }

    // ── paragraph splitting ─────────────────────────────────────────────────

    #[test]
    fn test_empty_content_yields_zero_paragraphs_zero_height() {
        let body = layout("");
        assert!(body.paragraphs.is_empty());
        assert_eq!(body.total_height, 0.0);
    }

    #[test]
    fn test_blank_paragraphs_dropped() {
        let body = layout("\n   \n\n");
        assert!(body.paragraphs.is_empty());

        let body = layout("one\n\n  \ntwo");
        assert_eq!(body.paragraphs.len(), 2);
    }

    #[test]
    fn test_paragraph_edges_trimmed() {
        let body = layout("  padded line  ");
        assert_eq!(body.paragraphs[0].lines, vec!["padded line".to_string()]);
    }

    // ── greedy wrapping ─────────────────────────────────────────────────────

    #[test]
    fn test_word_wrap_rejoins_with_single_space() {
        // 5 chars fit per line at width 50: "aa bb" fills it exactly.
        let lines = wrap_paragraph("aa bb cc", WrapMode::Word, &make_font(), 50.0);
        assert_eq!(lines, vec!["aa bb".to_string(), "cc".to_string()]);
    }

    #[test]
    fn test_character_wrap_inserts_no_separator() {
        let text: String = "月".repeat(23);
        let lines = wrap_paragraph(&text, WrapMode::Character, &make_font(), 100.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), 10);
        assert_eq!(lines[2].chars().count(), 3);
        assert!(lines.iter().all(|l| !l.contains(' ')));
        assert_eq!(lines.concat(), text);
    }

    #[test]
    fn test_oversized_word_emitted_as_own_line() {
        // 15 chars = 150px, wider than the 100px budget: still one real line,
        // never split, and no empty line before it.
        let lines = wrap_paragraph("extraordinarily", WrapMode::Word, &make_font(), 100.0);
        assert_eq!(lines, vec!["extraordinarily".to_string()]);
    }

    #[test]
    fn test_oversized_word_after_short_word() {
        let lines = wrap_paragraph(
            "so extraordinarily",
            WrapMode::Word,
            &make_font(),
            100.0,
        );
        assert_eq!(
            lines,
            vec!["so".to_string(), "extraordinarily".to_string()]
        );
        assert!(lines.iter().all(|l| !l.is_empty()));
    }

    // ── height arithmetic ───────────────────────────────────────────────────

    #[test]
    fn test_single_line_paragraph_height_is_font_line_height() {
        let body = layout("short");
        assert_eq!(body.paragraphs.len(), 1);
        assert!((body.paragraphs[0].height - 20.0).abs() < EPS);
        assert!((body.total_height - 20.0).abs() < EPS);
    }

    #[test]
    fn test_two_single_line_paragraphs_add_one_para_gap() {
        // "Line one." is 9 chars (90px), "Two." is 4 chars: one line each.
        let body = layout("Line one.\nTwo.");
        assert_eq!(body.paragraphs.len(), 2);
        assert_eq!(body.paragraphs[0].lines.len(), 1);
        assert_eq!(body.paragraphs[1].lines.len(), 1);
        // 2 lines * 20 + 1 para gap * 24, no intra-paragraph gaps.
        assert!((body.total_height - 64.0).abs() < EPS);
    }

    #[test]
    fn test_n_single_line_paragraphs_height_formula() {
        let body = layout("aa\nbb\ncc");
        // 3 * 20 + 2 * 24
        assert!((body.total_height - 108.0).abs() < EPS);
    }

    #[test]
    fn test_wrapped_paragraph_height_includes_line_gaps() {
        // 25 characters wrap to lines of 10/10/5.
        let text: String = "诗".repeat(25);
        let body = layout(&text);
        assert_eq!(body.paragraphs[0].lines.len(), 3);
        // 3 * 20 + 2 * 12
        assert!((body.paragraphs[0].height - 84.0).abs() < EPS);
        assert!((body.total_height - 84.0).abs() < EPS);
    }

    #[test]
    fn test_cjk_height_scales_linearly_with_length() {
        let body_200 = layout(&"字".repeat(200));
        let body_400 = layout(&"字".repeat(400));
        assert_eq!(body_200.paragraphs[0].lines.len(), 20);
        assert_eq!(body_400.paragraphs[0].lines.len(), 40);
        // n lines contribute n*20 + (n-1)*12 each.
        assert!((body_200.total_height - (20.0 * 20.0 + 19.0 * 12.0)).abs() < EPS);
        assert!((body_400.total_height - (40.0 * 20.0 + 39.0 * 12.0)).abs() < EPS);
    }

    // ── purity properties ───────────────────────────────────────────────────

    #[test]
    fn test_layout_is_idempotent() {
        let text = "The rose is red\n床前明月光疑是地上霜\nshort";
        let first = layout(text);
        let second = layout(text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_appending_paragraphs_never_shrinks_height() {
        let a = "The rose is red\nSo is the dawn";
        let b = format!("{a}\nAnd one more line");
        assert!(layout(&b).total_height >= layout(a).total_height);
    }

    #[test]
    fn test_para_gap_reported_even_for_single_paragraph() {
        // The composer always needs the gap value; it just contributes nothing
        // to total height until there is a second paragraph.
        let body = layout("only one");
        assert!((body.para_gap - 24.0).abs() < EPS);
        assert!((body.total_height - 20.0).abs() < EPS);
    }
}
