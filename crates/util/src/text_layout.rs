//! # Text Layout Utilities
//!
//! Column padding, word wrapping and separators shared by the help and
//! summary renderers. Widths are measured in terminal columns, not bytes.

use unicode_width::UnicodeWidthStr;

use crate::LogColours;

const DASHED_LINE_WIDTH: usize = 52;

/// Pads `text` with trailing spaces up to `width` display columns.
///
/// Text already wider than `width` is returned unchanged.
///
/// # Example
/// ```rust
/// use paramcheck_util::text_layout::pad_right;
///
/// assert_eq!(pad_right("outdir", 8), "outdir  ");
/// assert_eq!(pad_right("outdir", 3), "outdir");
/// ```
pub fn pad_right(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    let mut padded = String::with_capacity(text.len() + width - current);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', width - current));
    padded
}

/// Splits `text` into lines no wider than `width` columns, breaking on spaces.
///
/// Single words wider than `width` stay on their own line rather than being
/// split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let options = textwrap::Options::new(width.max(1))
        .break_words(false)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// A dim separator line closing a report section.
pub fn dashed_line(colours: &LogColours) -> String {
    format!("-{}{}{}-", colours.dim, "-".repeat(DASHED_LINE_WIDTH), colours.reset)
}
