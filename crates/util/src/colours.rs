//! Named ANSI colour tokens for plain-text reports.
//!
//! Renderers interpolate these tokens directly into their output. With
//! [`RenderOptions::monochrome`] set every token is the empty string, so the
//! same formatting code produces uncoloured text.

use paramcheck_types::RenderOptions;

/// Escape sequences keyed by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogColours {
    pub reset: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub underlined: &'static str,
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub blue: &'static str,
    pub purple: &'static str,
    pub cyan: &'static str,
}

impl LogColours {
    pub fn new(options: RenderOptions) -> Self {
        if options.monochrome { Self::plain() } else { Self::ansi() }
    }

    fn ansi() -> Self {
        Self {
            reset: "\x1b[0m",
            bold: "\x1b[1m",
            dim: "\x1b[2m",
            underlined: "\x1b[4m",
            red: "\x1b[0;31m",
            green: "\x1b[0;32m",
            yellow: "\x1b[0;33m",
            blue: "\x1b[0;34m",
            purple: "\x1b[0;35m",
            cyan: "\x1b[0;36m",
        }
    }

    fn plain() -> Self {
        Self {
            reset: "",
            bold: "",
            dim: "",
            underlined: "",
            red: "",
            green: "",
            yellow: "",
            blue: "",
            purple: "",
            cyan: "",
        }
    }
}
