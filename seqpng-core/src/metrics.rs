//! Text measurement.
//!
//! Layout never measures glyphs itself; it asks a [`TextMetrics`] implementation.
//! [`EstimatedMetrics`] is the default and approximates a proportional sans-serif
//! face from per-character weights. [`FixedMetrics`] is a monospace model with
//! exact, font-independent numbers for tests.

use crate::geom::Size;

/// Measurement capability injected into layout
pub trait TextMetrics {
    /// Width and height of a single line of `text` at `font_size`
    fn measure(&self, text: &str, font_size: f64) -> Size;

    /// Height of one line at `font_size`
    fn line_height(&self, font_size: f64) -> f64 {
        self.measure("M", font_size).height
    }

    /// Break `text` into lines no wider than `max_width`, on whitespace.
    ///
    /// A single word wider than `max_width` stays on its own line.
    fn wrap(&self, text: &str, font_size: f64, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if self.measure(&candidate, font_size).width > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

const LINE_HEIGHT_FACTOR: f64 = 1.2;

fn char_weight(c: char) -> f64 {
    if c.is_ascii() {
        if c.is_ascii_uppercase() {
            0.7
        } else if c == ' ' {
            0.3
        } else {
            0.55
        }
    } else {
        1.0 // CJK and other characters are wider
    }
}

/// Proportional-font estimate from character weights
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMetrics;

impl TextMetrics for EstimatedMetrics {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        let weighted: f64 = text.chars().map(char_weight).sum();
        Size::new(
            (weighted * font_size).ceil(),
            (font_size * LINE_HEIGHT_FACTOR).ceil(),
        )
    }
}

/// Monospace model: every character is `char_width` wide, every line `line_height` tall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub char_width: f64,
    pub line_height: f64,
}

impl FixedMetrics {
    pub const fn new(char_width: f64, line_height: f64) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl TextMetrics for FixedMetrics {
    fn measure(&self, text: &str, _font_size: f64) -> Size {
        Size::new(text.chars().count() as f64 * self.char_width, self.line_height)
    }

    fn line_height(&self, _font_size: f64) -> f64 {
        self.line_height
    }
}
