//! Layout and rendering constants

use crate::raster::BUNDLED_FAMILY;

/// Rendering configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Font size of actor labels
    pub actor_font_size: f64,
    /// Font size of message, note and block text
    pub message_font_size: f64,
    /// Base horizontal padding: canvas margins and the minimum actor gap
    pub min_padding_x: f64,
    /// Vertical gap between consecutive events
    pub min_padding_y: f64,
    /// Horizontal padding around text, per side
    pub text_padding_x: f64,
    /// Vertical padding around text, per side
    pub text_padding_y: f64,
    /// Arrowhead length (also reserved in every message box)
    pub arrow_width: f64,
    /// Arrowhead base
    pub arrow_height: f64,
    /// Diameter of the self-message loop-back arc
    pub self_diameter: f64,
    /// Activation bar width
    pub activation_width: f64,
    /// Extra spacing between wrapped label lines
    pub line_spacing: f64,
    /// Maximum width of a block label before it wraps
    pub group_max_width: f64,
    /// Minimum height of a block's header band
    pub group_base_height: f64,
    /// Padding between a block frame and its contents
    pub group_padding: f64,
    /// Height of the keyword tab on a block frame
    pub group_tab_height: f64,
    /// Inset between nested block frames
    pub block_margin: f64,
    /// Gap between a side note and the lifeline
    pub note_gap: f64,
    /// Size of the folded corner on notes and block tabs
    pub fold_size: f64,
    /// Font family written into the SVG
    pub font_family: String,
    /// Fixed colors
    pub colors: Colors,
}

/// Fixed palette
#[derive(Debug, Clone, PartialEq)]
pub struct Colors {
    pub background: String,
    pub actor_stroke: String,
    pub actor_text: String,
    pub lifeline: String,
    pub message_line: String,
    pub arrow_head: String,
    pub message_text: String,
    pub activation_stroke: String,
    pub activation_fill: String,
    pub note_fill: String,
    pub note_stroke: String,
    pub group_line: String,
    pub group_fill: String,
    pub group_text: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            actor_stroke: "#000000".to_string(),
            actor_text: "#000000".to_string(),
            lifeline: "#0000ff".to_string(),
            message_line: "#0000ff".to_string(),
            arrow_head: "#000000".to_string(),
            message_text: "#000000".to_string(),
            activation_stroke: "#000000".to_string(),
            activation_fill: "#ffffff".to_string(),
            note_fill: "#fffccf".to_string(),
            note_stroke: "#000000".to_string(),
            group_line: "#0000ff".to_string(),
            group_fill: "#ffffff".to_string(),
            group_text: "#0000ff".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actor_font_size: 14.0,
            message_font_size: 12.0,
            min_padding_x: 30.0,
            min_padding_y: 25.0,
            text_padding_x: 15.0,
            text_padding_y: 5.0,
            arrow_width: 20.0,
            arrow_height: 14.0,
            self_diameter: 30.0,
            activation_width: 10.0,
            line_spacing: 5.0,
            group_max_width: 300.0,
            group_base_height: 30.0,
            group_padding: 10.0,
            group_tab_height: 20.0,
            block_margin: 5.0,
            note_gap: 10.0,
            fold_size: 8.0,
            font_family: format!("{BUNDLED_FAMILY}, sans-serif"),
            colors: Colors::default(),
        }
    }
}

impl Config {
    /// Set both font sizes
    pub fn with_font_sizes(mut self, actor: f64, message: f64) -> Self {
        self.actor_font_size = actor;
        self.message_font_size = message;
        self
    }

    /// Set the maximum block label width before wrapping
    pub fn with_group_max_width(mut self, width: f64) -> Self {
        self.group_max_width = width;
        self
    }

    /// Set the font family written into the SVG
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }
}
