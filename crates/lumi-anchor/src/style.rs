/// Named highlight palette shared with the reading surface.
pub const HIGHLIGHT_COLORS: &[(&str, &str)] = &[
    ("yellow", "#ffeb3b"),
    ("green", "#4caf50"),
    ("blue", "#2196f3"),
    ("pink", "#e91e63"),
    ("purple", "#9c27b0"),
    ("orange", "#ff9800"),
];

fn resolve_color(color: &str) -> String {
    HIGHLIGHT_COLORS
        .iter()
        .find(|(name, _)| *name == color)
        .map(|(_, value)| value.to_string())
        .unwrap_or_else(|| color.to_string())
}

/// Visual treatment of a wrapped range.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightStyle {
    Highlight { color: String, opacity: f32 },
    Underline { color: String },
    Annotation { color: String },
}

impl HighlightStyle {
    /// Background highlight. `color` may be a palette name or a raw value.
    pub fn highlight(color: &str) -> Self {
        Self::Highlight {
            color: resolve_color(color),
            opacity: 0.4,
        }
    }

    pub fn underline(color: &str) -> Self {
        Self::Underline {
            color: resolve_color(color),
        }
    }

    pub fn annotation(color: &str) -> Self {
        Self::Annotation {
            color: resolve_color(color),
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Highlight { color, opacity } => {
                format!("background-color: {color}; opacity: {opacity};")
            }
            Self::Underline { color } => {
                format!("text-decoration: underline; text-decoration-color: {color};")
            }
            Self::Annotation { color } => format!("border-bottom: 2px dashed {color};"),
        }
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::highlight("yellow")
    }
}
