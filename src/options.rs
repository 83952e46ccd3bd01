use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Construction-time styling for a spinner.
///
/// Mirrors the widget's recognized style attributes: the number of radial
/// segments and the two gradient end colors. All fields have defaults, so a
/// partial YAML file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpinnerOptions {
    /// Number of radial segments.
    #[serde(default = "default_line_count")]
    pub line_count: usize,

    /// Color of the brightest (leading) segment.
    #[serde(default = "default_start_color")]
    pub start_color: Color,

    /// Color the trailing segments fade towards.
    #[serde(default = "default_end_color")]
    pub end_color: Color,
}

fn default_line_count() -> usize {
    12
}

fn default_start_color() -> Color {
    Color::WHITE
}

fn default_end_color() -> Color {
    Color::TRANSPARENT
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            line_count: default_line_count(),
            start_color: default_start_color(),
            end_color: default_end_color(),
        }
    }
}

impl SpinnerOptions {
    /// Clamp invalid values to the nearest valid ones.
    ///
    /// A `line_count` of 0 would reach divisions in measurement and the
    /// gradient build; it clamps to 1 instead of failing, since styling is
    /// non-critical.
    pub fn sanitized(mut self) -> Self {
        self.line_count = self.line_count.max(1);
        self
    }

    /// Load options from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str::<Self>(&contents)?.sanitized())
    }
}

/// Errors that can occur when loading spinner options.
#[derive(thiserror::Error, Debug)]
pub enum OptionsError {
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options file: {0}")]
    Parse(#[from] serde_yaml::Error),
}
