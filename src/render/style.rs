use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::foundation::error::{ChalkError, ChalkResult};

/// Smallest grid spacing drawn; anything below disables the grid.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Visual configuration of the whiteboard. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardStyle {
    pub background: Color,
    pub grid_color: Color,
    /// Distance between grid lines; `0` disables the grid.
    pub grid_spacing: f64,
    pub grid_line_width: f64,
    /// Stroke width for rectangles, circles and lines.
    pub stroke_width: f64,
    pub font_size: f64,
    /// CSS-style font fallback list for text elements.
    pub font_families: Vec<String>,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            grid_color: Color::rgb(0xf1, 0xf5, 0xf9),
            grid_spacing: 40.0,
            grid_line_width: 1.0,
            stroke_width: 3.0,
            font_size: 24.0,
            font_families: vec![
                "Comic Sans MS".to_owned(),
                "Chalkboard SE".to_owned(),
                "sans-serif".to_owned(),
            ],
        }
    }
}

impl BoardStyle {
    pub fn from_path(path: &Path) -> ChalkResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read board style '{}'", path.display()))?;
        let style: Self = serde_json::from_str(&s)?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> ChalkResult<()> {
        let finite_non_neg = |v: f64| v.is_finite() && v >= 0.0;
        if !finite_non_neg(self.grid_spacing)
            || (self.grid_spacing != 0.0 && self.grid_spacing < MIN_GRID_SPACING)
        {
            return Err(ChalkError::validation(
                "grid_spacing must be 0 (no grid) or finite and >= 1",
            ));
        }
        if !finite_non_neg(self.grid_line_width) || !finite_non_neg(self.stroke_width) {
            return Err(ChalkError::validation("line widths must be finite and >= 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ChalkError::validation("font_size must be finite and > 0"));
        }
        Ok(())
    }

    /// Positions of vertical then horizontal grid lines for a `width` x `height` board.
    ///
    /// Lines start at 0 and stop before the far edge.
    pub fn grid_lines(&self, width: f64, height: f64) -> (Vec<f64>, Vec<f64>) {
        if self.grid_spacing < MIN_GRID_SPACING || !self.grid_spacing.is_finite() {
            return (Vec::new(), Vec::new());
        }
        let steps = |extent: f64| {
            let mut out = Vec::new();
            let mut v = 0.0;
            while v < extent {
                out.push(v);
                v += self.grid_spacing;
            }
            out
        };
        (steps(width), steps(height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
