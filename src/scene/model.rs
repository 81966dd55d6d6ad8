use serde::{Deserialize, Serialize};

/// Time each element takes to reveal fully once its delay has passed.
///
/// Independent of the scene duration.
pub const REVEAL_WINDOW_MS: f64 = 1000.0;

/// Default rectangle width when `width` is absent.
pub const DEFAULT_RECT_WIDTH: f64 = 100.0;
/// Default rectangle height when `height` is absent.
pub const DEFAULT_RECT_HEIGHT: f64 = 50.0;
/// Default circle diameter when `width` is absent.
pub const DEFAULT_CIRCLE_DIAMETER: f64 = 50.0;
/// Default line length when `width` is absent.
pub const DEFAULT_LINE_LENGTH: f64 = 100.0;

/// One timed segment of a storyboard.
///
/// Field names on the wire follow the generator's JSON (`duration`, `sceneNumber`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_number: Option<u32>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration_script: Option<String>,
    /// Total scene time in seconds; must be `> 0`.
    #[serde(rename = "duration", alias = "durationSeconds")]
    pub duration_seconds: f64,
    #[serde(default)]
    pub elements: Vec<DrawingElement>,
}

impl Scene {
    /// Bare scene with a title, duration and elements.
    pub fn new(title: impl Into<String>, duration_seconds: f64, elements: Vec<DrawingElement>) -> Self {
        Self {
            scene_number: None,
            title: title.into(),
            visual_description: None,
            narration_script: None,
            duration_seconds,
            elements,
        }
    }

    /// Scene duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration_seconds * 1000.0
    }

    /// Scene-level progress in percent for `elapsed_ms`, clamped to `0..=100`.
    ///
    /// A non-positive duration reports 100.
    pub fn progress_percent(&self, elapsed_ms: f64) -> f64 {
        let duration_ms = self.duration_ms();
        if duration_ms.is_nan() || duration_ms <= 0.0 {
            return 100.0;
        }
        (elapsed_ms / duration_ms * 100.0).clamp(0.0, 100.0)
    }
}

/// Primitive kind. Unrecognized tags deserialize to [`ElementKind::Unknown`] and draw nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Rectangle,
    Circle,
    Line,
    #[serde(other)]
    Unknown,
}

/// One drawing instruction inside a [`Scene`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingElement {
    #[serde(rename = "type", alias = "kind")]
    pub kind: ElementKind,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Stroke and fill color as authored; parsed at draw time.
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Delay after scene start before the element begins drawing.
    #[serde(default, rename = "animationDelay", alias = "revealDelayMs")]
    pub reveal_delay_ms: f64,
}

impl DrawingElement {
    fn base(kind: ElementKind, x: f64, y: f64, color: impl Into<String>) -> Self {
        Self {
            kind,
            x,
            y,
            width: None,
            height: None,
            color: color.into(),
            content: None,
            reveal_delay_ms: 0.0,
        }
    }

    /// Text element anchored at its baseline origin.
    pub fn text(content: impl Into<String>, x: f64, y: f64, color: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::base(ElementKind::Text, x, y, color)
        }
    }

    /// Rectangle with default size.
    pub fn rectangle(x: f64, y: f64, color: impl Into<String>) -> Self {
        Self::base(ElementKind::Rectangle, x, y, color)
    }

    /// Circle whose bounding box starts at `(x, y)`, with default diameter.
    pub fn circle(x: f64, y: f64, color: impl Into<String>) -> Self {
        Self::base(ElementKind::Circle, x, y, color)
    }

    /// Horizontal line starting at `(x, y)`, with default length.
    pub fn line(x: f64, y: f64, color: impl Into<String>) -> Self {
        Self::base(ElementKind::Line, x, y, color)
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: f64) -> Self {
        self.reveal_delay_ms = delay_ms;
        self
    }

    /// Effective `(width, height)` after per-kind defaulting.
    ///
    /// A zero or NaN dimension counts as absent, the way the storyboard generator emits it.
    ///
    /// Text has no intrinsic size. Circles report their diameter twice; lines report
    /// their length and zero height.
    pub fn resolved_size(&self) -> Option<(f64, f64)> {
        match self.kind {
            ElementKind::Rectangle => Some((
                dimension_or(self.width, DEFAULT_RECT_WIDTH),
                dimension_or(self.height, DEFAULT_RECT_HEIGHT),
            )),
            ElementKind::Circle => {
                let d = dimension_or(self.width, DEFAULT_CIRCLE_DIAMETER);
                Some((d, d))
            }
            ElementKind::Line => Some((dimension_or(self.width, DEFAULT_LINE_LENGTH), 0.0)),
            ElementKind::Text | ElementKind::Unknown => None,
        }
    }

    /// Reveal start, never negative.
    pub fn reveal_start_ms(&self) -> f64 {
        self.reveal_delay_ms.max(0.0)
    }

    /// Time at which this element is fully revealed.
    pub fn reveal_end_ms(&self) -> f64 {
        self.reveal_start_ms() + REVEAL_WINDOW_MS
    }
}

fn dimension_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => default,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
