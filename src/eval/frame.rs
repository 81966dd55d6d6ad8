use std::f64::consts::TAU;

use crate::assets::color::Color;
use crate::eval::reveal::{element_progress, text_prefix};
use crate::foundation::core::{Point, Rect};
use crate::scene::model::{DrawingElement, ElementKind, Scene};

/// Everything needed to draw one frame of a scene.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedFrame {
    /// Scene time the frame was evaluated at.
    pub elapsed_ms: f64,
    /// Scene progress for progress bars, `0..=100`.
    pub progress_percent: f64,
    /// Elements drawn this frame with their reveal progress, in list order.
    pub revealed: Vec<RevealedElement>,
    /// Element draw commands, in list order (list order is z-order).
    pub commands: Vec<DrawCommand>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealedElement {
    pub index: usize,
    pub progress: f64,
}

/// A resolved primitive. Geometry is in board units; `element` is the index in the scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum DrawCommand {
    /// Filled text with `origin` on the alphabetic baseline.
    Text {
        element: usize,
        origin: Point,
        text: String,
        color: Color,
    },
    /// Stroked rectangle outline.
    Rect {
        element: usize,
        rect: Rect,
        color: Color,
    },
    /// Stroked arc starting at angle 0 and sweeping clockwise by `sweep_rad`.
    Arc {
        element: usize,
        center: Point,
        radius: f64,
        sweep_rad: f64,
        color: Color,
    },
    /// Stroked straight segment.
    Line {
        element: usize,
        from: Point,
        to: Point,
        color: Color,
    },
}

impl DrawCommand {
    pub fn element(&self) -> usize {
        match self {
            DrawCommand::Text { element, .. }
            | DrawCommand::Rect { element, .. }
            | DrawCommand::Arc { element, .. }
            | DrawCommand::Line { element, .. } => *element,
        }
    }
}

pub struct Evaluator;

impl Evaluator {
    /// Evaluate `scene` at `elapsed_ms`, gating each element on its reveal delay.
    #[tracing::instrument(level = "trace", skip(scene), fields(scene = %scene.title))]
    pub fn eval_frame(scene: &Scene, elapsed_ms: f64) -> EvaluatedFrame {
        let mut revealed = Vec::new();
        let mut commands = Vec::new();
        for (index, el) in scene.elements.iter().enumerate() {
            let Some(progress) = element_progress(elapsed_ms, el.reveal_delay_ms) else {
                continue;
            };
            revealed.push(RevealedElement { index, progress });
            if let Some(cmd) = eval_element(index, el, progress) {
                commands.push(cmd);
            }
        }
        EvaluatedFrame {
            elapsed_ms,
            progress_percent: scene.progress_percent(elapsed_ms),
            revealed,
            commands,
        }
    }

    /// The at-rest frame: every element fully drawn, delays ignored.
    #[tracing::instrument(level = "trace", skip(scene), fields(scene = %scene.title))]
    pub fn eval_rest_frame(scene: &Scene) -> EvaluatedFrame {
        let revealed = (0..scene.elements.len())
            .map(|index| RevealedElement {
                index,
                progress: 1.0,
            })
            .collect();
        let commands = scene
            .elements
            .iter()
            .enumerate()
            .filter_map(|(index, el)| eval_element(index, el, 1.0))
            .collect();
        EvaluatedFrame {
            elapsed_ms: scene.duration_ms(),
            progress_percent: 100.0,
            revealed,
            commands,
        }
    }
}

fn eval_element(index: usize, el: &DrawingElement, progress: f64) -> Option<DrawCommand> {
    let color = Color::parse_or_black(&el.color);
    let anchor = Point::new(el.x, el.y);
    let (w, h) = el.resolved_size().unwrap_or((0.0, 0.0));

    match el.kind {
        ElementKind::Text => {
            let content = el.content.as_deref()?;
            let text = text_prefix(content, progress);
            if text.is_empty() {
                return None;
            }
            Some(DrawCommand::Text {
                element: index,
                origin: anchor,
                text: text.to_owned(),
                color,
            })
        }
        ElementKind::Rectangle => Some(DrawCommand::Rect {
            element: index,
            rect: Rect::new(el.x, el.y, el.x + w * progress, el.y + h),
            color,
        }),
        ElementKind::Circle => {
            let r = w / 2.0;
            Some(DrawCommand::Arc {
                element: index,
                center: Point::new(el.x + r, el.y + r),
                radius: r,
                sweep_rad: TAU * progress,
                color,
            })
        }
        ElementKind::Line => Some(DrawCommand::Line {
            element: index,
            from: anchor,
            to: Point::new(el.x + w * progress, el.y),
            color,
        }),
        ElementKind::Unknown => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/frame.rs"]
mod tests;
