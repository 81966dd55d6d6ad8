use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ChalkError, ChalkResult};
use crate::scene::model::{ElementKind, Scene};

/// Ordered scenes making up one lesson video.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Storyboard {
    scenes: Vec<Arc<Scene>>,
}

/// An element whose one-second reveal does not finish before its scene ends.
///
/// Playback cuts such elements off mid-reveal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevealCutoff {
    pub scene_index: usize,
    pub element_index: usize,
    pub kind: ElementKind,
    pub reveal_end_ms: f64,
    pub scene_duration_ms: f64,
}

impl RevealCutoff {
    /// `true` when the reveal starts at or after the scene end.
    ///
    /// Such an element can still show on the completion frame, since the final tick usually
    /// lands past the duration.
    pub fn starts_at_or_after_end(&self) -> bool {
        self.reveal_end_ms - crate::scene::model::REVEAL_WINDOW_MS >= self.scene_duration_ms
    }
}

impl Storyboard {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            scenes: scenes.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse either a bare JSON array of scenes or an object with a `scenes` field.
    pub fn from_json_str(s: &str) -> ChalkResult<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<Scene>),
            Wrapped { scenes: Vec<Scene> },
        }

        let scenes = match serde_json::from_str::<Repr>(s)? {
            Repr::List(scenes) | Repr::Wrapped { scenes } => scenes,
        };
        Ok(Self::new(scenes))
    }

    pub fn from_path(path: &Path) -> ChalkResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read storyboard '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> ChalkResult<String> {
        let scenes: Vec<&Scene> = self.scenes.iter().map(Arc::as_ref).collect();
        Ok(serde_json::to_string_pretty(&scenes)?)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scene(&self, index: usize) -> Option<&Arc<Scene>> {
        self.scenes.get(index)
    }

    pub fn scenes(&self) -> &[Arc<Scene>] {
        &self.scenes
    }

    /// Sum of scene durations, excluding any pause between scenes.
    pub fn total_duration_ms(&self) -> f64 {
        self.scenes.iter().map(|s| s.duration_ms()).sum()
    }

    /// Check the invariants playback relies on.
    ///
    /// The player itself tolerates violations; this is for tooling at the ingestion boundary.
    pub fn validate(&self) -> ChalkResult<()> {
        if self.scenes.is_empty() {
            return Err(ChalkError::validation("storyboard has no scenes"));
        }
        for (si, scene) in self.scenes.iter().enumerate() {
            if !scene.duration_seconds.is_finite() || scene.duration_seconds <= 0.0 {
                return Err(ChalkError::validation(format!(
                    "scene {si} ('{}') duration must be finite and > 0",
                    scene.title
                )));
            }
            for (ei, el) in scene.elements.iter().enumerate() {
                if !el.reveal_delay_ms.is_finite() || el.reveal_delay_ms < 0.0 {
                    return Err(ChalkError::validation(format!(
                        "scene {si} element {ei} reveal delay must be finite and >= 0"
                    )));
                }
                if !el.x.is_finite() || !el.y.is_finite() {
                    return Err(ChalkError::validation(format!(
                        "scene {si} element {ei} position must be finite"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Elements whose reveal window runs past the end of their scene.
    pub fn reveal_cutoffs(&self) -> Vec<RevealCutoff> {
        let mut out = Vec::new();
        for (scene_index, scene) in self.scenes.iter().enumerate() {
            let scene_duration_ms = scene.duration_ms();
            for (element_index, el) in scene.elements.iter().enumerate() {
                if el.kind == ElementKind::Unknown {
                    continue;
                }
                let reveal_end_ms = el.reveal_end_ms();
                if reveal_end_ms > scene_duration_ms {
                    out.push(RevealCutoff {
                        scene_index,
                        element_index,
                        kind: el.kind,
                        reveal_end_ms,
                        scene_duration_ms,
                    });
                }
            }
        }
        out
    }
}

impl From<Vec<Scene>> for Storyboard {
    fn from(scenes: Vec<Scene>) -> Self {
        Self::new(scenes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/storyboard.rs"]
mod tests;
