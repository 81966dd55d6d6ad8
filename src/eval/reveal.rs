//! Reveal timing: how far along each element is at a given scene time.

use crate::scene::model::REVEAL_WINDOW_MS;

/// Reveal progress in `(0, 1]` for an element at `elapsed_ms`, or `None` while it is hidden.
///
/// An element is hidden until elapsed time strictly exceeds its delay; it is never partially
/// faded in, only progressively drawn.
pub fn element_progress(elapsed_ms: f64, delay_ms: f64) -> Option<f64> {
    let delay_ms = delay_ms.max(0.0);
    if elapsed_ms.is_nan() || elapsed_ms <= delay_ms {
        return None;
    }
    Some(((elapsed_ms - delay_ms) / REVEAL_WINDOW_MS).min(1.0))
}

/// Number of characters drawn for a text of `char_len` characters at `progress`.
pub fn visible_char_count(char_len: usize, progress: f64) -> usize {
    let p = progress.clamp(0.0, 1.0);
    ((char_len as f64) * p).floor() as usize
}

/// Prefix of `content` visible at `progress`, cut on a character boundary.
pub fn text_prefix(content: &str, progress: f64) -> &str {
    let n = visible_char_count(content.chars().count(), progress);
    match content.char_indices().nth(n) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/reveal.rs"]
mod tests;
