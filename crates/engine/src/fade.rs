//! Rising, fading labels (score feedback).

use crate::types::{FEEDBACK_MS, FEEDBACK_RISE};

/// Cubic ease-out, `t` in `0.0..=1.0`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[derive(Debug, Clone, PartialEq)]
pub struct FadingLabel<T> {
    pub value: T,
    pub x: f32,
    pub y: f32,
    elapsed_ms: u32,
    duration_ms: u32,
    rise: f32,
}

impl<T> FadingLabel<T> {
    pub fn progress(&self) -> f32 {
        (self.elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }

    /// Opacity from 1.0 down to 0.0.
    pub fn alpha(&self) -> f32 {
        1.0 - ease_out_cubic(self.progress())
    }

    /// Current draw position; the label drifts upwards.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y - self.rise * ease_out_cubic(self.progress()))
    }

    fn done(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

#[derive(Debug, Clone)]
pub struct Fader<T> {
    labels: Vec<FadingLabel<T>>,
    duration_ms: u32,
    rise: f32,
}

impl<T> Fader<T> {
    pub fn new(duration_ms: u32, rise: f32) -> Self {
        Self {
            labels: Vec::new(),
            duration_ms: duration_ms.max(1),
            rise,
        }
    }

    pub fn push(&mut self, value: T, x: f32, y: f32) {
        self.labels.push(FadingLabel {
            value,
            x,
            y,
            elapsed_ms: 0,
            duration_ms: self.duration_ms,
            rise: self.rise,
        });
    }

    /// Age every label and drop the ones that finished.
    pub fn advance(&mut self, elapsed_ms: u32) {
        for label in &mut self.labels {
            label.elapsed_ms = label.elapsed_ms.saturating_add(elapsed_ms);
        }
        self.labels.retain(|l| !l.done());
    }

    pub fn labels(&self) -> &[FadingLabel<T>] {
        &self.labels
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<T> Default for Fader<T> {
    fn default() -> Self {
        Self::new(FEEDBACK_MS, FEEDBACK_RISE)
    }
}
