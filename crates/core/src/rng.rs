//! RNG module - waste item generation
//!
//! Levels are populated from a [`WasteSource`]. The default source is a small
//! LCG so that a seed fully determines the item sequence of a session; tests
//! inject a [`ScriptedSource`] to pin categories exactly.

use crate::types::{Category, VARIANTS_PER_CATEGORY};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Supplies category, sprite variant and spawn column for queued items.
pub trait WasteSource {
    /// Uniformly random category in the real game.
    fn next_category(&mut self) -> Category;

    /// Sprite variant in `1..=VARIANTS_PER_CATEGORY`.
    fn next_variant(&mut self) -> u8 {
        1
    }

    /// Spawn column in `[min, max]`.
    fn next_spawn_x(&mut self, min: f32, max: f32) -> f32 {
        (min + max) / 2.0
    }
}

impl WasteSource for SimpleRng {
    fn next_category(&mut self) -> Category {
        Category::ALL[self.next_range(Category::ALL.len() as u32) as usize]
    }

    fn next_variant(&mut self) -> u8 {
        1 + self.next_range(VARIANTS_PER_CATEGORY as u32) as u8
    }

    fn next_spawn_x(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        // Integer columns, both ends inclusive.
        let span = (max - min) as u32 + 1;
        min + self.next_range(span) as f32
    }
}

impl<S: WasteSource + ?Sized> WasteSource for &mut S {
    fn next_category(&mut self) -> Category {
        (**self).next_category()
    }

    fn next_variant(&mut self) -> u8 {
        (**self).next_variant()
    }

    fn next_spawn_x(&mut self, min: f32, max: f32) -> f32 {
        (**self).next_spawn_x(min, max)
    }
}

/// Deterministic source that cycles through a fixed category list.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    categories: Vec<Category>,
    next: usize,
    spawn_x: Option<f32>,
}

impl ScriptedSource {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            next: 0,
            spawn_x: None,
        }
    }

    /// Always spawn at this column instead of the middle of the range.
    pub fn with_spawn_x(mut self, x: f32) -> Self {
        self.spawn_x = Some(x);
        self
    }
}

impl WasteSource for ScriptedSource {
    fn next_category(&mut self) -> Category {
        if self.categories.is_empty() {
            return Category::Recyclable;
        }
        let c = self.categories[self.next % self.categories.len()];
        self.next = self.next.wrapping_add(1);
        c
    }

    fn next_spawn_x(&mut self, min: f32, max: f32) -> f32 {
        match self.spawn_x {
            Some(x) => x.clamp(min, max),
            None => (min + max) / 2.0,
        }
    }
}
