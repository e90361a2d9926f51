//! Held-direction repeat for moving a grabbed item with the keyboard.
//!
//! The first press acts immediately. Holding the key repeats the action
//! after `delay_ms`, then every `rate_ms`. Terminals that never report key
//! releases are handled with a timeout since the last press.

use arrayvec::ArrayVec;

use crate::types::UiAction;

pub const DEFAULT_REPEAT_DELAY_MS: u32 = 170;
pub const DEFAULT_REPEAT_RATE_MS: u32 = 50;
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

fn is_direction(action: UiAction) -> bool {
    matches!(
        action,
        UiAction::Up | UiAction::Down | UiAction::Left | UiAction::Right
    )
}

#[derive(Debug, Clone)]
pub struct RepeatHandler {
    held: Option<UiAction>,
    since_press_ms: u32,
    delay_timer: u32,
    rate_accumulator: u32,
    delay_ms: u32,
    rate_ms: u32,
    release_timeout_ms: u32,
}

impl RepeatHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS)
    }

    pub fn with_config(delay_ms: u32, rate_ms: u32) -> Self {
        Self {
            held: None,
            since_press_ms: 0,
            delay_timer: 0,
            rate_accumulator: 0,
            delay_ms,
            rate_ms: rate_ms.max(1),
            release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn held(&self) -> Option<UiAction> {
        self.held
    }

    /// Register a press. Returns the action to apply now, if any.
    ///
    /// Non-directional actions pass through untouched.
    pub fn press(&mut self, action: UiAction) -> Option<UiAction> {
        if !is_direction(action) {
            return Some(action);
        }
        self.since_press_ms = 0;
        if self.held == Some(action) {
            // Terminal auto-repeat while we already repeat.
            return None;
        }
        self.held = Some(action);
        self.delay_timer = 0;
        self.rate_accumulator = 0;
        Some(action)
    }

    pub fn release(&mut self, action: UiAction) {
        if self.held == Some(action) {
            self.reset();
        }
    }

    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<UiAction, 16> {
        let mut actions = ArrayVec::new();

        self.since_press_ms = self.since_press_ms.saturating_add(elapsed_ms);
        if self.since_press_ms > self.release_timeout_ms {
            self.reset();
        }
        let Some(action) = self.held else {
            return actions;
        };

        let prev = self.delay_timer;
        self.delay_timer = self.delay_timer.saturating_add(elapsed_ms);
        if self.delay_timer >= self.delay_ms {
            let excess = if prev < self.delay_ms {
                self.delay_timer - self.delay_ms
            } else {
                elapsed_ms
            };
            self.rate_accumulator += excess;
            while self.rate_accumulator >= self.rate_ms {
                let _ = actions.try_push(action);
                self.rate_accumulator -= self.rate_ms;
            }
        }
        actions
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.delay_timer = 0;
        self.rate_accumulator = 0;
    }
}

impl Default for RepeatHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_after_delay() {
        let mut r = RepeatHandler::with_config(100, 25).with_release_timeout_ms(10_000);
        assert_eq!(r.press(UiAction::Left), Some(UiAction::Left));
        assert!(r.update(99).is_empty());
        assert!(r.update(1).is_empty());
        assert_eq!(r.update(25).as_slice(), &[UiAction::Left]);
        assert_eq!(r.update(50).as_slice(), &[UiAction::Left, UiAction::Left]);
    }

    #[test]
    fn test_auto_release_without_release_events() {
        let mut r = RepeatHandler::with_config(100, 25).with_release_timeout_ms(50);
        r.press(UiAction::Down);
        assert!(r.update(51).is_empty());
        assert_eq!(r.held(), None);
    }

    #[test]
    fn test_terminal_repeat_is_swallowed() {
        let mut r = RepeatHandler::new();
        assert_eq!(r.press(UiAction::Up), Some(UiAction::Up));
        assert_eq!(r.press(UiAction::Up), None);
        assert_eq!(r.press(UiAction::Right), Some(UiAction::Right));
        assert_eq!(r.held(), Some(UiAction::Right));
    }

    #[test]
    fn test_other_actions_pass_through() {
        let mut r = RepeatHandler::new();
        assert_eq!(r.press(UiAction::Grab), Some(UiAction::Grab));
        assert_eq!(r.held(), None);
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut r = RepeatHandler::with_config(0, 10).with_release_timeout_ms(10_000);
        r.press(UiAction::Left);
        assert!(!r.update(30).is_empty());
        r.release(UiAction::Right);
        assert!(!r.update(30).is_empty());
        r.release(UiAction::Left);
        assert!(r.update(30).is_empty());
    }
}
