use crate::types::LevelPhase;

/// Read-only copy of the session numbers, for HUDs and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub level: u32,
    pub max_level: u32,
    pub score: u32,
    pub target_score: u32,
    pub time_remaining: u32,
    pub drop_speed: f32,
    pub phase: LevelPhase,
    pub pending: u32,
    pub in_play: u32,
    pub timer_epoch: u32,
}

impl SessionSnapshot {
    /// Progress towards the target in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.target_score == 0 {
            return 1.0;
        }
        (self.score as f32 / self.target_score as f32).min(1.0)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            level: 1,
            max_level: 0,
            score: 0,
            target_score: 0,
            time_remaining: 0,
            drop_speed: 0.0,
            phase: LevelPhase::Active,
            pending: 0,
            in_play: 0,
            timer_epoch: 0,
        }
    }
}
