//! Session state and the effects it asks the host to perform.
//!
//! `SessionState` is plain data owned by the gameplay screen. The scheduler,
//! judge and progression modules mutate it through `&mut` and describe every
//! outward consequence (start a timer, spawn a body, show a message) as an
//! [`Effect`] pushed into a caller-provided buffer. The host drains that
//! buffer and applies it; the core never calls into the engine.

use std::collections::VecDeque;

use crate::item::WasteItem;
use crate::types::{Category, ItemId, ItemStatus, LevelPhase, ScoreCard};

/// Spawn request for the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub id: ItemId,
    pub category: Category,
    pub variant: u8,
    pub spawn_x: f32,
    pub velocity_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackTone {
    Positive,
    Negative,
}

/// Transient on-screen message after a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    pub tone: FeedbackTone,
    /// Score delta shown to the player (reward or nominal penalty).
    pub points: u32,
}

impl Feedback {
    pub fn correct(points: u32) -> Self {
        Self {
            tone: FeedbackTone::Positive,
            points,
        }
    }

    pub fn wrong(points: u32) -> Self {
        Self {
            tone: FeedbackTone::Negative,
            points,
        }
    }

    /// Message text, e.g. `"Correct! +10"` or `"Wrong bin! -5"`.
    pub fn text(&self) -> String {
        match self.tone {
            FeedbackTone::Positive => format!("Correct! +{}", self.points),
            FeedbackTone::Negative => format!("Wrong bin! -{}", self.points),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionOutcome {
    /// Clock ran out; card holds the level being played and its score.
    GameOver(ScoreCard),
    /// Last level cleared; card holds that level and the final score.
    Completed(ScoreCard),
}

impl SessionOutcome {
    pub fn card(&self) -> ScoreCard {
        match self {
            SessionOutcome::GameOver(c) | SessionOutcome::Completed(c) => *c,
        }
    }
}

/// Host-side consequence of a session mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Register the countdown and drop timers for this epoch.
    StartTimers { epoch: u32 },
    /// Cancel every timer registered for this epoch.
    CancelTimers { epoch: u32 },
    Release(Release),
    /// Take the item's body out of the world.
    Remove { id: ItemId },
    /// Put the item back where its drag started.
    ReturnToOrigin { id: ItemId },
    /// Remove every remaining body at level teardown.
    ClearPlayfield,
    Feedback(Feedback),
    PhaseChanged(LevelPhase),
    PlayMusic,
    StopMusic,
    /// Launch the level-complete summary.
    ShowTransition(ScoreCard),
    Finished(SessionOutcome),
}

/// Mutable state of one play-through.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) level: u32,
    pub(crate) score: u32,
    pub(crate) target_score: u32,
    pub(crate) time_remaining: u32,
    pub(crate) drop_speed: f32,
    pub(crate) phase: LevelPhase,
    pub(crate) items: Vec<WasteItem>,
    /// Id of `items[0]`; ids stay unique across levels.
    pub(crate) item_base: u32,
    pub(crate) next_item_id: u32,
    pub(crate) pending: VecDeque<ItemId>,
    /// Bumped on every level entry; ticks from older epochs are stale.
    pub(crate) timer_epoch: u32,
    pub(crate) outcome: Option<SessionOutcome>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            level: 1,
            score: 0,
            target_score: 0,
            time_remaining: 0,
            drop_speed: 0.0,
            phase: LevelPhase::Active,
            items: Vec::new(),
            item_base: 0,
            next_item_id: 0,
            pending: VecDeque::new(),
            timer_epoch: 0,
            outcome: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn drop_speed(&self) -> f32 {
        self.drop_speed
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn timer_epoch(&self) -> u32 {
        self.timer_epoch
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn items(&self) -> &[WasteItem] {
        &self.items
    }

    pub fn score_card(&self) -> ScoreCard {
        ScoreCard {
            level: self.level,
            score: self.score,
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&WasteItem> {
        let idx = id.0.checked_sub(self.item_base)? as usize;
        self.items.get(idx)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut WasteItem> {
        let idx = id.0.checked_sub(self.item_base)? as usize;
        self.items.get_mut(idx)
    }

    pub fn is_active(&self) -> bool {
        self.phase == LevelPhase::Active
    }

    /// Whether a drag may start on this item.
    pub fn can_drag(&self, id: ItemId) -> bool {
        self.is_active() && self.item(id).is_some_and(|i| i.status.in_play())
    }

    pub fn in_play_count(&self) -> usize {
        self.items.iter().filter(|i| i.status.in_play()).count()
    }

    pub(crate) fn set_phase(&mut self, phase: LevelPhase, out: &mut Vec<Effect>) {
        self.phase = phase;
        out.push(Effect::PhaseChanged(phase));
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// A falling item was dropped inside the ground band: it stays in the
/// world but can no longer be dragged or classified.
pub fn land_item(state: &mut SessionState, id: ItemId) -> bool {
    if !state.is_active() {
        return false;
    }
    match state.item_mut(id) {
        Some(item) if item.status == ItemStatus::Falling => {
            item.status = ItemStatus::Landed;
            true
        }
        _ => false,
    }
}

/// An item hit the floor of the world and leaves play without scoring.
pub fn discard_item(state: &mut SessionState, id: ItemId, out: &mut Vec<Effect>) -> bool {
    if state.phase.is_terminal() {
        return false;
    }
    match state.item_mut(id) {
        Some(item) if matches!(item.status, ItemStatus::Falling | ItemStatus::Landed) => {
            item.status = ItemStatus::Removed;
            out.push(Effect::Remove { id });
            log::debug!("item {} reached the floor", id.0);
            true
        }
        _ => false,
    }
}
