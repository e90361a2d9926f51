//! Game session - single entry point for the host.
//!
//! Bundles the session state with its configuration, bin layout and item
//! source, and routes every timer tick and input event through
//! [`GameSession::dispatch`]. How an event was produced (mouse drag,
//! keyboard grab, a test script) is irrelevant here; only its payload is.

use crate::config::GameConfig;
use crate::item::BinSet;
use crate::judge::{self, Verdict};
use crate::progression;
use crate::rng::{SimpleRng, WasteSource};
use crate::session::{self, Effect, SessionState};
use crate::snapshot::SessionSnapshot;
use crate::types::{ItemId, LevelInit, Rect};

/// Everything the host can report to a running session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// One second of the level clock elapsed.
    CountdownTick { epoch: u32 },
    /// Release the next queued item.
    DropTick { epoch: u32 },
    /// The player picked an item up.
    DragStart { id: ItemId },
    /// The player let go of an item away from the ground band.
    Placed { id: ItemId, region: Rect },
    /// The player let go of an item inside the ground band.
    Landed { id: ItemId },
    /// A falling or landed item reached the floor.
    HitFloor { id: ItemId },
    /// Continue from the level-complete summary.
    Continue,
}

/// What a dispatched event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ignored,
    Accepted,
    Judged(Verdict),
}

impl Response {
    pub fn accepted(&self) -> bool {
        !matches!(self, Response::Ignored | Response::Judged(Verdict::Ignored))
    }
}

/// A running play-through, from the first level to a terminal phase.
#[derive(Debug, Clone)]
pub struct GameSession<S = SimpleRng> {
    config: GameConfig,
    bins: BinSet,
    state: SessionState,
    source: S,
}

impl<S: WasteSource> GameSession<S> {
    /// Start a session from a level-init payload.
    ///
    /// Invalid payloads fall back to level 1 with a score of 0.
    pub fn begin(
        config: GameConfig,
        bins: BinSet,
        source: S,
        init: LevelInit,
        out: &mut Vec<Effect>,
    ) -> Self {
        let max_level = config.max_level();
        if init.is_defaulted(max_level) {
            log::warn!("level init {:?} invalid or missing, starting at level 1", init);
        }
        let (level, score) = init.resolve(max_level);

        let mut session = Self {
            config,
            bins,
            state: SessionState::new(),
            source,
        };
        progression::enter_level(
            &mut session.state,
            &session.config,
            &mut session.source,
            level,
            score,
            out,
        );
        session
    }

    pub fn dispatch(&mut self, event: SessionEvent, out: &mut Vec<Effect>) -> Response {
        let state = &mut self.state;
        match event {
            SessionEvent::CountdownTick { epoch } => {
                flag(progression::countdown_tick(state, epoch, out))
            }
            SessionEvent::DropTick { epoch } => {
                flag(crate::scheduler::drop_tick(state, epoch, out).is_some())
            }
            SessionEvent::DragStart { id } => flag(state.can_drag(id)),
            SessionEvent::Placed { id, region } => Response::Judged(judge::classify(
                state,
                &self.config,
                &self.bins,
                id,
                region,
                out,
            )),
            SessionEvent::Landed { id } => flag(session::land_item(state, id)),
            SessionEvent::HitFloor { id } => flag(session::discard_item(state, id, out)),
            SessionEvent::Continue => flag(progression::continue_to_next_level(
                state,
                &self.config,
                &mut self.source,
                out,
            )),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bins(&self) -> &BinSet {
        &self.bins
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        let s = &self.state;
        out.level = s.level();
        out.max_level = self.config.max_level();
        out.score = s.score();
        out.target_score = s.target_score();
        out.time_remaining = s.time_remaining();
        out.drop_speed = s.drop_speed();
        out.phase = s.phase();
        out.pending = s.pending_len() as u32;
        out.in_play = s.in_play_count() as u32;
        out.timer_epoch = s.timer_epoch();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn flag(applied: bool) -> Response {
    if applied {
        Response::Accepted
    } else {
        Response::Ignored
    }
}
