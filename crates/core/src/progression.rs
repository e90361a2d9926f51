//! Level progression - level entry, level completion, clock expiry.
//!
//! ```text
//! Active --target reached--> Won --> Transitioning --continue--> Active
//!                                \-> Completed (last level cleared)
//! Active --clock at zero--> TimeExpired --> GameOver
//! ```
//!
//! `Completed` and `GameOver` are terminal: every function here is a no-op
//! once either has been reached.

use crate::config::GameConfig;
use crate::rng::WasteSource;
use crate::scheduler;
use crate::session::{Effect, SessionOutcome, SessionState};
use crate::types::{LevelPhase, ScoreCard};

/// Enter `level` as a fresh `Active` level starting at `score`.
///
/// Recomputes clock, target and drop speed from the level, rebuilds the
/// queue and starts the level's timers under a new epoch.
pub fn enter_level<S: WasteSource + ?Sized>(
    state: &mut SessionState,
    config: &GameConfig,
    source: &mut S,
    level: u32,
    score: u32,
    out: &mut Vec<Effect>,
) {
    if state.phase.is_terminal() {
        return;
    }

    let level = level.clamp(1, config.max_level().max(1));
    state.level = level;
    state.score = score;
    state.target_score = config.target_score(level).unwrap_or(u32::MAX);
    state.time_remaining = config.time_budget(level);
    state.drop_speed = config.drop_speed(level);
    state.timer_epoch = state.timer_epoch.wrapping_add(1);
    state.outcome = None;

    scheduler::build_queue(state, config, source);

    state.set_phase(LevelPhase::Active, out);
    out.push(Effect::StartTimers {
        epoch: state.timer_epoch,
    });
    out.push(Effect::PlayMusic);

    log::info!(
        "level {} started: target {}, {}s, drop speed {}",
        state.level,
        state.target_score,
        state.time_remaining,
        state.drop_speed
    );

    // A carried-over score may already satisfy the target.
    if state.score >= state.target_score {
        complete_level(state, config, out);
    }
}

/// Tear down the running level after its target was reached.
///
/// After the last level the session ends as `Completed` and `level()` stays
/// at that last level instead of moving past it.
pub fn complete_level(state: &mut SessionState, config: &GameConfig, out: &mut Vec<Effect>) {
    if !state.is_active() {
        return;
    }

    state.set_phase(LevelPhase::Won, out);
    teardown(state, out);

    let card = state.score_card();
    log::info!("level {} won with {} points", card.level, card.score);

    if state.level >= config.max_level() {
        finish(state, SessionOutcome::Completed(card), LevelPhase::Completed, out);
        log::info!("all {} levels cleared, final score {}", card.level, card.score);
        return;
    }

    state.level += 1;
    state.set_phase(LevelPhase::Transitioning, out);
    out.push(Effect::ShowTransition(card));
}

/// Leave the transition screen and start the next level with a zero score.
pub fn continue_to_next_level<S: WasteSource + ?Sized>(
    state: &mut SessionState,
    config: &GameConfig,
    source: &mut S,
    out: &mut Vec<Effect>,
) -> bool {
    if state.phase != LevelPhase::Transitioning {
        return false;
    }
    let level = state.level;
    enter_level(state, config, source, level, 0, out);
    true
}

/// One countdown step. Reaching zero while `Active` ends the game.
pub fn countdown_tick(state: &mut SessionState, epoch: u32, out: &mut Vec<Effect>) -> bool {
    if epoch != state.timer_epoch || !state.is_active() {
        return false;
    }

    state.time_remaining = state.time_remaining.saturating_sub(1);
    if state.time_remaining > 0 {
        return true;
    }

    state.set_phase(LevelPhase::TimeExpired, out);
    teardown(state, out);

    let card: ScoreCard = state.score_card();
    finish(state, SessionOutcome::GameOver(card), LevelPhase::GameOver, out);
    log::info!(
        "time expired on level {} with {} points",
        card.level,
        card.score
    );
    true
}

fn teardown(state: &mut SessionState, out: &mut Vec<Effect>) {
    out.push(Effect::CancelTimers {
        epoch: state.timer_epoch,
    });
    out.push(Effect::StopMusic);
    out.push(Effect::ClearPlayfield);
    state.pending.clear();
}

fn finish(
    state: &mut SessionState,
    outcome: SessionOutcome,
    phase: LevelPhase,
    out: &mut Vec<Effect>,
) {
    state.outcome = Some(outcome);
    state.set_phase(phase, out);
    out.push(Effect::Finished(outcome));
}
