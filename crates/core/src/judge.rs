//! Classification judge - scores a dropped item against the bins.
//!
//! Bin selection when the item overlaps several bins: the largest overlap
//! area wins, and equal areas resolve in canonical category order
//! (recyclable, organic, hazardous).

use crate::config::GameConfig;
use crate::item::{Bin, BinSet};
use crate::progression;
use crate::session::{Effect, Feedback, SessionState};
use crate::types::{Category, ItemId, ItemStatus, Rect};

/// Result of judging one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Matching bin; `points` were added.
    Correct { bin: Category, points: u32 },
    /// Wrong bin; `points` were actually deducted (may be less than the penalty).
    Wrong { bin: Category, points: u32 },
    /// Overlaps no bin; the item goes back to its drag origin.
    Missed,
    /// Item not in play or level not running; nothing changed.
    Ignored,
}

impl Verdict {
    pub fn is_scored(&self) -> bool {
        matches!(self, Verdict::Correct { .. } | Verdict::Wrong { .. })
    }
}

/// Pick the bin an item region is dropped into.
pub fn select_bin<'a>(bins: &'a BinSet, region: &Rect) -> Option<&'a Bin> {
    let mut best: Option<(&Bin, f32)> = None;
    for bin in bins.iter() {
        if !region.intersects(&bin.region) {
            continue;
        }
        let area = region.overlap_area(&bin.region);
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((bin, area)),
        }
    }
    best.map(|(bin, _)| bin)
}

/// Judge a dropped item and apply the score change.
///
/// Reaching the level target hands over to [`progression::complete_level`].
pub fn classify(
    state: &mut SessionState,
    config: &GameConfig,
    bins: &BinSet,
    id: ItemId,
    region: Rect,
    out: &mut Vec<Effect>,
) -> Verdict {
    if !state.is_active() {
        return Verdict::Ignored;
    }
    let Some(item) = state.item(id) else {
        return Verdict::Ignored;
    };
    if item.status != ItemStatus::Falling {
        return Verdict::Ignored;
    }
    let category = item.category;

    let Some(bin) = select_bin(bins, &region) else {
        out.push(Effect::ReturnToOrigin { id });
        return Verdict::Missed;
    };
    let bin_category = bin.category;

    let verdict = if bin_category == category {
        state.score = state.score.saturating_add(config.reward);
        out.push(Effect::Feedback(Feedback::correct(config.reward)));
        Verdict::Correct {
            bin: bin_category,
            points: config.reward,
        }
    } else {
        let before = state.score;
        state.score = state.score.saturating_sub(config.penalty);
        out.push(Effect::Feedback(Feedback::wrong(config.penalty)));
        Verdict::Wrong {
            bin: bin_category,
            points: before - state.score,
        }
    };

    if let Some(item) = state.item_mut(id) {
        item.status = ItemStatus::Classified;
    }
    out.push(Effect::Remove { id });

    log::debug!(
        "item {} ({}) into {} bin: {:?}, score {}",
        id.0,
        category.as_str(),
        bin_category.as_str(),
        verdict,
        state.score
    );

    if state.score >= state.target_score {
        progression::complete_level(state, config, out);
    }

    verdict
}
