//! Drop scheduler - fills the level queue and releases one item per tick.

use crate::config::GameConfig;
use crate::item::WasteItem;
use crate::rng::WasteSource;
use crate::session::{Effect, Release, SessionState};
use crate::types::{ItemId, ItemStatus, SPAWN_MARGIN, WORLD_WIDTH};

/// Replace the item table with a fresh queue for the current level.
pub fn build_queue<S: WasteSource + ?Sized>(
    state: &mut SessionState,
    config: &GameConfig,
    source: &mut S,
) {
    let count = config.items_for_level(state.level);

    state.items.clear();
    state.pending.clear();
    state.item_base = state.next_item_id;

    for _ in 0..count {
        let id = ItemId(state.next_item_id);
        state.next_item_id = state.next_item_id.wrapping_add(1);

        let category = source.next_category();
        let variant = source.next_variant();
        let spawn_x = source.next_spawn_x(SPAWN_MARGIN, WORLD_WIDTH - SPAWN_MARGIN);

        state
            .items
            .push(WasteItem::new(id, category, variant, spawn_x));
        state.pending.push_back(id);
    }

    log::debug!("level {} queued {} items", state.level, count);
}

/// Release the next pending item.
///
/// No-op when the tick is stale, the level is not running, or the queue is
/// empty.
pub fn drop_tick(state: &mut SessionState, epoch: u32, out: &mut Vec<Effect>) -> Option<ItemId> {
    if epoch != state.timer_epoch || !state.is_active() {
        return None;
    }

    let id = state.pending.pop_front()?;
    let velocity_y = state.drop_speed;
    let item = state.item_mut(id)?;
    item.status = ItemStatus::Falling;

    out.push(Effect::Release(Release {
        id,
        category: item.category,
        variant: item.variant,
        spawn_x: item.spawn_x,
        velocity_y,
    }));
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, SimpleRng};
    use crate::types::Category;

    fn small_config(items: u32) -> GameConfig {
        GameConfig {
            items_per_level: Some(items),
            ..GameConfig::default()
        }
    }

    fn active_state(speed: f32) -> SessionState {
        let mut s = SessionState::new();
        s.drop_speed = speed;
        s.timer_epoch = 1;
        s
    }

    #[test]
    fn test_build_queue_uses_source() {
        let mut s = active_state(150.0);
        let mut src = ScriptedSource::new(vec![Category::Hazardous, Category::Organic]);
        build_queue(&mut s, &small_config(3), &mut src);

        assert_eq!(s.pending_len(), 3);
        let cats: Vec<_> = s.items().iter().map(|i| i.category).collect();
        assert_eq!(
            cats,
            vec![Category::Hazardous, Category::Organic, Category::Hazardous]
        );
        assert!(s.items().iter().all(|i| i.status == ItemStatus::Pending));
    }

    #[test]
    fn test_default_queue_length_is_time_budget() {
        let mut s = active_state(150.0);
        s.level = 3;
        build_queue(&mut s, &GameConfig::default(), &mut SimpleRng::new(5));
        assert_eq!(s.pending_len(), 50);
        for item in s.items() {
            assert!((SPAWN_MARGIN..=WORLD_WIDTH - SPAWN_MARGIN).contains(&item.spawn_x));
        }
    }

    #[test]
    fn test_ids_stay_unique_across_rebuilds() {
        let mut s = active_state(150.0);
        let mut src = SimpleRng::new(1);
        build_queue(&mut s, &small_config(2), &mut src);
        let first: Vec<_> = s.items().iter().map(|i| i.id).collect();
        build_queue(&mut s, &small_config(2), &mut src);
        let second: Vec<_> = s.items().iter().map(|i| i.id).collect();
        assert_eq!(first, vec![ItemId(0), ItemId(1)]);
        assert_eq!(second, vec![ItemId(2), ItemId(3)]);
        assert!(s.item(ItemId(0)).is_none());
    }

    #[test]
    fn test_drop_tick_releases_in_order() {
        let mut s = active_state(250.0);
        build_queue(&mut s, &small_config(2), &mut ScriptedSource::new(vec![Category::Organic]));
        let mut out = Vec::new();

        assert_eq!(drop_tick(&mut s, 1, &mut out), Some(ItemId(0)));
        assert_eq!(drop_tick(&mut s, 1, &mut out), Some(ItemId(1)));
        assert_eq!(out.len(), 2);
        match out[0] {
            Effect::Release(r) => {
                assert_eq!(r.id, ItemId(0));
                assert_eq!(r.velocity_y, 250.0);
                assert_eq!(r.category, Category::Organic);
            }
            other => panic!("unexpected effect {:?}", other),
        }
        assert_eq!(s.item(ItemId(0)).unwrap().status, ItemStatus::Falling);
    }

    #[test]
    fn test_drop_tick_empty_queue_is_noop() {
        let mut s = active_state(150.0);
        build_queue(&mut s, &small_config(0), &mut SimpleRng::new(1));
        let mut out = Vec::new();
        assert_eq!(drop_tick(&mut s, 1, &mut out), None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_drop_tick_ignores_stale_epoch() {
        let mut s = active_state(150.0);
        build_queue(&mut s, &small_config(1), &mut SimpleRng::new(1));
        let mut out = Vec::new();
        assert_eq!(drop_tick(&mut s, 0, &mut out), None);
        assert_eq!(s.pending_len(), 1);
        assert!(out.is_empty());
    }
}
