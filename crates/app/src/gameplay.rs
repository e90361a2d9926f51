//! Gameplay screen: the session core wired to the engine collaborators.
//!
//! Every core call pushes [`Effect`]s into one buffer; [`Gameplay::apply`]
//! drains it right away. Effects that concern the engine (timers, bodies,
//! feedback) are applied here. Effects that concern other screens or the
//! music are forwarded as [`HostSignal`]s for the app to act on.

use waste_drop_core::{
    BinSet, Effect, Feedback, GameConfig, GameSession, Response, SessionEvent, SessionOutcome,
    SessionSnapshot, SimpleRng,
};
use waste_drop_engine::{Fader, PhysicsWorld, TimerService, WorldEvent};

use crate::types::{
    ItemId, LevelInit, PointerEvent, PointerPhase, ScoreCard, FLOOR_REMOVE_BAND, GROUND_BAND,
    WORLD_HEIGHT, WORLD_WIDTH,
};

/// World units a held item moves per directional key press.
pub const NUDGE_STEP: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTimer {
    Countdown { epoch: u32 },
    Drop { epoch: u32 },
}

impl GameTimer {
    fn epoch(&self) -> u32 {
        match *self {
            GameTimer::Countdown { epoch } | GameTimer::Drop { epoch } => epoch,
        }
    }

    fn event(&self) -> SessionEvent {
        match *self {
            GameTimer::Countdown { epoch } => SessionEvent::CountdownTick { epoch },
            GameTimer::Drop { epoch } => SessionEvent::DropTick { epoch },
        }
    }
}

/// Requests from gameplay to the surrounding app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostSignal {
    PlayMusic,
    StopMusic,
    Transition(ScoreCard),
    Finished(SessionOutcome),
}

#[derive(Debug)]
pub struct Gameplay {
    session: GameSession<SimpleRng>,
    world: PhysicsWorld,
    timers: TimerService<GameTimer>,
    fader: Fader<Feedback>,
    held: Option<ItemId>,
    effects: Vec<Effect>,
    fired: Vec<GameTimer>,
    contacts: Vec<WorldEvent>,
}

impl Gameplay {
    pub fn start(
        config: GameConfig,
        seed: u32,
        init: LevelInit,
        signals: &mut Vec<HostSignal>,
    ) -> Self {
        let mut effects = Vec::new();
        let session = GameSession::begin(
            config,
            BinSet::standard(WORLD_WIDTH, WORLD_HEIGHT),
            SimpleRng::new(seed),
            init,
            &mut effects,
        );
        let mut gameplay = Self {
            session,
            world: PhysicsWorld::new(WORLD_WIDTH, WORLD_HEIGHT),
            timers: TimerService::new(),
            fader: Fader::default(),
            held: None,
            effects,
            fired: Vec::new(),
            contacts: Vec::new(),
        };
        gameplay.apply(signals);
        gameplay
    }

    fn dispatch(&mut self, event: SessionEvent, signals: &mut Vec<HostSignal>) -> Response {
        let response = self.session.dispatch(event, &mut self.effects);
        self.apply(signals);
        response
    }

    fn apply(&mut self, signals: &mut Vec<HostSignal>) {
        let mut effects = std::mem::take(&mut self.effects);
        for effect in effects.drain(..) {
            match effect {
                Effect::StartTimers { epoch } => {
                    let config = self.session.config();
                    self.timers
                        .register(config.countdown_interval_ms, GameTimer::Countdown { epoch });
                    self.timers
                        .register(config.drop_interval_ms, GameTimer::Drop { epoch });
                }
                Effect::CancelTimers { epoch } => {
                    self.timers.cancel_where(|t| t.epoch() == epoch);
                }
                Effect::Release(release) => {
                    self.world
                        .spawn(release.id, release.spawn_x, 0.0, release.velocity_y);
                }
                Effect::Remove { id } => {
                    self.world.remove(id);
                    if self.held == Some(id) {
                        self.held = None;
                    }
                }
                Effect::ReturnToOrigin { id } => {
                    self.world.return_to_origin(id);
                }
                Effect::ClearPlayfield => {
                    self.world.clear();
                    self.held = None;
                }
                Effect::Feedback(feedback) => {
                    self.fader
                        .push(feedback, WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);
                }
                Effect::PhaseChanged(phase) => log::debug!("phase -> {}", phase.as_str()),
                Effect::PlayMusic => signals.push(HostSignal::PlayMusic),
                Effect::StopMusic => signals.push(HostSignal::StopMusic),
                Effect::ShowTransition(card) => signals.push(HostSignal::Transition(card)),
                Effect::Finished(outcome) => signals.push(HostSignal::Finished(outcome)),
            }
        }
        self.effects = effects;
    }

    /// Advance timers, physics and feedback by one host step.
    pub fn tick(&mut self, dt_ms: u32, signals: &mut Vec<HostSignal>) {
        let mut fired = std::mem::take(&mut self.fired);
        fired.clear();
        self.timers.advance(dt_ms, &mut fired);
        for timer in &fired {
            self.dispatch(timer.event(), signals);
        }
        self.fired = fired;

        let mut contacts = std::mem::take(&mut self.contacts);
        contacts.clear();
        self.world.step(dt_ms, &mut contacts);
        for contact in &contacts {
            let WorldEvent::HitFloor { id, y } = *contact;
            if y < WORLD_HEIGHT - FLOOR_REMOVE_BAND {
                continue;
            }
            if !self.dispatch(SessionEvent::HitFloor { id }, signals).accepted() {
                // Not tracked by the session any more; drop the stray body.
                self.world.remove(id);
            }
        }
        self.contacts = contacts;

        self.fader.advance(dt_ms);
    }

    pub fn pointer(&mut self, event: PointerEvent, signals: &mut Vec<HostSignal>) -> bool {
        match event.phase {
            PointerPhase::Down => {
                if self.held.is_some() {
                    return false;
                }
                let state = self.session.state();
                match self.world.hit_test(event.x, event.y, |id| state.can_drag(id)) {
                    Some(id) => self.grab(id, signals),
                    None => false,
                }
            }
            PointerPhase::Drag => match self.held {
                Some(id) => self.world.drag_to(id, event.x, event.y),
                None => false,
            },
            PointerPhase::Up => match self.held {
                Some(id) => {
                    self.world.drag_to(id, event.x, event.y);
                    self.release(signals).is_some()
                }
                None => false,
            },
        }
    }

    fn grab(&mut self, id: ItemId, signals: &mut Vec<HostSignal>) -> bool {
        if !self
            .dispatch(SessionEvent::DragStart { id }, signals)
            .accepted()
        {
            return false;
        }
        self.world.begin_drag(id);
        self.held = Some(id);
        true
    }

    /// Let go of the held item: inside the ground band it lands, anywhere
    /// else it is judged against the bins.
    pub fn release(&mut self, signals: &mut Vec<HostSignal>) -> Option<Response> {
        let id = self.held.take()?;
        let region = self.world.end_drag(id)?;
        let (_, cy) = region.center();
        let event = if cy >= WORLD_HEIGHT - GROUND_BAND {
            SessionEvent::Landed { id }
        } else {
            SessionEvent::Placed { id, region }
        };
        Some(self.dispatch(event, signals))
    }

    /// Keyboard grab: pick up the lowest draggable item, or release the held one.
    pub fn toggle_grab(&mut self, signals: &mut Vec<HostSignal>) -> bool {
        if self.held.is_some() {
            return self.release(signals).is_some();
        }
        let state = self.session.state();
        match self.world.lowest(|id| state.can_drag(id)) {
            Some(id) => self.grab(id, signals),
            None => false,
        }
    }

    pub fn nudge(&mut self, dx: f32, dy: f32) -> bool {
        match self.held {
            Some(id) => self.world.nudge(id, dx, dy),
            None => false,
        }
    }

    /// Abort a drag without judging it, e.g. when the game is paused.
    pub fn cancel_drag(&mut self) {
        if let Some(id) = self.held.take() {
            self.world.end_drag(id);
            self.world.return_to_origin(id);
        }
    }

    pub fn continue_level(&mut self, signals: &mut Vec<HostSignal>) -> bool {
        self.dispatch(SessionEvent::Continue, signals).accepted()
    }

    pub fn session(&self) -> &GameSession<SimpleRng> {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn fader(&self) -> &Fader<Feedback> {
        &self.fader
    }

    pub fn held(&self) -> Option<ItemId> {
        self.held
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, LevelPhase, TICK_MS};

    fn start(init: LevelInit) -> (Gameplay, Vec<HostSignal>) {
        let mut signals = Vec::new();
        let g = Gameplay::start(GameConfig::default(), 7, init, &mut signals);
        (g, signals)
    }

    fn run(g: &mut Gameplay, ms: u32, signals: &mut Vec<HostSignal>) {
        let mut left = ms;
        while left > 0 {
            let step = left.min(TICK_MS);
            g.tick(step, signals);
            left -= step;
        }
    }

    fn bin_center(g: &Gameplay, category: Category) -> (f32, f32) {
        g.session().bins().get(category).unwrap().region.center()
    }

    #[test]
    fn test_start_registers_timers_and_music() {
        let (g, signals) = start(LevelInit::default());
        assert_eq!(g.active_timers(), 2);
        assert_eq!(signals, vec![HostSignal::PlayMusic]);
        assert_eq!(g.snapshot().time_remaining, 60);
    }

    #[test]
    fn test_items_release_every_second() {
        let (mut g, mut signals) = start(LevelInit::default());
        run(&mut g, 1000, &mut signals);
        assert_eq!(g.world().bodies().len(), 1);
        assert_eq!(g.snapshot().time_remaining, 59);
        run(&mut g, 1000, &mut signals);
        assert_eq!(g.world().bodies().len(), 2);
    }

    #[test]
    fn test_unhandled_items_fall_off_the_floor() {
        let (mut g, mut signals) = start(LevelInit::default());
        run(&mut g, 1000, &mut signals);
        let first = g.world().bodies()[0].id;
        // 150 px/s plus gravity reaches the floor well within four seconds.
        run(&mut g, 4000, &mut signals);
        assert!(g.world().body(first).is_none());
        assert_eq!(
            g.session().state().item(first).unwrap().status,
            crate::types::ItemStatus::Removed
        );
    }

    #[test]
    fn test_drag_into_matching_bin_scores() {
        let (mut g, mut signals) = start(LevelInit::default());
        run(&mut g, 1000, &mut signals);
        let body = g.world().bodies()[0];
        let category = g.session().state().item(body.id).unwrap().category;

        assert!(g.pointer(
            PointerEvent::new(PointerPhase::Down, body.x, body.y),
            &mut signals
        ));
        assert_eq!(g.held(), Some(body.id));

        let (bx, _) = bin_center(&g, category);
        g.pointer(PointerEvent::new(PointerPhase::Drag, bx, 500.0), &mut signals);
        assert!(g.pointer(PointerEvent::new(PointerPhase::Up, bx, 500.0), &mut signals));

        assert_eq!(g.snapshot().score, 10);
        assert!(g.world().body(body.id).is_none());
        assert_eq!(g.fader().labels().len(), 1);
        assert_eq!(g.fader().labels()[0].value.text(), "Correct! +10");
    }

    #[test]
    fn test_miss_returns_item_to_pickup_point() {
        let (mut g, mut signals) = start(LevelInit::default());
        run(&mut g, 1000, &mut signals);
        let body = g.world().bodies()[0];

        g.pointer(PointerEvent::new(PointerPhase::Down, body.x, body.y), &mut signals);
        g.pointer(PointerEvent::new(PointerPhase::Up, 180.0, 100.0), &mut signals);

        let after = g.world().body(body.id).unwrap();
        assert_eq!((after.x, after.y), (body.x, body.y));
        assert_eq!(g.snapshot().score, 0);
        assert_eq!(g.held(), None);
    }

    #[test]
    fn test_drop_in_ground_band_lands() {
        let (mut g, mut signals) = start(LevelInit::default());
        run(&mut g, 1000, &mut signals);
        let id = g.world().bodies()[0].id;

        assert!(g.toggle_grab(&mut signals));
        g.nudge(0.0, WORLD_HEIGHT);
        assert!(g.toggle_grab(&mut signals));
        assert_eq!(
            g.session().state().item(id).unwrap().status,
            crate::types::ItemStatus::Landed
        );
        // A landed item can no longer be picked up.
        assert!(!g.toggle_grab(&mut signals));
    }

    #[test]
    fn test_pointer_reaches_falling_item_under_landed_one() {
        let (mut g, mut signals) = start(LevelInit::default());
        run(&mut g, 2000, &mut signals);
        let (a, b) = (g.world().bodies()[0].id, g.world().bodies()[1].id);
        while g.world().body(a).unwrap().y < 565.0 {
            g.tick(TICK_MS, &mut signals);
        }
        let under = *g.world().body(a).unwrap();
        let top = *g.world().body(b).unwrap();

        // Land the later item in the ground band, on top of the falling one.
        g.pointer(PointerEvent::new(PointerPhase::Down, top.x, top.y), &mut signals);
        assert_eq!(g.held(), Some(b));
        g.pointer(
            PointerEvent::new(PointerPhase::Up, under.x, under.y + 25.0),
            &mut signals,
        );
        assert_eq!(
            g.session().state().item(b).unwrap().status,
            crate::types::ItemStatus::Landed
        );

        assert!(g.pointer(
            PointerEvent::new(PointerPhase::Down, under.x, under.y + 20.0),
            &mut signals
        ));
        assert_eq!(g.held(), Some(a));
    }

    #[test]
    fn test_clock_expiry_finishes_game() {
        let (mut g, mut signals) = start(LevelInit {
            level: Some(5),
            score: Some(0),
        });
        run(&mut g, 40_000, &mut signals);
        let snap = g.snapshot();
        assert_eq!(snap.phase, LevelPhase::GameOver);
        assert_eq!(g.active_timers(), 0);
        assert!(g.world().bodies().is_empty());
        assert!(signals.contains(&HostSignal::StopMusic));
        assert!(matches!(
            signals.last(),
            Some(HostSignal::Finished(SessionOutcome::GameOver(card))) if card.level == 5
        ));
    }

    #[test]
    fn test_carried_score_wins_and_continues() {
        let (mut g, mut signals) = start(LevelInit {
            level: Some(1),
            score: Some(300),
        });
        assert_eq!(g.snapshot().phase, LevelPhase::Transitioning);
        assert_eq!(g.active_timers(), 0);
        assert!(signals.contains(&HostSignal::Transition(ScoreCard {
            level: 1,
            score: 300
        })));

        signals.clear();
        assert!(g.continue_level(&mut signals));
        let snap = g.snapshot();
        assert_eq!((snap.level, snap.score, snap.time_remaining), (2, 0, 55));
        assert_eq!(g.active_timers(), 2);
        assert_eq!(signals, vec![HostSignal::PlayMusic]);
    }

    #[test]
    fn test_cancel_drag_restores_item() {
        let (mut g, mut signals) = start(LevelInit::default());
        run(&mut g, 1000, &mut signals);
        let body = g.world().bodies()[0];
        g.toggle_grab(&mut signals);
        g.nudge(40.0, 40.0);
        g.cancel_drag();
        let after = g.world().body(body.id).unwrap();
        assert_eq!((after.x, after.y), (body.x, body.y));
        assert_eq!(g.held(), None);
    }
}
