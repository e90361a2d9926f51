//! Arcade physics world for waste items.
//!
//! Bodies are axis-aligned boxes addressed by [`ItemId`] with their position
//! stored as the box center. Free bodies accelerate under gravity, bounce
//! off the side walls and the floor, and report floor contact. Held bodies
//! (being dragged) are kinematic: they ignore gravity and velocity.

use crate::types::{ItemId, Rect, BOUNCE, GRAVITY_Y, ITEM_SIZE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: ItemId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub w: f32,
    pub h: f32,
    held: bool,
    drag_origin: Option<(f32, f32)>,
}

impl Body {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.w, self.h)
    }

    pub fn held(&self) -> bool {
        self.held
    }
}

/// Contact reported by [`PhysicsWorld::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    /// The body touched the floor; `y` is its center after the contact.
    HitFloor { id: ItemId, y: f32 },
}

#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    width: f32,
    height: f32,
    gravity: f32,
    bounce: f32,
    bodies: Vec<Body>,
}

impl PhysicsWorld {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            gravity: GRAVITY_Y,
            bounce: BOUNCE,
            bodies: Vec::new(),
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Spawn an item body at `(x, y)` falling at `vy`. Replaces an existing body with the same id.
    pub fn spawn(&mut self, id: ItemId, x: f32, y: f32, vy: f32) {
        self.remove(id);
        self.bodies.push(Body {
            id,
            x,
            y,
            vx: 0.0,
            vy,
            w: ITEM_SIZE,
            h: ITEM_SIZE,
            held: false,
            drag_origin: None,
        });
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.id != id);
        self.bodies.len() != before
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: ItemId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: ItemId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bounds(&self, id: ItemId) -> Option<Rect> {
        self.body(id).map(Body::bounds)
    }

    /// Topmost free body under a point (later spawns are drawn on top),
    /// skipping bodies the filter rejects.
    pub fn hit_test(&self, x: f32, y: f32, mut pred: impl FnMut(ItemId) -> bool) -> Option<ItemId> {
        self.bodies
            .iter()
            .rev()
            .find(|b| !b.held && b.bounds().contains(x, y) && pred(b.id))
            .map(|b| b.id)
    }

    /// The free body closest to the floor, optionally filtered.
    pub fn lowest(&self, mut pred: impl FnMut(ItemId) -> bool) -> Option<ItemId> {
        self.bodies
            .iter()
            .filter(|b| !b.held && pred(b.id))
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|b| b.id)
    }

    /// Start dragging: the body stops and remembers where it was picked up.
    pub fn begin_drag(&mut self, id: ItemId) -> bool {
        let Some(body) = self.body_mut(id) else {
            return false;
        };
        body.held = true;
        body.vx = 0.0;
        body.vy = 0.0;
        body.drag_origin = Some((body.x, body.y));
        true
    }

    pub fn drag_to(&mut self, id: ItemId, x: f32, y: f32) -> bool {
        match self.body_mut(id) {
            Some(body) if body.held => {
                body.x = x;
                body.y = y;
                true
            }
            _ => false,
        }
    }

    /// Move a held body by a delta, clamped to the world.
    pub fn nudge(&mut self, id: ItemId, dx: f32, dy: f32) -> bool {
        let (w, h) = (self.width, self.height);
        match self.body_mut(id) {
            Some(body) if body.held => {
                body.x = (body.x + dx).clamp(0.0, w);
                body.y = (body.y + dy).clamp(0.0, h);
                true
            }
            _ => false,
        }
    }

    /// Let go of a held body; it resumes falling from rest.
    pub fn end_drag(&mut self, id: ItemId) -> Option<Rect> {
        let body = self.body_mut(id)?;
        if !body.held {
            return None;
        }
        body.held = false;
        Some(body.bounds())
    }

    /// Put a body back where its last drag started.
    pub fn return_to_origin(&mut self, id: ItemId) -> bool {
        let Some(body) = self.body_mut(id) else {
            return false;
        };
        match body.drag_origin.take() {
            Some((x, y)) => {
                body.x = x;
                body.y = y;
                true
            }
            None => false,
        }
    }

    /// Integrate all free bodies over `dt_ms`.
    pub fn step(&mut self, dt_ms: u32, events: &mut Vec<WorldEvent>) {
        let dt = dt_ms as f32 / 1000.0;
        let (width, height, gravity, bounce) = (self.width, self.height, self.gravity, self.bounce);

        for body in self.bodies.iter_mut().filter(|b| !b.held) {
            body.vy += gravity * dt;
            body.x += body.vx * dt;
            body.y += body.vy * dt;

            let (hw, hh) = (body.w / 2.0, body.h / 2.0);
            if body.x - hw < 0.0 {
                body.x = hw;
                body.vx = -body.vx * bounce;
            } else if body.x + hw > width {
                body.x = width - hw;
                body.vx = -body.vx * bounce;
            }
            // Items enter from above the top edge; only block upward motion.
            if body.y - hh < 0.0 && body.vy < 0.0 {
                body.y = hh;
                body.vy = -body.vy * bounce;
            }
            if body.y + hh >= height {
                body.y = height - hh;
                body.vy = -body.vy.abs() * bounce;
                events.push(WorldEvent::HitFloor {
                    id: body.id,
                    y: body.y,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(360.0, 640.0)
    }

    #[test]
    fn test_free_fall_accelerates() {
        let mut w = world();
        w.spawn(ItemId(1), 100.0, 0.0, 150.0);
        let mut ev = Vec::new();
        w.step(1000, &mut ev);
        let b = w.body(ItemId(1)).unwrap();
        assert_eq!(b.vy, 350.0);
        assert_eq!(b.y, 350.0);
        assert!(ev.is_empty());
    }

    #[test]
    fn test_floor_contact_reports_and_bounces() {
        let mut w = world();
        w.spawn(ItemId(1), 100.0, 590.0, 300.0);
        let mut ev = Vec::new();
        w.step(100, &mut ev);
        assert_eq!(
            ev,
            vec![WorldEvent::HitFloor {
                id: ItemId(1),
                y: 600.0
            }]
        );
        assert!(w.body(ItemId(1)).unwrap().vy < 0.0);
    }

    #[test]
    fn test_side_walls_clamp() {
        let mut w = world().with_gravity(0.0);
        w.spawn(ItemId(1), 30.0, 100.0, 0.0);
        let mut ev = Vec::new();
        w.step(16, &mut ev);
        assert_eq!(w.body(ItemId(1)).unwrap().x, 40.0);
    }

    #[test]
    fn test_drag_cycle_and_return() {
        let mut w = world();
        w.spawn(ItemId(7), 100.0, 200.0, 150.0);
        assert!(w.begin_drag(ItemId(7)));
        assert!(w.drag_to(ItemId(7), 250.0, 300.0));

        // Held bodies do not move under gravity.
        let mut ev = Vec::new();
        w.step(500, &mut ev);
        assert_eq!(w.bounds(ItemId(7)).unwrap().center(), (250.0, 300.0));
        assert_eq!(w.hit_test(250.0, 300.0, |_| true), None);

        let r = w.end_drag(ItemId(7)).unwrap();
        assert_eq!(r.center(), (250.0, 300.0));
        assert!(w.return_to_origin(ItemId(7)));
        assert_eq!(w.bounds(ItemId(7)).unwrap().center(), (100.0, 200.0));
        assert_eq!(w.body(ItemId(7)).unwrap().vy, 0.0);
        assert!(!w.return_to_origin(ItemId(7)));
    }

    #[test]
    fn test_hit_test_and_lowest() {
        let mut w = world();
        w.spawn(ItemId(1), 100.0, 100.0, 0.0);
        w.spawn(ItemId(2), 110.0, 300.0, 0.0);
        w.spawn(ItemId(3), 105.0, 120.0, 0.0);
        assert_eq!(w.hit_test(105.0, 110.0, |_| true), Some(ItemId(3)));
        assert_eq!(w.hit_test(105.0, 110.0, |id| id != ItemId(3)), Some(ItemId(1)));
        assert_eq!(w.hit_test(5.0, 5.0, |_| true), None);
        assert_eq!(w.lowest(|_| true), Some(ItemId(2)));
        assert_eq!(w.lowest(|id| id != ItemId(2)), Some(ItemId(3)));
    }

    #[test]
    fn test_nudge_clamps_to_world() {
        let mut w = world();
        w.spawn(ItemId(1), 10.0, 10.0, 0.0);
        assert!(!w.nudge(ItemId(1), -50.0, 0.0));
        w.begin_drag(ItemId(1));
        assert!(w.nudge(ItemId(1), -50.0, 1000.0));
        assert_eq!(w.bounds(ItemId(1)).unwrap().center(), (0.0, 640.0));
    }

    #[test]
    fn test_spawn_replaces_and_remove() {
        let mut w = world();
        w.spawn(ItemId(1), 10.0, 10.0, 0.0);
        w.spawn(ItemId(1), 20.0, 10.0, 0.0);
        assert_eq!(w.bodies().len(), 1);
        assert!(w.remove(ItemId(1)));
        assert!(!w.remove(ItemId(1)));
        w.spawn(ItemId(2), 10.0, 10.0, 0.0);
        w.clear();
        assert!(w.bodies().is_empty());
    }
}
