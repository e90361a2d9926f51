//! Scene stack.
//!
//! Scenes are identified by a host-defined key and carry a payload (the
//! data the scene was started with). `start` replaces the whole stack,
//! `launch` overlays a scene on top of whatever runs. Only the topmost
//! running scene receives input; paused scenes keep their state but do not
//! tick.

use arrayvec::ArrayVec;

const MAX_SCENES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStatus {
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry<K, P> {
    pub key: K,
    pub status: SceneStatus,
    pub payload: P,
}

#[derive(Debug, Clone)]
pub struct SceneManager<K, P> {
    stack: ArrayVec<SceneEntry<K, P>, MAX_SCENES>,
}

impl<K: Copy + PartialEq + std::fmt::Debug, P> SceneManager<K, P> {
    pub fn new() -> Self {
        Self {
            stack: ArrayVec::new(),
        }
    }

    /// Stop every scene and run `key` alone.
    pub fn start(&mut self, key: K, payload: P) {
        log::debug!("scene start {:?}", key);
        self.stack.clear();
        self.stack.push(SceneEntry {
            key,
            status: SceneStatus::Running,
            payload,
        });
    }

    /// Run `key` on top of the current scenes. Relaunching an existing
    /// scene moves it to the top with the new payload.
    pub fn launch(&mut self, key: K, payload: P) {
        log::debug!("scene launch {:?}", key);
        self.stack.retain(|e| e.key != key);
        if self.stack.is_full() {
            log::warn!("scene stack full, dropping {:?}", self.stack[0].key);
            self.stack.remove(0);
        }
        self.stack.push(SceneEntry {
            key,
            status: SceneStatus::Running,
            payload,
        });
    }

    pub fn pause(&mut self, key: K) -> bool {
        self.set_status(key, SceneStatus::Paused)
    }

    pub fn resume(&mut self, key: K) -> bool {
        self.set_status(key, SceneStatus::Running)
    }

    fn set_status(&mut self, key: K, status: SceneStatus) -> bool {
        match self.stack.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                log::debug!("scene {:?} -> {:?}", key, status);
                entry.status = status;
                true
            }
            None => false,
        }
    }

    pub fn stop(&mut self, key: K) -> Option<P> {
        let idx = self.stack.iter().position(|e| e.key == key)?;
        log::debug!("scene stop {:?}", key);
        Some(self.stack.remove(idx).payload)
    }

    pub fn is_running(&self, key: K) -> bool {
        self.entry(key)
            .is_some_and(|e| e.status == SceneStatus::Running)
    }

    pub fn is_paused(&self, key: K) -> bool {
        self.entry(key).is_some_and(|e| e.status == SceneStatus::Paused)
    }

    pub fn contains(&self, key: K) -> bool {
        self.entry(key).is_some()
    }

    pub fn entry(&self, key: K) -> Option<&SceneEntry<K, P>> {
        self.stack.iter().find(|e| e.key == key)
    }

    pub fn payload_mut(&mut self, key: K) -> Option<&mut P> {
        self.stack
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.payload)
    }

    /// Topmost running scene, the one that receives input.
    pub fn top(&self) -> Option<&SceneEntry<K, P>> {
        self.stack
            .iter()
            .rev()
            .find(|e| e.status == SceneStatus::Running)
    }

    pub fn top_key(&self) -> Option<K> {
        self.top().map(|e| e.key)
    }

    /// Scenes from bottom to top, for drawing.
    pub fn iter(&self) -> impl Iterator<Item = &SceneEntry<K, P>> {
        self.stack.iter()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl<K: Copy + PartialEq + std::fmt::Debug, P> Default for SceneManager<K, P> {
    fn default() -> Self {
        Self::new()
    }
}
