//! Periodic timers driven by the host's fixed timestep.
//!
//! A timer fires every `delay_ms` of advanced time until it is cancelled.
//! When one `advance` spans several periods the timer fires once per period.
//! Timers registered earlier fire first within an `advance`; callers must
//! not rely on that order between independent timers.

/// Opaque handle of a registered timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    handle: TimerHandle,
    delay_ms: u32,
    elapsed_ms: u32,
    tag: T,
}

#[derive(Debug, Clone)]
pub struct TimerService<T> {
    timers: Vec<Timer<T>>,
    next_handle: u32,
}

impl<T: Copy> TimerService<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 0,
        }
    }

    /// Register a repeating timer. A zero delay is treated as 1ms.
    pub fn register(&mut self, delay_ms: u32, tag: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.timers.push(Timer {
            handle,
            delay_ms: delay_ms.max(1),
            elapsed_ms: 0,
            tag,
        });
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Cancel every timer whose tag matches.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| !pred(&t.tag));
        before - self.timers.len()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance all timers and append the tag of every firing to `fired`.
    pub fn advance(&mut self, elapsed_ms: u32, fired: &mut Vec<T>) {
        for timer in &mut self.timers {
            timer.elapsed_ms = timer.elapsed_ms.saturating_add(elapsed_ms);
            while timer.elapsed_ms >= timer.delay_ms {
                timer.elapsed_ms -= timer.delay_ms;
                fired.push(timer.tag);
            }
        }
    }
}

impl<T: Copy> Default for TimerService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_repeats() {
        let mut t = TimerService::new();
        t.register(1000, 'a');
        let mut fired = Vec::new();

        t.advance(999, &mut fired);
        assert!(fired.is_empty());
        t.advance(1, &mut fired);
        assert_eq!(fired, vec!['a']);
        t.advance(2500, &mut fired);
        assert_eq!(fired, vec!['a', 'a', 'a']);
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut t = TimerService::new();
        let a = t.register(10, 1u8);
        t.register(10, 2u8);
        assert!(t.cancel(a));
        assert!(!t.cancel(a));

        let mut fired = Vec::new();
        t.advance(10, &mut fired);
        assert_eq!(fired, vec![2]);
    }

    #[test]
    fn test_cancel_where_by_tag() {
        let mut t = TimerService::new();
        t.register(5, (1u32, 'c'));
        t.register(5, (1u32, 'd'));
        t.register(5, (2u32, 'c'));
        assert_eq!(t.cancel_where(|(epoch, _)| *epoch == 1), 2);
        assert_eq!(t.len(), 1);

        t.cancel_all();
        assert!(t.is_empty());
    }

    #[test]
    fn test_zero_delay_does_not_spin() {
        let mut t = TimerService::new();
        t.register(0, ());
        let mut fired = Vec::new();
        t.advance(3, &mut fired);
        assert_eq!(fired.len(), 3);
    }
}
