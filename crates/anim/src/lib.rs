//! Tweening and the blocking animation queue.

use std::collections::HashMap;
use std::hash::Hash;

/// Easing curve applied to tween progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease in, ease out.
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` to eased progress. `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Result of a [`Tween::update`] call.
#[derive(Debug, PartialEq, Eq)]
pub enum TweenState {
    Running,
    Finished,
}

/// Progress of a single animation over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub duration_ms: f32,
    pub elapsed_ms: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(duration_ms: f32, easing: Easing) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Advances the tween by `dt_ms` milliseconds.
    pub fn update(&mut self, dt_ms: f32) -> TweenState {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms.max(0.0));
        if self.is_finished() {
            TweenState::Finished
        } else {
            TweenState::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Linear progress in `[0, 1]`.
    pub fn raw(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.raw())
    }
}

#[derive(Debug)]
struct Entry<T> {
    tween: Tween,
    payload: T,
    blocking: bool,
}

/// Running tweens keyed by `K`, each carrying a payload `T`.
///
/// Starting a tween under a key that is already animating replaces the old
/// one. Tweens started with [`Animator::start_blocking`] are counted by
/// [`Animator::pending_blocks`] until they finish or are replaced.
#[derive(Debug)]
pub struct Animator<K, T> {
    entries: HashMap<K, Entry<T>>,
}

impl<K, T> Default for Animator<K, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, T> Animator<K, T>
where
    K: Copy + Eq + Hash + Ord,
{
    pub fn start(&mut self, key: K, tween: Tween, payload: T) {
        self.insert(key, tween, payload, false);
    }

    /// Starts a tween that holds up turn resolution while it runs.
    pub fn start_blocking(&mut self, key: K, tween: Tween, payload: T) {
        self.insert(key, tween, payload, true);
    }

    fn insert(&mut self, key: K, tween: Tween, payload: T, blocking: bool) {
        self.entries.insert(
            key,
            Entry {
                tween,
                payload,
                blocking,
            },
        );
    }

    /// Advances every tween and returns the ones that finished, ordered by key.
    pub fn update(&mut self, dt_ms: f32) -> Vec<(K, T)> {
        let mut done: Vec<K> = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if entry.tween.update(dt_ms) == TweenState::Finished {
                done.push(*key);
            }
        }
        done.sort();
        let finished: Vec<(K, T)> = done
            .into_iter()
            .filter_map(|k| self.entries.remove(&k).map(|e| (k, e.payload)))
            .collect();
        if !finished.is_empty() {
            log::trace!(
                "{} tweens finished, {} blocking remain",
                finished.len(),
                self.pending_blocks()
            );
        }
        finished
    }

    pub fn pending_blocks(&self) -> usize {
        self.entries.values().filter(|e| e.blocking).count()
    }

    pub fn is_blocking(&self) -> bool {
        self.pending_blocks() > 0
    }

    pub fn get(&self, key: K) -> Option<(&Tween, &T)> {
        self.entries.get(&key).map(|e| (&e.tween, &e.payload))
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &Tween, &T)> {
        self.entries.iter().map(|(k, e)| (*k, &e.tween, &e.payload))
    }

    pub fn cancel(&mut self, key: K) -> Option<T> {
        self.entries.remove(&key).map(|e| e.payload)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for e in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
            assert_eq!(e.apply(2.0), 1.0);
        }
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
        assert!(Easing::EaseInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn tween_finishes_after_duration() {
        let mut t = Tween::new(150.0, Easing::Linear);
        assert_eq!(t.update(100.0), TweenState::Running);
        assert!((t.raw() - 100.0 / 150.0).abs() < 1e-6);
        assert_eq!(t.update(100.0), TweenState::Finished);
        assert_eq!(t.raw(), 1.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut t = Tween::new(0.0, Easing::EaseInOut);
        assert_eq!(t.update(0.0), TweenState::Finished);
        assert_eq!(t.eased(), 1.0);
    }

    #[test]
    fn blocking_counted_until_finished() {
        let mut a: Animator<u32, ()> = Animator::default();
        a.start(1, Tween::new(50.0, Easing::Linear), ());
        a.start_blocking(2, Tween::new(200.0, Easing::Linear), ());
        assert_eq!(a.pending_blocks(), 1);
        let done = a.update(100.0);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].0, 1);
        assert!(a.is_blocking());
        a.update(100.0);
        assert!(!a.is_blocking());
        assert!(a.is_empty());
    }

    #[test]
    fn restarting_a_key_replaces_it() {
        let mut a: Animator<u32, &str> = Animator::default();
        a.start_blocking(7, Tween::new(200.0, Easing::Linear), "throw");
        a.start(7, Tween::new(150.0, Easing::Linear), "step");
        assert_eq!(a.len(), 1);
        assert_eq!(a.pending_blocks(), 0);
        assert_eq!(a.get(7).map(|(_, p)| *p), Some("step"));
    }

    #[test]
    fn finished_are_ordered_by_key() {
        let mut a: Animator<u32, u32> = Animator::default();
        for k in [5, 1, 3] {
            a.start(k, Tween::new(10.0, Easing::Linear), k * 10);
        }
        let done = a.update(10.0);
        assert_eq!(done, vec![(1, 10), (3, 30), (5, 50)]);
    }

    #[test]
    fn cancel_removes_block() {
        let mut a: Animator<u32, ()> = Animator::default();
        a.start_blocking(1, Tween::new(100.0, Easing::Linear), ());
        assert_eq!(a.cancel(1), Some(()));
        assert!(!a.is_blocking());
        assert_eq!(a.cancel(1), None);
    }
}
