use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::{PositionView, TrackedPosition};

/// Outcome of a per-token transition, telling the store what to do with the slot.
#[derive(Debug)]
pub enum Step<R> {
    /// Leave the slot as it is (any in-place mutation is kept).
    Keep(R),
    /// Start tracking with the given position. Ignored if one already exists.
    Open(TrackedPosition, R),
    /// Stop tracking the token.
    Close(R),
}

/// In-memory map of token address → tracked position.
///
/// Cheap to clone; all clones share the same map. Lives for the process lifetime.
#[derive(Clone, Default)]
pub struct PositionStore {
    positions: Arc<DashMap<String, TrackedPosition>>,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, token: &str) -> bool {
        self.positions.contains_key(token)
    }

    pub fn get(&self, token: &str) -> Option<TrackedPosition> {
        self.positions.get(token).map(|p| p.value().clone())
    }

    /// Insert a position if the token is not yet tracked. Returns `false` if it was.
    pub fn insert(&self, token: &str, position: TrackedPosition) -> bool {
        match self.positions.entry(token.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(v) => {
                v.insert(position);
                true
            }
        }
    }

    /// Mutate a tracked position in place. Returns `false` if the token is not tracked.
    pub fn update<F>(&self, token: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut TrackedPosition),
    {
        match self.positions.get_mut(token) {
            Some(mut p) => {
                mutate(p.value_mut());
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, token: &str) -> Option<TrackedPosition> {
        self.positions.remove(token).map(|(_, p)| p)
    }

    /// Run a read-compute-mutate sequence for one token atomically.
    ///
    /// The closure runs while the token's shard is write-locked, so concurrent
    /// transitions for the same token are serialized. It must not block and
    /// must not call back into the store.
    pub fn transition<R, F>(&self, token: &str, f: F) -> R
    where
        F: FnOnce(Option<&mut TrackedPosition>) -> Step<R>,
    {
        match self.positions.entry(token.to_string()) {
            Entry::Vacant(slot) => match f(None) {
                Step::Open(position, out) => {
                    slot.insert(position);
                    out
                }
                Step::Keep(out) | Step::Close(out) => out,
            },
            Entry::Occupied(mut slot) => match f(Some(slot.get_mut())) {
                Step::Close(out) => {
                    slot.remove();
                    out
                }
                Step::Keep(out) => out,
                Step::Open(_, out) => {
                    tracing::warn!(token = %token, "Open requested for already tracked token, ignoring");
                    out
                }
            },
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Copy of every tracked position, oldest first.
    pub fn list(&self) -> Vec<PositionView> {
        let mut views: Vec<PositionView> = self
            .positions
            .iter()
            .map(|entry| PositionView {
                token: entry.key().clone(),
                position: entry.value().clone(),
            })
            .collect();
        views.sort_by(|a, b| a.position.opened_at.cmp(&b.position.opened_at));
        views
    }
}
