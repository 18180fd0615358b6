//! Scroll state store.
//!
//! The single source of truth for scroll-derived state. Commands mutate the
//! state under a short lock, then observers are notified with a snapshot
//! after the lock is released, so an observer may call back into the store.
//! The last state is retained for synchronous reads through
//! [`ScrollStore::snapshot`].
//!
//! `is_scrolling` is driven by [`ScrollStore::update_from_scroll`]: every call
//! forces it on and re-arms a [`QUIET_PERIOD`] timer that clears it again.
//!
//! Every notifying command bumps a version. Each observer remembers the last
//! version it was handed and skips anything older, so a snapshot that loses a
//! race between threads (the quiet-period timer runs on a runtime worker)
//! never overwrites a newer one.

use super::state::{clamp_unit, Direction, ScrollState};
use super::timer::DelayedTask;
use crate::model::SectionId;
use parking_lot::{Mutex, ReentrantMutex};
use std::cell::Cell;
use std::sync::{Arc, LazyLock, Weak};
use std::time::Duration;
use tracing::{debug, trace};

/// Quiet interval after the last scroll input before `is_scrolling` clears.
pub const QUIET_PERIOD: Duration = Duration::from_millis(150);

type Callback = Box<dyn Fn(&ScrollState) + Send + Sync>;

/// A registered observer and the newest version it has been handed.
///
/// The version lock is held across the callback, so deliveries to one
/// observer are serialized. It is reentrant so an observer may issue store
/// commands itself.
struct Observer {
    callback: Callback,
    delivered: ReentrantMutex<Cell<u64>>,
}

impl Observer {
    fn deliver(&self, version: u64, state: &ScrollState) {
        let delivered = self.delivered.lock();
        if version <= delivered.get() {
            trace!(version, delivered = delivered.get(), "Skipping stale snapshot");
            return;
        }
        delivered.set(version);
        (self.callback)(state);
    }
}

struct Inner {
    state: ScrollState,
    /// Starts at 1 so a fresh observer (at 0) accepts the initial state.
    version: u64,
    observers: Vec<(u64, Arc<Observer>)>,
    next_observer_id: u64,
    quiet_timer: DelayedTask,
}

struct Shared {
    inner: Mutex<Inner>,
}

/// Cloneable handle to a scroll state store.
#[derive(Clone)]
pub struct ScrollStore {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for ScrollStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollStore")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl Default for ScrollStore {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_STORE: LazyLock<ScrollStore> = LazyLock::new(ScrollStore::new);

impl ScrollStore {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state: ScrollState::default(),
                    version: 1,
                    observers: Vec::new(),
                    next_observer_id: 0,
                    quiet_timer: DelayedTask::new(),
                }),
            }),
        }
    }

    /// The process-wide store.
    pub fn global() -> &'static ScrollStore {
        &GLOBAL_STORE
    }

    /// Latest state.
    pub fn snapshot(&self) -> ScrollState {
        self.shared.inner.lock().state.clone()
    }

    /// Latest `current_section`, without subscribing.
    pub fn current_section(&self) -> Option<SectionId> {
        self.shared.inner.lock().state.current_section.clone()
    }

    /// Register an observer.
    ///
    /// It is called right away with the current state, then after every
    /// command. The observer stays registered until the returned
    /// [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&ScrollState) + Send + Sync + 'static,
    {
        let observer = Arc::new(Observer {
            callback: Box::new(observer),
            delivered: ReentrantMutex::new(Cell::new(0)),
        });
        let (id, version, state) = {
            let mut inner = self.shared.inner.lock();
            let id = inner.next_observer_id;
            inner.next_observer_id += 1;
            inner.observers.push((id, Arc::clone(&observer)));
            (id, inner.version, inner.state.clone())
        };
        observer.deliver(version, &state);
        Subscription {
            store: Arc::downgrade(&self.shared),
            id: Some(id),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.shared.inner.lock().observers.len()
    }

    /// Apply `change` and notify observers.
    fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut Inner),
    {
        self.update_if(|inner| {
            change(inner);
            true
        });
    }

    /// Apply `change`; notify observers only if it reports a change.
    fn update_if<F>(&self, change: F) -> bool
    where
        F: FnOnce(&mut Inner) -> bool,
    {
        let (version, state, observers) = {
            let mut inner = self.shared.inner.lock();
            if !change(&mut inner) {
                return false;
            }
            inner.version += 1;
            let observers: Vec<Arc<Observer>> =
                inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
            (inner.version, inner.state.clone(), observers)
        };
        for observer in observers {
            observer.deliver(version, &state);
        }
        true
    }

    /// Set the current section directly.
    ///
    /// The old current section always moves into `previous_section`, even when
    /// `section` is the same id.
    pub fn set_section(&self, section: Option<SectionId>) {
        self.update(|inner| {
            let state = &mut inner.state;
            state.previous_section = std::mem::replace(&mut state.current_section, section);
        });
    }

    pub fn set_progress(&self, progress: f64) {
        self.update(|inner| inner.state.progress = clamp_unit(progress));
    }

    pub fn set_global_progress(&self, progress: f64) {
        self.update(|inner| inner.state.global_progress = clamp_unit(progress));
    }

    pub fn set_scrolling(&self, is_scrolling: bool) {
        self.update(|inner| inner.state.is_scrolling = is_scrolling);
    }

    pub fn set_direction(&self, direction: Option<Direction>) {
        self.update(|inner| inner.state.direction = direction);
    }

    pub fn set_reduced_motion(&self, reduced_motion: bool) {
        self.update(|inner| inner.state.reduced_motion = reduced_motion);
    }

    /// Record a scroll observation.
    ///
    /// `previous_section` only moves on an actual section change. Progress
    /// values are clamped. `is_scrolling` turns on and clears again after
    /// [`QUIET_PERIOD`] without another call.
    pub fn update_from_scroll(
        &self,
        section: Option<SectionId>,
        progress: f64,
        global_progress: f64,
        direction: Option<Direction>,
    ) {
        let weak = Arc::downgrade(&self.shared);
        self.update(move |inner| {
            let state = &mut inner.state;
            if section != state.current_section {
                debug!(
                    from = ?state.current_section,
                    to = ?section,
                    "Section changed"
                );
                state.previous_section = std::mem::replace(&mut state.current_section, section);
            }
            state.progress = clamp_unit(progress);
            state.global_progress = clamp_unit(global_progress);
            state.direction = direction;
            state.is_scrolling = true;

            inner.quiet_timer.arm(QUIET_PERIOD, move |generation| {
                if let Some(shared) = weak.upgrade() {
                    ScrollStore { shared }.finish_quiet_period(generation);
                }
            });
        });
    }

    fn finish_quiet_period(&self, generation: u64) {
        let settled = self.update_if(|inner| {
            if !inner.quiet_timer.is_current(generation) {
                return false;
            }
            inner.quiet_timer.settle(generation);
            inner.state.is_scrolling = false;
            true
        });
        if settled {
            trace!("Scrolling settled");
        }
    }

    /// Restore the initial state and cancel the pending quiet-period timer.
    pub fn reset(&self) {
        self.update(|inner| {
            inner.quiet_timer.cancel();
            inner.state = ScrollState::default();
        });
    }

    /// Whether a quiet-period timer is pending.
    pub fn is_settling(&self) -> bool {
        self.shared.inner.lock().quiet_timer.is_armed()
    }
}

/// Observer registration. Unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    store: Weak<Shared>,
    id: Option<u64>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(shared) = self.store.upgrade() {
            shared.inner.lock().observers.retain(|(oid, _)| *oid != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
