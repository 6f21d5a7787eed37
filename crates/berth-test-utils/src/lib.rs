//! Lifecycle-tracking fixtures for Berth container tests.
//!
//! Provides [`Tracked`], an element type that counts constructions, clones,
//! and drops through process-wide counters, and [`LifecycleProbe`], the
//! guard that resets and reads those counters. Containers that relocate
//! elements by byte copy must neither clone nor drop them while shifting,
//! and must drop them back-to-front on destruction; these fixtures make
//! both properties assertable.
//!
//! The counters are global, so tests using [`Tracked`] must hold a probe
//! for their whole duration. [`LifecycleProbe::acquire`] serializes such
//! tests across threads.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use berth_core::Relocatable;

static PROBE_LOCK: Mutex<()> = Mutex::new(());
static DROP_LOG: Mutex<Vec<i32>> = Mutex::new(Vec::new());

static CREATED: AtomicUsize = AtomicUsize::new(0);
static CLONED: AtomicUsize = AtomicUsize::new(0);
static DROPPED: AtomicUsize = AtomicUsize::new(0);
static CLONE_BUDGET: AtomicUsize = AtomicUsize::new(usize::MAX);

/// An element whose constructions, clones, and drops are counted.
///
/// Carries only a plain `id`, so it is freely relocatable by byte copy.
/// Create instances inside a test that holds a [`LifecycleProbe`].
#[derive(Debug, PartialEq, Eq)]
pub struct Tracked {
    id: i32,
}

impl Tracked {
    pub fn new(id: i32) -> Self {
        CREATED.fetch_add(1, Ordering::SeqCst);
        Self { id }
    }

    pub fn id(&self) -> i32 {
        self.id
    }
}

impl Clone for Tracked {
    /// Panics once the probe's clone budget is exhausted.
    fn clone(&self) -> Self {
        let budget = CLONE_BUDGET.load(Ordering::SeqCst);
        if budget == 0 {
            panic!("clone budget exhausted for Tracked({})", self.id);
        }
        CLONE_BUDGET.store(budget - 1, Ordering::SeqCst);
        CLONED.fetch_add(1, Ordering::SeqCst);
        CREATED.fetch_add(1, Ordering::SeqCst);
        Self { id: self.id }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPPED.fetch_add(1, Ordering::SeqCst);
        lock(&DROP_LOG).push(self.id);
    }
}

// SAFETY: Tracked is a plain i32 with no address-dependent state; the
// counters it touches live in statics, not in the value.
#[allow(unsafe_code)]
unsafe impl Relocatable for Tracked {}

/// Exclusive access to the [`Tracked`] counters for the duration of a test.
///
/// Acquiring the probe resets all counters, the drop log, and the clone
/// budget. Hold it until the last assertion; instances of `Tracked` created
/// outside a probe scope corrupt another test's numbers.
pub struct LifecycleProbe {
    _guard: MutexGuard<'static, ()>,
}

impl LifecycleProbe {
    /// Take the global probe lock and reset all counters.
    ///
    /// Tolerates poisoning: a panic in a previous holder (expected in the
    /// panic-safety tests) does not wedge the remaining tests.
    pub fn acquire() -> Self {
        let guard = PROBE_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        CREATED.store(0, Ordering::SeqCst);
        CLONED.store(0, Ordering::SeqCst);
        DROPPED.store(0, Ordering::SeqCst);
        CLONE_BUDGET.store(usize::MAX, Ordering::SeqCst);
        lock(&DROP_LOG).clear();
        Self { _guard: guard }
    }

    /// Total constructions, including clones.
    pub fn created(&self) -> usize {
        CREATED.load(Ordering::SeqCst)
    }

    /// Number of clone calls that completed.
    pub fn cloned(&self) -> usize {
        CLONED.load(Ordering::SeqCst)
    }

    /// Number of drops.
    pub fn dropped(&self) -> usize {
        DROPPED.load(Ordering::SeqCst)
    }

    /// Constructions not yet matched by a drop.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }

    /// Ids in the order their owners were dropped.
    pub fn drop_order(&self) -> Vec<i32> {
        lock(&DROP_LOG).clone()
    }

    /// Forget the drops recorded so far, leaving the counters untouched.
    /// Scopes a drop-order assertion to the interesting part of a test.
    pub fn clear_drop_log(&self) {
        lock(&DROP_LOG).clear();
    }

    /// Allow exactly `budget` further clones before `Tracked::clone` panics.
    pub fn set_clone_budget(&self, budget: usize) {
        CLONE_BUDGET.store(budget, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
