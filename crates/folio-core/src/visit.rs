#![forbid(unsafe_code)]

//! First-visit gating and the loading sequence state machine.
//!
//! The gate decides once per profile whether the loading sequence is shown:
//! a present visit flag skips it entirely; an absent flag (or an unreadable
//! store — fail open) runs it. Completion writes the flag so the sequence is
//! never re-shown for the lifetime of the profile.
//!
//! The sequence itself is a four-phase machine:
//!
//! ```text
//! NotStarted ──init, flag absent──▶ Running ──value hits 100──▶ Completing
//!      │                                                            │
//!      └──────init, flag present──▶ Done ◀──hold delay elapses──────┘
//! ```
//!
//! `Done` is terminal for the session.

use std::time::Duration;

use crate::progress::ProgressWalk;
use crate::store::{self, ProfileStore, keys};

/// Value stored under [`keys::VISITED`].
pub const VISIT_FLAG: &str = "true";

/// Hold time between the bar filling and the sequence finishing.
pub const COMPLETING_HOLD: Duration = Duration::from_millis(500);

/// Phases of the loading sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Sequence has not begun.
    NotStarted,
    /// Progress walk is advancing.
    Running,
    /// Bar is full; holding before dismissal.
    Completing,
    /// Sequence finished or skipped; terminal.
    Done,
}

/// Read the visit flag, failing open: storage errors read as "not visited".
#[must_use]
pub fn has_visited(store: &dyn ProfileStore) -> bool {
    store::get_or_absent(store, keys::VISITED).is_some()
}

/// Record a completed first visit. Best-effort; a write failure only means
/// the sequence shows again next launch.
pub fn record_visit(store: &dyn ProfileStore) {
    if let Err(e) = store.set(keys::VISITED, VISIT_FLAG) {
        tracing::warn!(error = %e, "could not persist visit flag");
    }
}

/// The loading sequence: gate decision, progress walk, and completion hold.
#[derive(Debug, Clone)]
pub struct LoadSequence {
    phase: LoadPhase,
    walk: ProgressWalk,
    held: Duration,
}

impl LoadSequence {
    /// Gate on the profile store: skip straight to `Done` for a returning
    /// visitor, otherwise start the walk.
    #[must_use]
    pub fn gated(store: &dyn ProfileStore, seed: u64) -> Self {
        if has_visited(store) {
            tracing::debug!("visit flag present, skipping loading sequence");
            Self::skipped()
        } else {
            Self::begin(seed)
        }
    }

    /// Start a fresh sequence in `Running`.
    #[must_use]
    pub fn begin(seed: u64) -> Self {
        Self {
            phase: LoadPhase::Running,
            walk: ProgressWalk::new(seed),
            held: Duration::ZERO,
        }
    }

    /// A sequence that was never shown (returning visitor).
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            phase: LoadPhase::Done,
            walk: ProgressWalk::new(0),
            held: Duration::ZERO,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Whether the loading view should be on screen.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, LoadPhase::Running | LoadPhase::Completing)
    }

    /// Current progress value in `[0, 100]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.walk.value()
    }

    /// Advance on one timer tick of `dt`.
    ///
    /// Returns `true` exactly once, on the tick that crosses into `Done`;
    /// the caller records the visit at that moment.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.phase {
            LoadPhase::NotStarted | LoadPhase::Done => false,
            LoadPhase::Running => {
                self.walk.step();
                if self.walk.is_full() {
                    self.phase = LoadPhase::Completing;
                    self.held = Duration::ZERO;
                }
                false
            }
            LoadPhase::Completing => {
                self.held = self.held.saturating_add(dt);
                if self.held >= COMPLETING_HOLD {
                    self.phase = LoadPhase::Done;
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::TICK_INTERVAL;
    use crate::store::MemoryStore;

    fn run_to_done(seq: &mut LoadSequence) -> u32 {
        let mut completions = 0;
        for _ in 0..10_000 {
            if seq.tick(TICK_INTERVAL) {
                completions += 1;
            }
            if seq.phase() == LoadPhase::Done {
                break;
            }
        }
        completions
    }

    #[test]
    fn first_visit_runs_sequence() {
        let store = MemoryStore::new();
        let seq = LoadSequence::gated(&store, 1);
        assert_eq!(seq.phase(), LoadPhase::Running);
        assert!(seq.is_active());
    }

    #[test]
    fn returning_visit_skips_sequence() {
        let store = MemoryStore::new();
        record_visit(&store);
        let seq = LoadSequence::gated(&store, 1);
        assert_eq!(seq.phase(), LoadPhase::Done);
        assert!(!seq.is_active());
    }

    #[test]
    fn gating_is_idempotent_across_sessions() {
        let store = MemoryStore::new();

        let mut first = LoadSequence::gated(&store, 9);
        assert_eq!(first.phase(), LoadPhase::Running);
        if run_to_done(&mut first) > 0 {
            record_visit(&store);
        }

        // Every later "launch" against the same profile jumps straight to Done.
        for seed in 0..5 {
            let seq = LoadSequence::gated(&store, seed);
            assert_eq!(seq.phase(), LoadPhase::Done);
        }
    }

    #[test]
    fn completes_exactly_once() {
        let mut seq = LoadSequence::begin(3);
        assert_eq!(run_to_done(&mut seq), 1);
        // Ticking a done sequence never signals again.
        for _ in 0..10 {
            assert!(!seq.tick(TICK_INTERVAL));
        }
    }

    #[test]
    fn running_transitions_to_completing_at_full() {
        let mut seq = LoadSequence::begin(5);
        while seq.phase() == LoadPhase::Running {
            seq.tick(TICK_INTERVAL);
        }
        assert_eq!(seq.phase(), LoadPhase::Completing);
        assert_eq!(seq.progress(), 100.0);
    }

    #[test]
    fn completing_holds_for_the_delay() {
        let mut seq = LoadSequence::begin(5);
        while seq.phase() == LoadPhase::Running {
            seq.tick(TICK_INTERVAL);
        }
        // 150ms ticks: two are under the 500ms hold, the fourth crosses it.
        assert!(!seq.tick(Duration::from_millis(150)));
        assert!(!seq.tick(Duration::from_millis(150)));
        assert!(!seq.tick(Duration::from_millis(150)));
        assert!(seq.tick(Duration::from_millis(150)));
        assert_eq!(seq.phase(), LoadPhase::Done);
    }

    #[test]
    fn fail_open_when_store_errors() {
        struct DeniedStore;
        impl ProfileStore for DeniedStore {
            fn name(&self) -> &str {
                "DeniedStore"
            }
            fn get(&self, _: &str) -> crate::store::StoreResult<Option<String>> {
                Err(crate::store::StoreError::Poisoned)
            }
            fn set(&self, _: &str, _: &str) -> crate::store::StoreResult<()> {
                Err(crate::store::StoreError::Poisoned)
            }
            fn remove(&self, _: &str) -> crate::store::StoreResult<()> {
                Err(crate::store::StoreError::Poisoned)
            }
            fn clear(&self) -> crate::store::StoreResult<()> {
                Err(crate::store::StoreError::Poisoned)
            }
        }

        // Unavailable storage behaves like a first visit, every time.
        let seq = LoadSequence::gated(&DeniedStore, 1);
        assert_eq!(seq.phase(), LoadPhase::Running);

        // And recording against it must not panic.
        record_visit(&DeniedStore);
    }
}
