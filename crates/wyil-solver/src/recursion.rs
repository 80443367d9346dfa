//! Recursion guard for cycle detection and optional depth/iteration limits.
//!
//! The selector engine keeps one guard per top-level query. Each pair of
//! types being compared is entered before its comparison starts and left when
//! it finishes, so the visiting set always holds exactly the pairs on the
//! current recursion path. Meeting a pair that is already visiting is the
//! coinductive cycle case.
//!
//! # Profiles
//!
//! [`RecursionProfile`] names the limit presets so call sites do not carry
//! magic numbers:
//!
//! ```ignore
//! let guard = RecursionGuard::<TypePair>::with_profile(RecursionProfile::BoundedSelector);
//! ```
//!
//! # Safety
//!
//! - **Debug leak detection**: in debug builds, dropping a guard with active
//!   entries panics, catching a forgotten `leave()`.
//! - **Debug double-leave detection**: leaving a key that is not visiting
//!   panics in debug builds.
//! - **Overflow protection**: iteration counting saturates.

use rustc_hash::FxHashSet;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named recursion limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Selector construction with no limits: only cycles stop the recursion.
    ///
    /// This is the default for `selector()`; termination on recursive types
    /// comes from cycle detection alone.
    SelectorConstruction,

    /// Selector construction for callers that want a hard bound, e.g. over
    /// untrusted or machine-generated type graphs with deeply nested unions.
    ///
    /// depth = 100, iterations = 100,000
    BoundedSelector,

    /// Custom limits for one-off or test scenarios.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::SelectorConstruction => u32::MAX,
            Self::BoundedSelector => 100,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::SelectorConstruction => u32::MAX,
            Self::BoundedSelector => 100_000,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Result of attempting to enter a recursive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Proceed with the computation.
    Entered,
    /// This key is already being visited.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

impl RecursionResult {
    #[inline]
    pub fn is_entered(self) -> bool {
        matches!(self, Self::Entered)
    }

    #[inline]
    pub fn is_cycle(self) -> bool {
        matches!(self, Self::Cycle)
    }

    #[inline]
    pub fn is_exceeded(self) -> bool {
        matches!(self, Self::DepthExceeded | Self::IterationExceeded)
    }
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Tracks the keys on the current recursion path plus depth and work counters.
///
/// ```ignore
/// match guard.enter(key) {
///     RecursionResult::Entered => {
///         let result = do_work();
///         guard.leave(key);
///         result
///     }
///     RecursionResult::Cycle => assume_success(),
///     RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => give_up(),
/// }
/// ```
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
    exceeded: bool,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    /// Create a guard with explicit limits.
    ///
    /// Prefer [`with_profile`](Self::with_profile).
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
            exceeded: false,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Try to enter the computation for `key`.
    ///
    /// On [`RecursionResult::Entered`] the caller **must** call
    /// [`leave`](Self::leave) with the same key when done.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            self.exceeded = true;
            return RecursionResult::IterationExceeded;
        }
        if self.visiting.contains(&key) {
            return RecursionResult::Cycle;
        }
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return RecursionResult::DepthExceeded;
        }

        self.visiting.insert(key);
        self.depth += 1;
        RecursionResult::Entered
    }

    /// Leave the computation for `key`.
    ///
    /// # Debug panics
    ///
    /// Panics in debug builds if `key` is not visiting.
    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);

        debug_assert!(
            was_present,
            "RecursionGuard::leave() called with a key that is not in the visiting set. \
             This indicates a double-leave or a leave without a matching enter()."
        );

        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn is_visiting(&self, key: &K) -> bool {
        self.visiting.contains(key)
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total enter attempts so far, successful or not.
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[inline]
    pub fn visiting_count(&self) -> usize {
        self.visiting.len()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.depth > 0
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Whether a limit was hit at any point. Sticky until [`reset`](Self::reset).
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    /// Reset all state while keeping the configured limits.
    pub fn reset(&mut self) {
        self.visiting.clear();
        self.depth = 0;
        self.iterations = 0;
        self.exceeded = false;
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.visiting.is_empty() {
            panic!(
                "RecursionGuard dropped with {} active entries still in the visiting set. \
                 This indicates leaked enter() calls without matching leave() calls.",
                self.visiting.len(),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
