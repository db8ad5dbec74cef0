//! Seed history — back/forward navigation over palette seeds.
//!
//! Two stacks around a current seed, like browser history:
//!
//! - Setting a seed (directly or by randomizing) pushes the old one onto
//!   the back stack and discards the forward stack.
//! - [`SeedHistory::go_back`] moves the current seed onto the forward
//!   stack; [`SeedHistory::go_forward`] undoes that.
//!
//! [`NO_SEED`] marks parameters that did not come from a seed (edited by
//! hand). It can be current, but it is never stored on either stack, so
//! navigation only ever lands on real seeds.

use log::trace;
use rand::Rng;

/// Current-seed sentinel: no active seed.
pub const NO_SEED: i64 = -1;

/// Largest seed drawn by [`SeedHistory::randomize`]. Drawn seeds are never
/// negative, so they cannot collide with [`NO_SEED`].
#[allow(clippy::cast_lossless)]
pub const MAX_RANDOM_SEED: i64 = i32::MAX as i64;

/// Undo/redo over seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedHistory {
    back: Vec<i64>,
    forward: Vec<i64>,
    current: i64,
}

impl SeedHistory {
    /// Empty history with no current seed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            back: Vec::new(),
            forward: Vec::new(),
            current: NO_SEED,
        }
    }

    /// The active seed, or [`NO_SEED`].
    #[inline]
    #[must_use]
    pub const fn current(&self) -> i64 {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Adopt `seed`, remembering the previous one and forgetting anything
    /// ahead of it.
    pub fn set_seed(&mut self, seed: i64) {
        if self.current != NO_SEED {
            self.back.push(self.current);
        }
        self.forward.clear();
        self.current = seed;
        trace!("seed history: set {seed} (back {})", self.back.len());
    }

    /// Step to the previous seed. Returns `false` when there is none.
    pub fn go_back(&mut self) -> bool {
        let Some(previous) = self.back.pop() else {
            return false;
        };
        if self.current != NO_SEED {
            self.forward.push(self.current);
        }
        self.current = previous;
        trace!("seed history: back to {previous} (forward {})", self.forward.len());
        true
    }

    /// Step to the next seed. Returns `false` when there is none.
    pub fn go_forward(&mut self) -> bool {
        let Some(next) = self.forward.pop() else {
            return false;
        };
        if self.current != NO_SEED {
            self.back.push(self.current);
        }
        self.current = next;
        trace!("seed history: forward to {next} (back {})", self.back.len());
        true
    }

    /// Draw a fresh seed from the thread-local entropy source and adopt it.
    pub fn randomize(&mut self) -> i64 {
        self.randomize_with(&mut rand::thread_rng())
    }

    /// Draw a fresh seed from `rng` and adopt it.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> i64 {
        let seed = rng.gen_range(0..=MAX_RANDOM_SEED);
        self.set_seed(seed);
        seed
    }
}

impl Default for SeedHistory {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn with_seeds(seeds: &[i64]) -> SeedHistory {
        let mut h = SeedHistory::new();
        for &s in seeds {
            h.set_seed(s);
        }
        h
    }

    // ── Basics ───────────────────────────────────────────────────────────

    #[test]
    fn starts_empty_without_seed() {
        let h = SeedHistory::new();
        assert_eq!(h.current(), NO_SEED);
        assert!(!h.can_go_back());
        assert!(!h.can_go_forward());
    }

    #[test]
    fn first_seed_has_nothing_behind_it() {
        let h = with_seeds(&[10]);
        assert_eq!(h.current(), 10);
        assert!(!h.can_go_back());
    }

    #[test]
    fn empty_navigation_is_a_no_op() {
        let mut h = with_seeds(&[10]);
        assert!(!h.go_back());
        assert!(!h.go_forward());
        assert_eq!(h.current(), 10);
    }

    // ── Round trip ───────────────────────────────────────────────────────

    #[test]
    fn back_and_forward_round_trip() {
        let mut h = with_seeds(&[1, 2]);
        assert!(h.go_back());
        assert_eq!(h.current(), 1);
        assert!(h.can_go_forward());
        assert!(h.go_forward());
        assert_eq!(h.current(), 2);
        assert!(!h.can_go_forward());
        assert!(h.can_go_back());
    }

    #[test]
    fn walks_several_steps() {
        let mut h = with_seeds(&[1, 2, 3, 4]);
        assert!(h.go_back());
        assert!(h.go_back());
        assert!(h.go_back());
        assert_eq!(h.current(), 1);
        assert!(!h.go_back());
        assert!(h.go_forward());
        assert!(h.go_forward());
        assert_eq!(h.current(), 3);
    }

    #[test]
    fn setting_after_back_clears_forward() {
        let mut h = with_seeds(&[1, 2]);
        h.go_back();
        h.set_seed(3);
        assert!(!h.can_go_forward());
        assert!(!h.go_forward());
        assert_eq!(h.current(), 3);
        assert!(h.go_back());
        assert_eq!(h.current(), 1);
    }

    // ── Sentinel ─────────────────────────────────────────────────────────

    #[test]
    fn sentinel_is_never_stored() {
        let mut h = SeedHistory::new();
        h.set_seed(5);
        h.set_seed(NO_SEED);
        assert_eq!(h.current(), NO_SEED);

        // Back from a manual edit lands on the last real seed, and there
        // is nothing to return forward to.
        assert!(h.go_back());
        assert_eq!(h.current(), 5);
        assert!(!h.can_go_forward());
        assert!(!h.can_go_back());
    }

    #[test]
    fn setting_from_sentinel_does_not_push_it() {
        let mut h = SeedHistory::new();
        h.set_seed(7);
        assert!(!h.can_go_back());
    }

    // ── Randomize ────────────────────────────────────────────────────────

    #[test]
    fn randomize_adopts_a_non_negative_seed() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut h = with_seeds(&[1]);
        let seed = h.randomize_with(&mut rng);
        assert_eq!(h.current(), seed);
        assert!((0..=MAX_RANDOM_SEED).contains(&seed));
        assert!(h.go_back());
        assert_eq!(h.current(), 1);
    }

    #[test]
    fn randomize_clears_forward() {
        let mut h = with_seeds(&[1, 2]);
        h.go_back();
        h.randomize_with(&mut StdRng::seed_from_u64(11));
        assert!(!h.can_go_forward());
    }

    #[test]
    fn randomize_from_entropy() {
        let mut h = SeedHistory::new();
        let seed = h.randomize();
        assert!(seed >= 0);
        assert_eq!(h.current(), seed);
    }
}
