//! Replay-safe randomness.
//!
//! All of a battle's randomness flows through two 64-bit words embedded
//! in `BattleState`. Every draw advances the words in place, so two peers
//! holding the same state snapshot and feeding in the same actions compute
//! byte-identical turns. Speculative evaluation (the heuristic opponent,
//! trial replays) copies the seed instead of borrowing it, leaving the
//! authoritative stream untouched.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// xorshift128+ state. Small, fast, and trivially cloneable, which is what
/// matters here; this is game randomness, not cryptography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRng {
    s0: u64,
    s1: u64,
}

impl BattleRng {
    /// Build from explicit words, for replays and tests. Zero state would
    /// lock xorshift into a fixed point, so it is nudged.
    pub fn from_seed(s0: u64, s1: u64) -> Self {
        if s0 == 0 && s1 == 0 {
            BattleRng {
                s0: 0x9e3779b97f4a7c15,
                s1: 0x6a09e667f3bcc909,
            }
        } else {
            BattleRng { s0, s1 }
        }
    }

    /// Seed a fresh battle from OS entropy.
    pub fn from_entropy() -> Self {
        let mut rng = rand::rng();
        Self::from_seed(rng.random::<u64>(), rng.random::<u64>())
    }

    /// Advance the state one step and return the draw. This is the only
    /// place the words mutate.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.s0;
        let y = self.s1;
        self.s0 = y;
        x ^= x << 23;
        self.s1 = x ^ y ^ (x >> 17) ^ (y >> 26);
        self.s1.wrapping_add(y)
    }

    /// Uniform draw in `[lo, hi]` inclusive.
    pub fn range(&mut self, lo: u64, hi: u64) -> u64 {
        if lo >= hi {
            return lo;
        }
        lo + self.next_u64() % (hi - lo + 1)
    }

    /// A 1-100 roll, the unit most mechanics are expressed in.
    pub fn percent(&mut self) -> u8 {
        self.range(1, 100) as u8
    }

    /// True with the given percent probability.
    pub fn chance(&mut self, percent: u8) -> bool {
        if percent == 0 {
            return false;
        }
        self.percent() <= percent
    }
}
