use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod battle;
pub mod combat;
pub mod combatant;
pub mod content;
pub mod error;
pub mod grid;
pub mod life;
pub mod policy;
pub mod render;
pub mod setup;
pub mod spells;
pub mod turn;

pub use battle::{AvailableActions, Battle, CombatStatus, RoundReport, Side};
pub use combat::{AttackOutcome, MoveOutcome, SpellOutcome, TerrainOutcome};
pub use combatant::{ClassKind, Combatant, CombatantKind, DamageRange, PlayerClass};
pub use error::{CombatError, SetupError};
pub use grid::{Direction, Grid, Position, TerrainKind};
pub use spells::{ActionCost, SpellId, SpellLevel, Spellbook};
pub use turn::{TurnOwner, TurnTracker};

/// Fallback seed used once a scripted sequence runs dry.
const SCRIPT_FALLBACK_SEED: u64 = 0;

/// The single source of randomness for a battle.
///
/// Seeded dice draw from ChaCha8; scripted dice replay a fixed list of rolls
/// first (each clamped into the requested range) so tests can force outcomes.
pub struct Dice {
    rng: ChaCha8Rng,
    script: VecDeque<i32>,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            script: VecDeque::new(),
        }
    }

    pub fn from_scripted(rolls: Vec<i32>) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(SCRIPT_FALLBACK_SEED),
            script: rolls.into(),
        }
    }

    /// Uniform integer in `lo..=hi` (bounds may be given in either order).
    pub fn roll(&mut self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        match self.script.pop_front() {
            Some(forced) => forced.clamp(lo, hi),
            None => self.rng.gen_range(lo..=hi),
        }
    }

    pub fn d20(&mut self) -> i32 {
        self.roll(1, 20)
    }

    pub fn d4(&mut self) -> i32 {
        self.roll(1, 4)
    }

    /// Scripted rolls not yet consumed.
    pub fn scripted_remaining(&self) -> usize {
        self.script.len()
    }
}

/// Manhattan distance between two positions.
pub fn distance(a: Position, b: Position) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}
