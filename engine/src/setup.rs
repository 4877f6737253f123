//! Battle setup documents produced by the scenario collaborator.
//!
//! The engine only consumes these; it never generates them. Terrain is always
//! an explicit list of cells sharing one kind.

use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, CombatantKind, DamageRange};
use crate::error::SetupError;
use crate::grid::{Grid, Position, TerrainKind};
use crate::life::Health;

/// Largest grid side accepted from a setup document.
pub const MAX_GRID_SIDE: i32 = 50;

pub const MONSTER_HP: (i32, i32) = (15, 50);
pub const MONSTER_AC: (i32, i32) = (1, 20);
pub const MONSTER_DAMAGE: (i32, i32) = (1, 15);
pub const MONSTER_SPEED: (i32, i32) = (1, 5);

const DEFAULT_MONSTER_EMOJI: &str = "👾";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BattlegroundSpec {
    /// `[rows, cols]`
    pub size: [i32; 2],
    #[serde(default)]
    pub terrain_cells: Vec<Position>,
    pub terrain_kind: TerrainKind,
    #[serde(default)]
    pub terrain_emoji: String,
    pub user_start: Position,
    pub monster_start: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonsterSpec {
    pub name: String,
    #[serde(default = "default_monster_emoji")]
    pub emoji: String,
    pub hp: i32,
    pub ac: i32,
    pub damage: DamageRange,
    pub speed: i32,
}

fn default_monster_emoji() -> String {
    DEFAULT_MONSTER_EMOJI.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BattleSetup {
    #[serde(default)]
    pub theme: Option<String>,
    pub battleground: BattlegroundSpec,
    pub monster: MonsterSpec,
}

impl BattlegroundSpec {
    pub fn rows(&self) -> i32 {
        self.size[0]
    }

    pub fn cols(&self) -> i32 {
        self.size[1]
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let (rows, cols) = (self.rows(), self.cols());
        if !(1..=MAX_GRID_SIDE).contains(&rows) || !(1..=MAX_GRID_SIDE).contains(&cols) {
            return Err(SetupError::InvalidSize { rows, cols });
        }
        let in_bounds = |p: Position| (0..rows).contains(&p.row) && (0..cols).contains(&p.col);
        let out = |what, pos| SetupError::OutOfBounds { what, pos, rows, cols };

        if let Some(&pos) = self.terrain_cells.iter().find(|&&p| !in_bounds(p)) {
            return Err(out("terrain cell", pos));
        }
        for (what, pos) in [("player", self.user_start), ("monster", self.monster_start)] {
            if !in_bounds(pos) {
                return Err(out(what, pos));
            }
            if self.terrain_kind == TerrainKind::Blocked && self.terrain_cells.contains(&pos) {
                return Err(SetupError::StartOnBlocked { what, pos });
            }
        }
        if self.user_start == self.monster_start {
            return Err(SetupError::SharedStart(self.user_start));
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(
            self.rows(),
            self.cols(),
            self.terrain_cells.iter().map(|&p| (p, self.terrain_kind)),
            self.terrain_emoji.clone(),
        )
    }
}

impl MonsterSpec {
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.name.trim().is_empty() {
            return Err(SetupError::UnnamedMonster);
        }
        check_stat("hp", self.hp, MONSTER_HP)?;
        check_stat("ac", self.ac, MONSTER_AC)?;
        check_stat("speed", self.speed, MONSTER_SPEED)?;
        let DamageRange { lo, hi } = self.damage;
        if lo > hi {
            return Err(SetupError::InvertedDamage { lo, hi });
        }
        check_stat("damage minimum", lo, MONSTER_DAMAGE)?;
        check_stat("damage maximum", hi, MONSTER_DAMAGE)?;
        Ok(())
    }

    /// Caller must have validated the spec.
    pub fn combatant(&self, start: Position) -> Combatant {
        Combatant {
            name: self.name.clone(),
            emoji: self.emoji.clone(),
            health: Health::new(self.hp),
            ac: self.ac,
            damage: self.damage,
            speed: self.speed.max(1) as u32,
            position: start,
            kind: CombatantKind::Monster,
        }
    }
}

impl BattleSetup {
    pub fn validate(&self) -> Result<(), SetupError> {
        self.battleground.validate()?;
        self.monster.validate()
    }
}

fn check_stat(field: &'static str, value: i32, (min, max): (i32, i32)) -> Result<(), SetupError> {
    if !(min..=max).contains(&value) {
        return Err(SetupError::MonsterStat {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
