use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::life::Health;
use crate::spells::Spellbook;
use crate::Dice;

pub const PLAYER_NAME: &str = "You";
pub const PLAYER_EMOJI: &str = "🧙";

/// Inclusive melee damage range; serialized as `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct DamageRange {
    pub lo: i32,
    pub hi: i32,
}

impl DamageRange {
    pub const fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }

    pub fn roll(self, dice: &mut Dice) -> i32 {
        dice.roll(self.lo, self.hi)
    }
}

impl From<[i32; 2]> for DamageRange {
    fn from([lo, hi]: [i32; 2]) -> Self {
        Self { lo, hi }
    }
}

impl From<DamageRange> for [i32; 2] {
    fn from(d: DamageRange) -> Self {
        [d.lo, d.hi]
    }
}

impl fmt::Display for DamageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

/// Class choice at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Fighter,
    Wizard,
}

impl ClassKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassKind::Fighter => "fighter",
            ClassKind::Wizard => "wizard",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fighter" | "1" => Ok(ClassKind::Fighter),
            "wizard" | "2" => Ok(ClassKind::Wizard),
            other => Err(format!("unknown class '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerClass {
    Fighter,
    Wizard(Spellbook),
}

impl PlayerClass {
    pub fn kind(&self) -> ClassKind {
        match self {
            PlayerClass::Fighter => ClassKind::Fighter,
            PlayerClass::Wizard(_) => ClassKind::Wizard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatantKind {
    Player(PlayerClass),
    Monster,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub emoji: String,
    #[serde(flatten)]
    pub health: Health,
    pub ac: i32,
    pub damage: DamageRange,
    pub speed: u32,
    pub position: Position,
    pub kind: CombatantKind,
}

impl Combatant {
    pub fn hp(&self) -> i32 {
        self.health.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.health.max_hp
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_down()
    }

    pub fn class_kind(&self) -> Option<ClassKind> {
        match &self.kind {
            CombatantKind::Player(class) => Some(class.kind()),
            CombatantKind::Monster => None,
        }
    }

    pub fn spellbook(&self) -> Option<&Spellbook> {
        match &self.kind {
            CombatantKind::Player(PlayerClass::Wizard(book)) => Some(book),
            _ => None,
        }
    }

    pub fn spellbook_mut(&mut self) -> Option<&mut Spellbook> {
        match &mut self.kind {
            CombatantKind::Player(PlayerClass::Wizard(book)) => Some(book),
            _ => None,
        }
    }
}

/// Roll up a level 1 player of the given class standing at `start`.
pub fn create_character(class: ClassKind, start: Position, dice: &mut Dice) -> Combatant {
    let (hp, ac, damage, player_class) = match class {
        ClassKind::Fighter => (
            dice.roll(15, 25),
            13,
            DamageRange::new(7, 10),
            PlayerClass::Fighter,
        ),
        ClassKind::Wizard => (
            dice.roll(10, 18),
            11,
            DamageRange::new(4, 7),
            PlayerClass::Wizard(Spellbook::starting_wizard()),
        ),
    };
    Combatant {
        name: PLAYER_NAME.to_string(),
        emoji: PLAYER_EMOJI.to_string(),
        health: Health::new(hp),
        ac,
        damage,
        speed: 2,
        position: start,
        kind: CombatantKind::Player(player_class),
    }
}
