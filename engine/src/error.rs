use thiserror::Error;

use crate::grid::Position;

/// Rejections from combat operations. Every variant leaves the battle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("destination {0} is outside the battlefield")]
    OutOfBounds(Position),
    #[error("destination {0} is blocked by terrain")]
    BlockedTerrain(Position),
    #[error("destination {0} is occupied")]
    Occupied(Position),
    #[error("not enough movement left: {remaining} remaining, {needed} needed")]
    InsufficientMovement { needed: u32, remaining: u32 },
    #[error("move of {needed} exceeds speed {speed}")]
    InsufficientSpeed { needed: u32, speed: u32 },
    #[error("target is out of melee range (distance {distance})")]
    OutOfRange { distance: u32 },
    #[error("action already used this turn")]
    ActionAlreadyUsed,
    #[error("bonus action already used this turn")]
    BonusAlreadyUsed,
    #[error("only wizards can cast spells")]
    NotACaster,
    #[error("unknown spell '{0}'")]
    SpellUnknown(String),
    #[error("no level {level} spell slots left")]
    NoSlots { level: u8 },
    #[error("invalid direction '{0}'")]
    InvalidDirection(String),
    #[error("it is not the player's turn")]
    NotPlayerTurn,
    #[error("the battle is already over")]
    BattleOver,
}

impl CombatError {
    /// Stable machine-readable code, e.g. `OUT_OF_RANGE`.
    pub fn code(&self) -> &'static str {
        match self {
            CombatError::OutOfBounds(_) => "OUT_OF_BOUNDS",
            CombatError::BlockedTerrain(_) => "BLOCKED_TERRAIN",
            CombatError::Occupied(_) => "OCCUPIED",
            CombatError::InsufficientMovement { .. } => "INSUFFICIENT_MOVEMENT",
            CombatError::InsufficientSpeed { .. } => "INSUFFICIENT_SPEED",
            CombatError::OutOfRange { .. } => "OUT_OF_RANGE",
            CombatError::ActionAlreadyUsed => "ACTION_ALREADY_USED",
            CombatError::BonusAlreadyUsed => "BONUS_ALREADY_USED",
            CombatError::NotACaster => "NOT_A_CASTER",
            CombatError::SpellUnknown(_) => "SPELL_UNKNOWN",
            CombatError::NoSlots { .. } => "NO_SLOTS",
            CombatError::InvalidDirection(_) => "INVALID_DIRECTION",
            CombatError::NotPlayerTurn => "NOT_PLAYER_TURN",
            CombatError::BattleOver => "BATTLE_OVER",
        }
    }
}

/// Problems with a setup document; the battle never starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("grid sides must be within 1..=50, got {rows}x{cols}")]
    InvalidSize { rows: i32, cols: i32 },
    #[error("{what} position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        what: &'static str,
        pos: Position,
        rows: i32,
        cols: i32,
    },
    #[error("{what} starts on blocked terrain at {pos}")]
    StartOnBlocked { what: &'static str, pos: Position },
    #[error("player and monster share the start position {0}")]
    SharedStart(Position),
    #[error("monster {field} {value} outside {min}..={max}")]
    MonsterStat {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("damage range [{lo}, {hi}] is inverted")]
    InvertedDamage { lo: i32, hi: i32 },
    #[error("monster name is empty")]
    UnnamedMonster,
}
