pub mod actions;

use serde::Serialize;

use crate::battle::Side;
use crate::grid::{Direction, Position, TerrainKind};
use crate::spells::{SpellId, SpellLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub actor: Side,
    pub direction: Direction,
    pub from: Position,
    pub to: Position,
    pub distance: u32,
    pub narration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackOutcome {
    pub source: Side,
    pub roll: i32,
    pub target_ac: i32,
    pub hit: bool,
    /// Natural 20. Damage is rolled as usual.
    pub critical: bool,
    /// Damage rolled on a hit, before the HP floor.
    pub damage_roll: i32,
    /// HP actually removed from the target.
    pub damage: i32,
    pub target_hp_before: i32,
    pub target_hp_after: i32,
    pub source_hp: i32,
    pub narration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellOutcome {
    pub spell: SpellId,
    pub level: SpellLevel,
    pub target: Side,
    pub roll: i32,
    /// Damage dealt or HP actually restored.
    pub amount: i32,
    pub target_hp_before: i32,
    pub target_hp_after: i32,
    pub slots_remaining: u32,
    pub narration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerrainOutcome {
    pub actor: Side,
    /// `None` when standing on ordinary ground.
    pub terrain: Option<TerrainKind>,
    /// HP actually removed.
    pub damage: i32,
    pub hp_before: i32,
    pub hp_after: i32,
    pub narration: String,
}

/// "Your" for the player, "Goblin's" for anything else.
pub(crate) fn possessive(side: Side, name: &str) -> String {
    match side {
        Side::Player => "Your".to_string(),
        Side::Monster => format!("{}'s", name),
    }
}

/// Pick the verb form agreeing with the subject ("You take", "Goblin takes").
pub(crate) fn verb<'a>(side: Side, second_person: &'a str, third_person: &'a str) -> &'a str {
    match side {
        Side::Player => second_person,
        Side::Monster => third_person,
    }
}
