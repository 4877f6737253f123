use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::CombatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpellLevel {
    #[serde(rename = "level_1")]
    One,
    #[serde(rename = "level_2")]
    Two,
}

impl SpellLevel {
    pub fn number(self) -> u8 {
        match self {
            SpellLevel::One => 1,
            SpellLevel::Two => 2,
        }
    }
}

/// Which per-turn resource a spell consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCost {
    Action,
    BonusAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellEffect {
    /// Damage to the opposing combatant, rolled in `lo..=hi`.
    Damage { lo: i32, hi: i32 },
    /// Healing to the caster, rolled in `lo..=hi`.
    Heal { lo: i32, hi: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellId {
    MagicMissile,
    Fireball,
    Heal,
}

impl SpellId {
    pub const ALL: [SpellId; 3] = [SpellId::MagicMissile, SpellId::Fireball, SpellId::Heal];

    pub fn level(self) -> SpellLevel {
        match self {
            SpellId::MagicMissile | SpellId::Heal => SpellLevel::One,
            SpellId::Fireball => SpellLevel::Two,
        }
    }

    pub fn cost(self) -> ActionCost {
        match self {
            SpellId::MagicMissile | SpellId::Fireball => ActionCost::Action,
            SpellId::Heal => ActionCost::BonusAction,
        }
    }

    pub fn effect(self) -> SpellEffect {
        match self {
            SpellId::MagicMissile => SpellEffect::Damage { lo: 6, hi: 10 },
            SpellId::Fireball => SpellEffect::Damage { lo: 12, hi: 24 },
            SpellId::Heal => SpellEffect::Heal { lo: 6, hi: 10 },
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            SpellId::MagicMissile => "magic_missile",
            SpellId::Fireball => "fireball",
            SpellId::Heal => "heal",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SpellId::MagicMissile => "Magic Missile",
            SpellId::Fireball => "Fireball",
            SpellId::Heal => "Heal",
        }
    }
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SpellId {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "magic_missile" => Ok(SpellId::MagicMissile),
            "fireball" => Ok(SpellId::Fireball),
            "heal" => Ok(SpellId::Heal),
            _ => Err(CombatError::SpellUnknown(s.trim().to_string())),
        }
    }
}

/// A wizard's slots and repertoire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spellbook {
    pub spell_slots: IndexMap<SpellLevel, u32>,
    pub max_spell_slots: IndexMap<SpellLevel, u32>,
    pub spells_known: IndexSet<SpellId>,
}

impl Spellbook {
    pub fn new(slots: impl IntoIterator<Item = (SpellLevel, u32)>, known: impl IntoIterator<Item = SpellId>) -> Self {
        let spell_slots: IndexMap<_, _> = slots.into_iter().collect();
        Self {
            max_spell_slots: spell_slots.clone(),
            spell_slots,
            spells_known: known.into_iter().collect(),
        }
    }

    /// Level 1 wizard: three 1st-level and two 2nd-level slots, all three spells.
    pub fn starting_wizard() -> Self {
        Self::new([(SpellLevel::One, 3), (SpellLevel::Two, 2)], SpellId::ALL)
    }

    pub fn knows(&self, spell: SpellId) -> bool {
        self.spells_known.contains(&spell)
    }

    pub fn slots(&self, level: SpellLevel) -> u32 {
        self.spell_slots.get(&level).copied().unwrap_or(0)
    }

    pub fn max_slots(&self, level: SpellLevel) -> u32 {
        self.max_spell_slots.get(&level).copied().unwrap_or(0)
    }

    /// Fails with `NoSlots` when the level is empty.
    pub fn ensure_slot(&self, level: SpellLevel) -> Result<(), CombatError> {
        if self.slots(level) == 0 {
            return Err(CombatError::NoSlots {
                level: level.number(),
            });
        }
        Ok(())
    }

    pub(crate) fn spend_slot(&mut self, level: SpellLevel) {
        if let Some(count) = self.spell_slots.get_mut(&level) {
            *count = count.saturating_sub(1);
        }
    }
}
