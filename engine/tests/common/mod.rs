#![allow(dead_code)]

use skirmish_engine::combatant::create_character;
use skirmish_engine::life::Health;
use skirmish_engine::setup::MonsterSpec;
use skirmish_engine::{Battle, ClassKind, Combatant, DamageRange, Dice, Grid, Position, TerrainKind};

pub fn at(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

/// Fighter with exactly 20 HP.
pub fn fighter(pos: Position) -> Combatant {
    create_character(ClassKind::Fighter, pos, &mut Dice::from_scripted(vec![20]))
}

/// Wizard with exactly 14 HP and a full starting spellbook.
pub fn wizard(pos: Position) -> Combatant {
    create_character(ClassKind::Wizard, pos, &mut Dice::from_scripted(vec![14]))
}

/// Goblin: 30 HP, AC 14, 2-6 damage.
pub fn goblin(pos: Position, speed: i32) -> Combatant {
    MonsterSpec {
        name: "Goblin".into(),
        emoji: "👺".into(),
        hp: 30,
        ac: 14,
        damage: DamageRange::new(2, 6),
        speed,
    }
    .combatant(pos)
}

pub fn open_field(player: Combatant, monster: Combatant) -> Battle {
    Battle::from_parts(Grid::new(5, 5, [], ""), player, monster)
}

pub fn field_with(
    kind: TerrainKind,
    cells: &[(i32, i32)],
    player: Combatant,
    monster: Combatant,
) -> Battle {
    let emoji = match kind {
        TerrainKind::Blocked => "🌳",
        TerrainKind::Damage => "🔥",
    };
    let grid = Grid::new(5, 5, cells.iter().map(|&(r, c)| (at(r, c), kind)), emoji);
    Battle::from_parts(grid, player, monster)
}

pub fn set_hp(c: &mut Combatant, hp: i32) {
    c.health = Health::with_hp(hp, c.max_hp());
}
