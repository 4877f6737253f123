mod common;

use common::*;
use skirmish_engine::{render, Battle, Direction, Grid, Side, TerrainKind};

fn small_field(player: skirmish_engine::Combatant) -> Battle {
    let grid = Grid::new(2, 3, [(at(0, 1), TerrainKind::Blocked)], "🌳");
    Battle::from_parts(grid, player, goblin(at(1, 2), 2))
}

#[test]
fn grid_draws_terrain_and_combatants() {
    let b = small_field(fighter(at(0, 0)));
    let expected = [
        "    0 1 2",
        "  +------+",
        " 0|🧙🌳 .|",
        " 1| . .👺|",
        "  +------+",
    ]
    .join("\n");
    assert_eq!(render::grid(&b), expected);
}

#[test]
fn status_panel_lists_both_sides() {
    let b = small_field(fighter(at(0, 0)));
    let rule = "-".repeat(60);
    let expected = [
        rule.as_str(),
        "COMBAT STATUS",
        rule.as_str(),
        "🧙 YOU (FIGHTER)",
        "   HP: 20/20 | AC: 13 | Position: [0, 0]",
        "",
        "👺 GOBLIN",
        "   HP: 30/30 | AC: 14 | Position: [1, 2]",
        "",
        "Distance: 3 squares | Terrain: 🌳 BLOCKED",
        rule.as_str(),
    ]
    .join("\n");
    assert_eq!(render::status_panel(&b), expected);
}

#[test]
fn wizard_panel_shows_slots() {
    let b = small_field(wizard(at(1, 0)));
    let panel = render::status_panel(&b);
    assert!(panel.contains("🧙 YOU (WIZARD)"));
    assert!(panel.contains("   Spell Slots: Lv1: 3/3 | Lv2: 2/2"));
}

#[test]
fn turn_panel_after_a_step() {
    let mut b = open_field(fighter(at(0, 0)), goblin(at(4, 4), 2));
    b.move_actor(Side::Player, Direction::South).unwrap();
    insta::assert_snapshot!(
        render::turn_panel(&b),
        @"Movement: 1/2 remaining | Action: available | Bonus action: available"
    );
}
