//! Text views over a battle. Read-only: everything here borrows `&Battle`.

use std::fmt::Write as _;

use crate::battle::Battle;
use crate::combatant::Combatant;
use crate::spells::SpellLevel;

const GROUND: &str = " .";
const RULE_WIDTH: usize = 60;

/// The battlefield with column/row indices. The player glyph is drawn over
/// the monster, and the monster over terrain.
pub fn grid(battle: &Battle) -> String {
    let g = &battle.grid;
    let cols = g.cols.max(0) as usize;
    let mut cells = vec![vec![GROUND.to_string(); cols]; g.rows.max(0) as usize];
    let mut paint = |pos: crate::grid::Position, glyph: &str| {
        if g.in_bounds(pos) {
            cells[pos.row as usize][pos.col as usize] = glyph.to_string();
        }
    };
    for cell in g.terrain_cells() {
        paint(cell.position, &g.terrain_emoji);
    }
    paint(battle.monster.position, &battle.monster.emoji);
    paint(battle.player.position, &battle.player.emoji);

    let mut out = String::new();
    let header: String = (0..cols).map(|c| format!("{:>2}", c)).collect();
    let _ = writeln!(out, "   {}", header);
    let border = format!("  +{}+", "--".repeat(cols));
    let _ = writeln!(out, "{}", border);
    for (r, row) in cells.iter().enumerate() {
        let _ = writeln!(out, "{:>2}|{}|", r, row.concat());
    }
    out.push_str(&border);
    out
}

/// HP, AC, positions, slots and terrain in one panel.
pub fn status_panel(battle: &Battle) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "COMBAT STATUS");
    let _ = writeln!(out, "{}", rule);

    let player = &battle.player;
    let class = player
        .class_kind()
        .map(|c| c.as_str().to_uppercase())
        .unwrap_or_default();
    let _ = writeln!(out, "{} YOU ({})", player.emoji, class);
    let _ = writeln!(out, "   {}", vitals(player));
    if let Some(book) = player.spellbook() {
        let slots: Vec<String> = [SpellLevel::One, SpellLevel::Two]
            .into_iter()
            .map(|lvl| format!("Lv{}: {}/{}", lvl.number(), book.slots(lvl), book.max_slots(lvl)))
            .collect();
        let _ = writeln!(out, "   Spell Slots: {}", slots.join(" | "));
    }
    out.push('\n');

    let monster = &battle.monster;
    let _ = writeln!(out, "{} {}", monster.emoji, monster.name.to_uppercase());
    let _ = writeln!(out, "   {}", vitals(monster));
    out.push('\n');

    let terrain = match battle.grid.dominant_kind() {
        Some(kind) => format!("{} {}", battle.grid.terrain_emoji, kind.as_str()),
        None => "none".to_string(),
    };
    let _ = writeln!(
        out,
        "Distance: {} squares | Terrain: {}",
        battle.distance(),
        terrain
    );
    out.push_str(&rule);
    out
}

/// What is left of the player's action economy this turn.
pub fn turn_panel(battle: &Battle) -> String {
    let t = &battle.tracker;
    let flag = |used: bool| if used { "used" } else { "available" };
    format!(
        "Movement: {}/{} remaining | Action: {} | Bonus action: {}",
        t.remaining_movement(battle.player.speed),
        battle.player.speed,
        flag(t.action_used),
        flag(t.bonus_action_used)
    )
}

fn vitals(c: &Combatant) -> String {
    format!(
        "HP: {}/{} | AC: {} | Position: {}",
        c.hp(),
        c.max_hp(),
        c.ac,
        c.position
    )
}
