//! The monster's decision rule: close the gap greedily, then swing if adjacent.

use serde::Serialize;
use tracing::debug;

use crate::battle::{Battle, Side, MELEE_RANGE};
use crate::combat::{AttackOutcome, MoveOutcome};
use crate::grid::Direction;
use crate::{distance, Dice};

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonsterTurn {
    pub movement: Option<MoveOutcome>,
    pub attack: Option<AttackOutcome>,
    pub narration: Vec<String>,
}

/// The single step that brings `side` strictly closer to its opponent, if any.
///
/// Candidates are scanned in `Direction::ALL` order and only a strictly
/// better distance replaces the current pick, so ties favour the row axis.
pub fn greedy_step(battle: &Battle, side: Side) -> Option<Direction> {
    let from = battle.combatant(side).position;
    let goal = battle.combatant(side.opponent()).position;
    let mut best = None;
    let mut best_distance = distance(from, goal);
    for dir in battle.legal_moves(side) {
        let after = distance(from.offset(dir.delta()), goal);
        if after < best_distance {
            best_distance = after;
            best = Some(dir);
        }
    }
    best
}

/// Run the monster's whole turn: at most one move, then at most one attack.
pub fn take_monster_turn(battle: &mut Battle, dice: &mut Dice) -> MonsterTurn {
    let mut turn = MonsterTurn::default();
    if battle.monster.is_defeated() || battle.player.is_defeated() {
        return turn;
    }

    if battle.distance() > MELEE_RANGE {
        match greedy_step(battle, Side::Monster) {
            Some(dir) => match battle.move_actor(Side::Monster, dir) {
                Ok(step) => {
                    turn.narration.push(step.narration.clone());
                    turn.movement = Some(step);
                }
                Err(e) => debug!(error = %e, "monster step failed"),
            },
            None => turn
                .narration
                .push(format!("{} holds its ground", battle.monster.name)),
        }
    }

    if battle.distance() <= MELEE_RANGE {
        match battle.attack(Side::Monster, dice) {
            Ok(hit) => {
                turn.narration.push(hit.narration.clone());
                turn.attack = Some(hit);
            }
            Err(e) => debug!(error = %e, "monster attack failed"),
        }
    }
    turn
}
