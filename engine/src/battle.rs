use serde::Serialize;
use tracing::info;

use crate::combat::TerrainOutcome;
use crate::combatant::{create_character, ClassKind, Combatant};
use crate::error::{CombatError, SetupError};
use crate::grid::{Direction, Grid};
use crate::policy::{self, MonsterTurn};
use crate::setup::BattleSetup;
use crate::spells::{ActionCost, SpellId};
use crate::turn::TurnTracker;
use crate::{distance, Dice};

/// Melee reach in Manhattan distance. Diagonal neighbours sit at 2.
pub const MELEE_RANGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Monster,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Monster,
            Side::Monster => Side::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatStatus {
    Ongoing,
    UserWon,
    MonsterWon,
}

impl CombatStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CombatStatus::Ongoing => "ongoing",
            CombatStatus::UserWon => "user_won",
            CombatStatus::MonsterWon => "monster_won",
        }
    }

    pub fn is_over(self) -> bool {
        self != CombatStatus::Ongoing
    }
}

/// What one side could legally do right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableActions {
    pub side: Side,
    pub moves: Vec<Direction>,
    pub distance_to_target: u32,
    pub target_in_range: bool,
    pub movement_left: u32,
    pub action_available: bool,
    pub bonus_action_available: bool,
    pub castable: Vec<SpellId>,
}

/// Everything that happened between the player ending their turn and the
/// start of the next one.
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub monster: MonsterTurn,
    pub terrain: Vec<TerrainOutcome>,
    pub status: CombatStatus,
    pub narration: Vec<String>,
}

/// The aggregate root: one grid, one player, one monster, one turn tracker.
#[derive(Debug, Clone, Serialize)]
pub struct Battle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub grid: Grid,
    pub player: Combatant,
    pub monster: Combatant,
    pub tracker: TurnTracker,
    /// Completed rounds.
    pub round: u32,
}

impl Battle {
    pub fn from_parts(grid: Grid, player: Combatant, monster: Combatant) -> Self {
        Self {
            theme: None,
            grid,
            player,
            monster,
            tracker: TurnTracker::new(),
            round: 0,
        }
    }

    /// Validate a setup document, roll up the player and place both sides.
    pub fn start(setup: &BattleSetup, class: ClassKind, dice: &mut Dice) -> Result<Self, SetupError> {
        setup.validate()?;
        let bg = &setup.battleground;
        let player = create_character(class, bg.user_start, dice);
        let monster = setup.monster.combatant(bg.monster_start);
        info!(
            class = %class,
            hp = player.hp(),
            monster = %monster.name,
            monster_hp = monster.hp(),
            "battle started"
        );
        let mut battle = Self::from_parts(bg.grid(), player, monster);
        battle.theme = setup.theme.clone();
        Ok(battle)
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Monster => &self.monster,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Monster => &mut self.monster,
        }
    }

    pub fn distance(&self) -> u32 {
        distance(self.player.position, self.monster.position)
    }

    /// Player HP is checked first, so a double knockout is a monster win.
    pub fn check_combat_status(&self) -> CombatStatus {
        if self.player.is_defeated() {
            CombatStatus::MonsterWon
        } else if self.monster.is_defeated() {
            CombatStatus::UserWon
        } else {
            CombatStatus::Ongoing
        }
    }

    pub fn status_message(&self) -> String {
        match self.check_combat_status() {
            CombatStatus::MonsterWon => {
                format!("You have been defeated by {}! Game Over!", self.monster.name)
            }
            CombatStatus::UserWon => format!("Victory! You have defeated {}!", self.monster.name),
            CombatStatus::Ongoing => format!(
                "Battle continues! Your HP: {}, {}'s HP: {}",
                self.player.hp(),
                self.monster.name,
                self.monster.hp()
            ),
        }
    }

    pub(crate) fn ensure_ongoing(&self) -> Result<(), CombatError> {
        if self.check_combat_status().is_over() {
            return Err(CombatError::BattleOver);
        }
        Ok(())
    }

    /// Movement points `side` may still spend this turn.
    pub fn movement_budget(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.tracker.remaining_movement(self.player.speed),
            Side::Monster => self.monster.speed,
        }
    }

    /// Directions `side` could step in without being rejected.
    pub fn legal_moves(&self, side: Side) -> Vec<Direction> {
        let actor = self.combatant(side);
        let other = self.combatant(side.opponent()).position;
        let budget = self.movement_budget(side);
        Direction::ALL
            .into_iter()
            .filter(|dir| {
                let to = actor.position.offset(dir.delta());
                self.grid.in_bounds(to) && !self.grid.is_blocked(to) && to != other && dir.cost() <= budget
            })
            .collect()
    }

    pub fn available_actions(&self, side: Side) -> AvailableActions {
        let distance_to_target = self.distance();
        let player_side = side == Side::Player;
        let action_available = !player_side || !self.tracker.action_used;
        let bonus_action_available = player_side && !self.tracker.bonus_action_used;
        let castable = match (player_side, self.player.spellbook()) {
            (true, Some(book)) => SpellId::ALL
                .into_iter()
                .filter(|&spell| book.knows(spell) && book.slots(spell.level()) > 0)
                .filter(|spell| match spell.cost() {
                    ActionCost::Action => action_available,
                    ActionCost::BonusAction => bonus_action_available,
                })
                .collect(),
            _ => Vec::new(),
        };
        AvailableActions {
            side,
            moves: self.legal_moves(side),
            distance_to_target,
            target_in_range: distance_to_target <= MELEE_RANGE,
            movement_left: self.movement_budget(side),
            action_available,
            bonus_action_available,
            castable,
        }
    }

    /// Close the player's turn: monster acts, terrain bites both sides, the
    /// status is checked, and if the fight goes on a fresh player turn starts.
    pub fn end_turn(&mut self, dice: &mut Dice) -> Result<RoundReport, CombatError> {
        self.ensure_ongoing()?;
        self.tracker.ensure_user_turn()?;
        self.tracker.end_user_turn();

        let monster = policy::take_monster_turn(self, dice);
        let terrain = vec![
            self.apply_terrain_effects(Side::Player, dice),
            self.apply_terrain_effects(Side::Monster, dice),
        ];
        let status = self.check_combat_status();
        self.round += 1;

        let mut narration = monster.narration.clone();
        narration.extend(
            terrain
                .iter()
                .filter(|t| t.terrain.is_some())
                .map(|t| t.narration.clone()),
        );
        narration.push(self.status_message());

        if status.is_over() {
            info!(status = status.as_str(), round = self.round, "battle over");
        } else {
            self.tracker.reset_turn();
        }

        Ok(RoundReport {
            round: self.round,
            monster,
            terrain,
            status,
            narration,
        })
    }
}
