use serde::{Deserialize, Serialize};

use crate::error::CombatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOwner {
    #[default]
    User,
    Monster,
}

/// Player action economy for the current turn. The monster is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnTracker {
    pub current_turn: TurnOwner,
    pub movement_used: u32,
    pub action_used: bool,
    pub bonus_action_used: bool,
}

impl TurnTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of a player turn. Idempotent.
    pub fn reset_turn(&mut self) {
        *self = Self::default();
    }

    /// Hand the turn to the monster; counters stay as they are until the next reset.
    pub fn end_user_turn(&mut self) {
        self.current_turn = TurnOwner::Monster;
    }

    pub fn is_user_turn(&self) -> bool {
        self.current_turn == TurnOwner::User
    }

    pub fn remaining_movement(&self, speed: u32) -> u32 {
        speed.saturating_sub(self.movement_used)
    }

    pub fn ensure_user_turn(&self) -> Result<(), CombatError> {
        if !self.is_user_turn() {
            return Err(CombatError::NotPlayerTurn);
        }
        Ok(())
    }

    pub fn ensure_movement(&self, distance: u32, speed: u32) -> Result<(), CombatError> {
        if self.movement_used + distance > speed {
            return Err(CombatError::InsufficientMovement {
                needed: distance,
                remaining: self.remaining_movement(speed),
            });
        }
        Ok(())
    }

    pub fn ensure_action(&self) -> Result<(), CombatError> {
        if self.action_used {
            return Err(CombatError::ActionAlreadyUsed);
        }
        Ok(())
    }

    pub fn ensure_bonus_action(&self) -> Result<(), CombatError> {
        if self.bonus_action_used {
            return Err(CombatError::BonusAlreadyUsed);
        }
        Ok(())
    }

    /// Debit `distance` movement points, or reject without change.
    pub fn spend_movement(&mut self, distance: u32, speed: u32) -> Result<(), CombatError> {
        self.ensure_movement(distance, speed)?;
        self.movement_used += distance;
        Ok(())
    }

    pub fn spend_action(&mut self) -> Result<(), CombatError> {
        self.ensure_action()?;
        self.action_used = true;
        Ok(())
    }

    pub fn spend_bonus_action(&mut self) -> Result<(), CombatError> {
        self.ensure_bonus_action()?;
        self.bonus_action_used = true;
        Ok(())
    }
}
