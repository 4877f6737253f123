use tracing::{debug, info};

use super::{possessive, verb, AttackOutcome, MoveOutcome, SpellOutcome, TerrainOutcome};
use crate::battle::{Battle, Side, MELEE_RANGE};
use crate::error::CombatError;
use crate::grid::{Direction, TerrainKind};
use crate::life::{apply_damage, heal};
use crate::spells::{ActionCost, SpellEffect, SpellId};
use crate::{distance, Dice};

/// Hazard damage rolled per round on a DAMAGE cell.
pub const TERRAIN_DAMAGE: (i32, i32) = (1, 4);

impl Battle {
    /// Step `side` one cell in `direction`.
    pub fn move_actor(&mut self, side: Side, direction: Direction) -> Result<MoveOutcome, CombatError> {
        self.try_move(side, direction)
            .inspect_err(|e| debug!(?side, %direction, error = %e, "move rejected"))
    }

    fn try_move(&mut self, side: Side, direction: Direction) -> Result<MoveOutcome, CombatError> {
        self.ensure_ongoing()?;
        if side == Side::Player {
            self.tracker.ensure_user_turn()?;
        }
        let actor = self.combatant(side);
        let from = actor.position;
        let to = from.offset(direction.delta());
        let cost = direction.cost();
        let speed = actor.speed;

        if !self.grid.in_bounds(to) {
            return Err(CombatError::OutOfBounds(to));
        }
        if self.grid.is_blocked(to) {
            return Err(CombatError::BlockedTerrain(to));
        }
        if self.combatant(side.opponent()).position == to {
            return Err(CombatError::Occupied(to));
        }
        match side {
            Side::Player => self.tracker.spend_movement(cost, speed)?,
            Side::Monster if cost > speed => {
                return Err(CombatError::InsufficientSpeed { needed: cost, speed });
            }
            Side::Monster => {}
        }

        let actor = self.combatant_mut(side);
        actor.position = to;
        let narration = format!(
            "{} {} {} from {} to {}",
            actor.name,
            verb(side, "move", "moves"),
            direction,
            from,
            to
        );
        info!(actor = %actor.name, %from, %to, cost, "moved");
        Ok(MoveOutcome {
            actor: side,
            direction,
            from,
            to,
            distance: cost,
            narration,
        })
    }

    /// Melee attack from `source` against the other side.
    pub fn attack(&mut self, source: Side, dice: &mut Dice) -> Result<AttackOutcome, CombatError> {
        self.try_attack(source, dice)
            .inspect_err(|e| debug!(?source, error = %e, "attack rejected"))
    }

    fn try_attack(&mut self, source: Side, dice: &mut Dice) -> Result<AttackOutcome, CombatError> {
        self.ensure_ongoing()?;
        if source == Side::Player {
            self.tracker.ensure_user_turn()?;
            self.tracker.ensure_action()?;
        }
        let target = source.opponent();
        let gap = distance(self.combatant(source).position, self.combatant(target).position);
        if gap > MELEE_RANGE {
            return Err(CombatError::OutOfRange { distance: gap });
        }

        let attacker_name = self.combatant(source).name.clone();
        let damage_range = self.combatant(source).damage;
        let target_ac = self.combatant(target).ac;

        let roll = dice.d20();
        let hit = roll >= target_ac;
        let critical = hit && roll == 20;
        let damage_roll = if hit { damage_range.roll(dice) } else { 0 };

        let defender = self.combatant_mut(target);
        let target_name = defender.name.clone();
        let hp_before = defender.hp();
        if hit {
            apply_damage(&target_name, &mut defender.health, damage_roll, |line| debug!("{}", line));
        }
        let hp_after = defender.hp();
        let damage = hp_before - hp_after;

        if source == Side::Player {
            self.tracker.action_used = true;
        }

        let mut narration = format!(
            "{} {} {}! Rolled {} vs AC {}. ",
            attacker_name,
            verb(source, "attack", "attacks"),
            target_name,
            roll,
            target_ac
        );
        if !hit {
            narration.push_str("Miss!");
        } else {
            if critical {
                narration.push_str(&format!("CRITICAL HIT! Deals {} damage! ", damage));
            } else {
                narration.push_str(&format!("Hit! Deals {} damage! ", damage));
            }
            narration.push_str(&format!(
                "{} HP: {} → {}",
                possessive(target, &target_name),
                hp_before,
                hp_after
            ));
        }
        info!(
            attacker = %attacker_name,
            roll,
            target_ac,
            hit,
            critical,
            damage_roll,
            damage,
            hp_before,
            hp_after,
            "attack resolved"
        );

        Ok(AttackOutcome {
            source,
            roll,
            target_ac,
            hit,
            critical,
            damage_roll,
            damage,
            target_hp_before: hp_before,
            target_hp_after: hp_after,
            source_hp: self.combatant(source).hp(),
            narration,
        })
    }

    /// Cast by id. The caster check runs before the id is parsed, so a
    /// fighter always gets `NotACaster`.
    pub fn cast_spell_by_id(&mut self, spell_id: &str, dice: &mut Dice) -> Result<SpellOutcome, CombatError> {
        self.try_cast_by_id(spell_id, dice)
            .inspect_err(|e| debug!(spell = spell_id, error = %e, "spell rejected"))
    }

    fn try_cast_by_id(&mut self, spell_id: &str, dice: &mut Dice) -> Result<SpellOutcome, CombatError> {
        self.ensure_ongoing()?;
        self.tracker.ensure_user_turn()?;
        if self.player.spellbook().is_none() {
            return Err(CombatError::NotACaster);
        }
        let spell = spell_id.parse::<SpellId>()?;
        self.try_cast(spell, dice)
    }

    /// Player-only. Damage spells hit the monster, healing targets the caster.
    pub fn cast_spell(&mut self, spell: SpellId, dice: &mut Dice) -> Result<SpellOutcome, CombatError> {
        self.try_cast(spell, dice)
            .inspect_err(|e| debug!(%spell, error = %e, "spell rejected"))
    }

    fn try_cast(&mut self, spell: SpellId, dice: &mut Dice) -> Result<SpellOutcome, CombatError> {
        self.ensure_ongoing()?;
        self.tracker.ensure_user_turn()?;
        let book = self.player.spellbook().ok_or(CombatError::NotACaster)?;
        if !book.knows(spell) {
            return Err(CombatError::SpellUnknown(spell.id().to_string()));
        }
        let level = spell.level();
        book.ensure_slot(level)?;
        match spell.cost() {
            ActionCost::Action => self.tracker.ensure_action()?,
            ActionCost::BonusAction => self.tracker.ensure_bonus_action()?,
        }

        let (target, roll, amount, hp_before, hp_after) = match spell.effect() {
            SpellEffect::Damage { lo, hi } => {
                let roll = dice.roll(lo, hi);
                let monster = &mut self.monster;
                let before = monster.hp();
                apply_damage(&monster.name, &mut monster.health, roll, |line| debug!("{}", line));
                (Side::Monster, roll, before - monster.hp(), before, monster.hp())
            }
            SpellEffect::Heal { lo, hi } => {
                let roll = dice.roll(lo, hi);
                let player = &mut self.player;
                let before = player.hp();
                let restored = heal(&player.name, &mut player.health, roll, |line| debug!("{}", line));
                (Side::Player, roll, restored, before, player.hp())
            }
        };

        let mut slots_remaining = 0;
        if let Some(book) = self.player.spellbook_mut() {
            book.spend_slot(level);
            slots_remaining = book.slots(level);
        }
        match spell.cost() {
            ActionCost::Action => self.tracker.action_used = true,
            ActionCost::BonusAction => self.tracker.bonus_action_used = true,
        }

        let narration = match target {
            Side::Monster => format!(
                "You cast {}! The spell deals {} damage to {}! HP: {} → {}",
                spell.display_name(),
                amount,
                self.monster.name,
                hp_before,
                hp_after
            ),
            Side::Player => format!(
                "You cast {}! You recover {} HP! HP: {} → {}",
                spell.display_name(),
                amount,
                hp_before,
                hp_after
            ),
        };
        info!(%spell, roll, amount, hp_before, hp_after, slots_remaining, "spell cast");

        Ok(SpellOutcome {
            spell,
            level,
            target,
            roll,
            amount,
            target_hp_before: hp_before,
            target_hp_after: hp_after,
            slots_remaining,
            narration,
        })
    }

    /// Resolve the hazard under `side`. Never fails; ordinary ground is a no-op.
    pub fn apply_terrain_effects(&mut self, side: Side, dice: &mut Dice) -> TerrainOutcome {
        let emoji = self.grid.terrain_emoji.clone();
        let terrain = self.grid.terrain_at(self.combatant(side).position);
        let actor = self.combatant_mut(side);
        let hp_before = actor.hp();

        let (damage, narration) = match terrain {
            None => (
                0,
                format!("{} {} on normal ground - no terrain effects", actor.name, verb(side, "are", "is")),
            ),
            Some(TerrainKind::Blocked) => (
                0,
                format!("{} {} beside impassable {} terrain", actor.name, verb(side, "stand", "stands"), emoji),
            ),
            Some(TerrainKind::Damage) if actor.is_defeated() => (
                0,
                format!("{} {} already down on {} terrain", actor.name, verb(side, "are", "is"), emoji),
            ),
            Some(TerrainKind::Damage) => {
                let (lo, hi) = TERRAIN_DAMAGE;
                let roll = dice.roll(lo, hi);
                apply_damage(&actor.name, &mut actor.health, roll, |line| debug!("{}", line));
                let dealt = hp_before - actor.hp();
                info!(actor = %actor.name, roll, dealt, hp_after = actor.hp(), "terrain damage");
                (
                    dealt,
                    format!(
                        "{} {} {} damage from {} terrain! HP: {} → {}",
                        actor.name,
                        verb(side, "take", "takes"),
                        dealt,
                        emoji,
                        hp_before,
                        actor.hp()
                    ),
                )
            }
        };

        TerrainOutcome {
            actor: side,
            terrain,
            damage,
            hp_before,
            hp_after: actor.hp(),
            narration,
        }
    }
}
