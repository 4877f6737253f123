mod common;

use common::*;
use skirmish_engine::{CombatError, Dice, Side, SpellId, SpellLevel, TurnTracker};

#[test]
fn empty_level_rejects_with_no_slots() {
    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    b.player
        .spellbook_mut()
        .unwrap()
        .spell_slots
        .insert(SpellLevel::One, 0);
    let err = b
        .cast_spell_by_id("magic_missile", &mut Dice::from_seed(1))
        .unwrap_err();
    assert_eq!(err, CombatError::NoSlots { level: 1 });
    assert_eq!(err.code(), "NO_SLOTS");
    assert_eq!(b.monster.hp(), 30);
    assert_eq!(b.tracker, TurnTracker::new());
}

#[test]
fn fireball_hits_at_any_range_and_spends_one_slot() {
    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    let out = b
        .cast_spell_by_id("fireball", &mut Dice::from_scripted(vec![18]))
        .unwrap();
    assert_eq!(out.target, Side::Monster);
    assert_eq!(out.amount, 18);
    assert_eq!(out.slots_remaining, 1);
    assert_eq!(b.monster.hp(), 12);
    assert!(b.tracker.action_used);
    assert!(!b.tracker.bonus_action_used);
    assert_eq!(
        out.narration,
        "You cast Fireball! The spell deals 18 damage to Goblin! HP: 30 → 12"
    );
    let book = b.player.spellbook().unwrap();
    assert_eq!(book.slots(SpellLevel::Two), 1);
    assert_eq!(book.slots(SpellLevel::One), 3);
}

#[test]
fn action_spells_share_the_action() {
    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    let mut dice = Dice::from_seed(9);
    b.cast_spell(SpellId::MagicMissile, &mut dice).unwrap();
    let err = b.cast_spell(SpellId::Fireball, &mut dice).unwrap_err();
    assert_eq!(err, CombatError::ActionAlreadyUsed);
    assert_eq!(b.player.spellbook().unwrap().slots(SpellLevel::Two), 2);

    b.player.position = at(3, 4);
    assert_eq!(
        b.attack(Side::Player, &mut dice).unwrap_err(),
        CombatError::ActionAlreadyUsed
    );
}

#[test]
fn heal_is_a_bonus_action_alongside_an_attack_spell() {
    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    set_hp(&mut b.player, 5);
    let mut dice = Dice::from_scripted(vec![7, 8]);
    b.cast_spell(SpellId::MagicMissile, &mut dice).unwrap();
    let out = b.cast_spell(SpellId::Heal, &mut dice).unwrap();
    assert_eq!(out.target, Side::Player);
    assert_eq!(out.amount, 8);
    assert_eq!(b.player.hp(), 13);
    assert_eq!(out.narration, "You cast Heal! You recover 8 HP! HP: 5 → 13");
    assert!(b.tracker.action_used && b.tracker.bonus_action_used);

    assert_eq!(
        b.cast_spell(SpellId::Heal, &mut dice).unwrap_err(),
        CombatError::BonusAlreadyUsed
    );
    assert_eq!(b.player.spellbook().unwrap().slots(SpellLevel::One), 1);
}

#[test]
fn healing_stops_at_max_hp() {
    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    set_hp(&mut b.player, 12);
    let out = b.cast_spell(SpellId::Heal, &mut Dice::from_scripted(vec![10])).unwrap();
    assert_eq!(out.roll, 10);
    assert_eq!(out.amount, 2);
    assert_eq!(b.player.hp(), 14);
}

#[test]
fn spell_damage_floors_at_zero() {
    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    set_hp(&mut b.monster, 15);
    let out = b.cast_spell(SpellId::Fireball, &mut Dice::from_scripted(vec![24])).unwrap();
    assert_eq!(out.amount, 15);
    assert_eq!(b.monster.hp(), 0);
    assert!(b.check_combat_status().is_over());
}

#[test]
fn slots_run_dry_across_turns() {
    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    b.monster.health.max_hp = 50;
    set_hp(&mut b.monster, 50);
    let mut dice = Dice::from_scripted(vec![12, 12, 12]);
    for _ in 0..2 {
        b.cast_spell(SpellId::Fireball, &mut dice).unwrap();
        b.tracker.reset_turn();
    }
    assert_eq!(
        b.cast_spell(SpellId::Fireball, &mut dice).unwrap_err(),
        CombatError::NoSlots { level: 2 }
    );
    assert_eq!(b.monster.hp(), 26);
    let book = b.player.spellbook().unwrap();
    assert_eq!(book.max_slots(SpellLevel::Two), 2);
    assert_eq!(book.slots(SpellLevel::Two), 0);
}

#[test]
fn caster_check_precedes_spell_lookup() {
    let mut b = open_field(fighter(at(0, 0)), goblin(at(4, 4), 2));
    let mut dice = Dice::from_seed(0);
    assert_eq!(
        b.cast_spell_by_id("fireball", &mut dice).unwrap_err(),
        CombatError::NotACaster
    );
    assert_eq!(
        b.cast_spell_by_id("banana", &mut dice).unwrap_err(),
        CombatError::NotACaster
    );

    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    assert_eq!(
        b.cast_spell_by_id("banana", &mut dice).unwrap_err(),
        CombatError::SpellUnknown("banana".into())
    );
    assert_eq!(b.tracker, TurnTracker::new());
}

#[test]
fn spell_ids_accept_spaces_and_dashes() {
    assert_eq!("Magic Missile".parse::<SpellId>(), Ok(SpellId::MagicMissile));
    assert_eq!("magic-missile".parse::<SpellId>(), Ok(SpellId::MagicMissile));
    assert_eq!(SpellId::Heal.level(), SpellLevel::One);
}

#[test]
fn unknown_to_this_caster_is_rejected() {
    let mut b = open_field(wizard(at(0, 0)), goblin(at(4, 4), 2));
    b.player
        .spellbook_mut()
        .unwrap()
        .spells_known
        .shift_remove(&SpellId::Heal);
    assert_eq!(
        b.cast_spell(SpellId::Heal, &mut Dice::from_seed(0)).unwrap_err(),
        CombatError::SpellUnknown("heal".into())
    );
}
