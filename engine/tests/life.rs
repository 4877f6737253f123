use skirmish_engine::life::*;

fn noop_log(_: String) {}

#[test]
fn damage_floors_at_zero_and_reports_the_drop() {
    let mut h = Health::new(10);
    let mut lines = Vec::new();
    assert!(!apply_damage("Hero", &mut h, 4, |l| lines.push(l)));
    assert_eq!(h.hp, 6);
    assert!(apply_damage("Hero", &mut h, 99, |l| lines.push(l)));
    assert_eq!(h.hp, 0);
    assert_eq!(lines.last().unwrap(), "[STATE][Hero] drops to 0 HP");
}

#[test]
fn damage_on_a_downed_creature_is_ignored() {
    let mut h = Health::with_hp(0, 10);
    assert!(!apply_damage("Hero", &mut h, 3, noop_log));
    assert_eq!(h.hp, 0);
}

#[test]
fn negative_damage_never_heals() {
    let mut h = Health::with_hp(5, 10);
    apply_damage("Hero", &mut h, -4, noop_log);
    assert_eq!(h.hp, 5);
}

#[test]
fn heal_caps_at_max_and_returns_what_was_restored() {
    let mut h = Health::with_hp(7, 10);
    assert_eq!(heal("Hero", &mut h, 8, noop_log), 3);
    assert_eq!(h.hp, 10);
    assert_eq!(h.missing(), 0);
    assert_eq!(heal("Hero", &mut h, 0, noop_log), 0);
}

#[test]
fn with_hp_clamps_into_range() {
    assert_eq!(Health::with_hp(15, 10).hp, 10);
    assert_eq!(Health::with_hp(-2, 10).hp, 0);
    assert!(Health::with_hp(-2, 10).is_down());
}
