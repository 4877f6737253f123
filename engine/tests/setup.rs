use skirmish_engine::api::{
    load_builtin_setup, load_setup, parse_setup, resolve_setup, simulate_battle_many, SimConfig,
};
use skirmish_engine::content::{builtin_scenarios, scenario_ids};
use skirmish_engine::setup::BattleSetup;
use skirmish_engine::{Battle, ClassKind, Dice, Position, SetupError, TerrainKind};

const YAML: &str = r#"
theme: Bog spirits rise from the mire.
battleground:
  size: [4, 5]
  terrain_cells: [[1, 1], [1, 2]]
  terrain_kind: DAMAGE
  terrain_emoji: "🟢"
  user_start: [0, 0]
  monster_start: [3, 4]
monster:
  name: Bog Wight
  hp: 22
  ac: 12
  damage: [3, 7]
  speed: 2
"#;

fn goblin_setup() -> BattleSetup {
    load_builtin_setup("goblin_ambush").expect("built-in parses")
}

#[test]
fn every_builtin_scenario_starts_a_battle() {
    assert_eq!(scenario_ids(), vec!["bone_crypt", "goblin_ambush", "lava_cavern"]);
    for id in builtin_scenarios().keys() {
        let setup = load_builtin_setup(id).unwrap();
        assert!(setup.theme.is_some(), "{} has no theme", id);
        for class in [ClassKind::Fighter, ClassKind::Wizard] {
            let b = Battle::start(&setup, class, &mut Dice::from_seed(4)).unwrap();
            assert_eq!(b.player.position, setup.battleground.user_start);
            assert_eq!(b.monster.hp(), setup.monster.hp);
        }
    }
}

#[test]
fn yaml_setup_with_default_emoji() {
    let setup = parse_setup(YAML, true).unwrap();
    assert_eq!(setup.monster.emoji, "👾");
    let b = Battle::start(&setup, ClassKind::Wizard, &mut Dice::from_seed(1)).unwrap();
    assert_eq!(b.grid.terrain_at(Position::new(1, 2)), Some(TerrainKind::Damage));
    assert_eq!(b.grid.terrain_at(Position::new(0, 1)), None);
    assert_eq!(b.monster.speed, 2);
    assert!((10..=18).contains(&b.player.max_hp()));
}

#[test]
fn player_stats_follow_the_class() {
    let setup = goblin_setup();
    let f = Battle::start(&setup, ClassKind::Fighter, &mut Dice::from_scripted(vec![30])).unwrap();
    assert_eq!((f.player.hp(), f.player.ac, f.player.speed), (25, 13, 2));
    assert!(f.player.spellbook().is_none());

    let w = Battle::start(&setup, ClassKind::Wizard, &mut Dice::from_scripted(vec![1])).unwrap();
    assert_eq!((w.player.hp(), w.player.ac), (10, 11));
    assert_eq!(w.player.damage.lo, 4);
    assert!(w.player.spellbook().is_some());
}

#[test]
fn monster_stats_are_range_checked() {
    let mut setup = goblin_setup();
    setup.monster.hp = 10;
    assert_eq!(
        setup.validate(),
        Err(SetupError::MonsterStat { field: "hp", value: 10, min: 15, max: 50 })
    );

    let mut setup = goblin_setup();
    setup.monster.damage.lo = 9;
    setup.monster.damage.hi = 3;
    assert_eq!(setup.validate(), Err(SetupError::InvertedDamage { lo: 9, hi: 3 }));

    let mut setup = goblin_setup();
    setup.monster.speed = 0;
    assert!(matches!(setup.validate(), Err(SetupError::MonsterStat { field: "speed", .. })));

    let mut setup = goblin_setup();
    setup.monster.name = "  ".into();
    assert_eq!(setup.validate(), Err(SetupError::UnnamedMonster));
}

#[test]
fn placement_errors_stop_the_battle_from_starting() {
    let mut setup = goblin_setup();
    setup.battleground.user_start = Position::new(1, 2);
    assert_eq!(
        Battle::start(&setup, ClassKind::Fighter, &mut Dice::from_seed(0)).unwrap_err(),
        SetupError::StartOnBlocked { what: "player", pos: Position::new(1, 2) }
    );

    let mut setup = goblin_setup();
    setup.battleground.monster_start = Position::new(0, 0);
    assert_eq!(setup.validate(), Err(SetupError::SharedStart(Position::new(0, 0))));

    let mut setup = goblin_setup();
    setup.battleground.monster_start = Position::new(6, 0);
    assert!(matches!(
        setup.validate(),
        Err(SetupError::OutOfBounds { what: "monster", .. })
    ));

    let mut setup = goblin_setup();
    setup.battleground.size = [0, 6];
    assert_eq!(setup.validate(), Err(SetupError::InvalidSize { rows: 0, cols: 6 }));
}

#[test]
fn oversized_grids_are_rejected() {
    let mut setup = goblin_setup();
    setup.battleground.size = [50, 50];
    assert_eq!(setup.validate(), Ok(()));

    setup.battleground.size = [51, 6];
    assert_eq!(setup.validate(), Err(SetupError::InvalidSize { rows: 51, cols: 6 }));

    let huge = serde_json::to_string(&goblin_setup())
        .unwrap()
        .replace("[6,6]", "[100000,100000]");
    assert!(parse_setup(&huge, false).is_err());
}

#[test]
fn malformed_documents_are_rejected() {
    let bad_field = YAML.replace("speed: 2", "speed: 2\n  flying: true");
    assert!(parse_setup(&bad_field, true).is_err());
    assert!(parse_setup("{}", false).is_err());
    let bad_kind = YAML.replace("DAMAGE", "SWAMP");
    assert!(parse_setup(&bad_kind, true).is_err());
}

#[test]
fn setup_files_load_by_extension() {
    let dir = std::env::temp_dir().join(format!("skirmish-setup-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let yaml_path = dir.join("bog.yaml");
    std::fs::write(&yaml_path, YAML).unwrap();
    assert_eq!(load_setup(&yaml_path).unwrap().monster.name, "Bog Wight");

    let json_path = dir.join("goblin.json");
    let json = serde_json::to_string(&goblin_setup()).unwrap();
    std::fs::write(&json_path, format!("\u{feff}{}", json)).unwrap();
    assert_eq!(load_setup(&json_path).unwrap(), goblin_setup());

    let via_path = resolve_setup(Some("lava_cavern"), json_path.to_str()).unwrap();
    assert_eq!(via_path.monster.name, "Goblin");
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn utf16_setup_files_load_and_simulate() {
    let dir = std::env::temp_dir().join(format!("skirmish-utf16-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("goblin.json");
    let json = serde_json::to_string(&goblin_setup()).unwrap();
    let mut bytes = vec![0xFF, 0xFE];
    for unit in json.encode_utf16() {
        bytes.extend(unit.to_le_bytes());
    }
    std::fs::write(&path, bytes).unwrap();

    assert_eq!(load_setup(&path).unwrap(), goblin_setup());
    let cfg = SimConfig {
        scenario_id: None,
        setup_path: path.to_str().map(String::from),
        class: ClassKind::Fighter,
        seed: 3,
        max_rounds: None,
    };
    let stats = simulate_battle_many(&cfg, 3).unwrap();
    assert_eq!(stats.player_wins + stats.monster_wins + stats.draws, 3);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn resolve_needs_a_source() {
    assert!(resolve_setup(None, None).is_err());
    assert!(resolve_setup(Some("no_such_place"), None).is_err());
    assert_eq!(
        resolve_setup(Some("bone_crypt"), None).unwrap().monster.name,
        "Skeleton Knight"
    );
}
