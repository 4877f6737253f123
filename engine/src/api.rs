use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::battle::{AvailableActions, Battle, CombatStatus, RoundReport, Side};
use crate::combat::{AttackOutcome, MoveOutcome, SpellOutcome};
use crate::combatant::ClassKind;
use crate::content::builtin_scenarios;
use crate::error::CombatError;
use crate::grid::Direction;
use crate::policy::greedy_step;
use crate::setup::BattleSetup;
use crate::spells::SpellId;
use crate::{render, Dice};

pub const MAX_ROUNDS: u32 = 30;

/// One structured request from the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Move(Direction),
    Attack,
    /// Spell id as typed; resolved after the caster check.
    Cast(String),
    EndTurn,
    Status,
    Actions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Moved(MoveOutcome),
    Attacked(AttackOutcome),
    Cast(SpellOutcome),
    Round(RoundReport),
    Status { status: CombatStatus, message: String },
    Actions(AvailableActions),
}

impl Outcome {
    /// Player-facing lines describing what happened.
    pub fn narration(&self) -> Vec<String> {
        match self {
            Outcome::Moved(m) => vec![m.narration.clone()],
            Outcome::Attacked(a) => vec![a.narration.clone()],
            Outcome::Cast(s) => vec![s.narration.clone()],
            Outcome::Round(r) => r.narration.clone(),
            Outcome::Status { message, .. } => vec![message.clone()],
            Outcome::Actions(a) => vec![describe_actions(a)],
        }
    }

    /// Bracket-tagged log line(s) for simulation transcripts.
    pub fn log_lines(&self) -> Vec<String> {
        if let Outcome::Round(report) = self {
            let mut lines: Vec<String> = report
                .monster
                .narration
                .iter()
                .map(|line| format!("[MONSTER] {}", line))
                .collect();
            lines.extend(
                report
                    .terrain
                    .iter()
                    .filter(|t| t.terrain.is_some())
                    .map(|t| format!("[TERRAIN] {}", t.narration)),
            );
            lines.push(format!("[STATUS] {}", report.status.as_str()));
            return lines;
        }
        let tag = match self {
            Outcome::Moved(_) => "MOVE",
            Outcome::Attacked(_) => "ATTACK",
            Outcome::Cast(_) => "SPELL",
            Outcome::Round(_) => "ROUND",
            Outcome::Status { .. } => "STATUS",
            Outcome::Actions(_) => "ACTIONS",
        };
        self.narration()
            .into_iter()
            .map(|line| format!("[{}] {}", tag, line))
            .collect()
    }
}

/// Route one command onto the engine. The only dispatch point the
/// front-end needs; every branch is an ordinary engine call.
pub fn dispatch(battle: &mut Battle, dice: &mut Dice, command: &Command) -> Result<Outcome, CombatError> {
    match command {
        Command::Move(dir) => battle.move_actor(Side::Player, *dir).map(Outcome::Moved),
        Command::Attack => battle.attack(Side::Player, dice).map(Outcome::Attacked),
        Command::Cast(id) => battle.cast_spell_by_id(id, dice).map(Outcome::Cast),
        Command::EndTurn => battle.end_turn(dice).map(Outcome::Round),
        Command::Status => Ok(Outcome::Status {
            status: battle.check_combat_status(),
            message: battle.status_message(),
        }),
        Command::Actions => Ok(Outcome::Actions(battle.available_actions(Side::Player))),
    }
}

pub fn describe_actions(a: &AvailableActions) -> String {
    let moves = if a.moves.is_empty() {
        "none".to_string()
    } else {
        a.moves.iter().map(|d| d.name()).collect::<Vec<_>>().join(", ")
    };
    let attack = if a.target_in_range {
        "in range".to_string()
    } else {
        format!("out of range (distance {})", a.distance_to_target)
    };
    let mut line = format!(
        "Moves: {} | Attack: {} | Movement left: {} | Action: {} | Bonus action: {}",
        moves,
        attack,
        a.movement_left,
        if a.action_available { "available" } else { "used" },
        if a.bonus_action_available { "available" } else { "used" },
    );
    if !a.castable.is_empty() {
        let spells: Vec<_> = a.castable.iter().map(|s| s.id()).collect();
        line.push_str(&format!(" | Spells: {}", spells.join(", ")));
    }
    line
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimConfig {
    #[serde(default)]
    pub scenario_id: Option<String>,
    #[serde(default)]
    pub setup_path: Option<String>,
    pub class: ClassKind,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleResult {
    pub winner: String,
    pub rounds: u32,
    pub player_hp_end: i32,
    pub monster_hp_end: i32,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleStats {
    pub samples: u32,
    pub player_wins: u32,
    pub monster_wins: u32,
    pub draws: u32,
    pub avg_rounds: f64,
}

/// Parse a setup document, picking YAML for `.yaml`/`.yml` and JSON otherwise.
pub fn parse_setup(text: &str, yaml: bool) -> Result<BattleSetup> {
    let setup: BattleSetup = if yaml {
        serde_yaml::from_str(text).context("failed to parse setup YAML")?
    } else {
        serde_json::from_str(text).context("failed to parse setup JSON")?
    };
    setup.validate().context("invalid battle setup")?;
    Ok(setup)
}

/// Read a text file, honouring a UTF-8 or UTF-16 BOM; plain UTF-8 otherwise.
pub fn read_text_auto(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

pub fn load_setup(path: &Path) -> Result<BattleSetup> {
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read setup file: {}", path.display()))?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    parse_setup(&text, yaml).with_context(|| format!("in {}", path.display()))
}

pub fn load_builtin_setup(id: &str) -> Result<BattleSetup> {
    let scenarios = builtin_scenarios();
    let Some(text) = scenarios.get(id) else {
        bail!("unknown built-in scenario '{}'", id);
    };
    parse_setup(text, false).with_context(|| format!("built-in scenario '{}'", id))
}

/// A setup path wins over a scenario id; one of the two is required.
pub fn resolve_setup(scenario_id: Option<&str>, setup_path: Option<&str>) -> Result<BattleSetup> {
    match (setup_path, scenario_id) {
        (Some(path), _) => load_setup(Path::new(path)),
        (None, Some(id)) => load_builtin_setup(id),
        (None, None) => bail!("either a scenario id or a setup path is required"),
    }
}

/// Auto-play one battle from a seed.
pub fn simulate_battle(cfg: &SimConfig) -> Result<BattleResult> {
    let setup = resolve_setup(cfg.scenario_id.as_deref(), cfg.setup_path.as_deref())?;
    run_battle(&setup, cfg.class, cfg.seed, cfg.max_rounds.unwrap_or(MAX_ROUNDS))
}

/// Auto-play one battle on an already loaded setup.
pub fn run_battle(setup: &BattleSetup, class: ClassKind, seed: u64, max_rounds: u32) -> Result<BattleResult> {
    let mut dice = Dice::from_seed(seed);
    let mut battle = Battle::start(setup, class, &mut dice)?;
    let mut logs = Vec::new();

    logs.push(format!(
        "[START] You ({}, AC {}, HP {}) vs {} (AC {}, HP {})",
        class,
        battle.player.ac,
        battle.player.hp(),
        battle.monster.name,
        battle.monster.ac,
        battle.monster.hp()
    ));

    let mut rounds = 0u32;
    while rounds < max_rounds && !battle.check_combat_status().is_over() {
        rounds += 1;
        logs.push(format!("[ROUND] {}", rounds));
        autopilot_turn(&mut battle, &mut dice, &mut logs);
        if battle.check_combat_status().is_over() {
            break;
        }
        let report = battle.end_turn(&mut dice)?;
        logs.extend(Outcome::Round(report).log_lines());
        logs.push(format!("[TURN] {}", render::turn_panel(&battle)));
    }

    let winner = match battle.check_combat_status() {
        CombatStatus::UserWon => "player",
        CombatStatus::MonsterWon => "monster",
        CombatStatus::Ongoing => "draw",
    };
    logs.push(format!(
        "[END] winner={} player_hp={} monster_hp={} rounds={}",
        winner,
        battle.player.hp(),
        battle.monster.hp(),
        rounds
    ));

    Ok(BattleResult {
        winner: winner.to_string(),
        rounds,
        player_hp_end: battle.player.hp(),
        monster_hp_end: battle.monster.hp(),
        log: logs,
    })
}

/// Run `samples` battles with seeds `seed, seed+1, ...`.
pub fn simulate_battle_many(cfg: &SimConfig, samples: u32) -> Result<BattleStats> {
    let mut stats = BattleStats {
        samples,
        player_wins: 0,
        monster_wins: 0,
        draws: 0,
        avg_rounds: 0.0,
    };
    let setup = resolve_setup(cfg.scenario_id.as_deref(), cfg.setup_path.as_deref())?;
    let max_rounds = cfg.max_rounds.unwrap_or(MAX_ROUNDS);
    let mut total_rounds = 0u64;
    for i in 0..samples {
        let res = run_battle(&setup, cfg.class, cfg.seed.wrapping_add(i as u64), max_rounds)?;
        total_rounds += res.rounds as u64;
        match res.winner.as_str() {
            "player" => stats.player_wins += 1,
            "monster" => stats.monster_wins += 1,
            _ => stats.draws += 1,
        }
    }
    if samples > 0 {
        stats.avg_rounds = total_rounds as f64 / samples as f64;
    }
    Ok(stats)
}

/// Fixed player policy used by the simulator: patch up when at half HP,
/// spend the strongest spell slot, otherwise close in and swing.
fn autopilot_turn(battle: &mut Battle, dice: &mut Dice, logs: &mut Vec<String>) {
    let book = battle.player.spellbook().cloned();
    if let Some(book) = book {
        let hurt = battle.player.hp() * 2 <= battle.player.max_hp();
        if hurt && book.knows(SpellId::Heal) && book.slots(SpellId::Heal.level()) > 0 {
            record(battle.cast_spell(SpellId::Heal, dice).map(Outcome::Cast), logs);
        }
        for spell in [SpellId::Fireball, SpellId::MagicMissile] {
            if record(battle.cast_spell(spell, dice).map(Outcome::Cast), logs) {
                break;
            }
        }
    }

    while battle.distance() > crate::battle::MELEE_RANGE {
        let Some(dir) = greedy_step(battle, Side::Player) else {
            break;
        };
        if !record(battle.move_actor(Side::Player, dir).map(Outcome::Moved), logs) {
            break;
        }
    }

    if !battle.tracker.action_used {
        record(battle.attack(Side::Player, dice).map(Outcome::Attacked), logs);
    }
}

/// Log an applied outcome; rejections are expected and simply reported as `false`.
fn record(res: Result<Outcome, CombatError>, logs: &mut Vec<String>) -> bool {
    match res {
        Ok(outcome) => {
            logs.extend(outcome.log_lines());
            true
        }
        Err(_) => false,
    }
}
