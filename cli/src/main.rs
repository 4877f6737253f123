use clap::{Parser, Subcommand, ValueEnum};
use skirmish_engine::api::{dispatch, load_builtin_setup, load_setup, parse_setup, Outcome};
use skirmish_engine::content::{builtin_scenarios, scenario_ids, DEFAULT_SCENARIO};
use skirmish_engine::setup::BattleSetup;
use skirmish_engine::combatant::PLAYER_EMOJI;
use skirmish_engine::{render, Battle, ClassKind, CombatStatus, Dice, SpellLevel};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

mod input;

use input::{parse_line, Input};

#[derive(Copy, Clone, ValueEnum)]
enum Class {
    Fighter,
    Wizard,
}

impl From<Class> for ClassKind {
    fn from(c: Class) -> Self {
        match c {
            Class::Fighter => ClassKind::Fighter,
            Class::Wizard => ClassKind::Wizard,
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Fight a battle, reading commands line by line from stdin
    Play {
        /// Built-in scenario id (see `scenarios`)
        #[arg(long, default_value = DEFAULT_SCENARIO)]
        scenario: String,
        /// Setup file (JSON or YAML); overrides --scenario
        #[arg(long)]
        setup: Option<PathBuf>,
        /// Character class
        #[arg(long, value_enum, default_value_t = Class::Fighter)]
        class: Class,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List the built-in scenarios
    Scenarios,
    /// Print a scenario's setup document as JSON
    Dump {
        /// Built-in scenario id
        #[arg(long, default_value = DEFAULT_SCENARIO)]
        scenario: String,
        /// Setup file (JSON or YAML); overrides --scenario
        #[arg(long)]
        setup: Option<PathBuf>,
    },
    /// Validate a setup file and show the opening grid
    Check {
        /// Setup file (JSON or YAML)
        #[arg(long)]
        setup: PathBuf,
    },
}

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Turn-based grid combat: one hero, one monster")]
struct Cli {
    /// Log engine events to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Cmd::Play {
            scenario,
            setup,
            class,
            seed,
        } => {
            let setup = resolve(&scenario, setup.as_deref())?;
            let stdin = io::stdin();
            play(&setup, class.into(), seed, stdin.lock(), io::stdout().lock())?;
        }
        Cmd::Scenarios => {
            let scenarios = builtin_scenarios();
            for id in scenario_ids() {
                let setup = parse_setup(scenarios[id], false)?;
                println!(
                    "{:<16} {} {} (HP {}, AC {}) on a {}x{} field",
                    id,
                    setup.monster.emoji,
                    setup.monster.name,
                    setup.monster.hp,
                    setup.monster.ac,
                    setup.battleground.rows(),
                    setup.battleground.cols()
                );
            }
        }
        Cmd::Dump { scenario, setup } => {
            let setup = resolve(&scenario, setup.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&setup)?);
        }
        Cmd::Check { setup } => {
            let setup = load_setup(&setup)?;
            let mut dice = Dice::from_seed(0);
            let battle = Battle::start(&setup, ClassKind::Fighter, &mut dice)?;
            println!("setup OK");
            println!("{}", render::grid(&battle));
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn resolve(scenario: &str, setup: Option<&Path>) -> anyhow::Result<BattleSetup> {
    match setup {
        Some(path) => load_setup(path),
        None => load_builtin_setup(scenario),
    }
}

fn play(
    setup: &BattleSetup,
    class: ClassKind,
    seed: u64,
    input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<()> {
    let mut dice = Dice::from_seed(seed);
    let mut battle = Battle::start(setup, class, &mut dice)?;

    if let Some(theme) = &battle.theme {
        writeln!(out, "Background Story:\n{}\n", theme)?;
    }
    writeln!(out, "BATTLE BEGINS! You are a {}.", class)?;
    writeln!(out, "{}", render::grid(&battle))?;
    writeln!(out, "{}", render::status_panel(&battle))?;
    print_help(&mut out, class)?;

    let mut lines = input.lines();
    loop {
        write!(out, "{} Your action: ", PLAYER_EMOJI)?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let cmd = match parse_line(&line) {
            Ok(Input::Quit) => {
                writeln!(out, "Exiting combat. Thanks for playing!")?;
                return Ok(());
            }
            Ok(Input::Help) => {
                print_help(&mut out, class)?;
                continue;
            }
            Ok(Input::Spells) => {
                writeln!(out, "{}", spell_summary(&battle))?;
                continue;
            }
            Ok(Input::Engine(cmd)) => cmd,
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                continue;
            }
        };

        match dispatch(&mut battle, &mut dice, &cmd) {
            Ok(outcome) => {
                for line in outcome.narration() {
                    writeln!(out, "{}", line)?;
                }
                match &outcome {
                    Outcome::Status { .. } => {
                        writeln!(out, "{}", render::grid(&battle))?;
                        writeln!(out, "{}", render::status_panel(&battle))?;
                        writeln!(out, "{}", render::turn_panel(&battle))?;
                    }
                    Outcome::Round(_) => writeln!(out, "{}", render::grid(&battle))?,
                    _ => {}
                }
            }
            Err(e) => writeln!(out, "Cannot do that: {} [{}]", e, e.code())?,
        }

        match battle.check_combat_status() {
            CombatStatus::UserWon => {
                writeln!(out, "Congratulations! You have defeated {}!", battle.monster.name)?;
                return Ok(());
            }
            CombatStatus::MonsterWon => {
                writeln!(out, "You have been defeated!")?;
                return Ok(());
            }
            CombatStatus::Ongoing => {}
        }
    }
    Ok(())
}

fn spell_summary(battle: &Battle) -> String {
    match battle.player.spellbook() {
        None => "Fighters know no spells.".to_string(),
        Some(book) => {
            let slots: Vec<String> = [SpellLevel::One, SpellLevel::Two]
                .into_iter()
                .map(|lvl| format!("Lv{}: {}/{}", lvl.number(), book.slots(lvl), book.max_slots(lvl)))
                .collect();
            let known: Vec<&str> = book.spells_known.iter().map(|s| s.id()).collect();
            format!("Spell Slots: {} | Known: {}", slots.join(" | "), known.join(", "))
        }
    }
}

fn print_help(out: &mut impl Write, class: ClassKind) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  move <direction>  north/south/east/west (diagonals cost 2)")?;
    writeln!(out, "  attack            melee attack if adjacent to the monster")?;
    if class == ClassKind::Wizard {
        writeln!(out, "  cast magic_missile | cast fireball   (action)")?;
        writeln!(out, "  cast heal                            (bonus action)")?;
        writeln!(out, "  spells            show spell slots")?;
    }
    writeln!(out, "  actions           list what you can still do this turn")?;
    writeln!(out, "  end turn          let the monster act")?;
    writeln!(out, "  status            show the battlefield")?;
    writeln!(out, "  quit              leave the fight")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_ends_play_cleanly() {
        let setup = load_builtin_setup("goblin_ambush").unwrap();
        let mut out = Vec::new();
        play(&setup, ClassKind::Wizard, 7, "spells\nquit\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Spell Slots: Lv1: 3/3 | Lv2: 2/2"));
        assert!(text.contains("Exiting combat"));
    }

    #[test]
    fn rejected_commands_show_error_code() {
        let setup = load_builtin_setup("goblin_ambush").unwrap();
        let mut out = Vec::new();
        play(&setup, ClassKind::Fighter, 7, "attack\nquit\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[OUT_OF_RANGE]"), "{}", text);
    }

    #[test]
    fn eof_leaves_the_battle_running() {
        let setup = load_builtin_setup("bone_crypt").unwrap();
        let mut out = Vec::new();
        play(&setup, ClassKind::Fighter, 1, "status\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("COMBAT STATUS"));
        assert!(text.contains("Movement: 2/2 remaining"));
        assert!(!text.contains("Congratulations"));
    }
}
