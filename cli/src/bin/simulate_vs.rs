use clap::Parser;
use skirmish_engine::api::{load_builtin_setup, load_setup, run_battle, BattleStats};
use skirmish_engine::content::DEFAULT_SCENARIO;
use skirmish_engine::ClassKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: many autopiloted fights against one scenario")]
struct Args {
    /// Built-in scenario id
    #[arg(long, default_value = DEFAULT_SCENARIO)]
    scenario: String,

    /// Setup file (JSON or YAML); overrides --scenario
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Character class: fighter | wizard
    #[arg(long, default_value = "fighter")]
    class: String,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on rounds per trial
    #[arg(long, default_value_t = 30)]
    max_rounds: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Print the stats as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print the log of the first trial
    #[arg(long, default_value_t = false)]
    show_log: bool,
}

fn median(sorted: &[u32]) -> u32 {
    if sorted.is_empty() {
        return 0;
    }
    let m = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[m]
    } else {
        (sorted[m - 1] + sorted[m]) / 2
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let class: ClassKind = args.class.parse().map_err(anyhow::Error::msg)?;

    let setup = match args.setup.as_ref() {
        Some(path) => load_setup(path)?,
        None => load_builtin_setup(&args.scenario)?,
    };

    let mut stats = BattleStats {
        samples: args.trials,
        player_wins: 0,
        monster_wins: 0,
        draws: 0,
        avg_rounds: 0.0,
    };
    let mut win_rounds: Vec<u32> = Vec::with_capacity(args.trials as usize);
    let mut total_rounds = 0u64;
    let mut hp_left_on_wins = 0i64;

    for i in 0..args.trials {
        let res = run_battle(&setup, class, args.seed.wrapping_add(i as u64), args.max_rounds)?;
        if i == 0 && args.show_log {
            for line in &res.log {
                println!("{}", line);
            }
            println!();
        }
        total_rounds += res.rounds as u64;
        match res.winner.as_str() {
            "player" => {
                stats.player_wins += 1;
                win_rounds.push(res.rounds);
                hp_left_on_wins += res.player_hp_end as i64;
            }
            "monster" => stats.monster_wins += 1,
            _ => stats.draws += 1,
        }
    }
    if args.trials > 0 {
        stats.avg_rounds = total_rounds as f64 / args.trials as f64;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    win_rounds.sort_unstable();
    let trials_f = args.trials.max(1) as f64;
    let avg_hp_left = if stats.player_wins == 0 {
        0.0
    } else {
        hp_left_on_wins as f64 / stats.player_wins as f64
    };

    println!("simulate-vs results");
    println!("-------------------");
    println!("trials:             {}", args.trials);
    println!("opponent:           {}", setup.monster.name);
    println!("class:              {}", class);
    println!();
    println!("win rate:           {:.1}%", stats.player_wins as f64 / trials_f * 100.0);
    println!("loss rate:          {:.1}%", stats.monster_wins as f64 / trials_f * 100.0);
    println!("draw rate:          {:.1}%", stats.draws as f64 / trials_f * 100.0);
    println!("avg rounds:         {:.2}", stats.avg_rounds);
    println!("median rounds(win): {}", median(&win_rounds));
    println!("avg hp left (win):  {:.2}", avg_hp_left);

    Ok(())
}
