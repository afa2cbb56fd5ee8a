//! Headless Arena Runner
//!
//! Runs a scripted battle against a boss and prints the result. Each turn
//! every living player queues an attack; scheduler commands from the
//! orchestrator are honored with real sleeps so the pacing contract is
//! exercised end to end.

use std::collections::VecDeque;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tokio::time::{sleep, Duration};

use elemental_arena::battle::{
    BattleEvent, BattleOutcome, BattlePhase, Command, Orchestrator,
};
use elemental_arena::core::config::BattleConfig;
use elemental_arena::core::error::{ArenaError, Result};
use elemental_arena::providers::{build_session_roster, JsonFileProvider};

/// Headless Arena Runner - scripted boss battles
#[derive(Parser, Debug)]
#[command(name = "arena_runner")]
#[command(about = "Run a scripted elemental arena battle and print the result")]
struct Args {
    /// Boss slug to fight (looked up in the bosses file)
    #[arg(long, default_value = "fluorin")]
    boss: String,

    /// JSON file with an array of boss records
    #[arg(long)]
    bosses_file: Option<PathBuf>,

    /// JSON file with an array of player card records
    #[arg(long)]
    cards_file: Option<PathBuf>,

    /// Give up after this many turns (draw)
    #[arg(long, default_value_t = 50)]
    max_turns: u32,

    /// Skip all pacing sleeps (still honors command ordering)
    #[arg(long)]
    fast: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    outcome: String,
    turns: u32,
    boss_hp: i32,
    players_alive: usize,
    log_tail: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("elemental_arena=debug,arena_runner=info")
        .init();

    let args = Args::parse();

    let config = BattleConfig::default();
    config
        .validate()
        .map_err(ArenaError::ConfigError)?;

    let provider = JsonFileProvider::new(args.bosses_file.as_deref(), args.cards_file.as_deref());
    let roster = build_session_roster(&provider, &provider, &args.boss, &config);

    tracing::info!(
        boss = %roster.boss.name,
        players = roster.players.len(),
        "arena session starting"
    );

    let mut orch = Orchestrator::new(config, roster);
    let mut outcome: Option<BattleOutcome> = None;

    'battle: while orch.turn() < args.max_turns {
        if !matches!(orch.phase(), BattlePhase::AwaitingStart) {
            break;
        }

        orch.handle(BattleEvent::StartTurn);
        let actors: Vec<_> = orch.roster.living_players().map(|p| p.id).collect();
        for actor in actors {
            orch.handle(BattleEvent::Enqueue { actor });
        }

        let mut commands: VecDeque<Command> = orch.handle(BattleEvent::EndPlayerPhase).into();
        while let Some(command) = commands.pop_front() {
            match command {
                Command::Schedule { token, delay_ms } => {
                    if !args.fast {
                        sleep(Duration::from_millis(delay_ms)).await;
                    }
                    commands.extend(orch.handle(BattleEvent::Timer(token)));
                }
                Command::Notify(result) => {
                    outcome = Some(result);
                    break 'battle;
                }
            }
        }
    }

    orch.handle(BattleEvent::Teardown);

    let lines: Vec<String> = orch.log.iter().map(String::from).collect();
    let tail_start = lines.len().saturating_sub(10);

    let result = RunResult {
        outcome: match outcome {
            Some(BattleOutcome::Win) => "win".into(),
            Some(BattleOutcome::Lose) => "lose".into(),
            None => "draw".into(),
        },
        turns: orch.turn(),
        boss_hp: orch.roster.boss.hp,
        players_alive: orch.roster.living_players().count(),
        log_tail: lines[tail_start..].to_vec(),
    };

    match args.format.as_str() {
        "text" => {
            println!("Outcome: {} after {} turns", result.outcome, result.turns);
            println!("Boss hp: {}, players alive: {}", result.boss_hp, result.players_alive);
            for line in &result.log_tail {
                println!("  {line}");
            }
        }
        _ => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}
