//! quest_sim - Headless driver for quest_core sessions
//!
//! Loads a catalog and rules, replays a movement script (or a seeded random
//! wander) and prints where the run ended up.

mod replay;

use clap::Parser;
use quest_core::{Catalog, GameRules, GameSession};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use replay::{parse_moves, random_moves, replay, RunSummary};
use std::error::Error;
use std::path::PathBuf;

const DEFAULT_CATALOG: &str = include_str!("../data/catalog.json");
const DEFAULT_RULES: &str = include_str!("../data/rules.toml");

/// Command line arguments for the simulator.
#[derive(Parser, Debug)]
#[command(name = "quest_sim")]
#[command(about = "Replay a movement script through a quest_core game session")]
#[command(version)]
struct Args {
    /// Catalog JSON (map, classes, enemies, objects, treasures)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Rules TOML
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Random seed for spawning
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Movement script of U/D/L/R keys; a random wander is used when absent
    #[arg(short, long)]
    moves: Option<String>,

    /// Length of the random wander
    #[arg(long, default_value_t = 500)]
    steps: usize,

    /// Index of the item taken from every opened chest
    #[arg(long, default_value_t = 0)]
    treasure_pick: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .format_timestamp(None)
        .init();

    let catalog = match &args.catalog {
        Some(path) => Catalog::load_json(path)?,
        None => Catalog::from_json_str(DEFAULT_CATALOG)?,
    };
    let rules = match &args.rules {
        Some(path) => GameRules::load(path)?,
        None => GameRules::parse(DEFAULT_RULES)?,
    };

    log::info!("Starting session with seed {}", args.seed);
    let mut session = GameSession::new(&catalog, rules, ChaCha8Rng::seed_from_u64(args.seed))?;

    let moves = match &args.moves {
        Some(script) => parse_moves(script)?,
        None => random_moves(args.steps, &mut ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(1))),
    };

    let summary = replay(&mut session, &moves, args.treasure_pick)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("Status: {}", summary.status);
    println!("Moves: {}", summary.moves_taken);
    println!("Position: {}", summary.position);
    println!(
        "Player: {} ({})",
        summary.player_name,
        summary.class.as_deref().unwrap_or("no class")
    );
    println!("Stats: {}", summary.stats.summary());
    if summary.equipped.is_empty() {
        println!("Equipped: nothing");
    } else {
        println!("Equipped: {}", summary.equipped.join(", "));
    }
    println!(
        "Combats: {} | Enemies defeated: {} | Boss spawned: {}",
        summary.combats, summary.enemies_defeated, summary.boss_spawned
    );
}
