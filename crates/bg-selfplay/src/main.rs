//! Backgammon self-play driver.
//!
//! Plays seeded games of random legal actions through the engine and prints
//! a summary of the results.

mod config;
mod runner;

use clap::Parser;
use config::SelfplayConfig;
use std::path::PathBuf;

/// Plays random backgammon games and reports the results.
#[derive(Parser)]
#[command(name = "bg-selfplay")]
#[command(about = "Plays random backgammon games and reports the results")]
struct Args {
    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of games to play
    #[arg(long)]
    games: Option<u32>,

    /// Base seed for dice and action choice
    #[arg(long)]
    seed: Option<u64>,

    /// Abandon a game after this many actions
    #[arg(long)]
    max_actions: Option<u32>,

    /// Resolve legal actions without memoization
    #[arg(long)]
    exhaustive: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Applies command-line overrides on top of file settings.
    fn apply(&self, mut config: SelfplayConfig) -> SelfplayConfig {
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_actions) = self.max_actions {
            config.max_actions = max_actions;
        }
        config.exhaustive_search |= self.exhaustive;
        config
    }
}

fn main() -> anyhow::Result<()> {
    // Logs on stderr; stdout carries the summary.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => SelfplayConfig::load_from(path)?,
        None => SelfplayConfig::load()?,
    };
    let config = args.apply(file_config);

    tracing::info!(
        games = config.games,
        seed = config.seed,
        max_actions = config.max_actions,
        exhaustive = config.exhaustive_search,
        "Starting self-play"
    );

    let summary = runner::run(&config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("games:        {}", summary.games);
        println!("A wins:       {}", summary.wins_a);
        println!("B wins:       {}", summary.wins_b);
        println!("unfinished:   {}", summary.unfinished);
        println!(
            "kinds:        {} single / {} gammon / {} backgammon",
            summary.singles, summary.gammons, summary.backgammons
        );
        println!("net score:    {:+}", summary.net_score);
        println!("mean actions: {:.1}", summary.mean_actions());
        println!("search nodes: {}", summary.search_nodes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file_values() {
        let args = Args::parse_from(["bg-selfplay", "--games", "5", "--exhaustive"]);
        let config = args.apply(SelfplayConfig {
            games: 50,
            seed: 9,
            max_actions: 100,
            exhaustive_search: false,
        });
        assert_eq!(config.games, 5);
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_actions, 100);
        assert!(config.exhaustive_search);
    }
}
