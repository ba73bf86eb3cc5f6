mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "latinsay-cli", about = "Latin sayings flashcards", version)]
struct Cli {
    /// Config file (default: <config dir>/latinsay/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding learning data
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Saying feed file
    #[arg(long, global = true)]
    feed: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Study cards interactively
    Study {
        /// Stop after this many cards
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        rounds: Option<u64>,
    },

    /// Show which card would come after the given one
    Next {
        /// Card number currently on screen (1-based)
        current: usize,
    },

    /// Show learning statistics
    Stats,

    /// List cards with their difficulty
    Cards {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },

    /// Manage favorite cards
    #[command(subcommand)]
    Favorites(FavoritesCommand),

    /// Clear all learning progress
    Reset {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorite cards
    List,
    /// Mark a card as favorite
    Add {
        /// Card number (1-based, see `cards`)
        card: usize,
    },
    /// Unmark a favorite card
    Remove {
        /// Card number (1-based, see `cards`)
        card: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    let mut app = app::App::new(app::Overrides {
        config: cli.config,
        data_dir: cli.data_dir,
        feed: cli.feed,
    })?;

    match cli.command {
        // No subcommand → study
        None => commands::study::run(&mut app, None, use_color)?,
        Some(Command::Study { rounds }) => commands::study::run(&mut app, rounds, use_color)?,
        Some(Command::Next { current }) => {
            commands::next::run(&app, current, &cli.format, use_color)?;
        }
        Some(Command::Stats) => commands::stats::run(&app, &cli.format, use_color)?,
        Some(Command::Cards { favorites }) => {
            commands::cards::run(&app, favorites, &cli.format, use_color)?;
        }
        Some(Command::Favorites(subcmd)) => match subcmd {
            FavoritesCommand::List => commands::favorites::run_list(&app, &cli.format)?,
            FavoritesCommand::Add { card } => commands::favorites::run_add(&mut app, card)?,
            FavoritesCommand::Remove { card } => commands::favorites::run_remove(&mut app, card)?,
        },
        Some(Command::Reset { yes }) => commands::reset::run(&mut app, yes)?,
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_must_be_positive() {
        assert!(Cli::try_parse_from(["latinsay-cli", "study", "--rounds", "0"]).is_err());

        let cli = Cli::try_parse_from(["latinsay-cli", "study", "--rounds", "3"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Study { rounds: Some(3) })));
    }

    #[test]
    fn test_no_subcommand_defaults_to_study() {
        let cli = Cli::try_parse_from(["latinsay-cli"]).unwrap();
        assert!(cli.command.is_none());
    }
}
