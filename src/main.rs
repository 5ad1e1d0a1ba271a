use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use elimination_core::constants::{DEBUG_LOG_DIRECTIVE, DEFAULT_LOG_DIRECTIVE};
use elimination_core::{division_report, read_season, team_report, EliminationError, RemainingPolicy};

/// Report which teams in a division can no longer finish first.
///
/// Reads a season file (team count, then one line per team:
/// `name wins losses remaining g_1 ... g_N`) and prints, for every team,
/// either the subset of teams that eliminates it or that it is still alive.
#[derive(Parser, Debug)]
#[command(name = "elimination", about, long_about = None)]
struct Args {
    /// Season file to read
    season: PathBuf,

    /// Only report this team
    #[arg(short, long)]
    team: Option<String>,

    /// Accept remaining counts that include games outside the division
    #[arg(long)]
    allow_outside_games: bool,

    /// Log each decision to stderr
    #[arg(short, long)]
    debug: bool,
}

fn log_directive(debug: bool) -> &'static str {
    if debug {
        DEBUG_LOG_DIRECTIVE
    } else {
        DEFAULT_LOG_DIRECTIVE
    }
}

fn setup_logging(debug: bool) {
    let directive = log_directive(debug);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn main() -> Result<(), EliminationError> {
    let args = Args::parse();
    setup_logging(args.debug);

    let policy = if args.allow_outside_games {
        RemainingPolicy::AllowOutsideGames
    } else {
        RemainingPolicy::Exact
    };
    let division = read_season(&args.season, policy)?;
    tracing::info!(
        season = %args.season.display(),
        teams = division.number_of_teams(),
        "season loaded"
    );

    match args.team {
        Some(team) => println!("{}", team_report(&division, &team)?),
        None => {
            for line in division_report(&division) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
