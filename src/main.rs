//! Gomoku GUI and analysis CLI
//!
//! - `gomoku` - play against the arbiter in a window
//! - `gomoku analyze H8 H9 ...` - replay moves and print the advisor report
//! - `--mode single` - one holistic advisor instead of the council

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use gomoku::board::BoardState;
use gomoku::engine::{Arbiter, BoardInfo, Mode};
use gomoku::search::CriticalKind;
use gomoku::ui::GomokuApp;
use gomoku::{check_winner, find_critical_move, Config, Stone};

/// Gomoku with an advisor council
#[derive(Parser)]
#[command(name = "gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side played by the human (overrides the config file)
    #[arg(long, value_enum)]
    human: Option<Side>,

    /// Advisor council or a single advisor (overrides the config file)
    #[arg(long, value_enum)]
    mode: Option<CliMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay alternating moves (Black first) and print the analysis
    Analyze {
        /// Coordinates such as H8 H9 I8
        moves: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Black,
    White,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliMode {
    Council,
    Single,
}

impl From<CliMode> for Mode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Council => Mode::Council,
            CliMode::Single => Mode::Single,
        }
    }
}

impl From<Side> for Stone {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Stone::Black,
            Side::White => Stone::White,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(side) = cli.human {
        config.human_side = side.into();
    }
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    match cli.command {
        Some(Commands::Analyze { moves }) => analyze(&moves, &config),
        None => run_gui(config),
    }
}

fn analyze(moves: &[String], config: &Config) -> Result<()> {
    let state = BoardState::replay(moves).context("cannot replay moves")?;
    let side = state.to_move();
    let info = BoardInfo::new(&state, side, config.candidate_range);

    println!("{}\n", info.board_text);
    if let Some(win) = check_winner(&state) {
        let line: Vec<String> = win.line.iter().map(ToString::to_string).collect();
        println!("{} has won: {}", win.winner.name(), line.join(" "));
        return Ok(());
    }

    println!("{} to move (move {})\n", side.name(), state.move_count() + 1);
    println!("{}", info.analysis_text);
    if !info.threats.is_empty() {
        println!("Threats: {}", info.threats.join(", "));
    }
    match find_critical_move(&state, side) {
        Some(critical) if critical.kind == CriticalKind::Win => {
            println!("Critical: {} wins at {}", side.name(), critical.pos)
        }
        Some(critical) => println!("Critical: {} must block at {}", side.name(), critical.pos),
        None => println!("Critical: none"),
    }
    println!("Candidates: {}", info.candidate_moves.join(" "));

    let arbiter = Arbiter::local_with_mode(config.mode).with_candidate_range(config.candidate_range);
    let mut rng = config.rng();
    let decision = arbiter.decide_with_rng(&state, side, &mut rng)?;
    println!(
        "Suggested: {} via {:?} ({})",
        decision.pos, decision.route, decision.reason
    );
    Ok(())
}

fn run_gui(config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([860.0, 620.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
