//! Command line front end for the terminal Game of Life

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_term::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{
        create_example_boards, load_board_file, random_population_sized, BirthRule,
        LifeEngine, Population,
    },
    menu::Menu,
    simulation::{SleepPacer, Simulation},
    utils::{ColorOutput, ReportFormatter},
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_term")]
#[command(about = "Conway's Game of Life in the terminal")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a board until it stops changing
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board file (.txt); a random board is used when neither this nor
        /// the config names one
        #[arg(short, long)]
        board: Option<PathBuf>,

        /// Board width for random boards (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Board height for random boards (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Delay between generations in milliseconds (overrides config)
        #[arg(short, long)]
        delay: Option<u64>,

        /// Birth rule (overrides config)
        #[arg(long, value_enum)]
        rule: Option<BirthRule>,

        /// Stop after this many generations
        #[arg(short, long)]
        max_generations: Option<usize>,

        /// Disable colored cells
        #[arg(long)]
        no_color: bool,

        /// Print the final report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive menu
    Interactive {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board file to start with
        #[arg(short, long)]
        board: Option<PathBuf>,
    },

    /// Create an example configuration and boards
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Show how a board file is interpreted
    Inspect {
        /// Board file (.txt)
        board: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            board,
            width,
            height,
            delay,
            rule,
            max_generations,
            no_color,
            json,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                delay_ms: delay,
                birth: rule,
                board_file: board,
                no_color,
                json,
            };
            run_command(config, overrides, max_generations)
        }
        Commands::Interactive { config, board } => interactive_command(config, board),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Inspect { board, config } => inspect_command(config, board),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    max_generations: Option<usize>,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let population = match settings.input.board_file {
        Some(ref path) => load_board_file(path, settings.board.max_dimension)
            .with_context(|| format!("Failed to load board from {}", path.display()))?,
        None => random_board(&settings)?,
    };
    settings.display.alive_glyph = population.alive_glyph;
    settings.display.dead_glyph = population.dead_glyph;

    let mut engine = LifeEngine::from_population(
        &population,
        settings.board.max_dimension,
        settings.rules.birth,
    )
    .context("Failed to create grid")?;

    let mut simulation = Simulation::from_settings(&settings).with_max_generations(max_generations);
    simulation.clear_between_frames = io::stdout().is_terminal();

    let mut stdout = io::stdout().lock();
    let report = simulation
        .run(&mut engine, &mut SleepPacer, &mut stdout)
        .context("Failed to render simulation")?;

    match settings.output.format {
        OutputFormat::Text => print!("\n{}", ReportFormatter::format_text(&report)),
        OutputFormat::Json => println!("{}", ReportFormatter::format_json(&report)?),
    }
    Ok(())
}

/// Fill the configured board size with a random population
fn random_board(settings: &Settings) -> Result<Population> {
    let population = random_population_sized(
        &mut rand::thread_rng(),
        settings.board.width,
        settings.board.height,
        settings.board.max_dimension,
    )?;
    Ok(population)
}

fn interactive_command(config_path: PathBuf, board: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(&config_path)?;

    let stdin = io::stdin().lock();
    let stdout = io::stdout();
    let mut menu = Menu::new(stdin, stdout, settings.clone(), Box::new(SleepPacer));

    if let Some(path) = board.or(settings.input.board_file) {
        match load_board_file(&path, settings.board.max_dimension) {
            Ok(population) => menu = menu.with_population(population)?,
            Err(err) => println!("{}", ColorOutput::error(&err.to_string())),
        }
    }

    menu.run()
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up boards and configuration..."));

    let config_dir = directory.join("config");
    let boards_dir = directory.join("boards");

    for dir in [&config_dir, &boards_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let mut conway = Settings::default();
    conway.rules.birth = BirthRule::ExactlyThree;

    for (name, settings) in [("default.yaml", Settings::default()), ("conway.yaml", conway)] {
        let config_path = config_dir.join(name);
        if !config_path.exists() || force {
            settings
                .to_file(&config_path)
                .with_context(|| format!("Failed to create {}", config_path.display()))?;
            println!("Created: {}", config_path.display());
        } else {
            println!("Skipped: {} (already exists)", config_path.display());
        }
    }

    create_example_boards(&boards_dir).context("Failed to create example boards")?;
    println!("Created example boards in: {}", boards_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --board {}", boards_dir.join("glider.txt").display());

    Ok(())
}

fn inspect_command(config_path: PathBuf, board: PathBuf) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let population = load_board_file(&board, settings.board.max_dimension)
        .with_context(|| format!("Failed to load board from {}", board.display()))?;

    print!("{}", ReportFormatter::format_population(&population));
    println!();
    print!("{}", life_term::game_of_life::io::population_to_string(&population));
    Ok(())
}
