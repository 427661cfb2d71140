//! Command line front-end for the toroidal Game of Life

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use toroidal_life::{
    build_grid,
    config::{CliOverrides, Settings},
    game_of_life::{load_state, save_state, Coord, Pattern, StateFormat},
    play::Player,
    telemetry::init_tracing,
    utils::{CanvasMapper, ColorOutput, GridFormatter},
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "toroidal_life")]
#[command(about = "Conway's Game of Life on a toroidal grid")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new grid and save it
    New {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of columns (overrides config)
        #[arg(long)]
        columns: Option<usize>,

        /// Number of rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Start with every cell dead
        #[arg(long)]
        empty: bool,

        /// Seed for the random initial state
        #[arg(long)]
        seed: Option<u64>,

        /// Pattern to stamp onto the grid
        #[arg(short, long, value_enum)]
        pattern: Option<Pattern>,

        /// Origin of the pattern as COLUMN,ROW
        #[arg(long, default_value = "0,0")]
        at: Coord,

        /// Output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (defaults to the file extension)
        #[arg(short, long, value_enum)]
        format: Option<StateFormat>,
    },

    /// Advance a saved grid by some generations
    Step {
        /// Saved grid
        input: PathBuf,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Where to write the result (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (defaults to the file extension)
        #[arg(short, long, value_enum)]
        format: Option<StateFormat>,
    },

    /// Flip cells of a saved grid
    Toggle {
        /// Saved grid
        input: PathBuf,

        /// Cell to flip as COLUMN,ROW (repeatable)
        #[arg(long = "cell")]
        cells: Vec<Coord>,

        /// Canvas click as X,Y in pixels (repeatable)
        #[arg(long = "click", value_parser = parse_click)]
        clicks: Vec<(usize, usize)>,

        /// Configuration file path (for the cell size in pixels)
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Where to write the result (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a saved grid
    Show {
        /// Saved grid
        input: PathBuf,

        /// Include row and column numbers
        #[arg(long)]
        coords: bool,
    },

    /// Run the simulation in the terminal
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Start from a saved grid instead of a fresh one
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of columns (overrides config)
        #[arg(long)]
        columns: Option<usize>,

        /// Number of rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Start with every cell dead
        #[arg(long)]
        empty: bool,

        /// Seed for the random initial state
        #[arg(long)]
        seed: Option<u64>,

        /// Pattern to stamp onto the starting grid
        #[arg(short, long, value_enum)]
        pattern: Option<Pattern>,

        /// Stop after this many generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        tick: Option<u64>,

        /// Save the final grid when the loop stops
        #[arg(short, long)]
        save: bool,

        /// Output file for --save (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::New { config, columns, rows, empty, seed, pattern, at, output, format } => {
            let overrides = CliOverrides {
                columns,
                rows,
                empty,
                seed,
                output,
                format,
                ..Default::default()
            };
            new_command(config, overrides, pattern, at)
        }
        Commands::Step { input, generations, output, format } => {
            step_command(input, generations, output, format)
        }
        Commands::Toggle { input, cells, clicks, config, output } => {
            toggle_command(input, cells, clicks, config, output)
        }
        Commands::Show { input, coords } => show_command(input, coords),
        Commands::Play {
            config, input, columns, rows, empty, seed, pattern,
            generations, tick, save, output
        } => {
            let overrides = CliOverrides {
                columns,
                rows,
                empty,
                seed,
                tick_millis: tick,
                generations,
                output,
                format: None,
            };
            play_command(config, input, overrides, pattern, save)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn parse_click(s: &str) -> std::result::Result<(usize, usize), String> {
    s.parse::<Coord>()
        .map(|point| (point.column, point.row))
        .map_err(|e| e.to_string())
}

/// Load settings, falling back to defaults when the file is absent
fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        info!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn load_grid(path: &Path) -> Result<toroidal_life::Grid> {
    load_state(path, StateFormat::from_path(path))
        .with_context(|| format!("Failed to load grid from {}", path.display()))
}

fn new_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    pattern: Option<Pattern>,
    origin: Coord,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    let mut grid = build_grid(&settings)
        .context("Failed to construct grid")?;
    if let Some(pattern) = pattern {
        pattern.stamp(&mut grid, origin)
            .with_context(|| format!("Failed to place {} at {}", pattern.name(), origin))?;
    }

    save_state(&grid, &settings.output.path, settings.output.format)
        .with_context(|| format!("Failed to save grid to {}", settings.output.path.display()))?;

    println!("{}", GridFormatter::format_stats(&grid, 0));
    println!("{}", ColorOutput::success(&format!(
        "Grid saved to {}", settings.output.path.display()
    )));
    Ok(())
}

fn step_command(
    input: PathBuf,
    generations: usize,
    output: Option<PathBuf>,
    format: Option<StateFormat>,
) -> Result<()> {
    let mut grid = load_grid(&input)?;
    grid.advance_by(generations);

    let output = output.unwrap_or_else(|| input.clone());
    let format = format.unwrap_or_else(|| StateFormat::from_path(&output));
    save_state(&grid, &output, format)
        .with_context(|| format!("Failed to save grid to {}", output.display()))?;

    println!("{}", GridFormatter::format_stats(&grid, generations));
    println!("{}", ColorOutput::success(&format!(
        "Advanced {} generation(s), saved to {}", generations, output.display()
    )));
    Ok(())
}

fn toggle_command(
    input: PathBuf,
    mut cells: Vec<Coord>,
    clicks: Vec<(usize, usize)>,
    config_path: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let mut grid = load_grid(&input)?;

    let mapper = CanvasMapper::new(settings.display.cell_pixels);
    for (x, y) in clicks {
        match mapper.cell_at(&grid, x, y) {
            Ok(coord) => cells.push(coord),
            Err(err) => warn!(x, y, %err, "ignoring click outside the grid"),
        }
    }

    for coord in cells {
        let alive = grid.toggle(coord)
            .with_context(|| format!("Failed to toggle {}", coord))?;
        println!("{} is now {}", coord, if alive { "alive" } else { "dead" });
    }

    let output = output.unwrap_or(input);
    save_state(&grid, &output, StateFormat::from_path(&output))
        .with_context(|| format!("Failed to save grid to {}", output.display()))?;
    Ok(())
}

fn show_command(input: PathBuf, coords: bool) -> Result<()> {
    let grid = load_grid(&input)?;

    if coords {
        println!("{}", GridFormatter::format_grid_with_coords(&grid));
    } else {
        println!("{}", GridFormatter::format_grid_compact(&grid));
    }
    println!("{}", GridFormatter::format_stats(&grid, 0));
    Ok(())
}

fn play_command(
    config_path: PathBuf,
    input: Option<PathBuf>,
    overrides: CliOverrides,
    pattern: Option<Pattern>,
    save: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    let mut grid = match input {
        Some(ref path) => load_grid(path)?,
        None => build_grid(&settings).context("Failed to construct grid")?,
    };
    if let Some(pattern) = pattern {
        pattern.stamp(&mut grid, Coord::new(0, 0))
            .with_context(|| format!("Failed to place {}", pattern.name()))?;
    }

    let style = settings.display.style;
    let player = Player::new(grid, settings.playback.tick());
    player.play();

    let mut generation = 0;
    let total = player.run(settings.playback.max_generations, |grid| {
        generation += 1;
        print!("\x1b[2J\x1b[H{}", GridFormatter::format(grid, style));
        println!("{}", GridFormatter::format_stats(grid, generation));
    });

    println!("{}", ColorOutput::info(&format!("Stopped after {} generation(s)", total)));

    if save {
        save_state(&player.snapshot(), &settings.output.path, settings.output.format)
            .with_context(|| format!("Failed to save grid to {}", settings.output.path.display()))?;
        println!("{}", ColorOutput::success(&format!(
            "Grid saved to {}", settings.output.path.display()
        )));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Skipped: {} (already exists)", config_path.display()
        )));
    }

    for pattern in Pattern::ALL {
        let path = patterns_dir.join(format!("{}.json", pattern.name()));
        if path.exists() && !force {
            println!("Skipped: {} (already exists)", path.display());
            continue;
        }
        let grid = pattern.on_blank_grid(2)?;
        save_state(&grid, &path, StateFormat::Json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: toroidal_life play --input {}", patterns_dir.join("glider.json").display());

    Ok(())
}
