//! Waypoint CLI - Route planning over weighted graphs
//!
//! Finds least-cost delivery routes (optionally under simulated traffic) and
//! sequences interdependent tasks with a minimum spanning tree.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod graph_file;
mod output;

use commands::*;
use config::WaypointConfig;
use output::{OutputConfig, OutputFormat};

/// Route planning over weighted graphs.
///
/// Waypoint loads a graph from a TOML file and answers routing questions:
/// the cheapest route to every destination, a single route under simulated
/// traffic, or the order in which to tackle connected tasks.
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(author, version)]
#[command(about = "Route planning over weighted graphs")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  waypoint routes data/delivery.toml --from Centro
  waypoint route data/delivery.toml Centro Ajijic --traffic --seed 7
  waypoint tree data/tasks.toml --start Design --format tree
  waypoint matrix data/delivery.toml --from Centro,Chapala")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Config file (defaults to ./.waypointrc.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compact output: borderless tables, single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Wrap tables at this many columns instead of the terminal width
    #[arg(long, global = true, value_name = "COLUMNS")]
    width: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimal route from one node to every destination
    Routes {
        /// Graph file (TOML)
        graph: PathBuf,

        /// Source node
        #[arg(short, long)]
        from: String,
    },

    /// Least-cost route between two nodes
    #[command(visible_alias = "r")]
    Route {
        /// Graph file (TOML)
        graph: PathBuf,

        /// Source node
        from: String,

        /// Destination node
        to: String,

        /// Re-weight every edge by a random traffic factor
        #[arg(short, long)]
        traffic: bool,

        /// Seed for reproducible traffic
        #[arg(long, requires = "traffic")]
        seed: Option<u64>,

        /// Lowest traffic factor (default 1.0)
        #[arg(long, requires = "traffic")]
        min_factor: Option<f64>,

        /// Highest traffic factor (default 3.0)
        #[arg(long, requires = "traffic")]
        max_factor: Option<f64>,
    },

    /// Minimum spanning tree grown from a start node
    #[command(visible_alias = "mst")]
    Tree {
        /// Graph file (TOML)
        graph: PathBuf,

        /// Start node
        #[arg(short, long)]
        start: String,

        /// Print Graphviz DOT instead of the selected format
        #[arg(long)]
        dot: bool,
    },

    /// Static distances from several sources
    Matrix {
        /// Graph file (TOML)
        graph: PathBuf,

        /// Comma-separated sources (default: every node)
        #[arg(long, value_delimiter = ',')]
        from: Option<Vec<String>>,
    },

    /// Summarize a graph file
    Inspect {
        /// Graph file (TOML)
        graph: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Show installation instructions instead of generating completions
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = WaypointConfig::load(cli.config.as_deref(), std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    let mut output_config = OutputConfig::auto_detect(format, config.use_color());
    if cli.compact || config.compact() {
        output_config = output_config.compact();
    }
    if let Some(width) = cli.width {
        output_config = output_config.with_width(width);
    }
    if !output_config.use_colors() {
        colored::control::set_override(false);
    } else if config.use_color() == Some(true) {
        colored::control::set_override(true);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Routes { graph, from } => routes::run(&graph, &from, output_config),
        Commands::Route {
            graph,
            from,
            to,
            traffic,
            seed,
            min_factor,
            max_factor,
        } => {
            let traffic = traffic.then(|| route::TrafficOptions {
                range: config.factor_range(min_factor, max_factor),
                seed: config.traffic_seed(seed),
            });
            route::run(&graph, &from, &to, traffic, output_config)
        }
        Commands::Tree { graph, start, dot } => tree::run(&graph, &start, dot, output_config),
        Commands::Matrix { graph, from } => matrix::run(&graph, from, output_config),
        Commands::Inspect { graph } => inspect::run(&graph, output_config),
        Commands::Completions {
            shell,
            instructions,
        } => {
            if instructions {
                completions::run_instructions(shell, output_config)
            } else {
                let mut cmd = Cli::command();
                completions::generate(shell, &mut cmd);
                Ok(())
            }
        }
    }
}
