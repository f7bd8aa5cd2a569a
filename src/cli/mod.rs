//! CLI module for surveyor

mod args;

pub use args::{Args, Command};

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::export::JsonExporter;
use crate::graph;
use crate::model::RankDirection;
use crate::projection::Projector;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Draw {
            graph,
            output,
            config,
            direction,
            compact,
            verbose,
        } => {
            let cfg = effective_config(config.as_deref(), output, direction, compact)?;

            if verbose {
                println!("Graph: {}", graph.display());
                println!("Output: {}", cfg.output.path.display());
                println!("Direction: {:?}", cfg.layout.direction);
                println!("Pretty: {}", cfg.output.pretty);
            }

            println!("Loading graph...");
            let system_graph = graph::read_graph(&graph)?;
            let graph_stats = system_graph.stats();
            println!(
                "Loaded {} vertices, {} interactions",
                graph_stats.vertices, graph_stats.interactions
            );

            println!("Deriving views...");
            let model = Projector::new(&cfg).project(&system_graph);
            let stats = model.stats();
            println!(
                "Derived {} systems, {} containers, {} components, {} views",
                stats.software_systems, stats.containers, stats.components, stats.views
            );
            if verbose && stats.synthetic_systems > 0 {
                println!(
                    "Synthesized {} system(s) from item references",
                    stats.synthetic_systems
                );
            }

            JsonExporter::new(cfg.output.pretty).export(&model, &cfg.output.path)?;
            println!(
                "Architecture document written to: {}",
                cfg.output.path.display()
            );

            Ok(())
        }

        Command::Check {
            graph,
            config,
            verbose,
        } => {
            let cfg = effective_config(config.as_deref(), None, None, false)?;

            let system_graph = graph::read_graph(&graph)?;
            let graph_stats = system_graph.stats();
            println!(
                "Graph OK: {} vertices, {} interactions, {} compositions, {} aggregations, {} items",
                graph_stats.vertices,
                graph_stats.interactions,
                graph_stats.compositions,
                graph_stats.aggregations,
                graph_stats.items
            );

            let model = Projector::new(&cfg).project(&system_graph);
            let stats = model.stats();
            println!(
                "Model OK: {} systems ({} synthetic), {} containers, {} components, {} persons, {} relationships, {} views",
                stats.software_systems,
                stats.synthetic_systems,
                stats.containers,
                stats.components,
                stats.persons,
                stats.relationships,
                stats.views
            );

            if verbose {
                for view in model.views() {
                    println!(
                        "  {} ({} elements, {} relationships)",
                        view.key,
                        view.elements.len(),
                        view.relationships.len()
                    );
                }
            }

            Ok(())
        }

        Command::Version => {
            println!("surveyor {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Resolve the effective configuration from file and CLI arguments
///
/// An explicitly named config file must load; the default file is
/// optional. CLI arguments win over file values.
fn effective_config(
    config: Option<&Path>,
    output: Option<PathBuf>,
    direction: Option<String>,
    compact: bool,
) -> Result<Config> {
    let mut cfg = match config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    };

    let direction = match direction {
        Some(raw) => Some(
            raw.parse::<RankDirection>()
                .map_err(Error::ConfigValidation)?,
        ),
        None => None,
    };

    cfg.merge_cli(output, direction, compact);
    cfg.validate()?;
    Ok(cfg)
}
