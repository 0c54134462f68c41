use crate::cli::BatchArgs;
use crate::config::PartialSimulationConfig;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use motorflux::{
    core::io::writer::{write_records, write_records_to_path},
    engine::config::{InputSpec, SimulationConfig},
    engine::progress::ProgressReporter,
    workflows::{self, batch::BatchResult},
};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Placeholder replaced by each dihedral name before its run.
const TEMPLATE_NAME: &str = "template";

pub fn run(args: BatchArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialSimulationConfig::load(&args.model)?;
    let template = partial_config.merge_with_cli(&args.model, Some(TEMPLATE_NAME))?;
    if template.input != InputSpec::FromSource {
        return Err(CliError::Argument(
            "`batch` reads histograms from a data set; use `simulate` for explicit files."
                .to_string(),
        ));
    }

    let names = resolve_names(&args, &template)?;
    info!("Running {} dihedral(s) from '{}'.", names.len(), template.source);

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = workflows::batch::run(&template, &names, &reporter);

    for (name, e) in result.failures() {
        error!(name = %name, "Simulation failed: {}", e);
        eprintln!("✗ {}: {}", name, e);
    }
    let succeeded = result.successes().count();
    if succeeded == 0 {
        return Err(CliError::Other(anyhow::anyhow!(
            "All {} simulation(s) failed.",
            names.len()
        )));
    }

    if let Some(dir) = &args.profiles_dir {
        write_profiles(&result, dir)?;
    }

    let summaries = result.summaries();
    match &args.output {
        Some(path) => {
            write_records_to_path(&summaries, path).map_err(|e| CliError::Output {
                path: path.clone(),
                source: e.into(),
            })?;
            println!(
                "✓ Summary of {} dihedral(s) written to: {}",
                summaries.len(),
                path.display()
            );
        }
        None => {
            write_records(&summaries, std::io::stdout().lock())
                .map_err(|e| CliError::Other(e.into()))?;
        }
    }

    Ok(())
}

fn resolve_names(args: &BatchArgs, template: &SimulationConfig) -> Result<Vec<String>> {
    if let Some(list) = &args.names {
        return parser::parse_name_list(list).map_err(|e| CliError::Argument(e.to_string()));
    }
    if let Some(path) = &args.names_file {
        let content = fs::read_to_string(path)?;
        return parser::parse_names_file(&content).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        });
    }

    info!("No names given; discovering dihedrals below the data root.");
    let names = workflows::batch::discover_names(template)?;
    if names.is_empty() {
        return Err(CliError::Config(format!(
            "No dihedrals with both histograms were found for '{}'.",
            template.source
        )));
    }
    Ok(names)
}

fn write_profiles(result: &BatchResult, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for simulation in result.successes() {
        let path = dir.join(format!("{}.csv", simulation.name));
        write_records_to_path(&simulation.bin_records(), &path).map_err(|e| {
            CliError::Output {
                path: path.clone(),
                source: e.into(),
            }
        })?;
    }
    info!("Per-bin profiles written to {:?}", dir);
    Ok(())
}
