use crate::cli::SimulateArgs;
use crate::config::PartialSimulationConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use motorflux::{
    core::io::writer::write_records_to_path, engine::progress::ProgressReporter, workflows,
};
use tracing::info;

pub fn run(args: SimulateArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialSimulationConfig::load(&args.model)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args.model, args.name.as_deref())?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        name = %config.name,
        source = %config.source,
        "Invoking the core simulation workflow..."
    );
    let result = workflows::simulate::run(&config, &reporter)?;

    println!("{}", result.name);
    print!("{}", result.report());

    if let Some(output) = &args.output {
        info!("Writing per-bin profile to {:?}", output);
        write_records_to_path(&result.bin_records(), output).map_err(|e| CliError::Output {
            path: output.clone(),
            source: e.into(),
        })?;
        println!("✓ Per-bin profile written to: {}", output.display());
    }

    Ok(())
}
