use super::simulate::{self, SimulationResult};
use crate::core::io::writer::SummaryRecord;
use crate::engine::config::{ConfigError, SimulationConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub type BatchOutcome = (String, Result<SimulationResult, EngineError>);

#[derive(Debug)]
pub struct BatchResult {
    /// One outcome per requested name, in input order.
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchResult {
    pub fn successes(&self) -> impl Iterator<Item = &SimulationResult> {
        self.outcomes.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &EngineError)> {
        self.outcomes
            .iter()
            .filter_map(|(name, r)| r.as_ref().err().map(|e| (name.as_str(), e)))
    }

    /// Summary rows of the successful runs, largest |intrasurface flux| first.
    pub fn summaries(&self) -> Vec<SummaryRecord> {
        let mut records: Vec<SummaryRecord> =
            self.successes().map(|r| r.summary_record()).collect();
        records.sort_by(|a, b| {
            b.intrasurface_flux
                .abs()
                .total_cmp(&a.intrasurface_flux.abs())
        });
        records
    }
}

/// Lists every dihedral of the configured data set that has both histograms.
pub fn discover_names(config: &SimulationConfig) -> Result<Vec<String>, EngineError> {
    let layout = config.source.layout().ok_or_else(|| {
        ConfigError::Invalid(format!(
            "data source '{}' cannot be listed; give names explicitly",
            config.source
        ))
    })?;
    let root = config
        .data_root
        .as_deref()
        .ok_or(ConfigError::MissingParameter("data_root"))?;
    layout
        .discover_names(root)
        .map_err(|source| EngineError::Discovery {
            path: root.join(layout.directory).join(layout.unbound_dir),
            source,
        })
}

/// Runs the simulation of `template` once per name.
///
/// A failing name does not stop the others; its error is kept in the outcome.
#[instrument(skip_all, name = "batch_workflow", fields(count = names.len()))]
pub fn run(
    template: &SimulationConfig,
    names: &[String],
    reporter: &ProgressReporter,
) -> BatchResult {
    info!(source = %template.source, "Starting batch of {} dihedral(s).", names.len());
    reporter.report(Progress::PhaseStart {
        name: "Simulating Dihedrals",
    });
    reporter.report(Progress::TaskStart {
        total_steps: names.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = names.iter();

    #[cfg(feature = "parallel")]
    let iterator = names.par_iter();

    let outcomes: Vec<BatchOutcome> = iterator
        .map(|name| {
            let config = template.for_name(name);
            let result = simulate::run(&config, &ProgressReporter::new());
            if let Err(e) = &result {
                warn!(name = %name, error = %e, "Simulation failed.");
            }
            reporter.report(Progress::TaskIncrement);
            (name.clone(), result)
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let result = BatchResult { outcomes };
    info!(
        succeeded = result.successes().count(),
        failed = result.failures().count(),
        "Batch complete."
    );
    result
}
