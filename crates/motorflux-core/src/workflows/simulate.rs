use crate::core::energy::{boltzmann, population_to_energy};
use crate::core::io::layout::HistogramPaths;
use crate::core::io::writer::{BinRecord, SummaryRecord};
use crate::core::kinetics::{
    IntersurfaceParams, intersurface_rates, intrasurface_prefactor, intrasurface_rates,
};
use crate::core::models::histogram::Histogram;
use crate::core::models::surface::EnergySurface;
use crate::engine::config::{ConfigError, InputKind, InputSpec, SimulationConfig};
use crate::engine::error::EngineError;
use crate::engine::flux::{FluxProfile, FluxSummary};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::propagation::{Propagation, propagate};
use crate::engine::steady_state::SteadyState;
use crate::engine::transition::TransitionMatrix;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info, instrument};

const MIN_BINS: usize = 3;

/// Kinetic parameters a simulation actually ran with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KineticParameters {
    pub kt: f64,
    pub diffusion: f64,
    pub intrasurface_prefactor: f64,
    pub intersurface: IntersurfaceParams,
    pub load_slope: f64,
}

#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub name: String,
    /// Input histograms, absent when energies were supplied directly.
    pub unbound_histogram: Option<Histogram>,
    pub bound_histogram: Option<Histogram>,
    pub unbound: EnergySurface,
    /// Bound surface, already shifted down by the binding offset.
    pub bound: EnergySurface,
    pub unbound_boltzmann: Vec<f64>,
    pub bound_boltzmann: Vec<f64>,
    pub transition: TransitionMatrix,
    pub steady_state: SteadyState,
    /// Flux of the steady-state population.
    pub flux: FluxProfile,
    pub propagation: Option<Propagation>,
    /// Flux of the propagated population, when propagation ran.
    pub iterative_flux: Option<FluxProfile>,
    pub parameters: KineticParameters,
}

enum Surfaces {
    Histograms(Histogram, Histogram),
    Energies(Vec<f64>, Vec<f64>),
}

#[instrument(skip_all, name = "simulate_workflow", fields(name = %config.name))]
pub fn run(
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<SimulationResult, EngineError> {
    // === Phase 1: Load inputs ===
    reporter.report(Progress::PhaseStart {
        name: "Loading Histograms",
    });
    let inputs = load_inputs(config)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Energy surfaces ===
    reporter.report(Progress::PhaseStart {
        name: "Building Energy Surfaces",
    });
    let (unbound_histogram, bound_histogram, unbound, bound) = match inputs {
        Surfaces::Histograms(u, b) => {
            let unbound = population_to_energy(&u, config.kt);
            let bound = population_to_energy(&b, config.kt).shifted(config.intersurface.offset);
            (Some(u), Some(b), unbound, bound)
        }
        Surfaces::Energies(u, b) => {
            if u.iter().chain(&b).any(|e| !e.is_finite()) {
                return Err(EngineError::NonFinite("input energies"));
            }
            (None, None, EnergySurface::new(u), EnergySurface::new(b))
        }
    };
    check_bins(&unbound, &bound)?;
    let unbound_boltzmann = boltzmann(&unbound, config.kt);
    let bound_boltzmann = boltzmann(&bound, config.kt);
    info!(bins = unbound.bins(), "Energy surfaces ready.");
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Rates and transition matrix ===
    reporter.report(Progress::PhaseStart {
        name: "Composing Transition Matrix",
    });
    let prefactor = intrasurface_prefactor(config.diffusion, unbound.bins());
    let load = config.load();
    let unbound_rates = intrasurface_rates(&unbound, prefactor, config.kt, &load);
    let bound_rates = intrasurface_rates(&bound, prefactor, config.kt, &load);
    let coupling = intersurface_rates(&unbound, &bound, &config.intersurface, config.kt);
    let transition = TransitionMatrix::compose(&unbound_rates, &bound_rates, &coupling)?;
    debug!(prefactor, dt = transition.dt(), "Transition matrix composed.");
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Steady state ===
    reporter.report(Progress::PhaseStart {
        name: "Solving Steady State",
    });
    let steady_state = SteadyState::solve(&transition)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 5: Flux ===
    reporter.report(Progress::PhaseStart {
        name: "Computing Flux",
    });
    let flux = FluxProfile::compute(steady_state.values(), &transition);
    reporter.report(Progress::PhaseFinish);

    // === Phase 6: Propagation (optional) ===
    let (propagation, iterative_flux) = if config.iterations > 0 {
        reporter.report(Progress::PhaseStart {
            name: "Propagating Population",
        });
        info!(
            iterations = config.iterations,
            "Running iterative method."
        );
        let propagation = propagate(&transition, config.iterations);
        let iterative = FluxProfile::compute(&propagation.population, &transition);
        reporter.report(Progress::PhaseFinish);
        (Some(propagation), Some(iterative))
    } else {
        (None, None)
    };

    let result = SimulationResult {
        name: config.name.clone(),
        unbound_histogram,
        bound_histogram,
        unbound,
        bound,
        unbound_boltzmann,
        bound_boltzmann,
        transition,
        steady_state,
        flux,
        propagation,
        iterative_flux,
        parameters: KineticParameters {
            kt: config.kt,
            diffusion: config.diffusion,
            intrasurface_prefactor: prefactor,
            intersurface: config.intersurface,
            load_slope: config.load_slope,
        },
    };

    let summary = result.summary();
    info!(
        intrasurface = summary.intrasurface,
        peak = summary.peak,
        intersurface = summary.intersurface,
        "Simulation complete."
    );
    Ok(result)
}

fn input_paths(config: &SimulationConfig) -> Result<(HistogramPaths, InputKind), EngineError> {
    match &config.input {
        InputSpec::Explicit {
            unbound,
            bound,
            format,
            kind,
        } => Ok((
            HistogramPaths {
                unbound: unbound.clone(),
                bound: bound.clone(),
                format: *format,
            },
            *kind,
        )),
        InputSpec::FromSource => {
            let layout = config.source.layout().ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "data source '{}' has no directory layout",
                    config.source
                ))
            })?;
            let root = config
                .data_root
                .as_deref()
                .ok_or(ConfigError::MissingParameter("data_root"))?;
            Ok((layout.paths(root, &config.name), InputKind::Population))
        }
    }
}

fn load_inputs(config: &SimulationConfig) -> Result<Surfaces, EngineError> {
    let (paths, kind) = input_paths(config)?;
    info!(
        unbound = %paths.unbound.display(),
        bound = %paths.bound.display(),
        "Reading inputs."
    );
    let with_path = |path: &Path| {
        let path = path.to_path_buf();
        move |source| EngineError::Io { path, source }
    };
    Ok(match kind {
        InputKind::Population => Surfaces::Histograms(
            paths
                .format
                .read_path(&paths.unbound)
                .map_err(with_path(&paths.unbound))?,
            paths
                .format
                .read_path(&paths.bound)
                .map_err(with_path(&paths.bound))?,
        ),
        InputKind::Energy => Surfaces::Energies(
            paths
                .format
                .read_values_path(&paths.unbound)
                .map_err(with_path(&paths.unbound))?,
            paths
                .format
                .read_values_path(&paths.bound)
                .map_err(with_path(&paths.bound))?,
        ),
    })
}

fn check_bins(unbound: &EnergySurface, bound: &EnergySurface) -> Result<(), EngineError> {
    if unbound.bins() != bound.bins() {
        return Err(EngineError::BinMismatch {
            unbound: unbound.bins(),
            bound: bound.bins(),
        });
    }
    if unbound.bins() < MIN_BINS {
        return Err(EngineError::TooFewBins {
            bins: unbound.bins(),
        });
    }
    Ok(())
}

impl SimulationResult {
    pub fn bins(&self) -> usize {
        self.unbound.bins()
    }

    /// The flux that is reported: propagated if propagation ran, steady state otherwise.
    pub fn reported_flux(&self) -> &FluxProfile {
        self.iterative_flux.as_ref().unwrap_or(&self.flux)
    }

    /// The population behind [`Self::reported_flux`].
    pub fn reported_population(&self) -> &[f64] {
        self.propagation
            .as_ref()
            .map_or(self.steady_state.values(), |p| p.population.as_slice())
    }

    pub fn summary(&self) -> FluxSummary {
        self.reported_flux().summarize(self.parameters.load_slope)
    }

    pub fn summary_record(&self) -> SummaryRecord {
        let summary = self.summary();
        SummaryRecord {
            name: self.name.clone(),
            bins: self.bins(),
            dt: self.transition.dt(),
            intrasurface_flux: summary.intrasurface,
            peak_flux: summary.peak,
            intersurface_flux: summary.intersurface,
            power: summary.power,
        }
    }

    /// Per-bin rows, with angles at bin centres from −180° to 180°.
    pub fn bin_records(&self) -> Vec<BinRecord> {
        let n = self.bins();
        let width = self.unbound.bin_width_degrees();
        let flux = self.reported_flux();
        let population = self.reported_population();
        (0..n)
            .map(|i| BinRecord {
                bin: i,
                angle_degrees: -180.0 + (i as f64 + 0.5) * width,
                unbound_energy: self.unbound.energy(i),
                bound_energy: self.bound.energy(i),
                unbound_population: population[i],
                bound_population: population[i + n],
                flux_unbound: flux.unbound[i],
                flux_bound: flux.bound[i],
                flux_total: flux.unbound[i] + flux.bound[i],
                flux_intersurface: flux.intersurface[i],
            })
            .collect()
    }

    /// Plain-text table of the parameters and flux summary.
    pub fn report(&self) -> String {
        let p = &self.parameters;
        let summary = self.summary();
        let mut out = String::new();
        row(&mut out, "C", p.intersurface.prefactor, "second**-1");
        row(&mut out, "D", p.diffusion, "degrees**2 second**-1");
        row(&mut out, "k_{cat}", p.intersurface.catalytic_rate, "second**-1");
        row(&mut out, "[S]", p.intersurface.substrate_concentration, "M");
        row(&mut out, "dt", self.transition.dt(), "second");
        separator(&mut out);
        row(&mut out, "Intrasurface flux", summary.intrasurface, "cycle second**-1");
        row(&mut out, "Peak intrasurface flux", summary.peak, "cycle second**-1");
        row(&mut out, "Intersurface flux", summary.intersurface, "cycle second**-1");
        if let Some(power) = summary.power {
            separator(&mut out);
            row(&mut out, "Applied load", p.load_slope, "kcal mol**-1 cycle**-1");
            row(&mut out, "Power", power, "kcal mol**-1 second**-1");
        }
        out
    }
}

fn row(out: &mut String, label: &str, value: f64, unit: &str) {
    let _ = writeln!(out, "{:<25} {:<10} {:<10}", label, scientific(value), unit);
}

fn separator(out: &mut String) {
    let _ = writeln!(
        out,
        "{:<25} {:<10} {:<10}",
        "-----------------", "---------", "---------"
    );
}

/// Signed two-decimal scientific notation with a signed two-digit exponent, e.g. `+1.40e+02`.
fn scientific(value: f64) -> String {
    let formatted = format!("{:+.2e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => format!("{}e{:+03}", mantissa, exponent),
            Err(_) => formatted,
        },
        None => formatted,
    }
}
