use crate::core::models::surface::LoadFunction;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::core::io::layout::{DataSource, HistogramFormat};
pub use crate::core::kinetics::IntersurfaceParams;

/// Thermal energy at room temperature, kcal/mol.
pub const DEFAULT_KT: f64 = 0.6;
/// Rotational diffusion coefficient of a side chain, deg²/s.
pub const DEFAULT_DIFFUSION: f64 = 3e12;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid parameter: {0}")]
    Invalid(String),
}

/// Intersurface parameters measured for each supported data set.
///
/// `Manual` has no preset; all four values must then be given explicitly.
pub fn intersurface_preset(source: DataSource) -> Option<IntersurfaceParams> {
    match source {
        DataSource::Pka | DataSource::PkaReversed => Some(IntersurfaceParams {
            prefactor: 0.24e6,
            offset: 6.0,
            catalytic_rate: 140.0,
            substrate_concentration: 2e-3,
        }),
        DataSource::Adk => Some(IntersurfaceParams {
            prefactor: 1e6,
            offset: 5.7,
            catalytic_rate: 312.0,
            substrate_concentration: 2.5e-6,
        }),
        DataSource::Hiv => Some(IntersurfaceParams {
            prefactor: 1e6,
            offset: 4.5,
            catalytic_rate: 0.3,
            substrate_concentration: 2e-3,
        }),
        DataSource::Manual => None,
    }
}

/// What the two input files contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Population histograms, converted to energies before use.
    Population,
    /// Free energies in kcal/mol, used as given.
    Energy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputSpec {
    /// Resolve both files from the data set layout below `data_root`.
    FromSource,
    Explicit {
        unbound: PathBuf,
        bound: PathBuf,
        format: HistogramFormat,
        kind: InputKind,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub source: DataSource,
    pub name: String,
    pub data_root: Option<PathBuf>,
    pub input: InputSpec,
    pub kt: f64,
    pub diffusion: f64,
    pub intersurface: IntersurfaceParams,
    pub load_slope: f64,
    pub iterations: usize,
}

impl SimulationConfig {
    pub fn load(&self) -> LoadFunction {
        LoadFunction::new(self.load_slope)
    }

    /// The same configuration applied to another dihedral of the data set.
    pub fn for_name(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    source: Option<DataSource>,
    name: Option<String>,
    data_root: Option<PathBuf>,
    input: Option<InputSpec>,
    kt: Option<f64>,
    diffusion: Option<f64>,
    prefactor: Option<f64>,
    offset: Option<f64>,
    catalytic_rate: Option<f64>,
    substrate_concentration: Option<f64>,
    load_slope: Option<f64>,
    iterations: Option<usize>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: DataSource) -> Self {
        self.source = Some(source);
        self
    }
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn data_root(mut self, path: PathBuf) -> Self {
        self.data_root = Some(path);
        self
    }
    pub fn input(mut self, input: InputSpec) -> Self {
        self.input = Some(input);
        self
    }
    pub fn kt(mut self, kt: f64) -> Self {
        self.kt = Some(kt);
        self
    }
    pub fn diffusion(mut self, diffusion: f64) -> Self {
        self.diffusion = Some(diffusion);
        self
    }
    pub fn prefactor(mut self, prefactor: f64) -> Self {
        self.prefactor = Some(prefactor);
        self
    }
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }
    pub fn catalytic_rate(mut self, rate: f64) -> Self {
        self.catalytic_rate = Some(rate);
        self
    }
    pub fn substrate_concentration(mut self, concentration: f64) -> Self {
        self.substrate_concentration = Some(concentration);
        self
    }
    pub fn load_slope(mut self, slope: f64) -> Self {
        self.load_slope = Some(slope);
        self
    }
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let source = self
            .source
            .ok_or(ConfigError::MissingParameter("source"))?;
        let preset = intersurface_preset(source);
        let from_preset = |value: Option<f64>,
                           pick: fn(&IntersurfaceParams) -> f64,
                           name: &'static str|
         -> Result<f64, ConfigError> {
            value
                .or_else(|| preset.as_ref().map(pick))
                .ok_or(ConfigError::MissingParameter(name))
        };

        let intersurface = IntersurfaceParams {
            prefactor: from_preset(self.prefactor, |p| p.prefactor, "prefactor")?,
            offset: from_preset(self.offset, |p| p.offset, "offset")?,
            catalytic_rate: from_preset(self.catalytic_rate, |p| p.catalytic_rate, "catalytic_rate")?,
            substrate_concentration: from_preset(
                self.substrate_concentration,
                |p| p.substrate_concentration,
                "substrate_concentration",
            )?,
        };

        let input = self.input.unwrap_or(InputSpec::FromSource);
        let name = match (&input, self.name) {
            (_, Some(name)) => name,
            (InputSpec::Explicit { unbound, .. }, None) => unbound
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("manual")
                .to_string(),
            (InputSpec::FromSource, None) => return Err(ConfigError::MissingParameter("name")),
        };

        if input == InputSpec::FromSource {
            if source == DataSource::Manual {
                return Err(ConfigError::Invalid(
                    "the manual data source requires explicit unbound and bound inputs".into(),
                ));
            }
            if self.data_root.is_none() {
                return Err(ConfigError::MissingParameter("data_root"));
            }
        }

        let config = SimulationConfig {
            source,
            name,
            data_root: self.data_root,
            input,
            kt: self.kt.unwrap_or(DEFAULT_KT),
            diffusion: self.diffusion.unwrap_or(DEFAULT_DIFFUSION),
            intersurface,
            load_slope: self.load_slope.unwrap_or(0.0),
            iterations: self.iterations.unwrap_or(0),
        };
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &SimulationConfig) -> Result<(), ConfigError> {
    let p = &config.intersurface;
    let checks = [
        ("kt", config.kt, config.kt > 0.0),
        ("diffusion", config.diffusion, config.diffusion > 0.0),
        ("prefactor", p.prefactor, p.prefactor > 0.0),
        ("catalytic_rate", p.catalytic_rate, p.catalytic_rate >= 0.0),
        (
            "substrate_concentration",
            p.substrate_concentration,
            p.substrate_concentration >= 0.0,
        ),
        ("offset", p.offset, true),
        ("load_slope", config.load_slope, true),
    ];
    for (name, value, ok) in checks {
        if !value.is_finite() || !ok {
            return Err(ConfigError::Invalid(format!("{} = {}", name, value)));
        }
    }
    if config.name.trim().is_empty() {
        return Err(ConfigError::Invalid("name must not be empty".into()));
    }
    Ok(())
}
