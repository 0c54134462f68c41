pub mod defaults;

use crate::cli::ModelArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use defaults::DefaultsConfig;
use motorflux::engine::config::{
    self as core_config, DataSource, HistogramFormat, InputKind, InputSpec,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialModelConfig {
    #[serde(rename = "data-source")]
    data_source: Option<String>,
    kt: Option<f64>,
    diffusion: Option<f64>,
    #[serde(rename = "load-slope")]
    load_slope: Option<f64>,
    iterations: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialIntersurfaceConfig {
    prefactor: Option<f64>,
    offset: Option<f64>,
    #[serde(rename = "catalytic-rate")]
    catalytic_rate: Option<f64>,
    #[serde(rename = "substrate-concentration")]
    substrate_concentration: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialInputConfig {
    #[serde(rename = "data-root")]
    data_root: Option<PathBuf>,
    unbound: Option<PathBuf>,
    bound: Option<PathBuf>,
    format: Option<String>,
    kind: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSimulationConfig {
    model: Option<PartialModelConfig>,
    intersurface: Option<PartialIntersurfaceConfig>,
    input: Option<PartialInputConfig>,
}

impl PartialSimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file named by `--config`, or starts empty.
    pub fn load(args: &ModelArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves every setting as CLI flag, then `--set`, then file, then default.
    pub fn merge_with_cli(
        mut self,
        args: &ModelArgs,
        name: Option<&str>,
    ) -> Result<core_config::SimulationConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let model = self.model.take().unwrap_or_default();
        let inter = self.intersurface.take().unwrap_or_default();
        let input = self.input.take().unwrap_or_default();

        let unbound = args.unbound.clone().or(input.unbound);
        let bound = args.bound.clone().or(input.bound);
        let input_spec = match (unbound, bound) {
            (Some(unbound), Some(bound)) => {
                let format = parse_named::<HistogramFormat>(
                    args.format
                        .as_deref()
                        .or(input.format.as_deref())
                        .unwrap_or(&defaults.format),
                )?;
                let kind = if args.energies {
                    InputKind::Energy
                } else {
                    parse_kind(input.kind.as_deref().unwrap_or(&defaults.kind))?
                };
                InputSpec::Explicit {
                    unbound,
                    bound,
                    format,
                    kind,
                }
            }
            (None, None) => InputSpec::FromSource,
            _ => {
                return Err(CliError::Config(
                    "Both `input.unbound` and `input.bound` must be given together.".to_string(),
                ));
            }
        };

        let source = match args.source.as_deref().or(model.data_source.as_deref()) {
            Some(s) => parse_named::<DataSource>(s)?,
            None if matches!(input_spec, InputSpec::Explicit { .. }) => DataSource::Manual,
            None => {
                return Err(CliError::Config(
                    "A data source is required: pass --source or set `model.data-source`."
                        .to_string(),
                ));
            }
        };

        let mut builder = core_config::SimulationConfigBuilder::new()
            .source(source)
            .input(input_spec)
            .kt(args.kt.or(model.kt).unwrap_or(defaults.kt))
            .diffusion(args.diffusion.or(model.diffusion).unwrap_or(defaults.diffusion))
            .load_slope(
                args.load_slope
                    .or(model.load_slope)
                    .unwrap_or(defaults.load_slope),
            )
            .iterations(
                args.iterations
                    .or(model.iterations)
                    .unwrap_or(defaults.iterations),
            );

        if let Some(name) = name {
            builder = builder.name(name);
        }
        if let Some(root) = args.data_root.clone().or(input.data_root) {
            builder = builder.data_root(root);
        }
        if let Some(v) = inter.prefactor {
            builder = builder.prefactor(v);
        }
        if let Some(v) = inter.offset {
            builder = builder.offset(v);
        }
        if let Some(v) = inter.catalytic_rate {
            builder = builder.catalytic_rate(v);
        }
        if let Some(v) = inter.substrate_concentration {
            builder = builder.substrate_concentration(v);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

            match key {
                "model.kt" => {
                    self.model.get_or_insert_with(Default::default).kt =
                        Some(parse_set(key, value_str)?);
                }
                "model.diffusion" => {
                    self.model.get_or_insert_with(Default::default).diffusion =
                        Some(parse_set(key, value_str)?);
                }
                "model.load-slope" => {
                    self.model.get_or_insert_with(Default::default).load_slope =
                        Some(parse_set(key, value_str)?);
                }
                "model.iterations" => {
                    self.model.get_or_insert_with(Default::default).iterations =
                        Some(parse_set(key, value_str)?);
                }
                "intersurface.prefactor" => {
                    self.intersurface
                        .get_or_insert_with(Default::default)
                        .prefactor = Some(parse_set(key, value_str)?);
                }
                "intersurface.offset" => {
                    self.intersurface.get_or_insert_with(Default::default).offset =
                        Some(parse_set(key, value_str)?);
                }
                "intersurface.catalytic-rate" => {
                    self.intersurface
                        .get_or_insert_with(Default::default)
                        .catalytic_rate = Some(parse_set(key, value_str)?);
                }
                "intersurface.substrate-concentration" => {
                    self.intersurface
                        .get_or_insert_with(Default::default)
                        .substrate_concentration = Some(parse_set(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_set<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value))
    })
}

fn parse_named<T>(value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| CliError::Argument(e.to_string()))
}

fn parse_kind(value: &str) -> Result<InputKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "population" | "histogram" => Ok(InputKind::Population),
        "energy" | "energies" => Ok(InputKind::Energy),
        _ => Err(CliError::Argument(format!(
            "Unknown input kind '{}'. Expected 'population' or 'energy'.",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn model_args(extra: &[&str]) -> ModelArgs {
        let mut args = vec!["motorflux", "simulate"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Simulate(simulate) => simulate.model,
            _ => panic!("Expected 'simulate' subcommand"),
        }
    }

    fn parse_toml(content: &str) -> PartialSimulationConfig {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn load_from_file_and_merge_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pka.toml");
        fs::write(
            &path,
            r#"
            [model]
            data-source = "pka"

            [input]
            data-root = "/data/md"
            "#,
        )
        .unwrap();

        let partial = PartialSimulationConfig::from_file(&path).unwrap();
        let config = partial
            .merge_with_cli(&model_args(&[]), Some("chi1ALA13"))
            .unwrap();

        assert_eq!(config.source, DataSource::Pka);
        assert_eq!(config.name, "chi1ALA13");
        assert_eq!(config.data_root, Some(PathBuf::from("/data/md")));
        assert_eq!(config.kt, 0.6);
        assert_eq!(config.diffusion, 3e12);
        assert_eq!(config.iterations, 0);
        assert_eq!(config.intersurface.catalytic_rate, 140.0);
        assert_eq!(config.input, InputSpec::FromSource);
    }

    #[test]
    fn cli_overrides_set_values_which_override_file() {
        let partial = parse_toml(
            r#"
            [model]
            data-source = "adk"
            kt = 0.5
            load-slope = 1.0

            [intersurface]
            catalytic-rate = 100.0
            offset = 3.0
            "#,
        );
        let args = model_args(&[
            "--data-root",
            "/data",
            "--kt",
            "0.62",
            "-S",
            "model.kt=0.7",
            "-S",
            "intersurface.catalytic-rate=50",
            "--load",
            "-2.5",
        ]);
        let config = partial.merge_with_cli(&args, Some("psiGLY10")).unwrap();

        assert_eq!(config.kt, 0.62);
        assert_eq!(config.intersurface.catalytic_rate, 50.0);
        assert_eq!(config.intersurface.offset, 3.0);
        assert_eq!(config.intersurface.prefactor, 1e6);
        assert_eq!(config.load_slope, -2.5);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[model]\ntemperature = 300\n").unwrap();
        assert!(matches!(
            PartialSimulationConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn explicit_files_default_to_manual_source() {
        let args = model_args(&[
            "--unbound",
            "apo.dat",
            "--bound",
            "holo.dat",
            "--energies",
            "-S",
            "intersurface.prefactor=1e6",
            "-S",
            "intersurface.offset=5.0",
            "-S",
            "intersurface.catalytic-rate=10",
            "-S",
            "intersurface.substrate-concentration=0.002",
        ]);
        let config = PartialSimulationConfig::default()
            .merge_with_cli(&args, None)
            .unwrap();

        assert_eq!(config.source, DataSource::Manual);
        assert_eq!(config.name, "apo");
        assert_eq!(
            config.input,
            InputSpec::Explicit {
                unbound: PathBuf::from("apo.dat"),
                bound: PathBuf::from("holo.dat"),
                format: HistogramFormat::Columns,
                kind: InputKind::Energy,
            }
        );
    }

    #[test]
    fn manual_source_without_intersurface_parameters_fails() {
        let args = model_args(&["--unbound", "apo.dat", "--bound", "holo.dat"]);
        let result = PartialSimulationConfig::default().merge_with_cli(&args, None);
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("prefactor")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_source_is_reported() {
        let args = model_args(&["--data-root", "/data"]);
        assert!(matches!(
            PartialSimulationConfig::default().merge_with_cli(&args, Some("x")),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn unpaired_input_file_in_config_is_rejected() {
        let partial = parse_toml("[input]\nunbound = \"apo.dat\"\n");
        assert!(matches!(
            partial.merge_with_cli(&model_args(&["--source", "hiv"]), Some("x")),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn set_values_reject_unknown_keys_and_bad_values() {
        let mut partial = PartialSimulationConfig::default();
        assert!(matches!(
            partial.apply_set_values(&["model.temperature=300".to_string()]),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            partial.apply_set_values(&["model.iterations=many".to_string()]),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            partial.apply_set_values(&["model.kt".to_string()]),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn file_format_and_kind_are_parsed() {
        let partial = parse_toml(
            r#"
            [model]
            data-source = "hiv"

            [input]
            unbound = "u.csv"
            bound = "b.csv"
            format = "comma"
            kind = "population"
            "#,
        );
        let config = partial.merge_with_cli(&model_args(&[]), None).unwrap();
        assert_eq!(config.source, DataSource::Hiv);
        assert!(matches!(
            config.input,
            InputSpec::Explicit {
                format: HistogramFormat::Comma,
                kind: InputKind::Population,
                ..
            }
        ));
    }
}
