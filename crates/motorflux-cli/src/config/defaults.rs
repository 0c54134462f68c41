use motorflux::engine::config::{DEFAULT_DIFFUSION, DEFAULT_KT};

/// Values used when neither the command line, `--set`, nor the config file gives one.
pub struct DefaultsConfig {
    pub kt: f64,
    pub diffusion: f64,
    pub load_slope: f64,
    pub iterations: usize,
    pub format: String,
    pub kind: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            kt: DEFAULT_KT,
            diffusion: DEFAULT_DIFFUSION,
            load_slope: 0.0,
            iterations: 0,
            format: "columns".to_string(),
            kind: "population".to_string(),
        }
    }
}
