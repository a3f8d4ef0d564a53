//! Block configuration.
//!
//! Every block takes its tuning constants from a small serde struct whose
//! defaults are the values the simulator schematics were built around. A
//! TOML file can override any subset:
//!
//! ```toml
//! [predictor]
//! order = 32
//! div_ratio = 5000
//! mu = 0.0005
//!
//! [lowpass]
//! pole = 0.95
//! ```

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DspError, DspResult};

/// Environment variable naming a TOML file read by the C entry points.
pub const CONFIG_ENV: &str = "CLOCKED_DSP_CONFIG";

/// Adaptive FIR predictor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Number of FIR taps; also the history length. Fixed for the
    /// lifetime of a predictor.
    pub order: usize,
    /// Only every `div_ratio`-th rising clock edge runs an update.
    pub div_ratio: u32,
    /// LMS step size.
    pub mu: f64,
    /// Gain applied to both the desired and the reference input before use.
    pub input_gain: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        PredictorConfig {
            order: 50,
            div_ratio: 10_000,
            mu: 0.001,
            input_gain: 2.0,
        }
    }
}

impl PredictorConfig {
    pub fn validate(&self) -> DspResult<()> {
        if self.order == 0 {
            return Err(DspError::InvalidOrder(self.order));
        }
        if self.div_ratio == 0 {
            return Err(DspError::InvalidDivRatio(self.div_ratio));
        }
        if !(self.mu.is_finite() && self.mu > 0.0) {
            return Err(DspError::InvalidParameter {
                name: "mu",
                value: self.mu,
            });
        }
        if !self.input_gain.is_finite() {
            return Err(DspError::InvalidParameter {
                name: "input_gain",
                value: self.input_gain,
            });
        }
        Ok(())
    }

    /// Upper LMS step size for a reference of mean power `signal_power`
    /// (measured after `input_gain`): `2 / (order · E[x²])`.
    ///
    /// Nothing enforces this; a larger `mu` simply diverges.
    pub fn stability_bound(&self, signal_power: f64) -> f64 {
        2.0 / (self.order as f64 * signal_power)
    }
}

/// First-order IIR low-pass settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowPassConfig {
    /// Pole location: `y = (1 - pole)·x + pole·y_prev`.
    pub pole: f64,
}

impl Default for LowPassConfig {
    fn default() -> Self {
        LowPassConfig { pole: 0.90 }
    }
}

impl LowPassConfig {
    pub fn validate(&self) -> DspResult<()> {
        if !(0.0..1.0).contains(&self.pole) {
            return Err(DspError::InvalidParameter {
                name: "pole",
                value: self.pole,
            });
        }
        Ok(())
    }
}

/// Two-pole resonator oscillator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveGenConfig {
    /// Normalized frequency in radians per clock edge.
    pub omega: f64,
    /// Height of the exciting impulse, which is the output amplitude.
    pub amplitude: f64,
}

impl Default for WaveGenConfig {
    fn default() -> Self {
        WaveGenConfig {
            omega: PI / 8.0,
            amplitude: 1.0,
        }
    }
}

impl WaveGenConfig {
    pub fn validate(&self) -> DspResult<()> {
        if !(self.omega.is_finite() && self.omega > 0.0 && self.omega < PI) {
            return Err(DspError::InvalidParameter {
                name: "omega",
                value: self.omega,
            });
        }
        if !self.amplitude.is_finite() {
            return Err(DspError::InvalidParameter {
                name: "amplitude",
                value: self.amplitude,
            });
        }
        Ok(())
    }
}

/// Interferometric fringe detector settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FringeConfig {
    /// Gain from the input voltage to spring force.
    pub input_gain: f64,
    /// Spring constant in N/m.
    pub spring_constant: f64,
    /// Laser wavelength in metres.
    pub wavelength: f64,
    /// Static mirror offset as a fraction of the wavelength.
    pub bias_fraction: f64,
}

impl Default for FringeConfig {
    fn default() -> Self {
        FringeConfig {
            input_gain: 2.0,
            spring_constant: 516.5,
            wavelength: 850e-9,
            bias_fraction: 3.0 / 8.0,
        }
    }
}

impl FringeConfig {
    pub fn validate(&self) -> DspResult<()> {
        let positive = [
            ("spring_constant", self.spring_constant),
            ("wavelength", self.wavelength),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(DspError::InvalidParameter { name, value });
            }
        }
        let finite = [
            ("input_gain", self.input_gain),
            ("bias_fraction", self.bias_fraction),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(DspError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Settings for every block in the library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub predictor: PredictorConfig,
    pub lowpass: LowPassConfig,
    pub wavegen: WaveGenConfig,
    pub fringe: FringeConfig,
}

impl BlockConfig {
    /// Parse and validate a TOML document. Missing tables and fields keep
    /// their defaults.
    pub fn from_toml_str(text: &str) -> DspResult<Self> {
        let config: BlockConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DspResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load from the file named by [`CONFIG_ENV`], or the defaults when the
    /// variable is unset.
    pub fn from_env() -> DspResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                tracing::debug!(path = ?path, "loading block configuration");
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> DspResult<()> {
        self.predictor.validate()?;
        self.lowpass.validate()?;
        self.wavegen.validate()?;
        self.fringe.validate()
    }
}
