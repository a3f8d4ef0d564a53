//! Michelson fringe detector for a spring-mounted mirror.
//!
//! The input voltage drives a spring force; the resulting displacement moves
//! one mirror of an interferometer biased at a static offset. The output is
//! the normalized photodiode intensity `cos²(4π(d_bias + x)/λ)`.
//!
//! The default bias of 3λ/8 puts a zero input at a dark fringe
//! (`φ = 3π/2`), where the response to small displacements is quadratic.

use std::f64::consts::PI;

use crate::clock::RisingEdge;
use crate::config::FringeConfig;
use crate::error::DspResult;

#[derive(Debug, Clone)]
pub struct FringeCounter {
    config: FringeConfig,
    edge: RisingEdge,
    output: f64,
}

impl FringeCounter {
    pub fn new(config: FringeConfig) -> DspResult<Self> {
        config.validate()?;
        tracing::debug!(
            spring_constant = config.spring_constant,
            wavelength = config.wavelength,
            "fringe detector created"
        );
        Ok(FringeCounter {
            config,
            edge: RisingEdge::new(),
            output: 0.0,
        })
    }

    /// Mirror displacement in metres for an input voltage.
    pub fn displacement(&self, input: f64) -> f64 {
        self.config.input_gain * input / self.config.spring_constant
    }

    /// Optical phase for an input voltage.
    pub fn phase(&self, input: f64) -> f64 {
        let bias = self.config.bias_fraction * self.config.wavelength;
        4.0 * PI * (bias + self.displacement(input)) / self.config.wavelength
    }

    /// Evaluate one host time step and return the (possibly held) intensity.
    pub fn step(&mut self, clock: bool, input: f64) -> f64 {
        self.tick(clock, input).unwrap_or(self.output)
    }

    /// Returns the new intensity on a rising edge, `None` while holding.
    pub fn tick(&mut self, clock: bool, input: f64) -> Option<f64> {
        if !self.edge.update(clock) {
            return None;
        }
        let field = self.phase(input).cos();
        self.output = field * field;
        Some(self.output)
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn reset(&mut self) {
        self.edge.reset();
        self.output = 0.0;
    }
}
