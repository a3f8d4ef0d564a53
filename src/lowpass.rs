//! Clocked first-order IIR low-pass.
//!
//! `y[n] = (1 - a)·x[n] + a·y[n-1]`, evaluated once per rising clock edge.
//! DC gain is 1; the pole `a` sets the corner.

use crate::clock::RisingEdge;
use crate::config::LowPassConfig;
use crate::error::DspResult;

#[derive(Debug, Clone)]
pub struct LowPass {
    pole: f64,
    edge: RisingEdge,
    output: f64,
}

impl LowPass {
    pub fn new(config: LowPassConfig) -> DspResult<Self> {
        config.validate()?;
        tracing::debug!(pole = config.pole, "low-pass created");
        Ok(LowPass {
            pole: config.pole,
            edge: RisingEdge::new(),
            output: 0.0,
        })
    }

    /// Evaluate one host time step and return the (possibly held) output.
    pub fn step(&mut self, clock: bool, input: f64) -> f64 {
        self.tick(clock, input).unwrap_or(self.output)
    }

    /// Returns the new output on a rising edge, `None` while holding.
    pub fn tick(&mut self, clock: bool, input: f64) -> Option<f64> {
        if !self.edge.update(clock) {
            return None;
        }
        self.output = (1.0 - self.pole) * input + self.pole * self.output;
        Some(self.output)
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn pole(&self) -> f64 {
        self.pole
    }

    pub fn reset(&mut self) {
        self.edge.reset();
        self.output = 0.0;
    }
}
