//! Two-pole resonator oscillator.
//!
//! The recursion
//!
//! ```text
//! y[n] = 2cos(ω)·y[n-1] - y[n-2] + sin(ω)·x[n-1]
//! ```
//!
//! has its poles on the unit circle at `e^{±jω}`. Kicking it with a single
//! impulse of height `A` produces `A·sin(nω)` forever, one sample per rising
//! clock edge, with no trig calls after construction.

use crate::clock::RisingEdge;
use crate::config::WaveGenConfig;
use crate::error::DspResult;

#[derive(Debug, Clone)]
pub struct WaveGen {
    /// `2cos(ω)`.
    feedback: f64,
    /// `sin(ω)`.
    input_gain: f64,
    amplitude: f64,
    edge: RisingEdge,
    /// Impulse input delayed by one edge.
    x1: f64,
    y1: f64,
    y2: f64,
    kicked: bool,
    output: f64,
}

impl WaveGen {
    pub fn new(config: WaveGenConfig) -> DspResult<Self> {
        config.validate()?;
        tracing::debug!(omega = config.omega, amplitude = config.amplitude, "oscillator created");
        Ok(WaveGen {
            feedback: 2.0 * config.omega.cos(),
            input_gain: config.omega.sin(),
            amplitude: config.amplitude,
            edge: RisingEdge::new(),
            x1: 0.0,
            y1: 0.0,
            y2: 0.0,
            kicked: false,
            output: 0.0,
        })
    }

    /// Evaluate one host time step. On edge `k` (counting from 1) the output
    /// is `amplitude · sin((k - 1)·ω)`.
    pub fn step(&mut self, clock: bool) -> f64 {
        self.tick(clock).unwrap_or(self.output)
    }

    /// Returns the new sample on a rising edge, `None` while holding.
    pub fn tick(&mut self, clock: bool) -> Option<f64> {
        if !self.edge.update(clock) {
            return None;
        }
        let y = self.feedback * self.y1 - self.y2 + self.input_gain * self.x1;
        self.y2 = self.y1;
        self.y1 = y;
        self.output = y;

        // Impulse excitation: amplitude on the first edge only.
        self.x1 = if self.kicked { 0.0 } else { self.amplitude };
        self.kicked = true;
        Some(y)
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn reset(&mut self) {
        self.edge.reset();
        self.x1 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
        self.kicked = false;
        self.output = 0.0;
    }
}
