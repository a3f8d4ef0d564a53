//! Adaptive FIR predictor.
//!
//! Predicts a desired signal (the plant output) from a sliding window of a
//! reference signal, and adapts the FIR weights online with the LMS rule:
//!
//! ```text
//! x[0..N]  newest-first history of gain · reference
//! y        = Σ w[i] · x[i]           (estimate)
//! e        = gain · desired - y      (error)
//! w[i]    += μ · e · x[i]
//! ```
//!
//! Updates are clocked: only a rising edge of the clock input counts, and of
//! those only every `div_ratio`-th one runs the update. Between updates the
//! last estimate and error are held.
//!
//! LMS is stable for `0 < μ < 2 / (N · E[x²])`. Nothing here checks that; a
//! too-large step size makes the weights blow up to inf/NaN, which then show
//! in every later output.

use crate::clock::{Decimator, RisingEdge};
use crate::config::PredictorConfig;
use crate::error::{DspError, DspResult};
use crate::history::HistoryBuffer;

/// LMS-adapted FIR predictor with clock-edge decimation.
#[derive(Debug, Clone)]
pub struct AdaptiveFirPredictor {
    config: PredictorConfig,
    /// Current FIR weights, aligned with `history` (tap 0 = newest sample).
    coeffs: Vec<f64>,
    /// Weights restored by `reset`.
    initial: Vec<f64>,
    history: HistoryBuffer,
    decimator: Decimator,
    edge: RisingEdge,
    /// Held outputs: (estimate, error).
    held: (f64, f64),
    updates: u64,
    diverged: bool,
}

impl AdaptiveFirPredictor {
    /// Create a predictor with all-zero weights and history.
    pub fn new(config: PredictorConfig) -> DspResult<Self> {
        let initial = vec![0.0; config.order];
        Self::with_coefficients(config, initial)
    }

    /// Create a predictor starting from known weights, e.g. a previously
    /// converged filter. `coefficients.len()` must equal `config.order`.
    pub fn with_coefficients(config: PredictorConfig, coefficients: Vec<f64>) -> DspResult<Self> {
        config.validate()?;
        if coefficients.len() != config.order {
            return Err(DspError::CoefficientLength {
                expected: config.order,
                actual: coefficients.len(),
            });
        }

        tracing::debug!(
            order = config.order,
            div_ratio = config.div_ratio,
            mu = config.mu,
            input_gain = config.input_gain,
            "adaptive FIR predictor created"
        );

        Ok(AdaptiveFirPredictor {
            history: HistoryBuffer::new(config.order),
            decimator: Decimator::new(config.div_ratio),
            edge: RisingEdge::new(),
            coeffs: coefficients.clone(),
            initial: coefficients,
            held: (0.0, 0.0),
            updates: 0,
            diverged: false,
            config,
        })
    }

    /// Evaluate one host time step. Returns `(estimate, error)`.
    ///
    /// Outside an update the previously computed outputs are returned
    /// unchanged. The clock level is latched on every call.
    pub fn step(&mut self, clock: bool, desired_signal: f64, reference_input: f64) -> (f64, f64) {
        self.tick(clock, desired_signal, reference_input).unwrap_or(self.held)
    }

    /// Like [`step`](Self::step), but returns `Some((estimate, error))` only
    /// when this call ran an update and `None` when the outputs are held.
    pub fn tick(
        &mut self,
        clock: bool,
        desired_signal: f64,
        reference_input: f64,
    ) -> Option<(f64, f64)> {
        if self.edge.update(clock) && self.decimator.tick() {
            self.update(desired_signal, reference_input);
            Some(self.held)
        } else {
            None
        }
    }

    fn update(&mut self, desired_signal: f64, reference_input: f64) {
        let gain = self.config.input_gain;
        let desired = gain * desired_signal;
        let input = gain * reference_input;

        self.history.push(input);
        let estimate = self.history.dot(&self.coeffs);
        let error = desired - estimate;

        let step = self.config.mu * error;
        for (w, x) in self.coeffs.iter_mut().zip(self.history.iter()) {
            *w += step * x;
        }

        self.held = (estimate, error);
        self.updates += 1;

        tracing::trace!(update = self.updates, estimate, error, "LMS update");

        if !self.diverged && self.coeffs.iter().any(|w| !w.is_finite()) {
            self.diverged = true;
            tracing::warn!(
                update = self.updates,
                mu = self.config.mu,
                "predictor weights are no longer finite; step size is likely above the LMS stability bound"
            );
        }
    }

    /// Return to the freshly-constructed state. No reallocation.
    pub fn reset(&mut self) {
        self.coeffs.copy_from_slice(&self.initial);
        self.history.clear();
        self.decimator.reset();
        self.edge.reset();
        self.held = (0.0, 0.0);
        self.updates = 0;
        self.diverged = false;
    }

    /// Last computed `(estimate, error)`.
    pub fn outputs(&self) -> (f64, f64) {
        self.held
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// The reference history after gain, newest first.
    pub fn history(&self) -> Vec<f64> {
        self.history.to_vec()
    }

    /// Rising edges counted toward the next update.
    pub fn decimation_count(&self) -> u32 {
        self.decimator.count()
    }

    /// Rising edges per update.
    pub fn div_ratio(&self) -> u32 {
        self.decimator.ratio()
    }

    /// Clock level passed on the previous call.
    pub fn last_clock(&self) -> bool {
        self.edge.last()
    }

    /// Number of LMS updates performed since construction or `reset`.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// True once any weight has become inf or NaN.
    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    pub fn order(&self) -> usize {
        self.coeffs.len()
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }
}
