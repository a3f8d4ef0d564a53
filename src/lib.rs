//! Clock-synchronous signal-processing blocks for circuit-simulator hosts.
//!
//! The simulator evaluates every block once per time step. A block does its
//! work on a rising edge of its clock input and holds its outputs in between,
//! which turns the continuous-time simulation into a sampled DSP system.
//!
//! - [`AdaptiveFirPredictor`]: LMS-adapted FIR predictor with decimated
//!   updates. Predicts a plant output from a reference signal and reports
//!   the prediction error.
//! - [`LowPass`]: first-order IIR low-pass.
//! - [`WaveGen`]: two-pole resonator sine source.
//! - [`FringeCounter`]: interferometer intensity for a spring-mounted mirror.
//!
//! Each block owns all of its state, so any number of instances can run side
//! by side. The [`host`] module maps blocks onto the simulator's slot arrays,
//! and the C entry points in `ffi` keep one boxed block per schematic
//! instance until the simulator releases it through [`Destroy`].
//!
//! # Example
//!
//! ```
//! use clocked_dsp::{AdaptiveFirPredictor, PredictorConfig};
//!
//! let config = PredictorConfig { order: 2, div_ratio: 1, mu: 0.1, input_gain: 2.0 };
//! let mut lms = AdaptiveFirPredictor::new(config).unwrap();
//!
//! lms.step(false, 0.0, 0.0);
//! let (estimate, error) = lms.step(true, 1.0, 0.5);
//! assert_eq!((estimate, error), (0.0, 2.0));
//! assert_eq!(lms.coefficients(), &[0.2, 0.0]);
//! ```

mod clock;
pub mod config;
pub mod error;
mod ffi;
mod fringe;
mod history;
pub mod host;
mod lowpass;
mod predictor;
mod wavegen;

pub use clock::{Decimator, RisingEdge};
pub use config::{BlockConfig, FringeConfig, LowPassConfig, PredictorConfig, WaveGenConfig};
pub use error::{DspError, DspResult};
pub use ffi::{Destroy, digital_filter_x1, fringe_counting_x1, second_order_x1, wavegen_x1};
pub use fringe::FringeCounter;
pub use history::HistoryBuffer;
pub use lowpass::LowPass;
pub use predictor::AdaptiveFirPredictor;
pub use wavegen::WaveGen;
