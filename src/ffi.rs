//! C entry points for the circuit simulator.
//!
//! Each block is exported under the name the simulator's schematic symbol
//! expects. The simulator calls it once per time step with a per-instance
//! opaque pointer, the simulation time and the block's data array:
//!
//! ```c
//! void second_order_x1(void **opaque, double t, union uData *data);
//! void Destroy(void *instance);
//! ```
//!
//! `*opaque` is null on the first call of each instance. The block is then
//! built from [`BlockConfig::from_env`] and boxed into it, so several
//! instances of the same symbol in one schematic never share state.
//!
//! When the simulation ends the simulator calls the library's [`Destroy`]
//! export once per instance with the value it kept in `*opaque`. The box is
//! type-erased, so one `Destroy` frees every block kind this library
//! exports, and an entry point handed another block's instance refuses it
//! instead of reinterpreting it.
//!
//! Nothing unwinds across this boundary: adapter errors and panics are
//! reported through `tracing` and the step becomes a no-op.

use std::any::Any;
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};

use crate::config::BlockConfig;
use crate::error::{DspError, DspResult};
use crate::fringe::FringeCounter;
use crate::host::{HostBlock, RawSlots, UData};
use crate::lowpass::LowPass;
use crate::predictor::AdaptiveFirPredictor;
use crate::wavegen::WaveGen;

/// What `*opaque` points at: a thin box around a block of any type.
type Instance = Box<dyn Any + Send>;

fn load_config(block: &'static str) -> BlockConfig {
    BlockConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(block, error = %e, "falling back to default configuration");
        BlockConfig::default()
    })
}

/// Shared body of every entry point.
///
/// # Safety
///
/// `opaque` must be the host's per-instance pointer, either null-initialized
/// or set by a previous call to one of this library's entry points. `data`
/// must point to at least `B::SLOTS` initialized elements.
unsafe fn evaluate_instance<B, F>(
    block: &'static str,
    opaque: *mut *mut c_void,
    t: f64,
    data: *mut UData,
    create: F,
) where
    B: HostBlock + Send + 'static,
    F: FnOnce(&BlockConfig) -> DspResult<B>,
{
    if opaque.is_null() || data.is_null() {
        tracing::error!(block, "host passed a null pointer");
        return;
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| -> DspResult<()> {
        // SAFETY: `opaque` is non-null and owned by the host for this instance.
        let instance = unsafe { &mut *opaque };
        if instance.is_null() {
            let built: Instance = Box::new(create(&load_config(block))?);
            *instance = Box::into_raw(Box::new(built)).cast::<c_void>();
            tracing::debug!(block, "instance created");
        }
        // SAFETY: `*instance` was produced by `Box::<Instance>::into_raw` above.
        let erased = unsafe { &mut *instance.cast::<Instance>() };
        let state = erased
            .downcast_mut::<B>()
            .ok_or(DspError::InstanceType { block })?;
        // SAFETY: the host guarantees `B::SLOTS` slots behind `data`.
        let mut io = unsafe { RawSlots::from_raw(data, B::SLOTS) };
        state.evaluate(t, &mut io)
    }));

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(block, error = %e, "evaluation failed"),
        Err(_) => tracing::error!(block, "evaluation panicked"),
    }
}

/// Teardown hook called by the simulator at the end of a run, once for each
/// instance, with the pointer an entry point stored in `*opaque`. Accepts
/// instances of every block in this library. Null is ignored.
///
/// # Safety
///
/// `instance` must be null or a value stored in `*opaque` by one of this
/// library's entry points, and must not be used afterwards.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Destroy(instance: *mut c_void) {
    if instance.is_null() {
        return;
    }
    // SAFETY: upheld by the caller.
    drop(unsafe { Box::from_raw(instance.cast::<Instance>()) });
    tracing::debug!("instance destroyed");
}

/// Adaptive FIR predictor. Slots: desired, clock, reference, estimate, error.
///
/// # Safety
///
/// Must be called by the simulator with its per-instance opaque pointer and a
/// data array of at least five slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn second_order_x1(opaque: *mut *mut c_void, t: f64, data: *mut UData) {
    // SAFETY: forwarded from the caller.
    unsafe {
        evaluate_instance("second_order_x1", opaque, t, data, |config| {
            AdaptiveFirPredictor::new(config.predictor.clone())
        })
    }
}

/// First-order low-pass. Slots: input, clock, output.
///
/// # Safety
///
/// Must be called by the simulator with its per-instance opaque pointer and a
/// data array of at least three slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digital_filter_x1(opaque: *mut *mut c_void, t: f64, data: *mut UData) {
    // SAFETY: forwarded from the caller.
    unsafe {
        evaluate_instance("digital_filter_x1", opaque, t, data, |config| {
            LowPass::new(config.lowpass.clone())
        })
    }
}

/// Two-pole oscillator. Slots: clock, output.
///
/// # Safety
///
/// Must be called by the simulator with its per-instance opaque pointer and a
/// data array of at least two slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wavegen_x1(opaque: *mut *mut c_void, t: f64, data: *mut UData) {
    // SAFETY: forwarded from the caller.
    unsafe {
        evaluate_instance("wavegen_x1", opaque, t, data, |config| {
            WaveGen::new(config.wavegen.clone())
        })
    }
}

/// Fringe detector. Slots: clock, input, output.
///
/// # Safety
///
/// Must be called by the simulator with its per-instance opaque pointer and a
/// data array of at least three slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fringe_counting_x1(opaque: *mut *mut c_void, t: f64, data: *mut UData) {
    // SAFETY: forwarded from the caller.
    unsafe {
        evaluate_instance("fringe_counting_x1", opaque, t, data, |config| {
            FringeCounter::new(config.fringe.clone())
        })
    }
}
