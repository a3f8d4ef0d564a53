//! Host adapter: slot-based I/O between a simulator and the blocks.
//!
//! The simulator hands each block a fixed-order array of typed slots on every
//! time step. Each block has its own slot map; inputs are read before the
//! step and outputs written back after it. Blocks themselves only see plain
//! `step` arguments.
//!
//! | block                  | slots                                             |
//! |------------------------|---------------------------------------------------|
//! | `AdaptiveFirPredictor` | 0 desired, 1 clock, 2 reference, 3 estimate, 4 error |
//! | `LowPass`              | 0 input, 1 clock, 2 output                        |
//! | `WaveGen`              | 0 clock, 1 output                                 |
//! | `FringeCounter`        | 0 clock, 1 input, 2 output                        |
//!
//! Output slots are written only on the calls that compute a new value. On
//! every other call they are left as the host holds them, which gives
//! sample-and-hold as long as the host keeps its slot array between steps.

use std::ffi::c_char;

use crate::error::{DspError, DspResult};
use crate::fringe::FringeCounter;
use crate::lowpass::LowPass;
use crate::predictor::AdaptiveFirPredictor;
use crate::wavegen::WaveGen;

/// Typed access to a host's slot array.
pub trait SlotIo {
    fn read_bool(&self, slot: usize) -> DspResult<bool>;
    fn read_f64(&self, slot: usize) -> DspResult<f64>;
    fn write_f64(&mut self, slot: usize, value: f64) -> DspResult<()>;
}

/// A block that can be driven through a host slot array.
pub trait HostBlock {
    /// Number of slots in the block's layout.
    const SLOTS: usize;

    /// Read inputs, step once, and write outputs if the block updated them.
    /// `t` is the simulator time, which none of the blocks depend on.
    fn evaluate<S: SlotIo + ?Sized>(&mut self, t: f64, io: &mut S) -> DspResult<()>;
}

impl HostBlock for AdaptiveFirPredictor {
    const SLOTS: usize = 5;

    fn evaluate<S: SlotIo + ?Sized>(&mut self, _t: f64, io: &mut S) -> DspResult<()> {
        let desired = io.read_f64(0)?;
        let clock = io.read_bool(1)?;
        let reference = io.read_f64(2)?;
        if let Some((estimate, error)) = self.tick(clock, desired, reference) {
            io.write_f64(3, estimate)?;
            io.write_f64(4, error)?;
        }
        Ok(())
    }
}

impl HostBlock for LowPass {
    const SLOTS: usize = 3;

    fn evaluate<S: SlotIo + ?Sized>(&mut self, _t: f64, io: &mut S) -> DspResult<()> {
        let input = io.read_f64(0)?;
        let clock = io.read_bool(1)?;
        match self.tick(clock, input) {
            Some(output) => io.write_f64(2, output),
            None => Ok(()),
        }
    }
}

impl HostBlock for WaveGen {
    const SLOTS: usize = 2;

    fn evaluate<S: SlotIo + ?Sized>(&mut self, _t: f64, io: &mut S) -> DspResult<()> {
        let clock = io.read_bool(0)?;
        match self.tick(clock) {
            Some(output) => io.write_f64(1, output),
            None => Ok(()),
        }
    }
}

impl HostBlock for FringeCounter {
    const SLOTS: usize = 3;

    fn evaluate<S: SlotIo + ?Sized>(&mut self, _t: f64, io: &mut S) -> DspResult<()> {
        let clock = io.read_bool(0)?;
        let input = io.read_f64(1)?;
        match self.tick(clock, input) {
            Some(output) => io.write_f64(2, output),
            None => Ok(()),
        }
    }
}

// ── In-process slots ─────────────────────────────────────────────────

/// A tagged slot for hosts written in Rust.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot {
    Bool(bool),
    Real(f64),
}

impl Slot {
    fn type_name(&self) -> &'static str {
        match self {
            Slot::Bool(_) => "bool",
            Slot::Real(_) => "f64",
        }
    }
}

fn slot_ref(slots: &[Slot], slot: usize) -> DspResult<&Slot> {
    slots.get(slot).ok_or(DspError::SlotOutOfRange {
        slot,
        len: slots.len(),
    })
}

impl SlotIo for [Slot] {
    fn read_bool(&self, slot: usize) -> DspResult<bool> {
        match slot_ref(self, slot)? {
            Slot::Bool(b) => Ok(*b),
            other => Err(DspError::SlotType {
                slot,
                expected: "bool",
                found: other.type_name(),
            }),
        }
    }

    fn read_f64(&self, slot: usize) -> DspResult<f64> {
        match slot_ref(self, slot)? {
            Slot::Real(v) => Ok(*v),
            other => Err(DspError::SlotType {
                slot,
                expected: "f64",
                found: other.type_name(),
            }),
        }
    }

    fn write_f64(&mut self, slot: usize, value: f64) -> DspResult<()> {
        let len = self.len();
        match self.get_mut(slot) {
            Some(Slot::Real(v)) => {
                *v = value;
                Ok(())
            }
            Some(other) => Err(DspError::SlotType {
                slot,
                expected: "f64",
                found: other.type_name(),
            }),
            None => Err(DspError::SlotOutOfRange { slot, len }),
        }
    }
}

// ── C layout ─────────────────────────────────────────────────────────

/// One element of the simulator's data array, laid out as its C union.
///
/// Which field is live depends on the block's slot map; the union carries no
/// tag of its own.
#[repr(C)]
#[derive(Clone, Copy)]
pub union UData {
    pub b: bool,
    pub c: c_char,
    pub uc: u8,
    pub s: i16,
    pub us: u16,
    pub i: i32,
    pub ui: u32,
    pub f: f32,
    pub d: f64,
    pub i64: i64,
    pub ui64: u64,
    pub text: *mut c_char,
    pub bytes: *mut u8,
}

impl UData {
    /// A fully initialized slot holding `value`.
    pub fn real(value: f64) -> Self {
        UData { d: value }
    }

    /// A fully initialized slot holding `value`, remaining bytes zeroed.
    pub fn flag(value: bool) -> Self {
        let mut data = UData { ui64: 0 };
        data.b = value;
        data
    }
}

/// View over a host-owned `UData` array.
pub struct RawSlots<'a> {
    slots: &'a mut [UData],
}

impl<'a> RawSlots<'a> {
    /// # Safety
    ///
    /// `data` must be non-null and point to `len` fully initialized `UData`
    /// values that stay valid, and are not accessed elsewhere, for `'a`.
    pub unsafe fn from_raw(data: *mut UData, len: usize) -> Self {
        // SAFETY: upheld by the caller.
        let slots = unsafe { std::slice::from_raw_parts_mut(data, len) };
        RawSlots { slots }
    }

    fn get(&self, slot: usize) -> DspResult<&UData> {
        self.slots.get(slot).ok_or(DspError::SlotOutOfRange {
            slot,
            len: self.slots.len(),
        })
    }
}

impl SlotIo for RawSlots<'_> {
    fn read_bool(&self, slot: usize) -> DspResult<bool> {
        let data = self.get(slot)?;
        // Read the byte rather than `b`: any non-zero byte from the host is
        // true, and no invalid `bool` is ever materialized.
        // SAFETY: every slot is initialized (see `from_raw`).
        Ok(unsafe { data.uc } != 0)
    }

    fn read_f64(&self, slot: usize) -> DspResult<f64> {
        let data = self.get(slot)?;
        // SAFETY: every slot is initialized and any bit pattern is an f64.
        Ok(unsafe { data.d })
    }

    fn write_f64(&mut self, slot: usize, value: f64) -> DspResult<()> {
        let len = self.slots.len();
        let data = self
            .slots
            .get_mut(slot)
            .ok_or(DspError::SlotOutOfRange { slot, len })?;
        data.d = value;
        Ok(())
    }
}
