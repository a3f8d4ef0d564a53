//! Clock-domain primitives shared by every block.
//!
//! Blocks are evaluated by the host on every simulator time step, many times
//! per clock period. Work happens only on a rising edge of the block's clock
//! input, and the predictor further thins those edges with a decimator.

/// Rising-edge detector over a boolean clock level.
///
/// The previous level is latched on every call, so a clock held high yields
/// exactly one edge until it drops and rises again.
#[derive(Debug, Clone, Default)]
pub struct RisingEdge {
    last: bool,
}

impl RisingEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current clock level. Returns true on a false→true transition.
    pub fn update(&mut self, clock: bool) -> bool {
        let edge = clock && !self.last;
        self.last = clock;
        edge
    }

    /// Clock level seen on the previous call.
    pub fn last(&self) -> bool {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = false;
    }
}

/// Fires on every `ratio`-th tick.
///
/// The count stays in `[0, ratio)`: it is reset to zero on the tick that
/// reaches `ratio`, and that tick is the one reported as firing.
#[derive(Debug, Clone)]
pub struct Decimator {
    ratio: u32,
    count: u32,
}

impl Decimator {
    /// `ratio` of 0 is treated as 1 (fire on every tick).
    pub fn new(ratio: u32) -> Self {
        Decimator {
            ratio: ratio.max(1),
            count: 0,
        }
    }

    /// Count one tick. Returns true when the count wraps.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.ratio {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Ticks counted since the last wrap.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn ratio(&self) -> u32 {
        self.ratio
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}
