//! Fixed-length sample history for FIR blocks.
//!
//! Logically the window is most-recent-first: index 0 is the newest sample
//! and index `len - 1` the oldest. Physically it is a ring with a moving head,
//! so inserting a sample is O(1) instead of shifting the whole window.

/// Sliding window of the last `len` samples, newest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    /// Ring storage. The newest sample lives at `head`, older samples follow
    /// at increasing (wrapping) indices.
    samples: Vec<f64>,
    /// Physical index of the newest sample.
    head: usize,
}

impl HistoryBuffer {
    /// Create a zero-filled history of `len` samples.
    pub fn new(len: usize) -> Self {
        HistoryBuffer {
            samples: vec![0.0; len],
            head: 0,
        }
    }

    /// Insert a sample at the front, discarding the oldest one.
    pub fn push(&mut self, sample: f64) {
        let len = self.samples.len();
        if len == 0 {
            return;
        }
        // Stepping the head backwards lands on the oldest slot.
        self.head = if self.head == 0 { len - 1 } else { self.head - 1 };
        self.samples[self.head] = sample;
    }

    /// Sample `i` positions back from the newest one.
    pub fn get(&self, i: usize) -> Option<f64> {
        let len = self.samples.len();
        if i < len {
            Some(self.samples[(self.head + i) % len])
        } else {
            None
        }
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (older, newer) = self.samples.split_at(self.head);
        newer.iter().chain(older.iter()).copied()
    }

    /// FIR output: `Σ taps[i] · history[i]`, accumulated newest first.
    pub fn dot(&self, taps: &[f64]) -> f64 {
        taps.iter()
            .zip(self.iter())
            .fold(0.0, |acc, (w, x)| acc + w * x)
    }

    /// Copy out the window, newest first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Zero the window in place.
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
        self.head = 0;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_newest_first() {
        let mut h = HistoryBuffer::new(4);
        for s in [1.0, 2.0, 3.0] {
            h.push(s);
        }
        assert_eq!(h.to_vec(), vec![3.0, 2.0, 1.0, 0.0]);

        h.push(4.0);
        h.push(5.0);
        assert_eq!(h.to_vec(), vec![5.0, 4.0, 3.0, 2.0]);
        assert_eq!(h.get(0), Some(5.0));
        assert_eq!(h.get(3), Some(2.0));
        assert_eq!(h.get(4), None);
    }

    #[test]
    fn dot_aligns_taps_with_newest_sample() {
        let mut h = HistoryBuffer::new(3);
        h.push(1.0);
        h.push(10.0);
        // history = [10, 1, 0]
        assert_eq!(h.dot(&[1.0, 0.0, 0.0]), 10.0);
        assert_eq!(h.dot(&[0.0, 2.0, 5.0]), 2.0);
    }

    #[test]
    fn clear_restores_zero_window() {
        let mut h = HistoryBuffer::new(2);
        h.push(7.0);
        h.clear();
        assert_eq!(h.to_vec(), vec![0.0, 0.0]);
        h.push(1.0);
        assert_eq!(h.to_vec(), vec![1.0, 0.0]);
    }
}
