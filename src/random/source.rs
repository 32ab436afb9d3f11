//! RandomSource trait for seeded generators.
//!
//! Every function of the engine that needs randomness receives a
//! `&mut impl RandomSource`; there is no process-wide generator. Two sources
//! built from the same seed must yield the same sequence forever, since task
//! data is regenerated from its seed on every call.

/// A deterministic stream of pseudorandom values.
pub trait RandomSource {
    /// Returns the next 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniform value in `[0, n)`, or 0 when `n == 0`.
    ///
    /// Uses rejection sampling, so the result is unbiased for any `n`.
    fn next_below(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        // 2^64 mod n: values below this would over-represent small results.
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return x % n;
            }
        }
    }

    /// Returns a uniform value in the half-open range `[min, max)`.
    ///
    /// Returns `min` when the range is empty.
    fn range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        min + self.next_below((max - min) as u64) as usize
    }

    /// Returns a uniform double in `[0, 1)` with 53 bits of precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}
