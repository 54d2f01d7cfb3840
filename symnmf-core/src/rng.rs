//! Deterministic PRNG for reproducible factor initialisation.
//!
//! `SplitMix64` is a fast 64-bit generator with no external deps. The
//! factorization engine itself never draws random numbers; only the initial
//! H is sampled, so a fixed seed makes a whole `symnmf` run reproducible.

/// SplitMix64 PRNG: deterministic, single u64 state, period 2^64.
///
/// # Example
/// ```
/// use symnmf_core::SplitMix64;
///
/// let mut rng = SplitMix64::new(0);
/// let v = rng.next_uniform(0.0, 2.0);
/// assert!((0.0..2.0).contains(&v));
/// ```
#[derive(Clone, Debug)]
pub struct SplitMix64(u64);

impl SplitMix64 {
    /// Create a new PRNG with the given seed.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next raw u64.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform f64 in [0, 1), built from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [low, high).
    #[inline]
    pub fn next_uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Overwrite `out` with uniform samples from [low, high).
    pub fn fill_uniform(&mut self, out: &mut [f64], low: f64, high: f64) {
        for v in out.iter_mut() {
            *v = self.next_uniform(low, high);
        }
    }
}
