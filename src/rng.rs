//! Seedable pseudo-random number generator (xorshift64).
//!
//! Every randomized attribute on the card (sprite spawn, blink interval,
//! confetti colour, sound pick) draws from an `Rng`. The card owns one root
//! generator and hands each component its own stream via [`Rng::fork`], so a
//! fixed seed reproduces the whole page.

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the platform: getrandom when the `rng` feature is on, the
    /// performance clock otherwise.
    pub fn from_entropy() -> Self {
        Rng::new(entropy_seed())
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        // top 53 bits -> mantissa
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in [min, max).
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }

    /// Uniform index in [0, len). Returns 0 for an empty range.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }

    /// Derive an independent generator, advancing this one.
    pub fn fork(&mut self) -> Rng {
        Rng::new(self.next_u64() ^ 0x9E37_79B9_7F4A_7C15)
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom unavailable ({e}); seeding from clock");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> u64 {
    clock_seed()
}

fn clock_seed() -> u64 {
    let now = crate::performance_now();
    // Linear transform so nearby timestamps still diverge quickly
    now.to_bits()
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.index(1000), rng2.index(1000));
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        let _ = rng.index(100);
        assert_eq!(rng.index(0), 0);
    }

    #[test]
    fn range_stays_half_open() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.range(20.0, 100.0);
            assert!((20.0..100.0).contains(&v), "{v} escaped [20,100)");
        }
    }

    #[test]
    fn forks_diverge_from_parent() {
        let mut root = Rng::new(99);
        let mut a = root.fork();
        let mut b = root.fork();
        let sa: Vec<usize> = (0..8).map(|_| a.index(1 << 20)).collect();
        let sb: Vec<usize> = (0..8).map(|_| b.index(1 << 20)).collect();
        assert_ne!(sa, sb);
    }
}
