use crate::params::lerp;
use fnv::FnvHasher;
use rand::prelude::*;
use std::hash::Hasher;

/// Seed accepted by the modulators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    Int(u64),
    Text(String),
    /// Non-deterministic; a fresh seed is drawn from the thread RNG.
    Entropy,
}

impl Seed {
    /// Resolves to the integer the generator is seeded with.
    pub fn resolve(&self) -> u64 {
        match self {
            Seed::Int(n) => *n,
            Seed::Text(s) => hash_seed_text(s),
            Seed::Entropy => rand::thread_rng().gen(),
        }
    }

    /// Integers parse as `Int`, anything else hashes as `Text`.
    pub fn parse(raw: &str) -> Seed {
        match raw.trim().parse::<u64>() {
            Ok(n) => Seed::Int(n),
            Err(_) => Seed::Text(raw.to_owned()),
        }
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Int(n)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_owned())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

/// FNV-1a over the UTF-8 bytes; order sensitive.
pub fn hash_seed_text(text: &str) -> u64 {
    let mut h = FnvHasher::default();
    h.write(text.as_bytes());
    h.finish()
}

/// Deterministic uniform source owned by a single modulator instance.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: Option<Seed>) -> Self {
        let seed = seed.unwrap_or(Seed::Entropy).resolve();
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        Self::new(Some(Seed::Int(seed)))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next uniform value in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform value in [min, max); returns `min` when the span is empty.
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        let u = self.next_f32();
        lerp(min, max, u)
    }

    /// Raw 64-bit draw, used to derive sub-seeds.
    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }
}
