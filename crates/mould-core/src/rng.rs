//! Injectable random source for randomised generators.
//!
//! # Determinism strategy
//!
//! There is no process-wide RNG.  Every randomised generator receives a
//! [`SharedRng`] when it is constructed, normally the engine's own.  Seeding
//! the engine (or building a `GenRng` with [`GenRng::seeded`]) makes every
//! random value reproducible, which is what tests want.
//!
//! The handle is `Rc<RefCell<…>>`: the engine is single-threaded and
//! generators are called through `&self`.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Shared handle to a [`GenRng`].
pub type SharedRng = Rc<RefCell<GenRng>>;

/// Random source used by all randomised generators.
pub struct GenRng(SmallRng);

impl GenRng {
    /// Deterministic source: the same seed always yields the same values.
    pub fn seeded(seed: u64) -> Self {
        GenRng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        GenRng(SmallRng::from_entropy())
    }

    /// Wrap into a [`SharedRng`].
    pub fn shared(self) -> SharedRng {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform index in `0..len`.  `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// Random alphanumeric character.
    #[inline]
    pub fn alphanumeric(&mut self) -> char {
        char::from(self.0.sample(rand::distributions::Alphanumeric))
    }
}
