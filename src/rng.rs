//! Seeded randomness, split into named per-system streams.
//!
//! Every random draw in the simulation comes from a stream derived from the
//! scenario seed ("worldgen", "movement", "combat", ...), so a run is fully
//! reproducible and adding draws to one system never perturbs another.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct RngManager {
    master: ChaCha8Rng,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    /// Borrow the stream for `name`, creating it on first use. Stream seeds
    /// are drawn from the master generator, so creation order matters: the
    /// engine requests streams in its fixed system order.
    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let entry = self.streams.entry(name.to_string()).or_insert_with(|| {
            let mut seed_bytes = [0u8; 8];
            self.master.fill_bytes(&mut seed_bytes);
            ChaCha8Rng::seed_from_u64(u64::from_le_bytes(seed_bytes))
        });
        SystemRng { inner: entry }
    }
}

pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl<'a> RngCore for SystemRng<'a> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
