//! Randomized inputs and collaborator bundles for deposit tests.

use std::collections::BTreeSet;

use arbitrary::{Arbitrary, Unstructured};
use rand_core::{OsRng, RngCore};
use tbtc_primitives::{Address, NativeAmount};

mod collaborators;

pub use collaborators::Collaborators;

/// Entropy drawn per attempt, enough for any value type in the workspace.
const ENTROPY_LEN: usize = 4096;

/// Fresh entropy draws before giving up on one value.
const MAX_ATTEMPTS: usize = 16;

/// Draws deposit inputs (callers, bonds, records) from OS entropy.
#[derive(Debug)]
pub struct ArbitraryGenerator {
    buf: Vec<u8>,
}

impl Default for ArbitraryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitraryGenerator {
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; ENTROPY_LEN],
        }
    }

    /// Any [`Arbitrary`] value.
    ///
    /// # Panics
    ///
    /// If every attempt runs out of entropy.
    pub fn generate<T>(&mut self) -> T
    where
        T: for<'a> Arbitrary<'a>,
    {
        let mut last_error = None;
        for _ in 0..MAX_ATTEMPTS {
            OsRng.fill_bytes(&mut self.buf);
            match T::arbitrary(&mut Unstructured::new(&self.buf)) {
                Ok(value) => return value,
                Err(err) => last_error = Some(err),
            }
        }
        panic!("arbitrary generation exhausted: {last_error:?}");
    }

    /// `n` pairwise-distinct, non-zero addresses, usable as separate callers.
    pub fn distinct_addresses(&mut self, n: usize) -> Vec<Address> {
        let mut seen = BTreeSet::new();
        while seen.len() < n {
            let addr: Address = self.generate();
            if !addr.is_zero() {
                seen.insert(addr);
            }
        }
        seen.into_iter().collect()
    }

    /// A bond in `floor..=floor + spread`.
    pub fn bond_above(&mut self, floor: NativeAmount, spread: u64) -> NativeAmount {
        let extra = self.generate::<u64>() % spread.saturating_add(1);
        floor.saturating_add(NativeAmount::new(extra))
    }
}
