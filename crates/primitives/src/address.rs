use std::fmt;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{buf::Buf20, hash};

/// A 20-byte account address on the host ledger.
///
/// Deposits, owners and the factory itself are all addressed this way.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Default,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
#[serde(transparent)]
pub struct Address(Buf20);

impl Address {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(Buf20::new(bytes))
    }

    pub const fn zero() -> Self {
        Self(Buf20::zero())
    }

    pub const fn inner(&self) -> &Buf20 {
        &self.0
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        self.0.as_bytes()
    }

    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Derives the address of a child account created by `self` with the
    /// given creation nonce.
    ///
    /// The child address is the first 20 bytes of `sha256d(creator || nonce_le)`.
    pub fn derive_child(&self, nonce: u64) -> Self {
        let mut preimage = [0u8; 28];
        preimage[..20].copy_from_slice(self.as_bytes());
        preimage[20..].copy_from_slice(&nonce.to_le_bytes());
        let digest = hash::sha256d(&preimage);
        let mut out = [0u8; 20];
        out.copy_from_slice(&digest.as_slice()[..20]);
        Self::new(out)
    }
}

impl From<Buf20> for Address {
    fn from(value: Buf20) -> Self {
        Self(value)
    }
}

impl From<[u8; 20]> for Address {
    fn from(value: [u8; 20]) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:?})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:?}", self.0)
    }
}
