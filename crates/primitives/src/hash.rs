//! Bitcoin hash functions over raw byte slices.

use bitcoin::hashes::{Hash, ripemd160};
use sha2::{Digest, Sha256};

use crate::buf::{Buf20, Buf32};

/// Single SHA256.
pub fn sha256(data: &[u8]) -> Buf32 {
    Buf32(Sha256::digest(data).into())
}

/// Double SHA256, as used for txids, block hashes and merkle nodes.
///
/// The digest is returned in internal byte order.
pub fn sha256d(data: &[u8]) -> Buf32 {
    let first = Sha256::digest(data);
    Buf32(Sha256::digest(first).into())
}

/// Hashes the concatenation of two merkle nodes.
pub fn sha256d_pair(left: &Buf32, right: &Buf32) -> Buf32 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_slice());
    buf[32..].copy_from_slice(right.as_slice());
    sha256d(&buf)
}

/// RIPEMD160 of SHA256, the digest committed to by P2PKH and P2WPKH scripts.
pub fn hash160(data: &[u8]) -> Buf20 {
    let inner = Sha256::digest(data);
    Buf20(ripemd160::Hash::hash(&inner).to_byte_array())
}
