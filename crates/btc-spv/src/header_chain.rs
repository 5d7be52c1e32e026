//! Proof-of-work and continuity checks over a run of raw block headers.

use bitcoin::{BlockHash, block::Header, consensus, hashes::Hash, params::Params};
use tbtc_primitives::{Buf32, hash};
use tracing::*;

use crate::{
    errors::{SpvError, SpvResult},
    policy::{EpochDifficulty, ProofPolicy},
};

/// Serialized size of a block header.
pub const HEADER_LEN: usize = 80;

/// What a header chain proved once every check passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedHeaderChain {
    merkle_root: Buf32,
    tip_hash: Buf32,
    header_count: usize,
    requested_difficulty: u64,
    accumulated_difficulty: u128,
}

impl ValidatedHeaderChain {
    /// Merkle root of the first header, in internal byte order.
    pub fn merkle_root(&self) -> Buf32 {
        self.merkle_root
    }

    /// Hash of the last header, in internal byte order.
    pub fn tip_hash(&self) -> Buf32 {
        self.tip_hash
    }

    pub fn header_count(&self) -> usize {
        self.header_count
    }

    /// The trusted epoch difficulty the first header matched.
    pub fn requested_difficulty(&self) -> u64 {
        self.requested_difficulty
    }

    /// Sum of the difficulties of all headers.
    pub fn accumulated_difficulty(&self) -> u128 {
        self.accumulated_difficulty
    }
}

/// Validates a concatenation of 80-byte headers, oldest first.
///
/// Every header must
/// 1. hash below the target encoded in its own bits,
/// 2. commit to the double hash of the header before it, and
/// 3. carry the current or the previous epoch difficulty.
///
/// The chain must hold at least [`ProofPolicy::min_headers`] headers and its
/// accumulated difficulty must reach the first header's difficulty times
/// [`ProofPolicy::difficulty_factor`].
///
/// # Errors
///
/// The first failing check, as an [`SpvError`].
pub fn validate_header_chain(
    headers: &[u8],
    difficulty: EpochDifficulty,
    policy: &ProofPolicy,
) -> SpvResult<ValidatedHeaderChain> {
    if headers.is_empty() || headers.len() % HEADER_LEN != 0 {
        return Err(SpvError::MalformedHeaders(headers.len()));
    }

    let header_count = headers.len() / HEADER_LEN;
    if header_count < policy.min_headers {
        return Err(SpvError::InsufficientConfirmations {
            required: policy.min_headers,
            found: header_count,
        });
    }

    let params = Params::new(policy.network);
    let mut prev_hash: Option<Buf32> = None;
    let mut merkle_root = Buf32::zero();
    let mut requested_difficulty = 0;
    let mut accumulated_difficulty: u128 = 0;

    for (index, raw) in headers.chunks_exact(HEADER_LEN).enumerate() {
        let header: Header =
            consensus::deserialize(raw).map_err(|_| SpvError::MalformedHeaders(headers.len()))?;
        let block_hash_raw = hash::sha256d(raw);

        // Check continuity
        if let Some(expected) = prev_hash {
            let found = Buf32::from(header.prev_blockhash.to_byte_array());
            if found != expected {
                return Err(SpvError::BrokenHeaderChain {
                    index,
                    expected,
                    found,
                });
            }
        } else {
            merkle_root = Buf32::from(header.merkle_root.to_byte_array());
        }

        // Check that the block hash meets its own target.
        let block_hash = BlockHash::from_byte_array(block_hash_raw.0);
        if !header.target().is_met_by(block_hash) {
            return Err(SpvError::InsufficientWork {
                index,
                block_hash,
                bits: header.bits.to_consensus(),
            });
        }

        let header_difficulty = header.difficulty(&params);
        let matched = match_epoch(header_difficulty, difficulty).ok_or(
            SpvError::UnexpectedDifficulty {
                index,
                found: header_difficulty,
                current: difficulty.current,
                previous: difficulty.previous,
            },
        )?;
        if index == 0 {
            requested_difficulty = matched;
        }

        accumulated_difficulty = accumulated_difficulty.saturating_add(header_difficulty);
        prev_hash = Some(block_hash_raw);
    }

    let required = u128::from(requested_difficulty) * u128::from(policy.difficulty_factor);
    if accumulated_difficulty < required {
        return Err(SpvError::InsufficientAccumulatedDifficulty {
            observed: accumulated_difficulty,
            required,
        });
    }

    debug!(
        headers = header_count,
        %merkle_root,
        accumulated_difficulty,
        "header chain validated"
    );

    Ok(ValidatedHeaderChain {
        merkle_root,
        tip_hash: prev_hash.unwrap_or_default(),
        header_count,
        requested_difficulty,
        accumulated_difficulty,
    })
}

/// Returns whichever trusted difficulty `found` equals, preferring the
/// current epoch.
fn match_epoch(found: u128, difficulty: EpochDifficulty) -> Option<u64> {
    [difficulty.current, difficulty.previous]
        .into_iter()
        .find(|d| *d != 0 && u128::from(*d) == found)
}
