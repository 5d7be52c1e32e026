//! Bitcoin SPV proof checks.
//!
//! Three stateless checks over caller-supplied Bitcoin data, and
//! [`check_spv_proof`] which runs them together as one accept/reject
//! decision:
//!
//! - [`validate_transaction_structure`] decodes the transaction and derives its txid.
//! - [`verify_merkle_inclusion`] ties the txid to a block's merkle root.
//! - [`validate_header_chain`] checks the block and its confirmations against trusted difficulty.

pub mod errors;
pub mod header_chain;
pub mod merkle;
pub mod policy;
pub mod tx;

pub use errors::{SpvError, SpvResult};
pub use header_chain::{HEADER_LEN, ValidatedHeaderChain, validate_header_chain};
pub use merkle::{build_merkle_path, compute_merkle_root, verify_merkle_inclusion};
pub use policy::{EpochDifficulty, ProofPolicy};
use serde::{Deserialize, Serialize};
use tbtc_primitives::Buf32;
use tracing::*;
pub use tx::{ParsedTransaction, validate_transaction_structure};

/// A transaction together with the evidence that it was mined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpvProof {
    /// 4-byte little-endian transaction version.
    #[serde(with = "hex::serde")]
    pub version: [u8; 4],

    /// Var-int prefixed input vector.
    #[serde(with = "hex::serde")]
    pub vin: Vec<u8>,

    /// Var-int prefixed output vector.
    #[serde(with = "hex::serde")]
    pub vout: Vec<u8>,

    /// 4-byte little-endian locktime.
    #[serde(with = "hex::serde")]
    pub locktime: [u8; 4],

    /// Index of the output of interest.
    pub funding_output_index: u32,

    /// Sibling nodes from the leaf level upward, without the txid and root.
    #[serde(with = "hex::serde")]
    pub merkle_proof: Vec<u8>,

    pub tx_index_in_block: u64,

    /// Concatenated 80-byte headers, the containing block first.
    #[serde(with = "hex::serde")]
    pub headers: Vec<u8>,
}

/// A proof that passed every check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedTransaction {
    pub tx: ParsedTransaction,
    pub chain: ValidatedHeaderChain,
}

impl VerifiedTransaction {
    pub fn txid(&self) -> Buf32 {
        self.tx.txid()
    }
}

/// Runs the transaction, merkle and header-chain checks as one decision.
///
/// The header chain is checked before the merkle path so a proof against an
/// unworked header is reported as such.
///
/// # Errors
///
/// The first failing sub-check. Nothing is partially accepted.
pub fn check_spv_proof(
    proof: &SpvProof,
    difficulty: EpochDifficulty,
    policy: &ProofPolicy,
) -> SpvResult<VerifiedTransaction> {
    let tx =
        validate_transaction_structure(&proof.version, &proof.vin, &proof.vout, &proof.locktime)?;
    tx.output(proof.funding_output_index)?;

    let chain = validate_header_chain(&proof.headers, difficulty, policy)?;

    let txid = tx.txid();
    let root = chain.merkle_root();
    if !verify_merkle_inclusion(&txid, &proof.merkle_proof, proof.tx_index_in_block, &root) {
        warn!(%txid, %root, index = proof.tx_index_in_block, "merkle proof rejected");
        return Err(SpvError::MerkleMismatch { txid, root });
    }

    debug!(%txid, confirmations = chain.header_count(), "spv proof accepted");
    Ok(VerifiedTransaction { tx, chain })
}
