use bitcoin::BlockHash;
use tbtc_primitives::Buf32;
use thiserror::Error;

pub type SpvResult<T> = Result<T, SpvError>;

/// Reasons a caller-supplied Bitcoin proof is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpvError {
    /// The transaction fields do not decode as Bitcoin wire data.
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),

    /// The header bytes are not a whole number of 80-byte headers.
    #[error("header chain length {0} is not a multiple of 80")]
    MalformedHeaders(usize),

    /// The merkle path does not lead from the txid to the root in the first header.
    #[error("merkle proof does not connect txid {txid} to root {root}")]
    MerkleMismatch { txid: Buf32, root: Buf32 },

    /// Fewer headers than the required confirmations.
    #[error("need at least {required} headers, got {found}")]
    InsufficientConfirmations { required: usize, found: usize },

    /// A header's hash does not meet the target encoded in its own bits.
    #[error("header {index} hash {block_hash} does not meet target 0x{bits:08x}")]
    InsufficientWork {
        index: usize,
        block_hash: BlockHash,
        bits: u32,
    },

    /// A header does not commit to the hash of the header before it.
    #[error("header {index} links to {found}, expected {expected}")]
    BrokenHeaderChain {
        index: usize,
        expected: Buf32,
        found: Buf32,
    },

    /// A header's difficulty matches neither trusted epoch difficulty.
    #[error(
        "header {index} difficulty {found} is neither current ({current}) nor previous ({previous})"
    )]
    UnexpectedDifficulty {
        index: usize,
        found: u128,
        current: u64,
        previous: u64,
    },

    /// The chain as a whole carries less work than the policy demands.
    #[error("accumulated difficulty {observed} below required {required}")]
    InsufficientAccumulatedDifficulty { observed: u128, required: u128 },
}
