use bitcoin::Network;
use serde::{Deserialize, Serialize};

/// Default number of headers a proof must carry: the containing block plus
/// five confirmations.
pub const DEFAULT_MIN_HEADERS: usize = 6;

/// Default multiple of the requested difficulty the chain must accumulate.
pub const DEFAULT_TX_PROOF_DIFFICULTY_FACTOR: u64 = 6;

/// Tunables for accepting an SPV proof.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPolicy {
    /// Network whose maximum target defines difficulty 1.
    #[serde(default = "default_network")]
    pub network: Network,

    #[serde(default = "default_min_headers")]
    pub min_headers: usize,

    #[serde(default = "default_difficulty_factor")]
    pub difficulty_factor: u64,
}

impl Default for ProofPolicy {
    fn default() -> Self {
        Self {
            network: default_network(),
            min_headers: DEFAULT_MIN_HEADERS,
            difficulty_factor: DEFAULT_TX_PROOF_DIFFICULTY_FACTOR,
        }
    }
}

fn default_network() -> Network {
    Network::Bitcoin
}

fn default_min_headers() -> usize {
    DEFAULT_MIN_HEADERS
}

fn default_difficulty_factor() -> u64 {
    DEFAULT_TX_PROOF_DIFFICULTY_FACTOR
}

/// Trusted difficulties of the current and previous retarget epochs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochDifficulty {
    pub current: u64,
    pub previous: u64,
}
