//! Policy constants and the tunable parameter set the logic runs with.

use serde::{Deserialize, Serialize};
use tbtc_btc_spv::ProofPolicy;
use tbtc_primitives::NativeAmount;

/// Seconds the signing group has to publish its key after being requested.
pub const DEFAULT_SIGNING_GROUP_FORMATION_TIMEOUT: u64 = 60 * 60 * 3;

/// Seconds the funder has to prove the Bitcoin payment once the key is known.
pub const DEFAULT_FUNDING_PROOF_TIMEOUT: u64 = 60 * 60 * 3;

/// One bitcoin, the lot size offered when nothing else is configured.
pub const DEFAULT_LOT_SIZE_SATS: u64 = 100_000_000;

/// Bond floor offered by the stock system registry.
pub const DEFAULT_SETUP_FEE_ESTIMATE: NativeAmount = NativeAmount::new(100_000);

/// Signer fee divisor offered by the stock system registry.
pub const DEFAULT_SIGNER_FEE_DIVISOR: u64 = 2000;

/// Parameters shared by every deposit running the same logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositParams {
    #[serde(default = "default_signing_group_formation_timeout")]
    pub signing_group_formation_timeout: u64,

    #[serde(default = "default_funding_proof_timeout")]
    pub funding_proof_timeout: u64,

    /// How funding proofs are judged.
    #[serde(default)]
    pub proof: ProofPolicy,
}

impl Default for DepositParams {
    fn default() -> Self {
        Self {
            signing_group_formation_timeout: DEFAULT_SIGNING_GROUP_FORMATION_TIMEOUT,
            funding_proof_timeout: DEFAULT_FUNDING_PROOF_TIMEOUT,
            proof: ProofPolicy::default(),
        }
    }
}

fn default_signing_group_formation_timeout() -> u64 {
    DEFAULT_SIGNING_GROUP_FORMATION_TIMEOUT
}

fn default_funding_proof_timeout() -> u64 {
    DEFAULT_FUNDING_PROOF_TIMEOUT
}
