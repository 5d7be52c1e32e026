use std::{fmt, fs, path::Path};

use anyhow::Context;
use serde::Serialize;
use tbtc_btc_spv::{SpvProof, check_spv_proof};
use tbtc_config::Config;
use tbtc_primitives::Buf32;
use tracing::*;

/// What an accepted proof established.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct CheckReport {
    /// Little-endian txid.
    pub(crate) txid: Buf32,
    #[serde(with = "hex::serde")]
    pub(crate) outpoint: Vec<u8>,
    pub(crate) funding_value_sats: u64,
    pub(crate) header_count: usize,
    pub(crate) requested_difficulty: u64,
    pub(crate) accumulated_difficulty: u128,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "txid (LE):               {}", hex::encode(self.txid.as_bytes()))?;
        writeln!(f, "outpoint:                {}", hex::encode(&self.outpoint))?;
        writeln!(f, "funding value:           {} sats", self.funding_value_sats)?;
        writeln!(f, "headers:                 {}", self.header_count)?;
        writeln!(f, "requested difficulty:    {}", self.requested_difficulty)?;
        write!(f, "accumulated difficulty:  {}", self.accumulated_difficulty)
    }
}

pub(crate) fn load_proof(path: &Path) -> anyhow::Result<SpvProof> {
    let raw = fs::read(path).with_context(|| format!("reading proof {}", path.display()))?;
    serde_json::from_slice(&raw).context("decoding proof JSON")
}

/// Runs the full proof check. Rejections surface as errors.
pub(crate) fn run_check(config: &Config, proof: &SpvProof) -> anyhow::Result<CheckReport> {
    let verified = check_spv_proof(proof, config.btc.epoch_difficulty(), &config.deposit.proof)
        .context("proof rejected")?;

    let output = verified.tx.output(proof.funding_output_index)?;
    let outpoint = verified.tx.outpoint_bytes(proof.funding_output_index)?;
    let report = CheckReport {
        txid: verified.txid(),
        outpoint: outpoint.to_vec(),
        funding_value_sats: output.value.to_sat(),
        header_count: verified.chain.header_count(),
        requested_difficulty: verified.chain.requested_difficulty(),
        accumulated_difficulty: verified.chain.accumulated_difficulty(),
    };

    info!(txid = %report.txid, headers = report.header_count, "proof accepted");
    Ok(report)
}
