//! Structural validation of a transaction supplied as its wire-encoded parts.

use bitcoin::{TxIn, TxOut, consensus};
use tbtc_primitives::{Buf32, hash};
use tracing::*;

use crate::errors::{SpvError, SpvResult};

/// A transaction whose input and output vectors decoded cleanly.
///
/// Only the non-witness serialization is hashed, so `txid` is the legacy
/// txid even for segwit spends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedTransaction {
    txid: Buf32,
    inputs: Vec<TxIn>,
    outputs: Vec<TxOut>,
}

impl ParsedTransaction {
    /// Txid in internal (little-endian) byte order.
    pub fn txid(&self) -> Buf32 {
        self.txid
    }

    pub fn inputs(&self) -> &[TxIn] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOut] {
        &self.outputs
    }

    /// Gets the output at `index`.
    ///
    /// # Errors
    ///
    /// [`SpvError::MalformedTransaction`] if the transaction has no such output.
    pub fn output(&self, index: u32) -> SpvResult<&TxOut> {
        self.outputs.get(index as usize).ok_or_else(|| {
            SpvError::MalformedTransaction(format!(
                "output index {index} out of range ({} outputs)",
                self.outputs.len()
            ))
        })
    }

    /// Serializes the outpoint spending output `index`: the little-endian
    /// txid followed by the 4-byte little-endian index.
    pub fn outpoint_bytes(&self, index: u32) -> SpvResult<[u8; 36]> {
        self.output(index)?;
        let mut out = [0u8; 36];
        out[..32].copy_from_slice(self.txid.as_slice());
        out[32..].copy_from_slice(&index.to_le_bytes());
        Ok(out)
    }
}

/// Parses the four legacy transaction fields and computes the txid.
///
/// `vin` and `vout` must each be a var-int count followed by exactly that many
/// entries, with no trailing bytes, and each must hold at least one entry.
///
/// # Errors
///
/// [`SpvError::MalformedTransaction`] if either vector is empty or its length
/// is inconsistent with the encoded counts.
pub fn validate_transaction_structure(
    version: &[u8; 4],
    vin: &[u8],
    vout: &[u8],
    locktime: &[u8; 4],
) -> SpvResult<ParsedTransaction> {
    let inputs: Vec<TxIn> = consensus::deserialize(vin)
        .map_err(|e| SpvError::MalformedTransaction(format!("input vector: {e}")))?;
    if inputs.is_empty() {
        return Err(SpvError::MalformedTransaction("no inputs".into()));
    }

    let outputs: Vec<TxOut> = consensus::deserialize(vout)
        .map_err(|e| SpvError::MalformedTransaction(format!("output vector: {e}")))?;
    if outputs.is_empty() {
        return Err(SpvError::MalformedTransaction("no outputs".into()));
    }

    let mut raw = Vec::with_capacity(8 + vin.len() + vout.len());
    raw.extend_from_slice(version);
    raw.extend_from_slice(vin);
    raw.extend_from_slice(vout);
    raw.extend_from_slice(locktime);
    let txid = hash::sha256d(&raw);

    trace!(%txid, inputs = inputs.len(), outputs = outputs.len(), "parsed transaction");

    Ok(ParsedTransaction {
        txid,
        inputs,
        outputs,
    })
}
