//! Checks tying a proven Bitcoin transaction to this deposit's signer key.

use bitcoin::{
    PubkeyHash, ScriptBuf, TxOut, WPubkeyHash, hashes::Hash, secp256k1::PublicKey,
};
use tbtc_primitives::Buf32;

use crate::{
    errors::{DepositError, DepositResult},
    state::SignerPubkey,
};

/// Parses the raw key a signing group published.
///
/// # Errors
///
/// - [`DepositError::PubkeyUnavailable`] unless exactly 64 bytes were published.
/// - [`DepositError::InvalidPubkey`] if either coordinate is zero or the pair is not a curve point.
pub fn parse_signer_pubkey(raw: &[u8]) -> DepositResult<SignerPubkey> {
    if raw.len() != 64 {
        return Err(DepositError::PubkeyUnavailable(raw.len()));
    }

    let x = Buf32::try_from(&raw[..32]).map_err(|_| DepositError::PubkeyUnavailable(raw.len()))?;
    let y = Buf32::try_from(&raw[32..]).map_err(|_| DepositError::PubkeyUnavailable(raw.len()))?;
    if x.is_zero() || y.is_zero() {
        return Err(DepositError::InvalidPubkey("either half of the pubkey is zero"));
    }

    let mut sec1 = [0u8; 65];
    sec1[0] = 0x04;
    sec1[1..].copy_from_slice(raw);
    PublicKey::from_slice(&sec1)
        .map_err(|_| DepositError::InvalidPubkey("not a point on secp256k1"))?;

    Ok(SignerPubkey::new(x, y))
}

/// Locking scripts that pay the signer key: P2WPKH and P2PKH over its
/// compressed hash160.
pub fn signer_scripts(pubkey: &SignerPubkey) -> [ScriptBuf; 2] {
    let pkh = pubkey.pubkey_hash();
    [
        ScriptBuf::new_p2wpkh(&WPubkeyHash::from_byte_array(pkh.0)),
        ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array(pkh.0)),
    ]
}

/// Checks that `output` pays the signer key at least `lot_size_sats`.
///
/// # Errors
///
/// [`DepositError::NoMatchingFundingOutput`] if the script differs or the
/// value is below the lot size.
pub fn check_funding_output(
    output: &TxOut,
    index: u32,
    pubkey: &SignerPubkey,
    lot_size_sats: u64,
) -> DepositResult<u64> {
    if !signer_scripts(pubkey).contains(&output.script_pubkey) {
        return Err(DepositError::NoMatchingFundingOutput {
            index,
            reason: "output does not pay the signer public key hash",
        });
    }

    let value = output.value.to_sat();
    if value < lot_size_sats {
        return Err(DepositError::NoMatchingFundingOutput {
            index,
            reason: "deposit too small",
        });
    }

    Ok(value)
}
