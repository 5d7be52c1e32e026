//! Per-deposit record and the value types it holds.

use std::fmt;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use tbtc_primitives::{Address, Buf20, Buf32, hash};

use crate::escrow::Escrow;

/// Lifecycle state of a deposit.
///
/// The discriminants are the externally visible state codes.
#[repr(u8)]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Arbitrary,
    IntoPrimitive,
    TryFromPrimitive,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[borsh(use_discriminant = true)]
pub enum DepositState {
    /// Freshly allocated, not yet initialized.
    #[default]
    Start = 0,

    /// Waiting on the signing group to publish its key.
    AwaitingSignerSetup = 1,

    /// Key known, waiting on proof of the Bitcoin payment.
    AwaitingBtcFundingProof = 2,

    /// Setup or funding timed out. Terminal for this lifecycle.
    FailedSetup = 4,

    /// Funded. Handed off to redemption flows.
    Active = 5,
}

impl DepositState {
    /// Numeric state code.
    pub fn code(self) -> u8 {
        self.into()
    }
}

impl fmt::Display for DepositState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "START",
            Self::AwaitingSignerSetup => "AWAITING_SIGNER_SETUP",
            Self::AwaitingBtcFundingProof => "AWAITING_BTC_FUNDING_PROOF",
            Self::FailedSetup => "FAILED_SETUP",
            Self::Active => "ACTIVE",
        };
        f.write_str(s)
    }
}

/// Uncompressed secp256k1 key of the signing group, as its two coordinates.
///
/// The all-zero value means the key has not been retrieved.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct SignerPubkey {
    pub x: Buf32,
    pub y: Buf32,
}

impl SignerPubkey {
    pub fn new(x: Buf32, y: Buf32) -> Self {
        Self { x, y }
    }

    pub fn is_set(&self) -> bool {
        !self.x.is_zero() && !self.y.is_zero()
    }

    /// SEC1 compressed form: parity prefix of Y, then X.
    pub fn compressed(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[0] = if self.y.as_bytes()[31] & 1 == 0 {
            0x02
        } else {
            0x03
        };
        out[1..].copy_from_slice(self.x.as_slice());
        out
    }

    /// hash160 of the compressed key.
    pub fn pubkey_hash(&self) -> Buf20 {
        hash::hash160(&self.compressed())
    }
}

/// The outpoint of the accepted funding output.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct FundingOutpoint {
    /// Txid in internal (little-endian) byte order.
    pub txid: Buf32,
    pub vout: u32,
}

impl FundingOutpoint {
    /// Wire form: txid followed by the little-endian output index.
    pub fn to_bytes(&self) -> [u8; 36] {
        let mut out = [0u8; 36];
        out[..32].copy_from_slice(self.txid.as_slice());
        out[32..].copy_from_slice(&self.vout.to_le_bytes());
        out
    }
}

/// Facts recorded once a funding proof is accepted. Immutable afterward.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct FundingInfo {
    value_sats: u64,
    funded_at: u64,
    outpoint: FundingOutpoint,
}

impl FundingInfo {
    pub fn new(value_sats: u64, funded_at: u64, outpoint: FundingOutpoint) -> Self {
        Self {
            value_sats,
            funded_at,
            outpoint,
        }
    }

    pub fn value_sats(&self) -> u64 {
        self.value_sats
    }

    /// Output value as its 8 little-endian wire bytes.
    pub fn value_bytes(&self) -> [u8; 8] {
        self.value_sats.to_le_bytes()
    }

    /// Ledger time the proof was accepted.
    pub fn funded_at(&self) -> u64 {
        self.funded_at
    }

    pub fn outpoint(&self) -> &FundingOutpoint {
        &self.outpoint
    }
}

/// All state owned by one deposit instance.
///
/// Records are plain data. Every mutation goes through
/// [`DepositLogic`](crate::DepositLogic), which checks the state guard first.
#[derive(
    Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct DepositRecord {
    /// Address of this instance. Also keys its owner token.
    address: Address,

    state: DepositState,

    /// Handle of the signing group serving this deposit.
    keep_address: Option<Address>,

    lot_size_sats: u64,

    signer_fee_divisor: u64,

    signing_group_pubkey: SignerPubkey,

    /// Zero when unset.
    signing_group_requested_at: u64,

    /// Zero when unset.
    funding_proof_timer_start: u64,

    funding_info: Option<FundingInfo>,

    /// Script the funder asked to be refunded to, if it asked.
    funder_abort_script: Option<Vec<u8>>,

    escrow: Escrow,
}

impl DepositRecord {
    /// Allocates a fresh record in [`DepositState::Start`].
    pub fn new(address: Address) -> Self {
        Self {
            address,
            state: DepositState::Start,
            keep_address: None,
            lot_size_sats: 0,
            signer_fee_divisor: 0,
            signing_group_pubkey: SignerPubkey::default(),
            signing_group_requested_at: 0,
            funding_proof_timer_start: 0,
            funding_info: None,
            funder_abort_script: None,
            escrow: Escrow::default(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn state(&self) -> DepositState {
        self.state
    }

    pub fn keep_address(&self) -> Option<&Address> {
        self.keep_address.as_ref()
    }

    pub fn lot_size_sats(&self) -> u64 {
        self.lot_size_sats
    }

    pub fn signer_fee_divisor(&self) -> u64 {
        self.signer_fee_divisor
    }

    pub fn signing_group_pubkey(&self) -> &SignerPubkey {
        &self.signing_group_pubkey
    }

    pub fn signing_group_requested_at(&self) -> u64 {
        self.signing_group_requested_at
    }

    pub fn funding_proof_timer_start(&self) -> u64 {
        self.funding_proof_timer_start
    }

    pub fn funding_info(&self) -> Option<&FundingInfo> {
        self.funding_info.as_ref()
    }

    pub fn funder_abort_script(&self) -> Option<&[u8]> {
        self.funder_abort_script.as_deref()
    }

    pub fn escrow(&self) -> &Escrow {
        &self.escrow
    }

    pub(crate) fn set_state(&mut self, state: DepositState) {
        self.state = state;
    }

    pub(crate) fn set_keep(&mut self, keep: Address, lot_size_sats: u64, signer_fee_divisor: u64) {
        self.keep_address = Some(keep);
        self.lot_size_sats = lot_size_sats;
        self.signer_fee_divisor = signer_fee_divisor;
    }

    pub(crate) fn set_signing_group_pubkey(&mut self, pubkey: SignerPubkey) {
        self.signing_group_pubkey = pubkey;
    }

    pub(crate) fn set_signing_group_requested_at(&mut self, ts: u64) {
        self.signing_group_requested_at = ts;
    }

    pub(crate) fn set_funding_proof_timer_start(&mut self, ts: u64) {
        self.funding_proof_timer_start = ts;
    }

    pub(crate) fn set_funding_info(&mut self, info: FundingInfo) {
        self.funding_info = Some(info);
    }

    pub(crate) fn set_funder_abort_script(&mut self, script: Vec<u8>) {
        self.funder_abort_script = Some(script);
    }

    pub(crate) fn escrow_mut(&mut self) -> &mut Escrow {
        &mut self.escrow
    }
}
