//! In-memory collaborators for exercising deposits without a host ledger.

use std::{collections::BTreeMap, mem};

use tbtc_btc_spv::SpvProof;
use tbtc_primitives::{Address, NativeAmount};
use tbtc_test_utils_btc as vectors;

use crate::{
    escrow::NativeCoin,
    interfaces::{DifficultyOracle, OwnerTokenRegistry, SigningGroupGateway, SystemRegistry},
    params::{
        DEFAULT_LOT_SIZE_SATS, DEFAULT_SETUP_FEE_ESTIMATE, DEFAULT_SIGNER_FEE_DIVISOR,
    },
};

#[derive(Clone, Debug, Default)]
struct StubGroup {
    deposit: Address,
    bond: NativeAmount,
    pubkey: Vec<u8>,
}

/// Signing-group gateway whose keys are set by the test.
#[derive(Clone, Debug)]
pub struct StubSigningGroup {
    address: Address,
    groups: BTreeMap<Address, StubGroup>,
    requests: u64,
}

impl Default for StubSigningGroup {
    fn default() -> Self {
        Self::new(Address::new([0x4b; 20]))
    }
}

impl StubSigningGroup {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            groups: BTreeMap::new(),
            requests: 0,
        }
    }

    /// Publishes `key` as the public key of group `keep`.
    pub fn set_public_key(&mut self, keep: &Address, key: impl Into<Vec<u8>>) {
        if let Some(group) = self.groups.get_mut(keep) {
            group.pubkey = key.into();
        }
    }

    /// Bond still held by group `keep`.
    pub fn bond_held(&self, keep: &Address) -> NativeAmount {
        self.groups
            .get(keep)
            .map(|g| g.bond)
            .unwrap_or(NativeAmount::ZERO)
    }

    /// Deposit that requested group `keep`.
    pub fn deposit_of(&self, keep: &Address) -> Option<Address> {
        self.groups.get(keep).map(|g| g.deposit)
    }

    pub fn request_count(&self) -> u64 {
        self.requests
    }
}

impl SigningGroupGateway for StubSigningGroup {
    fn request_signing_group(&mut self, deposit: &Address, bond: NativeAmount) -> Address {
        let keep = self.address.derive_child(self.requests);
        self.requests += 1;
        self.groups.insert(
            keep,
            StubGroup {
                deposit: *deposit,
                bond,
                pubkey: Vec::new(),
            },
        );
        keep
    }

    fn public_key(&self, keep: &Address) -> Vec<u8> {
        self.groups
            .get(keep)
            .map(|g| g.pubkey.clone())
            .unwrap_or_default()
    }

    fn return_bond(&mut self, keep: &Address) -> NativeCoin {
        let amt = self
            .groups
            .get_mut(keep)
            .map(|g| mem::take(&mut g.bond))
            .unwrap_or(NativeAmount::ZERO);
        NativeCoin::new_unchecked(amt)
    }

    fn restore_bond(&mut self, keep: &Address, coin: NativeCoin) {
        let amt = coin.into_amount();
        if let Some(group) = self.groups.get_mut(keep) {
            group.bond = group.bond.saturating_add(amt);
        }
    }
}

/// Owner-token registry backed by a map.
#[derive(Clone, Debug, Default)]
pub struct StubOwnerTokens {
    owners: BTreeMap<Address, Address>,
}

impl StubOwnerTokens {
    pub fn transfer(&mut self, deposit: &Address, to: Address) {
        if let Some(owner) = self.owners.get_mut(deposit) {
            *owner = to;
        }
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl OwnerTokenRegistry for StubOwnerTokens {
    fn mint(&mut self, owner: Address, deposit: Address) {
        self.owners.insert(deposit, owner);
    }

    fn owner_of(&self, deposit: &Address) -> Option<Address> {
        self.owners.get(deposit).copied()
    }
}

/// System registry with public knobs.
#[derive(Clone, Debug)]
pub struct StubSystem {
    pub new_deposits_allowed: bool,
    pub allowed_lot_sizes: Vec<u64>,
    pub signer_fee_divisor: u64,
    pub setup_fee_estimate: NativeAmount,
}

impl Default for StubSystem {
    fn default() -> Self {
        Self {
            new_deposits_allowed: true,
            allowed_lot_sizes: vec![DEFAULT_LOT_SIZE_SATS],
            signer_fee_divisor: DEFAULT_SIGNER_FEE_DIVISOR,
            setup_fee_estimate: DEFAULT_SETUP_FEE_ESTIMATE,
        }
    }
}

impl SystemRegistry for StubSystem {
    fn new_deposits_allowed(&self) -> bool {
        self.new_deposits_allowed
    }

    fn is_allowed_lot_size(&self, lot_size_sats: u64) -> bool {
        self.allowed_lot_sizes.contains(&lot_size_sats)
    }

    fn signer_fee_divisor(&self) -> u64 {
        self.signer_fee_divisor
    }

    fn setup_fee_estimate(&self) -> NativeAmount {
        self.setup_fee_estimate
    }
}

/// Difficulty relay reporting fixed values.
#[derive(Copy, Clone, Debug, Default)]
pub struct StubRelay {
    pub current: u64,
    pub previous: u64,
}

impl StubRelay {
    /// Relay whose current epoch matches the mainnet test headers.
    pub fn mainnet() -> Self {
        Self {
            current: vectors::HEADER_DIFFICULTY,
            previous: vectors::HEADER_DIFFICULTY / 2,
        }
    }
}

impl DifficultyOracle for StubRelay {
    fn current_epoch_difficulty(&self) -> u64 {
        self.current
    }

    fn previous_epoch_difficulty(&self) -> u64 {
        self.previous
    }
}

/// The mainnet funding proof paying [`mainnet_signer_pubkey`].
pub fn mainnet_funding_proof() -> SpvProof {
    let v = vectors::funding_vector();
    SpvProof {
        version: v.version,
        vin: v.vin,
        vout: v.vout,
        locktime: v.locktime,
        funding_output_index: v.funding_output_index,
        merkle_proof: v.merkle_proof,
        tx_index_in_block: v.tx_index_in_block,
        headers: v.headers,
    }
}

pub fn mainnet_signer_pubkey() -> [u8; 64] {
    vectors::signer_pubkey()
}

pub fn unrelated_signer_pubkey() -> [u8; 64] {
    vectors::unrelated_pubkey()
}
