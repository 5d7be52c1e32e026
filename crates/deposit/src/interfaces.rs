//! Boundaries to the collaborators a deposit relies on but does not own.

use tbtc_primitives::{Address, NativeAmount};

use crate::escrow::NativeCoin;

/// The external custodian that forms signing groups and holds their bonds.
pub trait SigningGroupGateway {
    /// Requests a new signing group for `deposit`, forwarding `bond` to it.
    /// Returns the handle of the new group.
    fn request_signing_group(&mut self, deposit: &Address, bond: NativeAmount) -> Address;

    /// Public key of the group, 64 bytes once generated, empty before.
    fn public_key(&self, keep: &Address) -> Vec<u8>;

    /// Hands back whatever the group still holds of the bond.
    fn return_bond(&mut self, keep: &Address) -> NativeCoin;

    /// Puts a coin taken with [`return_bond`](Self::return_bond) back with
    /// the group, when the deposit refuses it.
    fn restore_bond(&mut self, keep: &Address, coin: NativeCoin);
}

/// Registry of non-fungible owner tokens, one per deposit.
pub trait OwnerTokenRegistry {
    fn mint(&mut self, owner: Address, deposit: Address);

    fn owner_of(&self, deposit: &Address) -> Option<Address>;
}

/// System-wide switches and fee parameters.
pub trait SystemRegistry {
    fn new_deposits_allowed(&self) -> bool;

    fn is_allowed_lot_size(&self, lot_size_sats: u64) -> bool;

    fn signer_fee_divisor(&self) -> u64;

    /// Minimum bond accepted to open a signing group.
    fn setup_fee_estimate(&self) -> NativeAmount;
}

/// Trusted source of Bitcoin epoch difficulty.
pub trait DifficultyOracle {
    fn current_epoch_difficulty(&self) -> u64;

    fn previous_epoch_difficulty(&self) -> u64;
}
