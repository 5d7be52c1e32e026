//! Native-asset bookkeeping for one deposit.

use std::{collections::BTreeMap, mem};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tbtc_primitives::{Address, NativeAmount};

/// A linear amount of native asset in flight between the deposit and the
/// outside world.
///
/// Panics when dropped without being consumed, so a refund can't be silently
/// lost on the way to its recipient.
#[derive(Debug, Eq, PartialEq)]
pub struct NativeCoin(NativeAmount);

impl NativeCoin {
    /// Creates a coin with some value.
    ///
    /// Care must be used to ensure that this does not create new value.
    pub fn new_unchecked(amt: NativeAmount) -> Self {
        Self(amt)
    }

    pub fn amt(&self) -> NativeAmount {
        self.0
    }

    /// Consumes the coin, returning its value to the caller's own books.
    pub fn into_amount(self) -> NativeAmount {
        let amt = self.0;
        mem::forget(self);
        amt
    }
}

impl Drop for NativeCoin {
    fn drop(&mut self) {
        panic!("escrow: accidentally destroyed value ({} units)", self.0);
    }
}

/// Where the deposit's native value currently sits.
///
/// The sum of the three buckets only ever grows by [`Escrow::lock_with_signers`];
/// every other move shifts value between buckets.
#[derive(
    Clone, Debug, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Escrow {
    /// Forwarded to the signing group as its bond.
    locked_with_signers: NativeAmount,

    /// Held by the deposit, claimable per recipient.
    withdrawable: BTreeMap<Address, NativeAmount>,

    /// Already paid out through [`Escrow::withdraw`].
    paid_out: NativeAmount,
}

impl Escrow {
    pub fn locked_with_signers(&self) -> NativeAmount {
        self.locked_with_signers
    }

    /// Amount `recipient` may currently withdraw.
    pub fn withdrawable_amount(&self, recipient: &Address) -> NativeAmount {
        self.withdrawable
            .get(recipient)
            .copied()
            .unwrap_or(NativeAmount::ZERO)
    }

    pub fn total_withdrawable(&self) -> NativeAmount {
        self.withdrawable
            .values()
            .fold(NativeAmount::ZERO, |acc, v| acc.saturating_add(*v))
    }

    pub fn paid_out(&self) -> NativeAmount {
        self.paid_out
    }

    /// Everything this deposit has ever escrowed.
    pub fn total(&self) -> NativeAmount {
        self.locked_with_signers
            .saturating_add(self.total_withdrawable())
            .saturating_add(self.paid_out)
    }

    /// Records a bond forwarded to the signing group. Returns [`None`] on overflow.
    pub(crate) fn lock_with_signers(&mut self, amt: NativeAmount) -> Option<()> {
        self.locked_with_signers = self.locked_with_signers.checked_add(amt)?;
        Some(())
    }

    /// Takes back value returned by the signing group and credits it to
    /// `recipient`.
    ///
    /// Hands the coin back untouched if it is worth more than is locked with
    /// the signers, or if crediting it would overflow.
    pub(crate) fn release_to(
        &mut self,
        recipient: Address,
        coin: NativeCoin,
    ) -> Result<(), NativeCoin> {
        let amt = coin.amt();
        let Some(locked) = self.locked_with_signers.checked_sub(amt) else {
            return Err(coin);
        };
        let credited = self.withdrawable_amount(&recipient).checked_add(amt);
        let Some(credited) = credited else {
            return Err(coin);
        };

        let _ = coin.into_amount();
        self.locked_with_signers = locked;
        self.withdrawable.insert(recipient, credited);
        Ok(())
    }

    /// Pays out everything owed to `recipient`, or [`None`] if nothing is.
    pub(crate) fn withdraw(&mut self, recipient: &Address) -> Option<NativeCoin> {
        let amt = self.withdrawable.remove(recipient)?;
        if amt.is_zero() {
            return None;
        }
        self.paid_out = self.paid_out.saturating_add(amt);
        Some(NativeCoin::new_unchecked(amt))
    }
}
