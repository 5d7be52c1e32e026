//! Deposit lifecycle state machine.
//!
//! A deposit walks from [`DepositState::Start`] through signer setup and a
//! Bitcoin funding proof to [`DepositState::Active`], or into
//! [`DepositState::FailedSetup`] when a timeout passes. [`DepositLogic`] holds
//! the transition rules; each deposit's data lives in its own
//! [`DepositRecord`] which the caller passes in on every operation.

mod context;
pub mod errors;
pub mod escrow;
pub mod events;
pub mod funding;
pub mod interfaces;
mod logic;
pub mod params;
pub mod state;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use context::ExecContext;
pub use errors::{DepositError, DepositResult, ErrorCategory, Timer};
pub use escrow::{Escrow, NativeCoin};
pub use events::{DepositEvent, ExecOutput};
pub use interfaces::{DifficultyOracle, OwnerTokenRegistry, SigningGroupGateway, SystemRegistry};
pub use logic::{DEPOSIT_LOGIC_VERSION, DepositLogic};
pub use params::DepositParams;
pub use state::{DepositRecord, DepositState, FundingInfo, FundingOutpoint, SignerPubkey};
