use std::fmt;

use tbtc_btc_spv::SpvError;
use tbtc_primitives::{Address, NativeAmount};
use thiserror::Error;

use crate::state::DepositState;

pub type DepositResult<T> = Result<T, DepositError>;

/// Which timer a timeout check read.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Timer {
    SigningGroupFormation,
    FundingProof,
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SigningGroupFormation => f.write_str("signing group formation"),
            Self::FundingProof => f.write_str("funding proof"),
        }
    }
}

/// Coarse classes of rejection, stable across error detail changes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorCategory {
    PreconditionViolation,
    ProofRejected,
    TimeoutNotElapsed,
    AuthorizationFailure,
    InsufficientBond,
}

/// Rejections from deposit operations.
///
/// A rejected operation leaves its record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepositError {
    #[error("expected deposit in {expected}, found {found}")]
    WrongState {
        expected: DepositState,
        found: DepositState,
    },

    #[error("the deposit has not failed funding (state {0})")]
    FundingNotFailed(DepositState),

    #[error("{0} timer was never started")]
    TimerNotStarted(Timer),

    #[error("{timer} timeout not elapsed ({elapsed}s of {timeout}s)")]
    TimeoutNotElapsed {
        timer: Timer,
        elapsed: u64,
        timeout: u64,
    },

    #[error("insufficient bond: need {required}, got {provided}")]
    InsufficientBond {
        required: NativeAmount,
        provided: NativeAmount,
    },

    #[error("public key not set or not 64-bytes long (got {0} bytes)")]
    PubkeyUnavailable(usize),

    #[error("invalid signer public key: {0}")]
    InvalidPubkey(&'static str),

    #[error("funding proof rejected: {0}")]
    ProofRejected(#[from] SpvError),

    #[error("no matching funding output at index {index}: {reason}")]
    NoMatchingFundingOutput { index: u32, reason: &'static str },

    #[error("caller {0} is not the deposit owner")]
    Unauthorized(Address),

    #[error("new deposits aren't allowed")]
    NewDepositsPaused,

    #[error("lot size {0} sats is not allowed")]
    LotSizeNotAllowed(u64),

    #[error("no owner token exists for deposit {0}")]
    OwnerTokenMissing(Address),

    #[error("nothing to withdraw for {0}")]
    NothingToWithdraw(Address),

    #[error("escrow amount overflow")]
    EscrowOverflow,

    #[error("ledger time zero cannot start a timer")]
    ZeroTimestamp,

    #[error("signing group returned {returned}, only {locked} was locked with it")]
    ExcessBondReturned {
        locked: NativeAmount,
        returned: NativeAmount,
    },
}

impl DepositError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::WrongState { .. }
            | Self::FundingNotFailed(_)
            | Self::TimerNotStarted(_)
            | Self::PubkeyUnavailable(_)
            | Self::InvalidPubkey(_)
            | Self::NewDepositsPaused
            | Self::LotSizeNotAllowed(_)
            | Self::OwnerTokenMissing(_)
            | Self::NothingToWithdraw(_)
            | Self::EscrowOverflow
            | Self::ZeroTimestamp
            | Self::ExcessBondReturned { .. } => ErrorCategory::PreconditionViolation,
            Self::ProofRejected(_) | Self::NoMatchingFundingOutput { .. } => {
                ErrorCategory::ProofRejected
            }
            Self::TimeoutNotElapsed { .. } => ErrorCategory::TimeoutNotElapsed,
            Self::Unauthorized(_) => ErrorCategory::AuthorizationFailure,
            Self::InsufficientBond { .. } => ErrorCategory::InsufficientBond,
        }
    }
}
