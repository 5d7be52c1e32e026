//! Notifications produced by deposit operations.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tbtc_primitives::{Address, Buf32};

use crate::state::SignerPubkey;

/// A notification emitted by a deposit on a successful transition.
#[derive(
    Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DepositEvent {
    Created {
        deposit: Address,
        keep_address: Address,
    },
    RegisteredPubkey {
        deposit: Address,
        pubkey: SignerPubkey,
    },
    SetupFailed {
        deposit: Address,
    },
    Funded {
        deposit: Address,
        /// Little-endian txid of the funding transaction.
        txid: Buf32,
    },
    FunderAbortRequested {
        deposit: Address,
        #[serde(with = "hex::serde")]
        output_script: Vec<u8>,
    },
}

impl DepositEvent {
    /// The deposit the event is about.
    pub fn deposit(&self) -> &Address {
        match self {
            Self::Created { deposit, .. }
            | Self::RegisteredPubkey { deposit, .. }
            | Self::SetupFailed { deposit }
            | Self::Funded { deposit, .. }
            | Self::FunderAbortRequested { deposit, .. } => deposit,
        }
    }
}

/// Everything one successful operation emitted, in order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExecOutput {
    events: Vec<DepositEvent>,
}

impl ExecOutput {
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub(crate) fn emit(&mut self, event: DepositEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[DepositEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DepositEvent> {
        self.events
    }
}
