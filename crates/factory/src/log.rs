//! Append-only notification log.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tbtc_deposit::DepositEvent;
use tbtc_primitives::Address;

/// Metadata published when the factory creates a deposit.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct CloneCreated {
    pub deposit: Address,
    pub logic_version: u32,
    pub lot_size_sats: u64,
}

#[derive(
    Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FactoryEvent {
    CloneCreated(CloneCreated),
    Deposit(DepositEvent),
}

/// One log line. `seq` is dense and starts at zero.
#[derive(
    Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct LogEntry {
    pub seq: u64,
    pub timestamp: u64,
    /// Emitting account: the factory for creations, the deposit otherwise.
    pub source: Address,
    pub event: FactoryEvent,
}

#[derive(
    Clone, Debug, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose event concerns `deposit`.
    pub fn for_deposit<'a>(&'a self, deposit: &'a Address) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |e| match &e.event {
            FactoryEvent::CloneCreated(c) => &c.deposit == deposit,
            FactoryEvent::Deposit(ev) => ev.deposit() == deposit,
        })
    }

    pub(crate) fn append(&mut self, timestamp: u64, source: Address, event: FactoryEvent) -> u64 {
        let seq = self.entries.len() as u64;
        self.entries.push(LogEntry {
            seq,
            timestamp,
            source,
            event,
        });
        seq
    }
}
