//! Discovery index over the deposits a factory has created.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tbtc_primitives::Address;

use crate::log::{CloneCreated, EventLog, FactoryEvent, LogEntry};

/// Creation metadata for one deposit.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct CloneInfo {
    /// Log sequence number of the creation entry.
    pub created_seq: u64,
    pub created_at: u64,
    pub logic_version: u32,
    pub lot_size_sats: u64,
}

#[derive(
    Clone, Debug, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct CloneIndex {
    clones: BTreeMap<Address, CloneInfo>,
}

impl CloneIndex {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Rebuilds the index from creation entries in `log`.
    pub fn replay(log: &EventLog) -> Self {
        let mut index = Self::new_empty();
        for entry in log.entries() {
            index.observe(entry);
        }
        index
    }

    /// Indexes `entry` if it records a creation. Other entries are ignored.
    pub fn observe(&mut self, entry: &LogEntry) {
        if let FactoryEvent::CloneCreated(CloneCreated {
            deposit,
            logic_version,
            lot_size_sats,
        }) = entry.event
        {
            self.clones.insert(
                deposit,
                CloneInfo {
                    created_seq: entry.seq,
                    created_at: entry.timestamp,
                    logic_version,
                    lot_size_sats,
                },
            );
        }
    }

    pub fn get(&self, deposit: &Address) -> Option<&CloneInfo> {
        self.clones.get(deposit)
    }

    pub fn contains(&self, deposit: &Address) -> bool {
        self.clones.contains_key(deposit)
    }

    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }

    /// Deposits in address order.
    pub fn deposits(&self) -> impl Iterator<Item = &Address> + '_ {
        self.clones.keys()
    }
}
