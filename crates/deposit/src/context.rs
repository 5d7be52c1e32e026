use tbtc_primitives::Address;

/// Ambient facts for one operation: who is calling and what time the ledger
/// says it is.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ExecContext {
    timestamp: u64,
    caller: Address,
}

impl ExecContext {
    pub fn new(timestamp: u64, caller: Address) -> Self {
        Self { timestamp, caller }
    }

    /// Ledger time in seconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn caller(&self) -> &Address {
        &self.caller
    }
}
