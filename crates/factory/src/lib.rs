//! Deposit factory.
//!
//! One immutable [`DepositLogic`](tbtc_deposit::DepositLogic) is shared by every
//! deposit the factory creates. Each deposit gets its own
//! [`DepositRecord`](tbtc_deposit::DepositRecord) in the factory's arena, keyed
//! by an address derived from the factory's own. Creations are recorded in an
//! append-only [`EventLog`] from which the [`CloneIndex`] can be rebuilt.

pub mod errors;
mod factory;
pub mod index;
pub mod log;


pub use errors::{FactoryError, FactoryResult};
pub use factory::DepositFactory;
pub use index::{CloneIndex, CloneInfo};
pub use log::{CloneCreated, EventLog, FactoryEvent, LogEntry};
