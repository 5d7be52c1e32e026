//! Shared value types for the deposit workspace: fixed-size byte buffers,
//! ledger addresses, native-unit amounts and the Bitcoin hash functions the
//! proof checker and the deposit logic agree on.

mod macros;

pub mod address;
pub mod amount;
pub mod buf;
pub mod hash;

pub use address::Address;
pub use amount::NativeAmount;
pub use buf::{Buf20, Buf32};

pub mod prelude {
    pub use crate::{address::Address, amount::NativeAmount, buf::*, hash};
}
