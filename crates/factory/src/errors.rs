use tbtc_deposit::DepositError;
use tbtc_primitives::Address;
use thiserror::Error;

pub type FactoryResult<T> = Result<T, FactoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("no deposit at {0}")]
    UnknownDeposit(Address),

    #[error("derived address {0} is already taken")]
    AddressTaken(Address),

    #[error("deposit: {0}")]
    Deposit(#[from] DepositError),
}
