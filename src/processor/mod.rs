use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::AccountError,
    command::{AccountCommandError, OperationKind},
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

pub type AccountId = u16;

pub trait AccountProcessor {
    fn process_operation(
        &mut self,
        account_id: AccountId,
        target_id: Option<AccountId>,
        amount: Option<Decimal>,
        kind: OperationKind,
    ) -> Result<(), ProcessError>;
}
