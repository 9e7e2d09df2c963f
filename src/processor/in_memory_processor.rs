use std::{collections::BTreeMap, sync::Arc};

use rust_decimal::Decimal;
use tracing::info;

use crate::{
    account::BankAccount,
    command::{AccountCommand, OperationKind},
};

use super::{AccountId, AccountProcessor, ProcessError};

/// Keeps every account it has seen; unknown ids are registered as fresh,
/// inactive accounts.
#[derive(Default)]
pub struct InMemoryAccountProcessor {
    pub accounts: BTreeMap<AccountId, Arc<BankAccount>>,
}

impl InMemoryAccountProcessor {
    /// Shared handle to the account, so it can be used from other threads.
    pub fn account(&mut self, account_id: AccountId) -> Arc<BankAccount> {
        Arc::clone(self.accounts.entry(account_id).or_default())
    }
}

impl AccountProcessor for InMemoryAccountProcessor {
    fn process_operation(
        &mut self,
        account_id: AccountId,
        target_id: Option<AccountId>,
        amount: Option<Decimal>,
        kind: OperationKind,
    ) -> Result<(), ProcessError> {
        let cmd = AccountCommand::parse_command(kind, target_id, amount)?;
        let acc = self.account(account_id);
        match cmd {
            AccountCommand::Open { amount } => acc.open(amount)?,
            AccountCommand::Close => acc.close()?,
            AccountCommand::Balance => {
                let balance = acc.balance()?;
                info!(account_id, %balance, "balance");
            }
            AccountCommand::Deposit { amount } => {
                acc.deposit(amount)?;
            }
            AccountCommand::Withdraw { amount } => {
                acc.withdraw(amount)?;
            }
            AccountCommand::Transfer { target, amount } => {
                let target = self.account(target);
                acc.transfer(&target, amount)?;
            }
        };
        Ok(())
    }
}
