use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::currency::Currency;

pub type AccountIdentity = Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account has already been opened")]
    AlreadyOpen,
    #[error("Account is inactive")]
    Inactive,
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Balance cannot hold the resulting amount")]
    BalanceOverflow,
    #[error(
        "Transfer of {amount} was rejected ({deposit_error}) and could not be refunded: {refund_error}"
    )]
    CompensationFailed {
        amount: Currency,
        deposit_error: Box<AccountError>,
        refund_error: Box<AccountError>,
    },
}

/// Anything that can be credited, e.g. the receiving side of a transfer.
pub trait Deposit {
    /// Credits `amount` and returns the resulting balance.
    fn deposit(&self, amount: Currency) -> Result<Currency, AccountError>;
}

impl<T> Deposit for Arc<T>
where
    T: Deposit + ?Sized,
{
    fn deposit(&self, amount: Currency) -> Result<Currency, AccountError> {
        (**self).deposit(amount)
    }
}

/// Consistent copy of an account, taken under a single read lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub id: AccountIdentity,
    pub balance: Currency,
    pub active: bool,
    pub opened_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// State guarded by the account lock. Transitions validate before they mutate.
#[derive(Debug, Default)]
struct AccountState {
    balance: Currency,
    opened_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    active: bool,
}

impl AccountState {
    fn ensure_active(&self) -> Result<(), AccountError> {
        if self.active {
            Ok(())
        } else {
            Err(AccountError::Inactive)
        }
    }

    fn open(&mut self, amount: Currency, now: DateTime<Utc>) -> Result<(), AccountError> {
        if self.active {
            return Err(AccountError::AlreadyOpen);
        }
        ensure_positive(amount)?;

        self.balance = amount;
        self.opened_at = Some(now);
        self.closed_at = None;
        self.active = true;
        Ok(())
    }

    fn close(&mut self, now: DateTime<Utc>) -> Result<(), AccountError> {
        self.ensure_active()?;

        self.balance = Currency::ZERO;
        self.closed_at = Some(now);
        self.active = false;
        Ok(())
    }

    fn deposit(&mut self, amount: Currency) -> Result<Currency, AccountError> {
        self.ensure_active()?;
        ensure_positive(amount)?;

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;
        Ok(self.balance)
    }

    fn withdraw(&mut self, amount: Currency) -> Result<Currency, AccountError> {
        self.ensure_active()?;
        ensure_positive(amount)?;
        if self.balance < amount {
            return Err(AccountError::InsufficientFunds);
        }

        self.balance = self.balance - amount;
        Ok(self.balance)
    }
}

fn ensure_positive(amount: Currency) -> Result<(), AccountError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(AccountError::InvalidAmount)
    }
}

/// Account that can be shared between threads.
///
/// Mutations take the exclusive lock for the whole read-modify-write, queries
/// take the shared one. No operation ever holds two account locks at once, so
/// [`BankAccount::transfer`] is two critical sections: while it runs, the
/// transferred amount is visible as debited from the source and not yet
/// credited to the target.
#[derive(Debug)]
pub struct BankAccount {
    id: AccountIdentity,
    state: RwLock<AccountState>,
}

impl Default for BankAccount {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BankAccount {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BankAccount {}

impl BankAccount {
    /// Creates an inactive account with zero balance.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: RwLock::new(AccountState::default()),
        }
    }

    pub fn id(&self) -> AccountIdentity {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.state.read().active
    }

    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().opened_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().closed_at
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        let state = self.state.read();
        AccountSnapshot {
            id: self.id,
            balance: state.balance,
            active: state.active,
            opened_at: state.opened_at,
            closed_at: state.closed_at,
        }
    }

    pub fn open(&self, amount: Currency) -> Result<(), AccountError> {
        self.state.write().open(amount, Utc::now())?;
        debug!(account = %self.id, %amount, "account opened");
        Ok(())
    }

    pub fn close(&self) -> Result<(), AccountError> {
        self.state.write().close(Utc::now())?;
        debug!(account = %self.id, "account closed");
        Ok(())
    }

    pub fn balance(&self) -> Result<Currency, AccountError> {
        let state = self.state.read();
        state.ensure_active()?;
        Ok(state.balance)
    }

    pub fn deposit(&self, amount: Currency) -> Result<Currency, AccountError> {
        let balance = self.state.write().deposit(amount)?;
        debug!(account = %self.id, %amount, %balance, "deposited");
        Ok(balance)
    }

    pub fn withdraw(&self, amount: Currency) -> Result<Currency, AccountError> {
        let balance = self.state.write().withdraw(amount)?;
        debug!(account = %self.id, %amount, %balance, "withdrawn");
        Ok(balance)
    }

    /// Moves `amount` to `target` and returns this account's balance right
    /// after the withdrawal.
    ///
    /// When the target rejects the deposit, the amount is deposited back and
    /// the target's error is returned. If this account was closed in between,
    /// the refund fails too and [`AccountError::CompensationFailed`] is
    /// returned; the amount is then lost.
    pub fn transfer<T>(&self, target: &T, amount: Currency) -> Result<Currency, AccountError>
    where
        T: Deposit + ?Sized,
    {
        let balance = self.withdraw(amount)?;

        if let Err(deposit_error) = target.deposit(amount) {
            warn!(account = %self.id, %amount, error = %deposit_error, "transfer rejected by target, refunding");
            if let Err(refund_error) = self.deposit(amount) {
                error!(account = %self.id, %amount, error = %refund_error, "transfer refund failed");
                return Err(AccountError::CompensationFailed {
                    amount,
                    deposit_error: Box::new(deposit_error),
                    refund_error: Box::new(refund_error),
                });
            }
            return Err(deposit_error);
        }

        debug!(account = %self.id, %amount, %balance, "transferred");
        Ok(balance)
    }
}

impl Deposit for BankAccount {
    fn deposit(&self, amount: Currency) -> Result<Currency, AccountError> {
        BankAccount::deposit(self, amount)
    }
}
