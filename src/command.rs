use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    currency::{Currency, CurrencyError},
    processor::AccountId,
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Open,
    Close,
    Balance,
    Deposit,
    Withdraw,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCommand {
    Open { amount: Currency },
    Close,
    Balance,
    Deposit { amount: Currency },
    Withdraw { amount: Currency },
    Transfer { target: AccountId, amount: Currency },
}

#[derive(Debug, Error)]
pub enum AccountCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Target account is required for {kind:?}")]
    TargetRequired { kind: OperationKind },
    #[error("Invalid amount for {kind:?}: {source}")]
    InvalidAmount {
        kind: OperationKind,
        source: CurrencyError,
    },
}

impl AccountCommand {
    /// Builds a command from a raw operation, `amount` is given in major units.
    ///
    /// Only the shape is validated here. Whether the amount is positive is up
    /// to the account.
    pub fn parse_command(
        kind: OperationKind,
        target: Option<AccountId>,
        amount: Option<Decimal>,
    ) -> Result<Self, AccountCommandError> {
        match kind {
            OperationKind::Open => Ok(Self::Open {
                amount: Self::parse_amount(kind, amount)?,
            }),
            OperationKind::Close => Ok(Self::Close),
            OperationKind::Balance => Ok(Self::Balance),
            OperationKind::Deposit => Ok(Self::Deposit {
                amount: Self::parse_amount(kind, amount)?,
            }),
            OperationKind::Withdraw => Ok(Self::Withdraw {
                amount: Self::parse_amount(kind, amount)?,
            }),
            OperationKind::Transfer => {
                let Some(target) = target else {
                    return Err(AccountCommandError::TargetRequired { kind });
                };
                Ok(Self::Transfer {
                    target,
                    amount: Self::parse_amount(kind, amount)?,
                })
            }
        }
    }

    fn parse_amount(
        kind: OperationKind,
        amount: Option<Decimal>,
    ) -> Result<Currency, AccountCommandError> {
        let amount = amount.ok_or(AccountCommandError::AmountRequired { kind })?;
        Currency::from_decimal(amount)
            .map_err(|source| AccountCommandError::InvalidAmount { kind, source })
    }
}
