/// Bank account shared between threads: open/close lifecycle, deposits,
/// withdrawals and transfers with a refund when the receiving side fails.
pub mod account;

/// Fixed-point [`currency::Currency`] amounts counted in subunits.
pub mod currency;

/// Operations of a scenario, validated into commands that later are executed
/// against an [`account`].
pub mod command;

/// Account processor interface, plus "in memory" implementation.
/// Resolves account ids and dispatches commands to the accounts.
pub mod processor;

/// CSV scenario runner used by the binary and the integration tests.
pub mod bin_utils;

pub use account::{AccountError, AccountSnapshot, BankAccount, Deposit};
pub use currency::Currency;
