use std::io::Write;

use crate::processor::AccountId;
use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

/// Final state of an account, balance in major units.
#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub account: AccountId,
    pub balance: Decimal,
    pub active: bool,
}

pub fn print_accounts<W>(
    output: &mut W,
    rows: impl Iterator<Item = AccountRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        let account = row.account;
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write account {account} to CSV"))?;
    }
    writer.flush().context("Failed to flush CSV writer")
}
