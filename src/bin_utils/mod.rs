//! Runs a CSV scenario of account operations against [`bank_account`](crate)
//! and prints the resulting balances. Shared by the binary and the
//! integration tests.

use std::io::{Read, Write};

use crate::processor::{
    AccountProcessor, ProcessError, in_memory_processor::InMemoryAccountProcessor,
};
use anyhow::{Context, Result};
use csv_parser::CsvOperationParser;
use csv_printer::{AccountRow, print_accounts};
pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut processor = InMemoryAccountProcessor::default();

        for (line, row) in parser {
            let row = row.with_context(|| format!("Malformed operation at line {line}"))?;
            if let Err(err) =
                processor.process_operation(row.account, row.target, row.amount, row.kind)
            {
                (self.error_printer)(line, err);
            }
        }

        print_accounts(
            self.output,
            processor.accounts.iter().map(|(account_id, acc)| {
                let snapshot = acc.snapshot();
                AccountRow {
                    account: *account_id,
                    balance: snapshot.balance.to_decimal(),
                    active: snapshot.active,
                }
            }),
        )
    }
}
