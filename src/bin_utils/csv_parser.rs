use std::io::Read;

use crate::{command::OperationKind, processor::AccountId};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "op")]
    pub kind: OperationKind,
    pub account: AccountId,
    pub target: Option<AccountId>,
    pub amount: Option<Decimal>,
}

/// Parses a scenario of account operations in CSV format,
/// with header `op,account,target,amount`.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Operation, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rows() {
        let input = "op, account, target, amount\n\
                     open, 1, , 10.5\n\
                     transfer, 1, 2, 3\n\
                     close, 2\n\
                     deposit, x, , 1\n";
        let rows: Vec<_> = CsvOperationParser::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 4);

        let (_, open) = &rows[0];
        let open = open.as_ref().unwrap();
        assert_eq!(open.kind, OperationKind::Open);
        assert_eq!(open.account, 1);
        assert_eq!(open.target, None);
        assert_eq!(open.amount, Some(Decimal::new(105, 1)));

        let (_, transfer) = &rows[1];
        assert_eq!(transfer.as_ref().unwrap().target, Some(2));

        let (_, close) = &rows[2];
        let close = close.as_ref().unwrap();
        assert_eq!(close.kind, OperationKind::Close);
        assert_eq!(close.amount, None);

        let (_, malformed) = &rows[3];
        assert!(malformed.is_err());
    }
}
