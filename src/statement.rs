use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;

use crate::model::{Transaction, TransactionKind, TIMESTAMP_FORMAT};

const HEADER: [&str; 4] = ["timestamp", "kind", "amount", "description"];

#[derive(Debug, Serialize)]
struct StatementRow<'a> {
    timestamp: String,
    kind: TransactionKind,
    amount: Option<String>,
    description: &'a str,
}

impl<'a> From<&'a Transaction> for StatementRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            timestamp: tx.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            kind: tx.kind(),
            amount: tx.amount().map(|amount| amount.to_string()),
            description: tx.description(),
        }
    }
}

/// Writes the audit log as CSV: a header, then one row per record in insertion order.
pub fn write_statement<W: Write>(history: &[Transaction], writer: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(HEADER)?;

    for tx in history {
        writer.serialize(StatementRow::from(tx))?;
    }

    writer.flush()?;

    Ok(())
}
