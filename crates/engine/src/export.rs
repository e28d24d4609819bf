//! CSV export of the transaction list.

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::{EngineError, ResultEngine, Transaction};

pub const CSV_HEADER: [&str; 9] = [
    "ID",
    "Name",
    "Date",
    "Amount",
    "Type",
    "Status",
    "Category",
    "User",
    "Description",
];

/// File name offered for an export made on `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("financial_transactions_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes `transactions` as CSV, every cell quoted, header first.
pub fn export_csv(transactions: &[Transaction]) -> ResultEngine<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(vec![]);

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for tx in transactions {
        writer
            .write_record([
                tx.id.as_str(),
                tx.name.as_str(),
                tx.display_date().as_str(),
                tx.amount.to_decimal_string().as_str(),
                tx.kind.as_str(),
                tx.status.as_str(),
                tx.category.as_str(),
                tx.user.name.as_str(),
                tx.description.as_deref().unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|err| EngineError::Csv(err.to_string()))
}

fn csv_error(err: csv::Error) -> EngineError {
    EngineError::Csv(err.to_string())
}
