use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::Engine;
use crate::model::{CatalogIndex, Command};

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized command '{command}'")]
    UnrecognizedCommand { line: usize, command: String },

    #[error("line {line}: {command} missing {field}")]
    MissingField {
        line: usize,
        command: String,
        field: &'static str,
    },

    #[error("line {line}: {command} has negative amount {amount}")]
    NegativeAmount {
        line: usize,
        command: String,
        amount: i64,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    index: Option<CatalogIndex>,
    amount: Option<i64>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    index: CatalogIndex,
    name: &'a str,
    brand: &'a str,
    price: u64,
    stock: usize,
    sold: usize,
}

impl InputRow {
    fn index(&self, line: usize) -> Result<CatalogIndex, CsvError> {
        self.index.ok_or_else(|| CsvError::MissingField {
            line,
            command: self.r#type.clone(),
            field: "index",
        })
    }

    fn amount(&self, line: usize) -> Result<u64, CsvError> {
        let amount = self.amount.ok_or_else(|| CsvError::MissingField {
            line,
            command: self.r#type.clone(),
            field: "amount",
        })?;
        u64::try_from(amount).map_err(|_| CsvError::NegativeAmount {
            line,
            command: self.r#type.clone(),
            amount,
        })
    }

    fn into_command(self, line: usize) -> Result<Command, CsvError> {
        match self.r#type.as_str() {
            "supply" => Ok(Command::Supply {
                index: self.index(line)?,
                amount: self.amount(line)?,
            }),
            "coin" => Ok(Command::InsertCoin {
                amount: self.amount(line)?,
            }),
            "buy" => Ok(Command::Buy {
                index: self.index(line)?,
            }),
            _ => Err(CsvError::UnrecognizedCommand {
                line,
                command: self.r#type,
            }),
        }
    }
}

/// Read commands from a csv file with a `type,index,amount` header
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, csv::Error> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            row.into_command(line)
        }))
}

/// Write one row per catalog entry with its stock and sold counts
pub fn write_report(engine: &Engine, out: impl io::Write) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    let stock = engine.stock_report();
    let sold = engine.sold_counts();

    for (index, beverage) in engine.catalog().iter().enumerate() {
        writer.serialize(OutputRow {
            index,
            name: &beverage.name,
            brand: &beverage.brand,
            price: beverage.price.current(),
            stock: stock[index],
            sold: sold[index],
        })?;
    }

    writer.flush()?;
    Ok(())
}
