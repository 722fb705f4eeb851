use crate::domain::transfer::Transfer;
use crate::error::{EngineError, Result};
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

/// Reads transfers from a text source, one `from to amount` triple per line.
///
/// Fields are separated by any run of ASCII whitespace (spaces or tabs).
/// Blank lines are skipped. A line with any other number of fields is an error.
pub struct TransferReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> TransferReader<R> {
    /// Creates a new `TransferReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and parses transfers.
    ///
    /// Lines are pulled from the buffered source one at a time, so large inputs
    /// are streamed rather than loaded into memory.
    pub fn transfers(self) -> impl Iterator<Item = Result<Transfer>> {
        self.reader
            .lines()
            .zip(1u64..)
            .filter_map(|(line, number)| match line {
                Ok(line) if line.trim_ascii().is_empty() => None,
                Ok(line) => Some(parse_line(&line, number)),
                Err(e) => Some(Err(EngineError::from(e))),
            })
    }
}

fn parse_line(line: &str, number: u64) -> Result<Transfer> {
    let fields: Vec<&str> = line.split_ascii_whitespace().collect();
    let [from, to, amount] = fields[..] else {
        return Err(EngineError::MalformedRecord {
            line: number,
            found: fields.len(),
        });
    };

    Ok(Transfer::new(
        parse_field(from, number)?,
        parse_field(to, number)?,
        parse_field(amount, number)?,
    ))
}

fn parse_field<T: FromStr>(value: &str, line: u64) -> Result<T> {
    value.parse().map_err(|_| EngineError::InvalidField {
        line,
        value: value.to_string(),
    })
}
