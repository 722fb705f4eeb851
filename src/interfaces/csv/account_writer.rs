use crate::domain::account::AccountSnapshot;
use crate::error::Result;
use std::io::Write;

/// Writes final account state as CSV with an `account,balance,transactions` header.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts<I>(&mut self, accounts: I) -> Result<()>
    where
        I: IntoIterator<Item = AccountSnapshot>,
    {
        for account in accounts {
            self.writer.serialize(account)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
