use crate::domain::account::AccountSnapshot;
use crate::error::Result;
use crate::interfaces::csv::account_writer::AccountWriter;
use clap::ValueEnum;
use std::io::Write;

/// Output format for the final account report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// `account,balance,transactions` rows with a header.
    #[default]
    Csv,
    /// One `acct: <id> bal: <balance> trans: <count>` line per account.
    Text,
}

pub fn write_report<W: Write>(
    mut sink: W,
    format: ReportFormat,
    accounts: Vec<AccountSnapshot>,
) -> Result<()> {
    match format {
        ReportFormat::Csv => AccountWriter::new(sink).write_accounts(accounts),
        ReportFormat::Text => {
            for account in accounts {
                writeln!(sink, "{account}")?;
            }
            sink.flush()?;
            Ok(())
        }
    }
}
