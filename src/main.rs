use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use transfer_engine::application::engine::TransferEngine;
use transfer_engine::config::EngineConfig;
use transfer_engine::interfaces::transfer_reader::TransferReader;
use transfer_engine::interfaces::report::{ReportFormat, write_report};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file with one `from to amount` transfer per line
    input: PathBuf,

    /// JSON engine config. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of worker tasks applying transfers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Number of accounts, with ids 0..N
    #[arg(long)]
    accounts: Option<usize>,

    /// Starting balance of every account
    #[arg(long, allow_negative_numbers = true)]
    initial_balance: Option<i64>,

    /// Maximum number of queued transfers before the reader blocks
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Output format of the final account report
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    format: ReportFormat,
}

impl Cli {
    fn engine_config(&self) -> transfer_engine::error::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(accounts) = self.accounts {
            config.accounts = accounts;
        }
        if let Some(initial_balance) = self.initial_balance {
            config.initial_balance = initial_balance;
        }
        if let Some(queue_capacity) = self.queue_capacity {
            config.queue_capacity = queue_capacity;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.engine_config().into_diagnostic()?;

    // The reader buffers the file and is pulled synchronously by `run`; each
    // read blocks only the runtime thread driving `main`, not the workers.
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = TransferReader::new(file);

    let engine = TransferEngine::start(&config).into_diagnostic()?;
    let accounts = engine.run(reader.transfers()).await.into_diagnostic()?;

    let stdout = io::stdout();
    write_report(stdout.lock(), cli.format, accounts).into_diagnostic()?;

    Ok(())
}
