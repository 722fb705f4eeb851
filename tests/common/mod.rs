#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::Error;
use std::path::Path;
use transfer_engine::application::engine::TransferEngine;
use transfer_engine::config::EngineConfig;
use transfer_engine::domain::account::{Account, AccountSnapshot};
use transfer_engine::domain::transfer::Transfer;

/// Deterministic random transfers among `accounts` accounts with amounts in
/// `-max_amount..=max_amount`.
pub fn random_transfers(seed: u64, count: usize, accounts: usize, max_amount: i64) -> Vec<Transfer> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Transfer::new(
                rng.gen_range(0..accounts),
                rng.gen_range(0..accounts),
                rng.gen_range(-max_amount..=max_amount),
            )
        })
        .collect()
}

/// Applies `transfers` one by one on a single thread.
pub fn sequential_model(
    accounts: usize,
    initial_balance: i64,
    transfers: &[Transfer],
) -> Vec<AccountSnapshot> {
    let mut ledger: Vec<Account> = (0..accounts)
        .map(|id| Account::new(id, initial_balance))
        .collect();
    for transfer in transfers {
        ledger[transfer.from].withdraw(transfer.amount);
        ledger[transfer.to].deposit(transfer.amount);
    }
    ledger.iter().map(Account::snapshot).collect()
}

pub async fn run_engine(config: EngineConfig, transfers: &[Transfer]) -> Vec<AccountSnapshot> {
    let engine = TransferEngine::start(&config).expect("engine failed to start");
    engine
        .run(transfers.iter().copied().map(Ok))
        .await
        .expect("engine run failed")
}

pub fn write_transfers(path: &Path, transfers: &[Transfer]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(file);

    for transfer in transfers {
        wtr.write_record([
            transfer.from.to_string(),
            transfer.to.to_string(),
            transfer.amount.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn generate_large_file(path: &Path, size_mb: usize, accounts: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(file);

    let target_size = (size_mb * 1024 * 1024) as u64;
    let mut rng = StdRng::seed_from_u64(size_mb as u64);

    // Check size every 5000 rows to avoid syscall overhead
    loop {
        for _ in 0..5000 {
            wtr.write_record([
                rng.gen_range(0..accounts).to_string(),
                rng.gen_range(0..accounts).to_string(),
                rng.gen_range(-500..=500i64).to_string(),
            ])?;
        }
        wtr.flush()?;
        if std::fs::metadata(path)?.len() >= target_size {
            break;
        }
    }
    Ok(())
}
