use crate::domain::account::{Account, AccountId, AccountSnapshot};
use crate::domain::transfer::{LockOrder, Transfer};
use crate::error::{EngineError, Result};
use parking_lot::Mutex;

/// The fixed set of accounts shared by every worker.
///
/// Each account sits behind its own `parking_lot::Mutex`, so transfers between
/// disjoint pairs proceed in parallel. The collection is sized once at
/// construction and never grows or shrinks. No caller ever gets a mutable
/// reference to an account: all mutation goes through [`Ledger::apply`].
#[derive(Debug)]
pub struct Ledger {
    accounts: Vec<Mutex<Account>>,
}

impl Ledger {
    /// Creates `count` accounts with ids `0..count`, all holding `initial_balance`.
    pub fn new(count: usize, initial_balance: i64) -> Self {
        let accounts = (0..count)
            .map(|id| Mutex::new(Account::new(id, initial_balance)))
            .collect();
        Self { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, id: AccountId) -> bool {
        id < self.accounts.len()
    }

    /// Checks that both ends of `transfer` name existing accounts.
    pub fn validate(&self, transfer: &Transfer) -> Result<()> {
        for id in [transfer.from, transfer.to] {
            if !self.contains(id) {
                return Err(EngineError::UnknownAccount {
                    id,
                    accounts: self.len(),
                });
            }
        }
        Ok(())
    }

    /// Applies a transfer atomically with respect to every other transfer that
    /// touches either account.
    ///
    /// Locks are taken in ascending id order and both guards are released
    /// together when this returns (or unwinds).
    pub fn apply(&self, transfer: &Transfer) -> Result<()> {
        self.validate(transfer)?;

        match transfer.lock_order() {
            LockOrder::Single(id) => {
                let mut account = self.accounts[id].lock();
                account.withdraw(transfer.amount);
                account.deposit(transfer.amount);
            }
            LockOrder::Ordered { first, second } => {
                let mut low = self.accounts[first].lock();
                let mut high = self.accounts[second].lock();
                let (from, to) = if transfer.from == first {
                    (&mut *low, &mut *high)
                } else {
                    (&mut *high, &mut *low)
                };
                from.withdraw(transfer.amount);
                to.deposit(transfer.amount);
            }
        }
        Ok(())
    }

    pub fn snapshot(&self, id: AccountId) -> Result<AccountSnapshot> {
        self.accounts
            .get(id)
            .map(|account| account.lock().snapshot())
            .ok_or(EngineError::UnknownAccount {
                id,
                accounts: self.len(),
            })
    }

    /// Snapshots every account in id order.
    ///
    /// Each account is locked briefly in turn, so while workers are still
    /// running the result is not a consistent cut across accounts.
    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        self.accounts
            .iter()
            .map(|account| account.lock().snapshot())
            .collect()
    }

    /// Sum of all balances, widened so it cannot overflow.
    pub fn total_balance(&self) -> i128 {
        self.accounts
            .iter()
            .map(|account| i128::from(account.lock().balance()))
            .sum()
    }
}
