use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an account in the ledger. Accounts are numbered `0..N`.
pub type AccountId = usize;

/// The mutable state of a single bank account.
///
/// Every balance mutation is paired with exactly one increment of the
/// transaction counter. No funds check is made: balances may go negative.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Account {
    id: AccountId,
    balance: i64,
    transactions: u64,
}

impl Account {
    pub fn new(id: AccountId, initial_balance: i64) -> Self {
        Self {
            id,
            balance: initial_balance,
            transactions: 0,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn transactions(&self) -> u64 {
        self.transactions
    }

    /// Removes `amount` from the balance. A negative amount credits the account.
    pub fn withdraw(&mut self, amount: i64) {
        self.balance = self.balance.wrapping_sub(amount);
        self.transactions += 1;
    }

    /// Adds `amount` to the balance. A negative amount debits the account.
    pub fn deposit(&mut self, amount: i64) {
        self.balance = self.balance.wrapping_add(amount);
        self.transactions += 1;
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            account: self.id,
            balance: self.balance,
            transactions: self.transactions,
        }
    }
}

/// A point-in-time copy of an account, used for reporting.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct AccountSnapshot {
    pub account: AccountId,
    pub balance: i64,
    pub transactions: u64,
}

impl fmt::Display for AccountSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "acct: {} bal: {} trans: {}",
            self.account, self.balance, self.transactions
        )
    }
}
