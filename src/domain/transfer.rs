use super::account::AccountId;

/// An instruction to move `amount` from one account to another.
///
/// `amount` may be negative, which moves funds in the opposite direction.
/// `from == to` is legal: the balance is unchanged and the account records
/// two transactions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Transfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: i64,
}

impl Transfer {
    pub fn new(from: AccountId, to: AccountId, amount: i64) -> Self {
        Self { from, to, amount }
    }

    pub fn is_self_transfer(&self) -> bool {
        self.from == self.to
    }

    /// The order in which the participating account locks must be taken.
    pub fn lock_order(&self) -> LockOrder {
        if self.is_self_transfer() {
            LockOrder::Single(self.from)
        } else {
            LockOrder::Ordered {
                first: self.from.min(self.to),
                second: self.from.max(self.to),
            }
        }
    }
}

/// Lock acquisition plan for a transfer.
///
/// Two distinct accounts are always locked lowest id first, so no two workers
/// can each hold one end of a wait cycle. A self-transfer takes its single
/// lock exactly once.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LockOrder {
    Single(AccountId),
    Ordered { first: AccountId, second: AccountId },
}

/// An item on the request channel.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Request {
    Transfer(Transfer),
    /// Termination marker. Each worker consumes exactly one and stops.
    Shutdown,
}

impl From<Transfer> for Request {
    fn from(transfer: Transfer) -> Self {
        Request::Transfer(transfer)
    }
}
