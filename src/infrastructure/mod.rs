//! Shared runtime pieces: the account ledger, the bounded request channel and
//! the completion latch.

pub mod channel;
pub mod latch;
pub mod ledger;
