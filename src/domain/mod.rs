//! Domain types: accounts, transfers and the requests workers consume.

pub mod account;
pub mod transfer;
