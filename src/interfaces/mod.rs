//! Adapters between the engine and the outside world: the transfer file
//! reader and the account report writers.

pub mod csv;
pub mod report;
pub mod transfer_reader;
