//! Application layer containing the engine orchestration.
//!
//! This module defines the `TransferEngine`, which starts a pool of worker
//! tasks, feeds them through a bounded channel and waits on a completion latch
//! before handing back the final account state.

pub mod engine;
pub mod worker;
