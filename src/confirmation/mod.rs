//! Normalized confirmation data model
//!
//! Chain-neutral types shared by the tracker and the chain adapters: status
//! snapshots, confirmation targets, and the normalized result. Nothing in
//! this module knows which chain family produced a value.

mod commitment;
mod outcome;
mod status;

pub use commitment::{CommitmentLevel, InvalidCommitmentLevel};
pub use outcome::{
    ConfirmationCriteria, ConfirmationTarget, TxResult, TxState, DEFAULT_CONFIRMATION_TIMEOUT,
};
pub use status::{BlockInfo, TxHandle, TxStatus};
