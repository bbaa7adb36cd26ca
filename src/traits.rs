//! Core trait abstractions for confirmation tracking.
//!
//! This module defines the capability seams that enable dependency injection
//! and testing of the confirmation tracker. By abstracting chain RPC access
//! and time control behind traits, users can implement fake versions for
//! comprehensive testing including adversarial scenarios.
//!
//! # Example: Implementing a Test Fake
//!
//! ```rust,ignore
//! use txwatch_rs::{ChainAdapter, TxHandle, TxStatus};
//! use std::collections::HashMap;
//!
//! struct ScriptedAdapter {
//!     statuses: HashMap<TxHandle, TxStatus>,
//! }
//!
//! #[async_trait::async_trait]
//! impl ChainAdapter for ScriptedAdapter {
//!     fn chain_name(&self) -> &str {
//!         "scripted"
//!     }
//!
//!     async fn get_status(&self, handle: &TxHandle) -> Result<TxStatus> {
//!         Ok(self.statuses.get(handle).cloned().unwrap_or_default())
//!     }
//!
//!     async fn get_block_info(&self, number: u64, _hint: Option<CommitmentLevel>)
//!         -> Result<BlockInfo> {
//!         Ok(BlockInfo { number, hash: format!("hash-{number}") })
//!     }
//! }
//! ```

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::confirmation::{BlockInfo, CommitmentLevel, TxHandle, TxStatus};
use crate::error::Result;

/// Trait for chain RPC status queries.
///
/// This trait abstracts everything the tracker needs from a chain: a status
/// snapshot per poll and block metadata after a confirmation match. One
/// implementation exists per chain family; the tracker is written once
/// against this interface and never branches on chain type internally.
///
/// Both operations must be idempotent and side-effect-free, and must be safe
/// to call concurrently; connection pooling is the implementation's concern.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Transaction not yet seen by the chain
/// - Chain-reported execution failure
/// - Transient RPC errors and recovery
/// - Slow confirmation progressions
/// - Block metadata temporarily unavailable after a match
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Short chain label used in logs and spans.
    fn chain_name(&self) -> &str;

    /// Fetches a fresh status snapshot for the transaction.
    ///
    /// Returns [`TxStatus::not_found`] if the chain has not seen the
    /// transaction yet; absence is a snapshot, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails transiently, or a validation
    /// error if the handle cannot be parsed into the chain's native form.
    async fn get_status(&self, handle: &TxHandle) -> Result<TxStatus>;

    /// Fetches metadata for the block or slot a transaction landed in.
    ///
    /// The `commitment_hint` lets commitment-based chains query at the level
    /// the caller is waiting for; count-based chains ignore it.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails or the block is not available
    /// at the hinted commitment level yet.
    async fn get_block_info(
        &self,
        number: u64,
        commitment_hint: Option<CommitmentLevel>,
    ) -> Result<BlockInfo>;
}

/// Trait for time-based operations.
///
/// This trait abstracts sleep and time queries, enabling fast-forward testing
/// where tests can instantly advance through polling loops and timeouts
/// without actually waiting.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Timeout behavior without waiting
/// - Poll interval and retry backoff correctness
/// - Elapsed-time accounting in timeout errors
#[async_trait]
pub trait Clock: Send + Sync {
    /// Asynchronously sleeps for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Returns the current instant in time.
    ///
    /// Used for calculating deadlines and measuring elapsed time.
    fn now(&self) -> Instant;
}
