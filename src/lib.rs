//! # txwatch-rs
//!
//! Chain-agnostic transaction confirmation tracking for EVM and Solana.
//!
//! After a transaction is broadcast, this library polls the chain's RPC
//! endpoint until the transaction reaches a target confirmation depth (EVM)
//! or commitment level (Solana), riding out transient RPC failures and
//! reporting a normalized result. The tracker is written once against the
//! [`ChainAdapter`] capability trait; chain families plug in as thin
//! adapters.
//!
//! ## Quick Start (EVM)
//!
//! ```rust,no_run
//! use txwatch_rs::{ConfirmationTarget, ConfirmationTracker, TrackError, TxHandle};
//! use txwatch_rs::adapters::{EvmAdapter, TokioClock};
//! use alloy_chains::NamedChain;
//!
//! # async fn example() -> Result<(), TrackError> {
//! # use alloy_provider::ProviderBuilder;
//! let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
//!
//! let tracker = ConfirmationTracker::builder()
//!     .adapter(EvmAdapter::new(provider).with_chain(NamedChain::Mainnet))
//!     .clock(TokioClock::new())
//!     .build();
//!
//! // Wait for the chain-appropriate confirmation depth
//! let handle = TxHandle::from("0x4e3a3754410177e6937ef1f84bba68ea139e8d1a2258c5f85db9f1cd715a1bdd");
//! let target = ConfirmationTarget::for_evm_chain(NamedChain::Mainnet);
//! let result = tracker.await_confirmation(&handle, &target).await?;
//! assert!(result.is_confirmed());
//! # Ok(())
//! # }
//! ```
//!
//! ## Quick Start (Solana)
//!
//! ```rust,no_run
//! use txwatch_rs::{CommitmentLevel, ConfirmationTarget, ConfirmationTracker, TrackError, TxHandle};
//! use txwatch_rs::adapters::{SolanaAdapter, TokioClock};
//!
//! # async fn example() -> Result<(), TrackError> {
//! let tracker = ConfirmationTracker::builder()
//!     .adapter(SolanaAdapter::mainnet())
//!     .clock(TokioClock::new())
//!     .build();
//!
//! let handle = TxHandle::from("5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW");
//! let target = ConfirmationTarget::commitment(CommitmentLevel::Finalized);
//! let result = tracker.await_confirmation(&handle, &target).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancellation
//!
//! ```rust,no_run
//! # use txwatch_rs::{CancelToken, ConfirmationTarget, ConfirmationTracker, TrackError, TxHandle};
//! # use txwatch_rs::adapters::{SolanaAdapter, TokioClock};
//! # async fn example() -> Result<(), TrackError> {
//! # let tracker = ConfirmationTracker::builder()
//! #     .adapter(SolanaAdapter::mainnet())
//! #     .clock(TokioClock::new())
//! #     .build();
//! # let handle = TxHandle::from("sig");
//! let (cancel, token) = CancelToken::pair();
//! // elsewhere: cancel.cancel();
//! let result = tracker
//!     .await_confirmation_with_cancel(&handle, &ConfirmationTarget::solana_default(), &token)
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure semantics
//!
//! - A chain-reported failure is authoritative: the wait returns a terminal
//!   `Failed` result immediately, with no retries.
//! - Transient RPC errors are retried with linear backoff, then absorbed by
//!   the polling loop; they never surface to the caller.
//! - A deadline elapsing is a distinct [`TrackError::ConfirmationTimeout`]
//!   error, never a result; "we gave up watching" is not "the chain
//!   rejected it".
//!
//! ## Features
//!
//! - **One tracker, many chains**: the polling state machine never branches
//!   on chain type; EVM and Solana are thin adapters
//! - **Deterministic tests**: every sleep and deadline goes through an
//!   injectable [`Clock`], with fakes provided in [`testing`]
//! - **Structured tracing** throughout, with public [`spans`] helpers
//! - **Builder pattern** for intuitive API usage
//!
//! ## Public API
//!
//! - [`ConfirmationTracker`] - The polling state machine
//! - [`ConfirmationTarget`], [`ConfirmationCriteria`], [`CommitmentLevel`] -
//!   What "confirmed" means per wait
//! - [`TxHandle`], [`TxStatus`], [`TxResult`], [`TxState`], [`BlockInfo`] -
//!   Normalized data model
//! - [`ChainAdapter`], [`Clock`] - Capability traits for custom chains and
//!   test fakes
//! - [`RetryPolicy`], [`TrackerConfig`] - Polling and retry configuration
//! - [`CancelHandle`], [`CancelToken`] - Early-abort signal
//! - [`TrackError`] and [`Result`] - Error types for error handling

mod confirmation;
mod error;
mod retry;
mod tracker;
mod traits;

// Public API - minimal surface
pub use confirmation::{
    BlockInfo, CommitmentLevel, ConfirmationCriteria, ConfirmationTarget, InvalidCommitmentLevel,
    TxHandle, TxResult, TxState, TxStatus, DEFAULT_CONFIRMATION_TIMEOUT,
};
pub use error::{Result, TrackError};
pub use retry::{RetryPolicy, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BASE_DELAY};
pub use tracker::{
    chain_confirmation_config, CancelHandle, CancelToken, ConfirmationTracker, TrackerConfig,
    CHAIN_CONFIRMATION_CONFIG, DEFAULT_POLL_INTERVAL,
};
pub use traits::{ChainAdapter, Clock};

// Production chain adapters and clock
pub mod adapters;

// Public module for advanced users who need custom instrumentation
pub mod spans;

// Fakes for integration tests
pub mod testing;
