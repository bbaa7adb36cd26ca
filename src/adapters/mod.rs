//! Production implementations of the tracker's trait abstractions.
//!
//! This module provides the "real" implementations of the traits defined in
//! [`crate::traits`] that interact with actual blockchain networks and the
//! system clock.
//!
//! Users building applications will typically use these adapters, while test
//! code will use the fakes in [`crate::testing`] or implement custom ones.

mod evm;
mod solana;
mod tokio_clock;

pub use self::evm::EvmAdapter;
pub use self::solana::SolanaAdapter;
pub use self::tokio_clock::TokioClock;
