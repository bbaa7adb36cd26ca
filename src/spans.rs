//! OpenTelemetry span helpers for confirmation tracking
//!
//! This module provides orthogonal span instrumentation following production
//! best practices: static span names, structured attributes, and separation
//! from business logic.
//!
//! # Usage
//!
//! These span helpers are used internally by
//! [`ConfirmationTracker`](crate::ConfirmationTracker) but are exposed
//! publicly for advanced users who need custom instrumentation or want to
//! integrate with existing OpenTelemetry setups.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use txwatch_rs::{spans, ConfirmationCriteria, TxHandle};
//!
//! let handle = TxHandle::from("0xabc");
//! let criteria = ConfirmationCriteria::Depth {
//!     min_confirmations: 2,
//!     max_confirmations: None,
//! };
//! let span = spans::await_confirmation(&handle, "mainnet", &criteria, Duration::from_secs(120));
//! let _guard = span.enter();
//! // Your custom polling logic here
//! ```

use std::time::Duration;

use tracing::Span;

use crate::confirmation::{ConfirmationCriteria, TxHandle};

/// Create span for one full confirmation wait.
///
/// Parent: Top-level operation span (auto-attached by tracing)
/// Children: txwatch_rs.get_status / txwatch_rs.get_block_info (per poll)
#[inline]
pub fn await_confirmation(
    handle: &TxHandle,
    chain: &str,
    criteria: &ConfirmationCriteria,
    timeout: Duration,
) -> Span {
    tracing::info_span!(
        "txwatch_rs.await_confirmation",
        handle = %handle,
        chain = chain,
        criteria = %criteria,
        timeout_secs = timeout.as_secs_f64(),
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a single status poll.
///
/// Parent: txwatch_rs.await_confirmation
/// Children: adapter RPC call spans
#[inline]
pub fn get_status(handle: &TxHandle, chain: &str, poll: u32) -> Span {
    tracing::info_span!(
        "txwatch_rs.get_status",
        handle = %handle,
        chain = chain,
        poll = poll,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a block-metadata fetch after a confirmation match.
///
/// Parent: txwatch_rs.await_confirmation
/// Children: adapter RPC call spans
#[inline]
pub fn get_block_info(number: u64, chain: &str) -> Span {
    tracing::info_span!(
        "txwatch_rs.get_block_info",
        block_number = number,
        chain = chain,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_helpers_construct_without_subscriber() {
        let handle = TxHandle::from("0xabc");
        let criteria = ConfirmationCriteria::Commitment(
            crate::confirmation::CommitmentLevel::Finalized,
        );
        let _ = await_confirmation(&handle, "solana", &criteria, Duration::from_secs(60));
        let _ = get_status(&handle, "solana", 1);
        let _ = get_block_info(42, "solana");
    }
}
