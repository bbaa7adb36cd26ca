// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tracker configuration and per-chain confirmation presets.

use std::time::Duration;

use alloy_chains::NamedChain;

use crate::confirmation::{CommitmentLevel, ConfirmationTarget, DEFAULT_CONFIRMATION_TIMEOUT};
use crate::retry::RetryPolicy;

/// Default inter-poll interval
///
/// Deliberately shorter than the retry policy's backoff: polling cadence is
/// about confirmation latency, backoff is about endpoint recovery.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Confirmation requirements and timeouts for common EVM networks
pub const CHAIN_CONFIRMATION_CONFIG: &[(NamedChain, u64, Duration)] = &[
    // (Chain, Required Confirmations, Timeout)
    (NamedChain::Mainnet, 2, Duration::from_secs(300)), // 5 mins for Ethereum
    (NamedChain::Arbitrum, 1, Duration::from_secs(120)), // 2 mins for Arbitrum
    (NamedChain::Optimism, 1, Duration::from_secs(120)), // 2 mins for Optimism
    (NamedChain::Polygon, 15, Duration::from_secs(180)), // More confirmations for Polygon
    (NamedChain::Avalanche, 3, Duration::from_secs(120)), // 2 mins for Avalanche
    (NamedChain::BinanceSmartChain, 2, Duration::from_secs(120)), // 2 mins for BNB Chain
    (NamedChain::Base, 1, Duration::from_secs(120)),    // 2 mins for Base
    (NamedChain::Unichain, 1, Duration::from_secs(120)), // 2 mins for Unichain
];

/// Gets the chain-specific confirmation configuration
pub fn chain_confirmation_config(chain: &NamedChain) -> (u64, Duration) {
    CHAIN_CONFIRMATION_CONFIG
        .iter()
        .find(|(ch, _, _)| ch == chain)
        .map(|(_, confirmations, timeout)| (*confirmations, *timeout))
        .unwrap_or((1, DEFAULT_CONFIRMATION_TIMEOUT))
}

impl ConfirmationTarget {
    /// Creates a depth target using the preset confirmations and timeout for
    /// a known EVM chain; unknown chains get 1 confirmation and the default
    /// timeout.
    ///
    /// # Example
    ///
    /// ```rust
    /// use alloy_chains::NamedChain;
    /// use txwatch_rs::ConfirmationTarget;
    ///
    /// let target = ConfirmationTarget::for_evm_chain(NamedChain::Polygon);
    /// ```
    pub fn for_evm_chain(chain: NamedChain) -> Self {
        let (confirmations, timeout) = chain_confirmation_config(&chain);
        Self::depth(confirmations).with_timeout(timeout)
    }

    /// Creates the standard Solana target: `confirmed` commitment, 60 s
    /// timeout.
    pub fn solana_default() -> Self {
        Self::commitment(CommitmentLevel::Confirmed).with_timeout(Duration::from_secs(60))
    }
}

/// Configuration for the tracker's polling behavior.
///
/// Controls the fixed inter-poll interval and the retry policy wrapped
/// around each RPC call. Use the builder methods to customize.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use txwatch_rs::{RetryPolicy, TrackerConfig};
///
/// // Use defaults (500 ms polls, 3-attempt retry)
/// let config = TrackerConfig::default();
///
/// // Customize
/// let config = TrackerConfig::default()
///     .with_poll_interval(Duration::from_secs(2))
///     .with_retry(RetryPolicy::default().with_max_attempts(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Fixed delay between polls while the target is unmet.
    pub poll_interval: Duration,
    /// Retry policy applied to each status and block-info call.
    pub retry: RetryPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry: RetryPolicy::default(),
        }
    }
}

impl TrackerConfig {
    /// Sets the inter-poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the per-call retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirmation::ConfirmationCriteria;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_builder_methods() {
        let config = TrackerConfig::default()
            .with_poll_interval(Duration::from_secs(2))
            .with_retry(RetryPolicy::default().with_max_attempts(7));
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.retry.max_attempts, 7);
    }

    #[test]
    fn test_known_chain_preset() {
        let target = ConfirmationTarget::for_evm_chain(NamedChain::Polygon);
        assert_eq!(
            target.criteria,
            ConfirmationCriteria::Depth {
                min_confirmations: 15,
                max_confirmations: None,
            }
        );
        assert_eq!(target.timeout, Duration::from_secs(180));
    }

    #[test]
    fn test_unknown_chain_falls_back() {
        let (confirmations, timeout) = chain_confirmation_config(&NamedChain::Sepolia);
        assert_eq!(confirmations, 1);
        assert_eq!(timeout, DEFAULT_CONFIRMATION_TIMEOUT);
    }

    #[test]
    fn test_solana_default() {
        let target = ConfirmationTarget::solana_default();
        assert_eq!(
            target.criteria,
            ConfirmationCriteria::Commitment(CommitmentLevel::Confirmed)
        );
        assert_eq!(target.timeout, Duration::from_secs(60));
    }
}
