//! Chain-agnostic confirmation tracker.

use std::time::Duration;

use bon::Builder;
use tracing::{debug, error, info, warn, Instrument};

use crate::confirmation::{
    ConfirmationCriteria, ConfirmationTarget, TxHandle, TxResult, TxState, TxStatus,
};
use crate::error::{Result, TrackError};
use crate::spans;
use crate::tracker::{CancelToken, TrackerConfig};
use crate::traits::{ChainAdapter, Clock};

/// Polls a chain adapter until a transaction meets its confirmation target,
/// the chain reports it failed, or the deadline elapses.
///
/// The tracker is generic over:
///
/// - `A`: the chain adapter (EVM, Solana, or a test fake)
/// - `C`: the clock used for sleeps and deadline accounting
///
/// Each [`await_confirmation`](Self::await_confirmation) call is a
/// self-contained polling loop: the tracker holds no per-transaction state,
/// so one instance can serve any number of concurrent waits over distinct
/// handles. Polls within a single wait are strictly sequential.
///
/// # Examples
///
/// ## Production Usage
///
/// ```rust,no_run
/// # use txwatch_rs::{ConfirmationTarget, ConfirmationTracker, TrackError, TxHandle};
/// # use txwatch_rs::adapters::{EvmAdapter, TokioClock};
/// # use alloy_provider::ProviderBuilder;
/// # async fn example() -> Result<(), TrackError> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
///
/// let tracker = ConfirmationTracker::builder()
///     .adapter(EvmAdapter::new(provider))
///     .clock(TokioClock::new())
///     .build();
///
/// let handle = TxHandle::from("0x4e3a3754410177e6937ef1f84bba68ea139e8d1a2258c5f85db9f1cd715a1bdd");
/// let result = tracker
///     .await_confirmation(&handle, &ConfirmationTarget::depth(2))
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// ## Testing with Fakes
///
/// ```rust,ignore
/// let adapter = FakeChainAdapter::new();
/// let clock = FakeClock::new();
///
/// let tracker = ConfirmationTracker::builder()
///     .adapter(adapter)
///     .clock(clock)
///     .build();
/// ```
#[derive(Builder, Clone, Debug)]
pub struct ConfirmationTracker<A, C>
where
    A: ChainAdapter,
    C: Clock,
{
    adapter: A,
    clock: C,
    #[builder(default)]
    config: TrackerConfig,
}

impl<A, C> ConfirmationTracker<A, C>
where
    A: ChainAdapter,
    C: Clock,
{
    /// Returns the chain adapter
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Returns the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the polling configuration
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Waits until `handle` meets `target`, the chain reports it failed, or
    /// the deadline elapses.
    ///
    /// # Returns
    ///
    /// A terminal [`TxResult`]: `Confirmed` with block metadata populated,
    /// or `Failed` carrying the chain-reported reason. A chain-confirmed
    /// failure is final and is a result, not an error.
    ///
    /// # Errors
    ///
    /// - [`TrackError::InvalidTarget`] if the target's timeout is zero,
    ///   before any RPC is issued
    /// - [`TrackError::InvalidHandle`] if the adapter cannot parse the handle
    /// - [`TrackError::ConfirmationTimeout`] if the deadline elapses with no
    ///   terminal resolution. Distinct from a `Failed` result so callers
    ///   can tell "gave up watching" from "the chain rejected it"
    ///
    /// Transient RPC errors are never surfaced; they are retried, logged,
    /// and absorbed by the loop, bounded only by the deadline.
    pub async fn await_confirmation(
        &self,
        handle: &TxHandle,
        target: &ConfirmationTarget,
    ) -> Result<TxResult> {
        let span = spans::await_confirmation(
            handle,
            self.adapter.chain_name(),
            &target.criteria,
            target.timeout,
        );
        self.watch(handle, target, None).instrument(span).await
    }

    /// Like [`await_confirmation`](Self::await_confirmation), racing every
    /// sleep against `cancel`.
    ///
    /// # Errors
    ///
    /// Additionally returns [`TrackError::Cancelled`] once the token fires.
    /// The token is checked when entering each poll iteration; an in-flight
    /// RPC call or retry backoff is not interrupted.
    pub async fn await_confirmation_with_cancel(
        &self,
        handle: &TxHandle,
        target: &ConfirmationTarget,
        cancel: &CancelToken,
    ) -> Result<TxResult> {
        let span = spans::await_confirmation(
            handle,
            self.adapter.chain_name(),
            &target.criteria,
            target.timeout,
        );
        self.watch(handle, target, Some(cancel)).instrument(span).await
    }

    async fn watch(
        &self,
        handle: &TxHandle,
        target: &ConfirmationTarget,
        cancel: Option<&CancelToken>,
    ) -> Result<TxResult> {
        if target.timeout.is_zero() {
            return Err(TrackError::InvalidTarget(
                "confirmation timeout must be non-zero".to_string(),
            ));
        }

        let chain = self.adapter.chain_name();
        info!(
            handle = %handle,
            chain = chain,
            criteria = %target.criteria,
            timeout_secs = target.timeout.as_secs_f64(),
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            event = "confirmation_wait_started"
        );

        let start = self.clock.now();
        let mut poll = 0u32;

        loop {
            let elapsed = self.clock.now().duration_since(start);
            if elapsed >= target.timeout {
                break;
            }
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    return self.cancelled(handle, start);
                }
            }
            poll += 1;

            let status = match self
                .config
                .retry
                .run(&self.clock, || self.adapter.get_status(handle))
                .instrument(spans::get_status(handle, chain, poll))
                .await
            {
                Ok(status) => status,
                Err(error) if error.is_validation() => {
                    // a malformed handle can never confirm; fail fast
                    return Err(error);
                }
                Err(error) => {
                    warn!(
                        handle = %handle,
                        chain = chain,
                        poll = poll,
                        error = %error,
                        event = "status_poll_failed"
                    );
                    if self.sleep_or_cancelled(cancel).await {
                        return self.cancelled(handle, start);
                    }
                    continue;
                }
            };

            // a chain-reported failure is authoritative: terminal, not retried
            if let Some(reason) = &status.error {
                error!(
                    handle = %handle,
                    chain = chain,
                    poll = poll,
                    reason = %reason,
                    event = "chain_reported_failure"
                );
                return Ok(TxResult {
                    handle: handle.clone(),
                    state: TxState::Failed {
                        reason: reason.clone(),
                    },
                    block_number: status.slot,
                    block_hash: None,
                    confirmations: status.confirmations,
                });
            }

            if let Some(confirmations) = met_confirmations(&target.criteria, &status) {
                // a match without a block reference cannot be completed yet;
                // poll again until the chain reports where it landed
                if let Some(number) = status.slot {
                    match self
                        .config
                        .retry
                        .run(&self.clock, || {
                            self.adapter.get_block_info(number, commitment_hint(target))
                        })
                        .instrument(spans::get_block_info(number, chain))
                        .await
                    {
                        Ok(block) => {
                            info!(
                                handle = %handle,
                                chain = chain,
                                poll = poll,
                                block_number = block.number,
                                block_hash = %block.hash,
                                event = "confirmation_reached"
                            );
                            return Ok(TxResult {
                                handle: handle.clone(),
                                state: TxState::Confirmed,
                                block_number: Some(block.number),
                                block_hash: Some(block.hash),
                                confirmations,
                            });
                        }
                        Err(error) => {
                            // defer completion rather than report a confirmed
                            // result with missing block metadata
                            debug!(
                                handle = %handle,
                                chain = chain,
                                poll = poll,
                                block_number = number,
                                error = %error,
                                event = "block_info_deferred"
                            );
                        }
                    }
                } else {
                    debug!(
                        handle = %handle,
                        chain = chain,
                        poll = poll,
                        event = "match_without_block_reference"
                    );
                }
            } else {
                debug!(
                    handle = %handle,
                    chain = chain,
                    poll = poll,
                    slot = status.slot,
                    confirmations = status.confirmations,
                    commitment = status.commitment.map(|c| c.as_str()),
                    event = "confirmation_pending"
                );
            }

            if self.sleep_or_cancelled(cancel).await {
                return self.cancelled(handle, start);
            }
        }

        let elapsed = self.clock.now().duration_since(start);
        error!(
            handle = %handle,
            chain = chain,
            criteria = %target.criteria,
            elapsed_secs = elapsed.as_secs_f64(),
            polls = poll,
            event = "confirmation_timeout"
        );
        Err(TrackError::ConfirmationTimeout {
            handle: handle.clone(),
            elapsed,
            criteria: target.criteria.clone(),
        })
    }

    /// Sleeps one poll interval; returns true if cancelled mid-sleep.
    async fn sleep_or_cancelled(&self, cancel: Option<&CancelToken>) -> bool {
        let interval = self.config.poll_interval;
        match cancel {
            Some(token) => {
                let mut token = token.clone();
                tokio::select! {
                    _ = self.clock.sleep(interval) => false,
                    _ = token.cancelled() => true,
                }
            }
            None => {
                self.clock.sleep(interval).await;
                false
            }
        }
    }

    fn cancelled(&self, handle: &TxHandle, start: std::time::Instant) -> Result<TxResult> {
        let elapsed = self.clock.now().duration_since(start);
        info!(
            handle = %handle,
            chain = self.adapter.chain_name(),
            elapsed_secs = elapsed.as_secs_f64(),
            event = "confirmation_cancelled"
        );
        Err(TrackError::Cancelled {
            handle: handle.clone(),
            elapsed,
        })
    }
}

/// Returns the confirmations to report when `status` satisfies `criteria`,
/// `None` when the target is unmet.
///
/// For depth criteria the reported count is capped at `max_confirmations`
/// when one is set.
fn met_confirmations(criteria: &ConfirmationCriteria, status: &TxStatus) -> Option<Option<u64>> {
    match criteria {
        ConfirmationCriteria::Commitment(level) => {
            let reported = status.commitment?;
            reported.satisfies(*level).then_some(status.confirmations)
        }
        ConfirmationCriteria::Depth {
            min_confirmations,
            max_confirmations,
        } => {
            let confirmations = status.confirmations?;
            (confirmations >= *min_confirmations).then(|| {
                Some(match max_confirmations {
                    Some(max) => confirmations.min(*max),
                    None => confirmations,
                })
            })
        }
    }
}

fn commitment_hint(target: &ConfirmationTarget) -> Option<crate::confirmation::CommitmentLevel> {
    match target.criteria {
        ConfirmationCriteria::Commitment(level) => Some(level),
        ConfirmationCriteria::Depth { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirmation::CommitmentLevel;

    fn depth_status(confirmations: u64) -> TxStatus {
        TxStatus {
            confirmations: Some(confirmations),
            slot: Some(100),
            ..Default::default()
        }
    }

    #[test]
    fn test_depth_unmet_below_minimum() {
        let criteria = ConfirmationCriteria::Depth {
            min_confirmations: 3,
            max_confirmations: None,
        };
        assert_eq!(met_confirmations(&criteria, &depth_status(2)), None);
    }

    #[test]
    fn test_depth_met_reports_observed_count() {
        let criteria = ConfirmationCriteria::Depth {
            min_confirmations: 3,
            max_confirmations: None,
        };
        assert_eq!(
            met_confirmations(&criteria, &depth_status(5)),
            Some(Some(5))
        );
    }

    #[test]
    fn test_depth_met_caps_at_maximum() {
        let criteria = ConfirmationCriteria::Depth {
            min_confirmations: 2,
            max_confirmations: Some(4),
        };
        assert_eq!(
            met_confirmations(&criteria, &depth_status(9)),
            Some(Some(4))
        );
    }

    #[test]
    fn test_depth_without_count_is_unmet() {
        let criteria = ConfirmationCriteria::Depth {
            min_confirmations: 1,
            max_confirmations: None,
        };
        assert_eq!(met_confirmations(&criteria, &TxStatus::not_found()), None);
    }

    #[test]
    fn test_commitment_subsumption() {
        let criteria = ConfirmationCriteria::Commitment(CommitmentLevel::Confirmed);
        let status = TxStatus {
            commitment: Some(CommitmentLevel::Finalized),
            confirmations: Some(12),
            slot: Some(100),
            ..Default::default()
        };
        assert_eq!(met_confirmations(&criteria, &status), Some(Some(12)));

        let criteria = ConfirmationCriteria::Commitment(CommitmentLevel::Finalized);
        let status = TxStatus {
            commitment: Some(CommitmentLevel::Confirmed),
            ..Default::default()
        };
        assert_eq!(met_confirmations(&criteria, &status), None);
    }
}
