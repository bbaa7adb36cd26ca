//! Test utilities and fake implementations for the confirmation tracker
//!
//! This module provides fake implementations of the tracker's traits that
//! enable comprehensive testing including adversarial scenarios without
//! requiring actual blockchain interactions.
//!
//! These fakes are designed to be used in integration tests to verify the
//! behavior of [`ConfirmationTracker`](crate::ConfirmationTracker) under
//! various conditions like timeouts, transient RPC failures, chain-reported
//! failures, and confirmation progressions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::confirmation::{BlockInfo, CommitmentLevel, TxHandle, TxStatus};
use crate::error::{Result, TrackError};
use crate::traits::{ChainAdapter, Clock};

// ============================================================================
// Fake Chain Adapter
// ============================================================================

/// One scripted outcome of a `get_status` call.
#[derive(Clone, Debug)]
pub enum StatusStep {
    /// Return this snapshot
    Status(TxStatus),
    /// Fail with a simulated transient RPC error
    TransientError,
}

/// A fake chain adapter driven by scripted status sequences.
///
/// Each `get_status` call consumes the next step configured for the handle;
/// once the sequence is exhausted the last step repeats forever, so a single
/// entry models a steady state. Handles with no script behave like
/// transactions the chain has never seen.
///
/// This allows testing scenarios like:
/// - Confirmation count progressions across polls
/// - Transient RPC errors and recovery
/// - Chain-reported failures
/// - Block metadata temporarily unavailable after a match
#[derive(Clone, Debug, Default)]
pub struct FakeChainAdapter {
    steps: Arc<Mutex<HashMap<TxHandle, Vec<StatusStep>>>>,
    step_index: Arc<Mutex<HashMap<TxHandle, usize>>>,
    status_calls: Arc<Mutex<HashMap<TxHandle, usize>>>,
    blocks: Arc<Mutex<HashMap<u64, BlockInfo>>>,
    block_failures: Arc<Mutex<HashMap<u64, usize>>>,
    block_calls: Arc<Mutex<usize>>,
}

impl FakeChainAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a sequence of scripted steps for a handle.
    pub fn add_step_sequence(&self, handle: &TxHandle, steps: Vec<StatusStep>) {
        self.steps.lock().unwrap().insert(handle.clone(), steps);
        self.step_index.lock().unwrap().insert(handle.clone(), 0);
    }

    /// Configure a sequence of status snapshots for a handle.
    ///
    /// Each call to `get_status` returns the next snapshot; the last one
    /// repeats once the sequence is exhausted.
    pub fn add_status_sequence(&self, handle: &TxHandle, statuses: Vec<TxStatus>) {
        self.add_step_sequence(handle, statuses.into_iter().map(StatusStep::Status).collect());
    }

    /// Configure a confirmation-count progression at a fixed slot.
    pub fn add_confirmation_progression(&self, handle: &TxHandle, counts: &[u64], slot: u64) {
        let statuses = counts
            .iter()
            .map(|&confirmations| TxStatus {
                confirmations: Some(confirmations),
                slot: Some(slot),
                ..Default::default()
            })
            .collect();
        self.add_status_sequence(handle, statuses);
    }

    /// Configure a commitment-level progression at a fixed slot.
    pub fn add_commitment_progression(
        &self,
        handle: &TxHandle,
        levels: &[CommitmentLevel],
        slot: u64,
    ) {
        let statuses = levels
            .iter()
            .map(|&level| TxStatus {
                commitment: Some(level),
                slot: Some(slot),
                ..Default::default()
            })
            .collect();
        self.add_status_sequence(handle, statuses);
    }

    /// Configure an immediate chain-reported failure.
    pub fn add_failed_status(&self, handle: &TxHandle, reason: &str, slot: u64) {
        self.add_status_sequence(
            handle,
            vec![TxStatus {
                error: Some(reason.to_string()),
                slot: Some(slot),
                ..Default::default()
            }],
        );
    }

    /// Configure every `get_status` call to fail transiently.
    pub fn add_always_transient(&self, handle: &TxHandle) {
        self.add_step_sequence(handle, vec![StatusStep::TransientError]);
    }

    /// Configure a block returned by `get_block_info`.
    ///
    /// Unconfigured block numbers get a synthesized hash, so most tests only
    /// need this when asserting a specific hash.
    pub fn add_block(&self, number: u64, hash: &str) {
        self.blocks.lock().unwrap().insert(
            number,
            BlockInfo {
                number,
                hash: hash.to_string(),
            },
        );
    }

    /// Make the next `times` block-info fetches for `number` fail
    /// transiently.
    pub fn fail_block_fetches(&self, number: u64, times: usize) {
        self.block_failures.lock().unwrap().insert(number, times);
    }

    /// Number of `get_status` calls seen for a handle.
    pub fn status_call_count(&self, handle: &TxHandle) -> usize {
        self.status_calls
            .lock()
            .unwrap()
            .get(handle)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of `get_block_info` calls seen.
    pub fn block_call_count(&self) -> usize {
        *self.block_calls.lock().unwrap()
    }
}

#[async_trait]
impl ChainAdapter for FakeChainAdapter {
    fn chain_name(&self) -> &str {
        "fake"
    }

    async fn get_status(&self, handle: &TxHandle) -> Result<TxStatus> {
        *self
            .status_calls
            .lock()
            .unwrap()
            .entry(handle.clone())
            .or_insert(0) += 1;

        let steps = self.steps.lock().unwrap();
        let Some(sequence) = steps.get(handle) else {
            return Ok(TxStatus::not_found());
        };

        let mut indices = self.step_index.lock().unwrap();
        let index = indices.get(handle).copied().unwrap_or(0);
        let step = if index < sequence.len() {
            indices.insert(handle.clone(), index + 1);
            sequence[index].clone()
        } else {
            // repeat the last step once exhausted
            match sequence.last() {
                Some(step) => step.clone(),
                None => return Ok(TxStatus::not_found()),
            }
        };

        match step {
            StatusStep::Status(status) => Ok(status),
            StatusStep::TransientError => {
                Err(TrackError::Adapter("simulated RPC error".to_string()))
            }
        }
    }

    async fn get_block_info(
        &self,
        number: u64,
        _commitment_hint: Option<CommitmentLevel>,
    ) -> Result<BlockInfo> {
        *self.block_calls.lock().unwrap() += 1;

        let mut failures = self.block_failures.lock().unwrap();
        if let Some(remaining) = failures.get_mut(&number) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(TrackError::Adapter(
                    "simulated block fetch failure".to_string(),
                ));
            }
        }

        Ok(self
            .blocks
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_else(|| BlockInfo {
                number,
                hash: format!("blockhash-{number}"),
            }))
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A fake clock that allows fast-forwarding time in tests.
///
/// Every `sleep` advances the reported time by the slept duration, so
/// polling loops and timeouts run instantly while elapsed-time accounting
/// stays exact.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast-forward the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    /// Get the total time "slept" by this clock
    pub fn total_sleep_time(&self) -> Duration {
        self.sleep_log.lock().unwrap().iter().sum()
    }

    /// Get the number of times sleep was called
    pub fn sleep_count(&self) -> usize {
        self.sleep_log.lock().unwrap().len()
    }

    /// Get every sleep duration in call order
    pub fn sleep_log(&self) -> Vec<Duration> {
        self.sleep_log.lock().unwrap().clone()
    }

    /// Clear the sleep log
    pub fn clear_sleep_log(&self) {
        self.sleep_log.lock().unwrap().clear();
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleep_log.lock().unwrap().push(duration);
        self.advance(duration);
    }

    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_clock_tracks_sleep_calls() {
        let clock = FakeClock::new();

        clock.sleep(Duration::from_secs(60)).await;
        clock.sleep(Duration::from_secs(120)).await;

        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.total_sleep_time(), Duration::from_secs(180));
    }

    #[tokio::test]
    async fn test_fake_clock_advances_now() {
        let clock = FakeClock::new();
        let before = clock.now();

        clock.sleep(Duration::from_secs(30)).await;

        assert_eq!(clock.now().duration_since(before), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_fake_adapter_sequence_and_repeat() {
        let adapter = FakeChainAdapter::new();
        let handle = TxHandle::from("tx-1");

        adapter.add_confirmation_progression(&handle, &[0, 1], 42);

        let first = adapter.get_status(&handle).await.unwrap();
        assert_eq!(first.confirmations, Some(0));

        let second = adapter.get_status(&handle).await.unwrap();
        assert_eq!(second.confirmations, Some(1));

        // exhausted sequences repeat the last step
        let third = adapter.get_status(&handle).await.unwrap();
        assert_eq!(third.confirmations, Some(1));

        assert_eq!(adapter.status_call_count(&handle), 3);
    }

    #[tokio::test]
    async fn test_fake_adapter_unscripted_handle_is_not_found() {
        let adapter = FakeChainAdapter::new();
        let handle = TxHandle::from("unknown");

        let status = adapter.get_status(&handle).await.unwrap();
        assert_eq!(status, TxStatus::not_found());
    }

    #[tokio::test]
    async fn test_fake_adapter_transient_error() {
        let adapter = FakeChainAdapter::new();
        let handle = TxHandle::from("tx-err");

        adapter.add_always_transient(&handle);

        let result = adapter.get_status(&handle).await;
        assert!(matches!(result.unwrap_err(), TrackError::Adapter(_)));
    }

    #[tokio::test]
    async fn test_fake_adapter_block_failures_then_success() {
        let adapter = FakeChainAdapter::new();

        adapter.add_block(7, "0xfeed");
        adapter.fail_block_fetches(7, 2);

        assert!(adapter.get_block_info(7, None).await.is_err());
        assert!(adapter.get_block_info(7, None).await.is_err());
        let block = adapter.get_block_info(7, None).await.unwrap();
        assert_eq!(block.hash, "0xfeed");
        assert_eq!(adapter.block_call_count(), 3);
    }

    #[tokio::test]
    async fn test_fake_adapter_synthesizes_unconfigured_blocks() {
        let adapter = FakeChainAdapter::new();

        let block = adapter.get_block_info(99, None).await.unwrap();
        assert_eq!(block.number, 99);
        assert_eq!(block.hash, "blockhash-99");
    }
}
