// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Confirmation tracker core
//!
//! This module provides the polling state machine that waits for a submitted
//! transaction to reach its confirmation target, plus its configuration and
//! cancellation types.

mod cancel;
mod config;
mod tracker;

pub use cancel::{CancelHandle, CancelToken};
pub use config::{
    chain_confirmation_config, TrackerConfig, CHAIN_CONFIRMATION_CONFIG, DEFAULT_POLL_INTERVAL,
};
pub use tracker::ConfirmationTracker;
