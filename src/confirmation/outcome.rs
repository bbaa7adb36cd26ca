//! Confirmation targets and normalized tracker results

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{CommitmentLevel, TxHandle};

/// Default deadline for a confirmation wait (3 minutes)
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(180);

/// What "confirmed" means for one wait
///
/// Exactly one of the two semantics applies per chain family: commitment
/// levels on Solana-style chains, confirmation depth on EVM-style chains.
/// Making this an enum means a target can never carry both checks at once;
/// the first satisfied condition wins by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationCriteria {
    /// Wait until the reported commitment level satisfies this one
    /// (see [`CommitmentLevel::satisfies`] for the subsumption rule)
    Commitment(CommitmentLevel),
    /// Wait until the reported confirmation count reaches `min_confirmations`
    Depth {
        /// Minimum confirmations required before the wait completes
        min_confirmations: u64,
        /// If set, the reported count is capped here once the minimum is
        /// met, rather than polling for more
        max_confirmations: Option<u64>,
    },
}

impl fmt::Display for ConfirmationCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commitment(level) => write!(f, "{level} commitment"),
            Self::Depth {
                min_confirmations,
                max_confirmations: Some(max),
            } => write!(f, "{min_confirmations} confirmations (max {max})"),
            Self::Depth {
                min_confirmations, ..
            } => write!(f, "{min_confirmations} confirmations"),
        }
    }
}

/// Configuration describing what to wait for and how long
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use txwatch_rs::{CommitmentLevel, ConfirmationTarget};
///
/// // EVM-style: two confirmations, default timeout
/// let target = ConfirmationTarget::depth(2);
///
/// // Solana-style: finalized commitment, custom timeout
/// let target = ConfirmationTarget::commitment(CommitmentLevel::Finalized)
///     .with_timeout(Duration::from_secs(90));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationTarget {
    /// The condition that completes the wait
    pub criteria: ConfirmationCriteria,
    /// Deadline for the whole wait; must be non-zero
    pub timeout: Duration,
}

impl ConfirmationTarget {
    /// Creates a depth target requiring `min_confirmations` confirmations
    pub fn depth(min_confirmations: u64) -> Self {
        Self {
            criteria: ConfirmationCriteria::Depth {
                min_confirmations,
                max_confirmations: None,
            },
            timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Creates a commitment-level target
    pub fn commitment(level: CommitmentLevel) -> Self {
        Self {
            criteria: ConfirmationCriteria::Commitment(level),
            timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Sets the wait deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps the reported confirmation count for depth targets
    ///
    /// Has no effect on commitment targets, which carry no count requirement.
    pub fn with_max_confirmations(mut self, max: u64) -> Self {
        if let ConfirmationCriteria::Depth {
            max_confirmations, ..
        } = &mut self.criteria
        {
            *max_confirmations = Some(max);
        }
        self
    }
}

/// Terminal state of a tracked transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxState {
    /// Not yet terminal; the tracker itself never returns this (a deadline
    /// is a distinct timeout error), but upstream layers can use it to
    /// represent an observation that has not resolved
    Pending,
    /// The confirmation target was met
    Confirmed,
    /// The chain marked the transaction as failed
    Failed {
        /// Chain-reported failure reason
        reason: String,
    },
}

impl TxState {
    /// Returns true for `Confirmed` and `Failed`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Normalized result of a confirmation wait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    /// The handle the wait was issued for
    pub handle: TxHandle,
    /// Terminal state reached
    pub state: TxState,
    /// Block number or slot the transaction landed in
    #[serde(default)]
    pub block_number: Option<u64>,
    /// Hash of that block
    #[serde(default)]
    pub block_hash: Option<String>,
    /// Confirmations at completion, capped at the target's maximum when set
    #[serde(default)]
    pub confirmations: Option<u64>,
}

impl TxResult {
    /// Returns true if the confirmation target was met
    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, TxState::Confirmed)
    }

    /// Returns true if the chain rejected the transaction
    pub fn is_failed(&self) -> bool {
        matches!(self.state, TxState::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_target_defaults() {
        let target = ConfirmationTarget::depth(3);
        assert_eq!(
            target.criteria,
            ConfirmationCriteria::Depth {
                min_confirmations: 3,
                max_confirmations: None,
            }
        );
        assert_eq!(target.timeout, DEFAULT_CONFIRMATION_TIMEOUT);
    }

    #[test]
    fn test_with_max_confirmations_on_depth() {
        let target = ConfirmationTarget::depth(2).with_max_confirmations(12);
        assert_eq!(
            target.criteria,
            ConfirmationCriteria::Depth {
                min_confirmations: 2,
                max_confirmations: Some(12),
            }
        );
    }

    #[test]
    fn test_with_max_confirmations_ignored_for_commitment() {
        let target =
            ConfirmationTarget::commitment(CommitmentLevel::Confirmed).with_max_confirmations(12);
        assert_eq!(
            target.criteria,
            ConfirmationCriteria::Commitment(CommitmentLevel::Confirmed)
        );
    }

    #[test]
    fn test_criteria_display() {
        assert_eq!(
            format!("{}", ConfirmationCriteria::Commitment(CommitmentLevel::Finalized)),
            "finalized commitment"
        );
        assert_eq!(
            format!(
                "{}",
                ConfirmationCriteria::Depth {
                    min_confirmations: 3,
                    max_confirmations: None
                }
            ),
            "3 confirmations"
        );
        assert_eq!(
            format!(
                "{}",
                ConfirmationCriteria::Depth {
                    min_confirmations: 3,
                    max_confirmations: Some(12)
                }
            ),
            "3 confirmations (max 12)"
        );
    }

    #[test]
    fn test_state_terminality() {
        assert!(!TxState::Pending.is_terminal());
        assert!(TxState::Confirmed.is_terminal());
        assert!(TxState::Failed {
            reason: "reverted".to_string()
        }
        .is_terminal());
    }

    #[test]
    fn test_result_serde_shape() {
        let result = TxResult {
            handle: TxHandle::from("0xdeadbeef"),
            state: TxState::Confirmed,
            block_number: Some(100),
            block_hash: Some("0xfeed".to_string()),
            confirmations: Some(3),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["handle"], "0xdeadbeef");
        assert_eq!(json["state"], "confirmed");
        assert_eq!(json["block_number"], 100);
        assert_eq!(json["confirmations"], 3);
    }
}
