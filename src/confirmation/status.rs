//! Raw chain-reported status snapshots and block metadata

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CommitmentLevel;

/// Opaque identifier for a submitted transaction
///
/// Wraps the chain-native hash or signature string. Immutable once created;
/// produced by whatever layer submitted the transaction. The tracker never
/// inspects the contents; chain adapters parse it into their native form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHandle(String);

impl TxHandle {
    /// Creates a handle from a hash or signature string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TxHandle {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TxHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A chain-reported status snapshot for one transaction
///
/// Produced fresh on every poll and never mutated, only replaced. Every field
/// is optional because chains report different subsets: EVM receipts carry a
/// block number and a derived confirmation count, Solana signature statuses
/// carry a slot, a confirmation count, and a commitment label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxStatus {
    /// Chain-reported execution error, if the chain marked the transaction
    /// as failed. Authoritative and terminal.
    #[serde(default)]
    pub error: Option<String>,
    /// Slot (Solana) or block number (EVM) the transaction landed in
    #[serde(default)]
    pub slot: Option<u64>,
    /// Number of confirmations observed so far
    #[serde(default)]
    pub confirmations: Option<u64>,
    /// Commitment level reached, on chains that report one
    #[serde(default)]
    pub commitment: Option<CommitmentLevel>,
}

impl TxStatus {
    /// Snapshot for a transaction the chain has not seen yet
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Returns true if the chain reported the transaction as failed
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Block metadata fetched after a confirmation match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block number or slot
    pub number: u64,
    /// Block hash in the chain's native string form
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_roundtrip() {
        let handle = TxHandle::from("0xabc123");
        assert_eq!(handle.as_str(), "0xabc123");
        assert_eq!(format!("{handle}"), "0xabc123");
    }

    #[test]
    fn test_handle_serde_is_transparent() {
        let handle = TxHandle::new("5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW");
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, format!("\"{}\"", handle.as_str()));
    }

    #[test]
    fn test_not_found_is_empty() {
        let status = TxStatus::not_found();
        assert!(status.error.is_none());
        assert!(status.slot.is_none());
        assert!(status.confirmations.is_none());
        assert!(status.commitment.is_none());
        assert!(!status.is_failed());
    }

    #[test]
    fn test_failed_status() {
        let status = TxStatus {
            error: Some("out of gas".to_string()),
            slot: Some(19_000_000),
            ..Default::default()
        };
        assert!(status.is_failed());
    }
}
