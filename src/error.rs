use std::time::Duration;

use thiserror::Error;

use crate::confirmation::{ConfirmationCriteria, TxHandle};

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Adapter error: {0}")]
    Adapter(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("Solana RPC error: {0}")]
    SolanaRpc(#[from] solana_client::client_error::ClientError),

    #[error("Invalid transaction handle: {0}")]
    InvalidHandle(String),

    #[error("Invalid confirmation target: {0}")]
    InvalidTarget(String),

    #[error("Timed out after {elapsed:?} waiting for {handle} to reach {criteria}")]
    ConfirmationTimeout {
        handle: TxHandle,
        elapsed: Duration,
        criteria: ConfirmationCriteria,
    },

    #[error("Confirmation wait for {handle} cancelled after {elapsed:?}")]
    Cancelled { handle: TxHandle, elapsed: Duration },
}

impl TrackError {
    /// Returns true for deterministic errors that retrying cannot fix
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidHandle(_) | Self::InvalidTarget(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;
