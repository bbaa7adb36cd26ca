//! Solana chain adapter over the nonblocking RPC client.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcBlockConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_transaction_status::{TransactionConfirmationStatus, TransactionDetails};
use tracing::{debug, instrument, trace};

use crate::confirmation::{BlockInfo, CommitmentLevel, TxHandle, TxStatus};
use crate::error::{Result, TrackError};
use crate::traits::ChainAdapter;

/// Chain adapter for Solana, wrapping
/// [`solana_client::nonblocking::rpc_client::RpcClient`].
///
/// Confirmation semantics are commitment-based: each signature status
/// carries the highest commitment level reached, mapped onto
/// [`CommitmentLevel`]. The cluster-reported confirmation count is also
/// surfaced while the transaction is below finalization.
///
/// # Examples
///
/// ```rust,no_run
/// use txwatch_rs::adapters::SolanaAdapter;
///
/// let adapter = SolanaAdapter::mainnet();
/// let custom = SolanaAdapter::new("http://localhost:8899");
/// ```
pub struct SolanaAdapter {
    client: RpcClient,
}

impl std::fmt::Debug for SolanaAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaAdapter").finish_non_exhaustive()
    }
}

impl SolanaAdapter {
    /// Creates an adapter for the given RPC endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: RpcClient::new(url.into()),
        }
    }

    /// Creates an adapter for the public mainnet-beta endpoint.
    pub fn mainnet() -> Self {
        Self::new("https://api.mainnet-beta.solana.com")
    }

    /// Creates an adapter for the public devnet endpoint.
    pub fn devnet() -> Self {
        Self::new("https://api.devnet.solana.com")
    }

    /// Wraps an already-configured RPC client.
    pub fn from_client(client: RpcClient) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying RPC client.
    pub fn inner(&self) -> &RpcClient {
        &self.client
    }
}

#[async_trait]
impl ChainAdapter for SolanaAdapter {
    fn chain_name(&self) -> &str {
        "solana"
    }

    #[instrument(skip(self), fields(handle = %handle))]
    async fn get_status(&self, handle: &TxHandle) -> Result<TxStatus> {
        let signature = parse_signature(handle)?;

        trace!("Fetching signature status");
        let response = self.client.get_signature_statuses(&[signature]).await?;

        let Some(status) = response.value.into_iter().next().flatten() else {
            debug!("Signature not found");
            return Ok(TxStatus::not_found());
        };

        debug!(
            slot = status.slot,
            confirmations = status.confirmations,
            confirmation_status = ?status.confirmation_status,
            failed = status.err.is_some(),
            "Signature status found"
        );
        Ok(TxStatus {
            error: status.err.map(|e| e.to_string()),
            slot: Some(status.slot),
            // None here means the transaction is rooted (beyond max lockout)
            confirmations: status.confirmations.map(|c| c as u64),
            commitment: status.confirmation_status.map(CommitmentLevel::from),
        })
    }

    #[instrument(skip(self))]
    async fn get_block_info(
        &self,
        number: u64,
        commitment_hint: Option<CommitmentLevel>,
    ) -> Result<BlockInfo> {
        let config = RpcBlockConfig {
            transaction_details: Some(TransactionDetails::None),
            rewards: Some(false),
            commitment: Some(block_commitment(commitment_hint)),
            ..RpcBlockConfig::default()
        };

        trace!("Fetching block for slot");
        let block = self.client.get_block_with_config(number, config).await?;

        Ok(BlockInfo {
            number,
            hash: block.blockhash,
        })
    }
}

impl From<TransactionConfirmationStatus> for CommitmentLevel {
    fn from(status: TransactionConfirmationStatus) -> Self {
        match status {
            TransactionConfirmationStatus::Processed => Self::Processed,
            TransactionConfirmationStatus::Confirmed => Self::Confirmed,
            TransactionConfirmationStatus::Finalized => Self::Finalized,
        }
    }
}

/// Maps a commitment hint onto a `getBlock` commitment.
///
/// `getBlock` accepts only `confirmed` and `finalized`; a `processed` hint
/// is widened to `confirmed`, and no hint defaults to `finalized`.
fn block_commitment(hint: Option<CommitmentLevel>) -> CommitmentConfig {
    match hint {
        Some(CommitmentLevel::Processed) | Some(CommitmentLevel::Confirmed) => {
            CommitmentConfig::confirmed()
        }
        Some(CommitmentLevel::Finalized) | None => CommitmentConfig::finalized(),
    }
}

fn parse_signature(handle: &TxHandle) -> Result<Signature> {
    handle
        .as_str()
        .parse::<Signature>()
        .map_err(|e| TrackError::InvalidHandle(format!("{handle}: {e}")))
}
