// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Alloy-based chain adapter for EVM networks.

use alloy_network::primitives::{BlockResponse, HeaderResponse, ReceiptResponse};
use alloy_network::Network;
use alloy_primitives::TxHash;
use alloy_provider::Provider;
use alloy_rpc_types::BlockNumberOrTag;
use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use crate::confirmation::{BlockInfo, CommitmentLevel, TxHandle, TxStatus};
use crate::error::{Result, TrackError};
use crate::traits::ChainAdapter;

/// Chain adapter for EVM networks, wrapping Alloy's [`Provider`] trait.
///
/// Confirmation semantics are count-based: a receipt at block `b` with the
/// chain head at `h` has seen `h - b + 1` confirmations. Commitment labels
/// are never populated.
///
/// # Type Parameters
///
/// - `N`: The network type (e.g., `Ethereum`, `Optimism`)
/// - `P`: The underlying Alloy provider implementation
///
/// # Examples
///
/// ```rust,no_run
/// use txwatch_rs::adapters::EvmAdapter;
/// use alloy_chains::NamedChain;
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new()
///     .connect("https://eth.llamarpc.com")
///     .await?;
///
/// let adapter = EvmAdapter::new(provider).with_chain(NamedChain::Mainnet);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EvmAdapter<N, P>
where
    N: Network,
    P: Provider<N> + Clone,
{
    provider: P,
    chain: String,
    _network: std::marker::PhantomData<N>,
}

impl<N, P> EvmAdapter<N, P>
where
    N: Network,
    P: Provider<N> + Clone,
{
    /// Creates a new [`EvmAdapter`] wrapping the given Alloy provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            chain: "evm".to_string(),
            _network: std::marker::PhantomData,
        }
    }

    /// Labels the adapter with a chain name for logs and spans.
    pub fn with_chain(mut self, chain: alloy_chains::NamedChain) -> Self {
        self.chain = chain.to_string();
        self
    }

    /// Returns a reference to the underlying Alloy provider.
    pub fn inner(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<N, P> ChainAdapter for EvmAdapter<N, P>
where
    N: Network,
    P: Provider<N> + Clone + Send + Sync,
{
    fn chain_name(&self) -> &str {
        &self.chain
    }

    #[instrument(skip(self), fields(chain = %self.chain, handle = %handle))]
    async fn get_status(&self, handle: &TxHandle) -> Result<TxStatus> {
        let tx_hash = parse_tx_hash(handle)?;

        trace!("Fetching transaction receipt");
        let receipt = self.provider.get_transaction_receipt(tx_hash).await?;

        let Some(receipt) = receipt else {
            debug!("Transaction receipt not found");
            return Ok(TxStatus::not_found());
        };

        let block_number = receipt.block_number();
        let confirmations = match block_number {
            Some(number) => {
                let head = self.provider.get_block_number().await?;
                // a lagging node can report a head behind the receipt's block
                head.checked_sub(number).map(|lag| lag + 1)
            }
            None => None,
        };
        let error = (!receipt.status()).then(|| "transaction reverted".to_string());

        debug!(
            block_number = block_number,
            confirmations = confirmations,
            reverted = error.is_some(),
            "Transaction receipt found"
        );
        Ok(TxStatus {
            error,
            slot: block_number,
            confirmations,
            commitment: None,
        })
    }

    #[instrument(skip(self), fields(chain = %self.chain))]
    async fn get_block_info(
        &self,
        number: u64,
        _commitment_hint: Option<CommitmentLevel>,
    ) -> Result<BlockInfo> {
        trace!("Fetching block by number");
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await?
            .ok_or_else(|| TrackError::Adapter(format!("block {number} not found")))?;

        Ok(BlockInfo {
            number,
            hash: block.header().hash().to_string(),
        })
    }
}

fn parse_tx_hash(handle: &TxHandle) -> Result<TxHash> {
    handle
        .as_str()
        .parse::<TxHash>()
        .map_err(|e| TrackError::InvalidHandle(format!("{handle}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tx_hash() {
        let handle = TxHandle::from(
            "0x4e3a3754410177e6937ef1f84bba68ea139e8d1a2258c5f85db9f1cd715a1bdd",
        );
        assert!(parse_tx_hash(&handle).is_ok());
    }

    #[test]
    fn test_parse_rejects_short_hash() {
        let handle = TxHandle::from("0xabc");
        assert!(matches!(
            parse_tx_hash(&handle).unwrap_err(),
            TrackError::InvalidHandle(_)
        ));
    }

    #[test]
    fn test_parse_rejects_solana_signature() {
        let handle = TxHandle::from(
            "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW",
        );
        assert!(matches!(
            parse_tx_hash(&handle).unwrap_err(),
            TrackError::InvalidHandle(_)
        ));
    }
}
