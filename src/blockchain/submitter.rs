//! Transaction submission and receipt polling.
//!
//! # Responsibilities
//! - Sync the wallet nonce with the chain before each attempt
//! - Enforce the configured gas price ceiling and multiplier
//! - Sign, broadcast, and poll for the receipt
//!
//! # Design Decisions
//! - Legacy gas pricing: not every target chain implements EIP-1559, and
//!   one pricing path keeps submission deterministic
//! - Receipt polling never treats a missing receipt as failure; only a
//!   landed receipt with failure status or the configured timeout ends
//!   the wait

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;
use crate::swap::PreparedSwap;

/// Signs and broadcasts prepared calls, then watches for their receipts.
pub struct Submitter {
    client: BlockchainClient,
    wallet: Wallet,
}

impl Submitter {
    pub fn new(client: BlockchainClient, wallet: Wallet) -> Self {
        Self { client, wallet }
    }

    /// The sending address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Sign and broadcast one call. Returns the transaction hash without
    /// waiting for inclusion.
    pub async fn submit(
        &self,
        to: Address,
        calldata: Bytes,
        value: U256,
    ) -> BlockchainResult<TxHash> {
        // Sync the nonce from chain; local bookkeeping only orders
        // transactions within this process.
        let chain_nonce = self
            .client
            .get_transaction_count(self.wallet.address())
            .await?;
        self.wallet.set_nonce(chain_nonce);

        let gas_price = self.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;
        let config = self.client.config();
        if gas_price_gwei > config.max_gas_price_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: config.max_gas_price_gwei,
            });
        }
        let adjusted_gas_price = apply_multiplier(gas_price, config.gas_price_multiplier);

        let nonce = self.wallet.get_and_increment_nonce();
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_value(value)
            .with_input(calldata)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.wallet.chain_id())
            .with_gas_limit(config.gas_limit);

        let envelope = self.wallet.sign_request(tx).await?;
        let tx_hash = self.client.send_envelope(envelope).await?;

        tracing::info!(
            tx_hash = %tx_hash,
            nonce = nonce,
            gas_price = adjusted_gas_price,
            "Transaction broadcast"
        );
        Ok(tx_hash)
    }

    /// Broadcast a prepared swap.
    pub async fn submit_swap(&self, swap: &PreparedSwap) -> BlockchainResult<TxHash> {
        self.submit(swap.to, swap.calldata.clone(), swap.value)
            .await
    }

    /// Poll until the receipt lands.
    ///
    /// A missing receipt keeps polling at `receipt_poll_secs`. A receipt
    /// with failure status is an error carrying the hash. The loop stops
    /// after `receipt_timeout_secs`; a configured 0 removes the bound.
    pub async fn await_receipt(&self, tx_hash: TxHash) -> BlockchainResult<TransactionReceipt> {
        let config = self.client.config();
        let poll = Duration::from_secs(config.receipt_poll_secs.max(1));
        let bound = config.receipt_timeout_secs;

        if bound == 0 {
            return self.poll_receipt(tx_hash, poll).await;
        }

        match timeout(Duration::from_secs(bound), self.poll_receipt(tx_hash, poll)).await {
            Ok(result) => result,
            Err(_) => Err(BlockchainError::ReceiptTimeout {
                tx_hash,
                timeout_secs: bound,
            }),
        }
    }

    async fn poll_receipt(
        &self,
        tx_hash: TxHash,
        poll: Duration,
    ) -> BlockchainResult<TransactionReceipt> {
        let mut ticker = interval(poll);

        loop {
            ticker.tick().await;

            let Some(receipt) = self.client.get_transaction_receipt(tx_hash).await? else {
                tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                continue;
            };

            if !receipt.status() {
                return Err(BlockchainError::Reverted { tx_hash });
            }

            tracing::info!(
                tx_hash = %tx_hash,
                block = receipt.block_number.unwrap_or_default(),
                "Transaction confirmed"
            );
            return Ok(receipt);
        }
    }
}

/// Scale a gas price by the configured multiplier, truncating to wei.
fn apply_multiplier(gas_price: u128, multiplier: f64) -> u128 {
    (gas_price as f64 * multiplier) as u128
}
