//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! transactor. All types derive Serde traits for deserialization from
//! config files. The signing key is deliberately absent: it is read from
//! the environment only.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::config::validation::ValidationError;
use crate::swap::{CallConvention, PoolKey, SwapDirection, SwapIntent, SwapMode};

/// Root configuration for the transactor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactorConfig {
    /// Deployment environment tag (development, staging, production).
    pub environment: String,

    /// Attestation service settings.
    pub attester: AttesterConfig,

    /// Chain and submission settings.
    pub chain: ChainConfig,

    /// Pool identity the swap targets.
    pub pool: PoolConfig,

    /// The swap to perform.
    pub swap: SwapConfig,
}

impl Default for TransactorConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            attester: AttesterConfig::default(),
            chain: ChainConfig::default(),
            pool: PoolConfig::default(),
            swap: SwapConfig::default(),
        }
    }
}

/// Attestation service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AttesterConfig {
    /// Verification endpoint URL.
    pub url: String,

    /// API key sent as the `x-api-key` header.
    pub api_key: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Route requests through the bundled SDK client instead of the
    /// direct HTTP client.
    pub use_sdk: bool,
}

impl Default for AttesterConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8787/task".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
            use_sdk: false,
        }
    }
}

/// Chain access and submission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs (reads only).
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Gas limit for the swap transaction.
    pub gas_limit: u64,

    /// Gas price multiplier (1.0 = current, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,

    /// Receipt polling interval in seconds.
    pub receipt_poll_secs: u64,

    /// Receipt polling bound in seconds; 0 polls forever.
    pub receipt_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
            gas_limit: 500_000,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
            receipt_poll_secs: 1,
            receipt_timeout_secs: 300,
        }
    }
}

/// Pool identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// First currency of the pair (zero address for the native coin).
    pub currency0: String,

    /// Second currency of the pair.
    pub currency1: String,

    /// Pool fee in hundredths of a bip (uint24).
    pub fee: u32,

    /// Tick spacing (int24, non-zero).
    pub tick_spacing: i32,

    /// Hook contract gating the pool.
    pub hooks: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            currency0: Address::ZERO.to_string(),
            currency1: Address::ZERO.to_string(),
            fee: 0,
            tick_spacing: 60,
            hooks: Address::ZERO.to_string(),
        }
    }
}

impl PoolConfig {
    /// Build the typed pool key from the raw strings.
    pub fn to_pool_key(&self) -> Result<PoolKey, ValidationError> {
        Ok(PoolKey {
            currency0: parse_address("pool.currency0", &self.currency0)?,
            currency1: parse_address("pool.currency1", &self.currency1)?,
            fee: self.fee,
            tick_spacing: self.tick_spacing,
            hooks: parse_address("pool.hooks", &self.hooks)?,
        })
    }
}

/// Swap parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Router contract the transaction is addressed to.
    pub router: String,

    /// Call convention the router speaks.
    pub convention: CallConvention,

    /// Trade direction.
    pub direction: SwapDirection,

    /// Exact-input or exact-output.
    pub mode: SwapMode,

    /// Swap amount magnitude in wei, as a decimal string.
    pub amount: String,

    /// Optional sqrt price bound (uint160), decimal string.
    pub limit_price: Option<String>,

    /// Native value to attach, decimal wei string.
    pub value: String,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            router: Address::ZERO.to_string(),
            convention: CallConvention::Direct,
            direction: SwapDirection::ZeroForOne,
            mode: SwapMode::ExactInput,
            amount: "0".to_string(),
            limit_price: None,
            value: "0".to_string(),
        }
    }
}

impl SwapConfig {
    /// Parse the router address.
    pub fn router_address(&self) -> Result<Address, ValidationError> {
        parse_address("swap.router", &self.router)
    }

    /// Build the typed intent from the raw strings.
    pub fn to_intent(&self) -> Result<SwapIntent, ValidationError> {
        let amount = parse_u256("swap.amount", &self.amount)?;
        let limit_price = self
            .limit_price
            .as_deref()
            .map(|raw| parse_u256("swap.limit_price", raw))
            .transpose()?;

        Ok(SwapIntent {
            direction: self.direction,
            mode: self.mode,
            amount,
            limit_price,
        })
    }

    /// Parse the attached native value.
    pub fn value_wei(&self) -> Result<U256, ValidationError> {
        parse_u256("swap.value", &self.value)
    }
}

fn parse_address(field: &'static str, raw: &str) -> Result<Address, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::new(field, format!("not a valid address: '{}'", raw)))
}

fn parse_u256(field: &'static str, raw: &str) -> Result<U256, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::new(field, format!("not a decimal value: '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransactorConfig::default();
        assert_eq!(config.environment, "development");
        assert_eq!(config.chain.chain_id, 31337);
        assert_eq!(config.chain.receipt_timeout_secs, 300);
        assert_eq!(config.attester.timeout_secs, 10);
        assert!(!config.attester.use_sdk);
        assert_eq!(config.swap.convention, CallConvention::Direct);
    }

    #[test]
    fn test_partial_toml_fills_from_defaults() {
        let raw = r#"
            environment = "staging"

            [attester]
            url = "http://localhost:9000/task"
            api_key = "k"

            [swap]
            amount = "250000000000000000"
            convention = "batch"
            mode = "exact-out"
        "#;
        let config: TransactorConfig = toml::from_str(raw).unwrap();

        assert_eq!(config.environment, "staging");
        assert_eq!(config.attester.url, "http://localhost:9000/task");
        // Untouched fields and whole sections keep their defaults.
        assert_eq!(config.attester.timeout_secs, 10);
        assert_eq!(config.chain.rpc_url, "http://localhost:8545");
        assert_eq!(config.swap.convention, CallConvention::ActionBatch);
        assert_eq!(config.swap.mode, SwapMode::ExactOutput);
        assert_eq!(config.swap.value, "0");
    }

    #[test]
    fn test_pool_key_conversion() {
        let pool = PoolConfig {
            currency0: "0x0101010101010101010101010101010101010101".to_string(),
            currency1: "0x0202020202020202020202020202020202020202".to_string(),
            fee: 3000,
            tick_spacing: 60,
            hooks: "0xcccccccccccccccccccccccccccccccccccccccc".to_string(),
        };
        let key = pool.to_pool_key().unwrap();
        assert_eq!(key.fee, 3000);
        assert_eq!(key.currency0, Address::repeat_byte(0x01));

        let bad = PoolConfig {
            hooks: "nope".to_string(),
            ..pool
        };
        let err = bad.to_pool_key().unwrap_err();
        assert_eq!(err.field, "pool.hooks");
    }

    #[test]
    fn test_intent_conversion() {
        let swap = SwapConfig {
            amount: "1000000000000000000".to_string(),
            limit_price: Some("4295128740".to_string()),
            ..SwapConfig::default()
        };
        let intent = swap.to_intent().unwrap();
        assert_eq!(intent.amount, U256::from(10).pow(U256::from(18)));
        assert_eq!(intent.limit_price, Some(U256::from(4295128740u64)));

        let bad = SwapConfig {
            amount: "1.5".to_string(),
            ..SwapConfig::default()
        };
        assert!(bad.to_intent().is_err());
    }
}
