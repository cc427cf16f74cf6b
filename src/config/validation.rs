//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (uint24/int24 widths, timeouts > 0)
//! - Check cross-field rules (distinct currencies, convention widths)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: TransactorConfig → Result<(), Vec<ValidationError>>
//! - Runs before the pipeline is allowed to start

use alloy::primitives::{Address, U256};

use crate::config::schema::TransactorConfig;
use crate::swap::CallConvention;

/// A single semantic violation, tied to the field that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a full configuration.
pub fn validate_config(config: &TransactorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // [attester]
    if config.attester.url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::new(
            "attester.url",
            format!("not a valid URL: '{}'", config.attester.url),
        ));
    }
    if config.attester.api_key.is_empty() {
        errors.push(ValidationError::new("attester.api_key", "must not be empty"));
    }
    if config.attester.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "attester.timeout_secs",
            "must be positive",
        ));
    }

    // [chain]
    if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::new(
            "chain.rpc_url",
            format!("not a valid URL: '{}'", config.chain.rpc_url),
        ));
    }
    for (i, raw) in config.chain.failover_urls.iter().enumerate() {
        if raw.parse::<url::Url>().is_err() {
            errors.push(ValidationError::new(
                format!("chain.failover_urls[{}]", i),
                format!("not a valid URL: '{}'", raw),
            ));
        }
    }
    if config.chain.chain_id == 0 {
        errors.push(ValidationError::new("chain.chain_id", "must not be zero"));
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "chain.rpc_timeout_secs",
            "must be positive",
        ));
    }
    if config.chain.gas_limit < 21_000 {
        errors.push(ValidationError::new(
            "chain.gas_limit",
            "below the 21000 intrinsic transaction cost",
        ));
    }
    if !(config.chain.gas_price_multiplier > 0.0) {
        errors.push(ValidationError::new(
            "chain.gas_price_multiplier",
            "must be positive",
        ));
    }
    if config.chain.receipt_poll_secs == 0 {
        errors.push(ValidationError::new(
            "chain.receipt_poll_secs",
            "must be positive",
        ));
    }

    // [pool]
    let currency0 = check_address(&mut errors, "pool.currency0", &config.pool.currency0);
    let currency1 = check_address(&mut errors, "pool.currency1", &config.pool.currency1);
    if let (Some(c0), Some(c1)) = (currency0, currency1) {
        if c0 == c1 {
            errors.push(ValidationError::new(
                "pool.currency1",
                "must differ from pool.currency0",
            ));
        }
    }
    if let Some(hooks) = check_address(&mut errors, "pool.hooks", &config.pool.hooks) {
        // An ungated pool has nothing to attest.
        if hooks == Address::ZERO {
            errors.push(ValidationError::new(
                "pool.hooks",
                "must not be the zero address",
            ));
        }
    }
    if config.pool.fee >= 1 << 24 {
        errors.push(ValidationError::new("pool.fee", "does not fit uint24"));
    }
    const TICK_BOUND: i32 = 1 << 23;
    if config.pool.tick_spacing == 0 {
        errors.push(ValidationError::new("pool.tick_spacing", "must not be zero"));
    } else if config.pool.tick_spacing < -TICK_BOUND || config.pool.tick_spacing >= TICK_BOUND {
        errors.push(ValidationError::new(
            "pool.tick_spacing",
            "does not fit int24",
        ));
    }

    // [swap]
    if let Some(router) = check_address(&mut errors, "swap.router", &config.swap.router) {
        if router == Address::ZERO {
            errors.push(ValidationError::new(
                "swap.router",
                "must not be the zero address",
            ));
        }
    }
    match config.swap.amount.parse::<U256>() {
        Err(_) => errors.push(ValidationError::new(
            "swap.amount",
            format!("not a decimal amount: '{}'", config.swap.amount),
        )),
        Ok(amount) => {
            if amount.is_zero() {
                errors.push(ValidationError::new("swap.amount", "must be positive"));
            } else if amount.bit_len() > 255 {
                errors.push(ValidationError::new(
                    "swap.amount",
                    "too large to sign as int256",
                ));
            } else if config.swap.convention == CallConvention::ActionBatch
                && amount.bit_len() > 128
            {
                errors.push(ValidationError::new(
                    "swap.amount",
                    "does not fit uint128 required by the batch convention",
                ));
            }
        }
    }
    if let Some(raw) = &config.swap.limit_price {
        match raw.parse::<U256>() {
            Err(_) => errors.push(ValidationError::new(
                "swap.limit_price",
                format!("not a decimal price: '{}'", raw),
            )),
            Ok(price) => {
                if price.is_zero() {
                    errors.push(ValidationError::new("swap.limit_price", "must be positive"));
                } else if price.bit_len() > 160 {
                    errors.push(ValidationError::new(
                        "swap.limit_price",
                        "does not fit uint160",
                    ));
                }
            }
        }
    }
    if config.swap.value.parse::<U256>().is_err() {
        errors.push(ValidationError::new(
            "swap.value",
            format!("not a decimal wei amount: '{}'", config.swap.value),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    raw: &str,
) -> Option<Address> {
    match raw.parse::<Address>() {
        Ok(address) => Some(address),
        Err(_) => {
            errors.push(ValidationError::new(
                field,
                format!("not a valid address: '{}'", raw),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> TransactorConfig {
        let mut config = TransactorConfig::default();
        config.attester.api_key = "test-key".to_string();
        config.pool.currency0 = "0x0101010101010101010101010101010101010101".to_string();
        config.pool.currency1 = "0x0202020202020202020202020202020202020202".to_string();
        config.pool.hooks = "0xcccccccccccccccccccccccccccccccccccccccc".to_string();
        config.swap.router = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee".to_string();
        config.swap.amount = "1000000000000000000".to_string();
        config
    }

    fn fields_of(errors: Vec<ValidationError>) -> Vec<String> {
        errors.into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_defaults_name_every_gap() {
        // The shipped defaults deliberately force configuration of the
        // key, contracts, and amount.
        let errors = validate_config(&TransactorConfig::default()).unwrap_err();
        let fields = fields_of(errors);
        assert!(fields.contains(&"attester.api_key".to_string()));
        assert!(fields.contains(&"pool.hooks".to_string()));
        assert!(fields.contains(&"swap.router".to_string()));
        assert!(fields.contains(&"swap.amount".to_string()));
    }

    #[test]
    fn test_fee_must_fit_uint24() {
        let mut config = valid_config();
        config.pool.fee = 1 << 24;
        let errors = validate_config(&config).unwrap_err();
        assert!(fields_of(errors).contains(&"pool.fee".to_string()));

        config.pool.fee = (1 << 24) - 1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_tick_spacing_bounds() {
        let mut config = valid_config();

        config.pool.tick_spacing = 0;
        assert!(validate_config(&config).is_err());

        config.pool.tick_spacing = 1 << 23;
        assert!(validate_config(&config).is_err());

        config.pool.tick_spacing = (1 << 23) - 1;
        assert!(validate_config(&config).is_ok());

        config.pool.tick_spacing = -(1 << 23);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_identical_currencies_rejected() {
        let mut config = valid_config();
        config.pool.currency1 = config.pool.currency0.clone();
        let errors = validate_config(&config).unwrap_err();
        assert!(fields_of(errors).contains(&"pool.currency1".to_string()));
    }

    #[test]
    fn test_batch_amount_must_fit_uint128() {
        let mut config = valid_config();
        // 2^128 exceeds the batch router's uint128 amount field.
        config.swap.amount = "340282366920938463463374607431768211456".to_string();

        config.swap.convention = CallConvention::Direct;
        assert!(validate_config(&config).is_ok());

        config.swap.convention = CallConvention::ActionBatch;
        let errors = validate_config(&config).unwrap_err();
        assert!(fields_of(errors).contains(&"swap.amount".to_string()));
    }

    #[test]
    fn test_limit_price_must_fit_uint160() {
        let mut config = valid_config();
        // 2^160 is one past the largest sqrt price bound.
        config.swap.limit_price =
            Some("1461501637330902918203684832716283019655932542976".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(fields_of(errors).contains(&"swap.limit_price".to_string()));
    }

    #[test]
    fn test_bad_urls_and_amounts_reported_together() {
        let mut config = valid_config();
        config.attester.url = "not a url".to_string();
        config.chain.rpc_url = "also bad".to_string();
        config.swap.amount = "ten".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields = fields_of(errors);
        assert!(fields.contains(&"attester.url".to_string()));
        assert!(fields.contains(&"chain.rpc_url".to_string()));
        assert!(fields.contains(&"swap.amount".to_string()));
    }
}
