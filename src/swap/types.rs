//! Pool identity and swap intent model.

use alloy::primitives::{Address, Bytes, I256, Sign, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest usable sqrt price (TickMath minimum).
pub const MIN_SQRT_PRICE: U256 = U256::from_limbs([0x1_0002_76a3, 0, 0, 0]);

/// Highest usable sqrt price (TickMath maximum).
pub const MAX_SQRT_PRICE: U256 =
    U256::from_limbs([0x5d95_1d52_6398_8d26, 0xefd1_fc6a_5064_8849, 0xfffd_8963, 0]);

/// Identity of a pool: its currency pair, fee tier, tick spacing, and
/// attached hook contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolKey {
    pub currency0: Address,
    pub currency1: Address,
    /// Fee tier in hundredths of a bip (uint24 on chain).
    pub fee: u32,
    /// Tick spacing (int24 on chain).
    pub tick_spacing: i32,
    pub hooks: Address,
}

impl PoolKey {
    /// Currency paid into the pool for the given direction.
    pub fn input_currency(&self, direction: SwapDirection) -> Address {
        match direction {
            SwapDirection::ZeroForOne => self.currency0,
            SwapDirection::OneForZero => self.currency1,
        }
    }

    /// Currency received from the pool for the given direction.
    pub fn output_currency(&self, direction: SwapDirection) -> Address {
        match direction {
            SwapDirection::ZeroForOne => self.currency1,
            SwapDirection::OneForZero => self.currency0,
        }
    }
}

/// Which side of the pair is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwapDirection {
    ZeroForOne,
    OneForZero,
}

impl SwapDirection {
    pub fn is_zero_for_one(self) -> bool {
        matches!(self, SwapDirection::ZeroForOne)
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::ZeroForOne => write!(f, "zero-for-one"),
            SwapDirection::OneForZero => write!(f, "one-for-zero"),
        }
    }
}

impl FromStr for SwapDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero-for-one" => Ok(SwapDirection::ZeroForOne),
            "one-for-zero" => Ok(SwapDirection::OneForZero),
            other => Err(format!(
                "unknown direction '{}', expected zero-for-one or one-for-zero",
                other
            )),
        }
    }
}

/// Whether the fixed amount is the input or the output side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwapMode {
    #[serde(alias = "exact-in")]
    ExactInput,
    #[serde(alias = "exact-out")]
    ExactOutput,
}

impl fmt::Display for SwapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapMode::ExactInput => write!(f, "exact-input"),
            SwapMode::ExactOutput => write!(f, "exact-output"),
        }
    }
}

impl FromStr for SwapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact-input" | "exact-in" => Ok(SwapMode::ExactInput),
            "exact-output" | "exact-out" => Ok(SwapMode::ExactOutput),
            other => Err(format!(
                "unknown mode '{}', expected exact-in or exact-out",
                other
            )),
        }
    }
}

/// How the router expects the swap call to be shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallConvention {
    /// Single `swap(key, params, hookData)` call on the router.
    Direct,
    /// Opcode-driven `execute(actions, params)` batch call.
    #[serde(alias = "batch")]
    ActionBatch,
}

impl fmt::Display for CallConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallConvention::Direct => write!(f, "direct"),
            CallConvention::ActionBatch => write!(f, "action-batch"),
        }
    }
}

impl FromStr for CallConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(CallConvention::Direct),
            "action-batch" | "batch" => Ok(CallConvention::ActionBatch),
            other => Err(format!(
                "unknown call convention '{}', expected direct or action-batch",
                other
            )),
        }
    }
}

/// One proposed swap. Immutable for the life of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapIntent {
    pub direction: SwapDirection,
    pub mode: SwapMode,
    /// Magnitude of the fixed side, in the currency's smallest unit.
    pub amount: U256,
    /// Optional sqrt price bound (uint160 on chain). When absent, the
    /// widest usable bound for the direction is used.
    pub limit_price: Option<U256>,
}

impl SwapIntent {
    /// Signed amount as the pool manager expects it: negative for exact
    /// input, positive for exact output.
    ///
    /// `None` when the magnitude exceeds the signed 256-bit range.
    pub fn amount_specified(&self) -> Option<I256> {
        let sign = match self.mode {
            SwapMode::ExactInput => Sign::Negative,
            SwapMode::ExactOutput => Sign::Positive,
        };
        I256::checked_from_sign_and_abs(sign, self.amount)
    }

    /// The price bound to encode: the caller's, or the widest usable
    /// bound one step inside the tick range for this direction.
    pub fn limit_or_default(&self) -> U256 {
        self.limit_price.unwrap_or(match self.direction {
            SwapDirection::ZeroForOne => MIN_SQRT_PRICE.saturating_add(U256::ONE),
            SwapDirection::OneForZero => MAX_SQRT_PRICE.saturating_sub(U256::ONE),
        })
    }
}

/// A fully built swap ready for signing and broadcast.
#[derive(Debug, Clone)]
pub struct PreparedSwap {
    /// Router contract to call.
    pub to: Address,
    /// Selector-prefixed call data.
    pub calldata: Bytes,
    /// Native value the call carries.
    pub value: U256,
}
