//! Swap domain model and call construction.
//!
//! # Responsibilities
//! - Pool and intent types shared across the pipeline
//! - Action opcodes and plans for the batch router convention
//! - The attestation-gated builder that turns an intent into ready
//!   call data
//!
//! # Design Decisions
//! - Amount signing is derived from the mode, never supplied by callers
//! - Price bounds default to the widest usable value for the direction
//! - One builder instance serves one pool/router pair

pub mod actions;
pub mod builder;
pub mod types;

pub use actions::ActionPlan;
pub use builder::SwapBuilder;
pub use types::{
    CallConvention, PoolKey, PreparedSwap, SwapDirection, SwapIntent, SwapMode, MAX_SQRT_PRICE,
    MIN_SQRT_PRICE,
};
