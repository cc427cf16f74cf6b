//! Canonical call-data encoding subsystem.
//!
//! # Responsibilities
//! - Deterministic head/tail tuple encoding over 32-byte words
//! - Structural decoding with bounds checks on every offset and length
//! - 4-byte function selectors from canonical signature strings
//!
//! # Design Decisions
//! - Layouts follow the deployed contract ABI exactly: fixed-width
//!   scalars and addresses are inline words, byte strings and arrays are
//!   offset-addressed tails, and a tuple is dynamic iff any field is
//! - Composite payloads are encoded in one pass over the full outer
//!   shape; callers never concatenate independently encoded fragments
//! - Encode validates declared bit widths; decode checks structure only

pub mod decode;
pub mod encode;
pub mod selector;
pub mod types;

pub use decode::decode;
pub use encode::encode;
pub use selector::selector;
pub use types::{AbiType, AbiValue, CodecError, CodecResult};
