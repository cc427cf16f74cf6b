//! Action plans for the batched router convention.
//!
//! The batch router consumes an opcode string plus one encoded parameter
//! blob per opcode, paired positionally. [`ActionPlan`] owns that pairing
//! so the two lists cannot drift apart.

use crate::codec::AbiValue;

/// Router action opcodes (periphery planner constants).
pub const SWAP_EXACT_IN_SINGLE: u8 = 0x06;
pub const SWAP_EXACT_OUT_SINGLE: u8 = 0x08;
pub const SETTLE_ALL: u8 = 0x0c;
pub const TAKE_ALL: u8 = 0x0f;

/// An ordered list of router actions with their parameter blobs.
#[derive(Debug, Default)]
pub struct ActionPlan {
    opcodes: Vec<u8>,
    params: Vec<Vec<u8>>,
}

impl ActionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one action and its encoded parameters.
    pub fn push(&mut self, opcode: u8, params: Vec<u8>) {
        self.opcodes.push(opcode);
        self.params.push(params);
    }

    /// Number of actions (always equal to the number of parameter blobs).
    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }

    pub fn opcodes(&self) -> &[u8] {
        &self.opcodes
    }

    /// The plan as router arguments: the opcode byte string and the
    /// parameter blob array.
    pub fn into_abi_values(self) -> (AbiValue, AbiValue) {
        (
            AbiValue::Bytes(self.opcodes),
            AbiValue::Array(self.params.into_iter().map(AbiValue::Bytes).collect()),
        )
    }
}
