//! Swap construction pipeline.
//!
//! # Data Flow
//! ```text
//! SwapIntent + PoolKey
//!     → precheck_payload (hook pre-check payload)
//!     → attestation service (verdict)
//!     → hook_data (approval embedded per convention)
//!     → router_calldata (selector + arguments)
//!     → PreparedSwap {to, calldata, value}
//! ```
//!
//! # Design Decisions
//! - Strictly linear: the first failure propagates unchanged, nothing is
//!   retried, and no stage substitutes defaults for a failed predecessor
//! - Every attestation is used for exactly one submission attempt
//! - Expiry is not checked against chain height here; a stale approval
//!   surfaces as the hook's on-chain revert

use alloy::primitives::{hex, Address, Bytes, I256, U256};

use crate::attestation::{Attestation, AttestationClient, AttestationRequest, ComplianceVerdict};
use crate::codec::{encode, selector, AbiValue, CodecError, CodecResult};
use crate::error::{TransactorError, TransactorResult};
use crate::swap::actions::{
    ActionPlan, SETTLE_ALL, SWAP_EXACT_IN_SINGLE, SWAP_EXACT_OUT_SINGLE, TAKE_ALL,
};
use crate::swap::types::{CallConvention, PoolKey, PreparedSwap, SwapIntent, SwapMode};

/// Hook pre-check signature for the direct convention.
const BEFORE_SWAP_SIG_DIRECT: &str =
    "_beforeSwap(address,address,address,uint24,int24,address,bool,int256,uint160)";

/// Hook pre-check signature for the batch convention (no price bound).
const BEFORE_SWAP_SIG_BATCH: &str =
    "_beforeSwap(address,address,address,uint24,int24,address,bool,int256)";

/// Direct router entry point.
const ROUTER_SWAP_SIG: &str =
    "swap((address,address,uint24,int24,address),(bool,int256,uint160),bytes)";

/// Batch router entry point.
const ROUTER_EXECUTE_SIG: &str = "execute(bytes,bytes[])";

/// Builds attestation-gated swap calls for one pool and router.
#[derive(Debug, Clone)]
pub struct SwapBuilder {
    pool: PoolKey,
    router: Address,
    convention: CallConvention,
}

impl SwapBuilder {
    pub fn new(pool: PoolKey, router: Address, convention: CallConvention) -> Self {
        Self {
            pool,
            router,
            convention,
        }
    }

    pub fn convention(&self) -> CallConvention {
        self.convention
    }

    /// Run the full pipeline: pre-check, attest, embed, assemble.
    pub async fn build<C: AttestationClient>(
        &self,
        attester: &C,
        caller: Address,
        intent: &SwapIntent,
        value: U256,
    ) -> TransactorResult<PreparedSwap> {
        let request = self.attestation_request(caller, intent, value)?;
        tracing::info!(
            hook = %request.to,
            from = %request.from,
            data_len = request.data.len(),
            "Requesting compliance attestation"
        );

        let attestation = match attester.request(&request).await? {
            ComplianceVerdict::Granted(attestation) => attestation,
            ComplianceVerdict::Denied { task_id } => {
                tracing::warn!(task_id = %task_id, "Swap rejected by attestation service");
                let reason = if task_id.is_empty() {
                    "attestation service rejected the swap".to_string()
                } else {
                    format!("attestation service rejected the swap (task {})", task_id)
                };
                return Err(TransactorError::ComplianceDenied(reason));
            }
        };

        tracing::info!(
            task_id = %attestation.task_id,
            signers = attestation.signers.len(),
            expiry_block = %attestation.expiry_block,
            "Attestation granted"
        );

        let hook_data = self.hook_data(&attestation, caller, value)?;
        let calldata = self.router_calldata(intent, &hook_data)?;

        Ok(PreparedSwap {
            to: self.router,
            calldata: Bytes::from(calldata),
            value,
        })
    }

    /// Selector-prefixed `_beforeSwap` payload the attestation service
    /// evaluates. The direct convention carries the price bound; the
    /// batch convention omits it.
    pub fn precheck_payload(
        &self,
        caller: Address,
        intent: &SwapIntent,
    ) -> CodecResult<Vec<u8>> {
        let amount = intent
            .amount_specified()
            .ok_or(CodecError::ValueOutOfRange { kind: "int", bits: 256 })?;

        let mut args = vec![
            AbiValue::Address(caller),
            AbiValue::Address(self.pool.currency0),
            AbiValue::Address(self.pool.currency1),
            AbiValue::Uint(U256::from(self.pool.fee), 24),
            AbiValue::Int(self.tick_spacing_value()?, 24),
            AbiValue::Address(self.pool.hooks),
            AbiValue::Bool(intent.direction.is_zero_for_one()),
            AbiValue::Int(amount, 256),
        ];
        let signature = match self.convention {
            CallConvention::Direct => {
                args.push(AbiValue::Uint(intent.limit_or_default(), 160));
                BEFORE_SWAP_SIG_DIRECT
            }
            CallConvention::ActionBatch => BEFORE_SWAP_SIG_BATCH,
        };

        let mut payload = selector(signature).to_vec();
        payload.extend(encode(&args)?);
        Ok(payload)
    }

    /// The wire request for the attestation service, addressed to the
    /// pool's hook contract.
    pub fn attestation_request(
        &self,
        caller: Address,
        intent: &SwapIntent,
        value: U256,
    ) -> CodecResult<AttestationRequest> {
        let payload = self.precheck_payload(caller, intent)?;
        Ok(AttestationRequest {
            to: self.pool.hooks.to_string(),
            from: caller.to_string(),
            data: format!("0x{}", hex::encode(&payload)),
            value: value.to_string(),
        })
    }

    /// Embed a granted attestation as hook data.
    ///
    /// Direct convention: `(approval, caller, value)`. Batch convention:
    /// the approval tuple alone. Either way the outer shape is encoded in
    /// a single pass.
    pub fn hook_data(
        &self,
        attestation: &Attestation,
        caller: Address,
        value: U256,
    ) -> TransactorResult<Bytes> {
        check_attestation(attestation)?;
        let approval = attestation.to_abi_value();
        let encoded = match self.convention {
            CallConvention::Direct => encode(&[
                approval,
                AbiValue::Address(caller),
                AbiValue::Uint(value, 256),
            ])?,
            CallConvention::ActionBatch => encode(&[approval])?,
        };
        Ok(Bytes::from(encoded))
    }

    /// Selector-prefixed router call data per convention.
    pub fn router_calldata(
        &self,
        intent: &SwapIntent,
        hook_data: &Bytes,
    ) -> TransactorResult<Vec<u8>> {
        match self.convention {
            CallConvention::Direct => {
                let amount = intent
                    .amount_specified()
                    .ok_or(CodecError::ValueOutOfRange { kind: "int", bits: 256 })?;
                let params = AbiValue::Tuple(vec![
                    AbiValue::Bool(intent.direction.is_zero_for_one()),
                    AbiValue::Int(amount, 256),
                    AbiValue::Uint(intent.limit_or_default(), 160),
                ]);

                let mut out = selector(ROUTER_SWAP_SIG).to_vec();
                out.extend(encode(&[
                    self.pool_key_value()?,
                    params,
                    AbiValue::Bytes(hook_data.to_vec()),
                ])?);
                Ok(out)
            }
            CallConvention::ActionBatch => {
                let plan = self.action_plan(intent, hook_data)?;
                let (opcodes, params) = plan.into_abi_values();

                let mut out = selector(ROUTER_EXECUTE_SIG).to_vec();
                out.extend(encode(&[opcodes, params])?);
                Ok(out)
            }
        }
    }

    /// Swap, settle, and take actions for one batched swap. Settle/take
    /// bounds are left open: full input settled, any output taken.
    fn action_plan(&self, intent: &SwapIntent, hook_data: &Bytes) -> TransactorResult<ActionPlan> {
        let input = self.pool.input_currency(intent.direction);
        let output = self.pool.output_currency(intent.direction);
        let zero_for_one = intent.direction.is_zero_for_one();
        let mut plan = ActionPlan::new();

        match intent.mode {
            SwapMode::ExactInput => {
                let swap_params = AbiValue::Tuple(vec![
                    self.pool_key_value()?,
                    AbiValue::Bool(zero_for_one),
                    AbiValue::Uint(intent.amount, 128),
                    AbiValue::Uint(U256::ZERO, 128),
                    AbiValue::Bytes(hook_data.to_vec()),
                ]);
                plan.push(SWAP_EXACT_IN_SINGLE, encode(&[swap_params])?);
                plan.push(
                    SETTLE_ALL,
                    encode(&[
                        AbiValue::Address(input),
                        AbiValue::Uint(intent.amount, 256),
                    ])?,
                );
                plan.push(
                    TAKE_ALL,
                    encode(&[AbiValue::Address(output), AbiValue::Uint(U256::ZERO, 256)])?,
                );
            }
            SwapMode::ExactOutput => {
                let max_in = U256::from(u128::MAX);
                let swap_params = AbiValue::Tuple(vec![
                    self.pool_key_value()?,
                    AbiValue::Bool(zero_for_one),
                    AbiValue::Uint(intent.amount, 128),
                    AbiValue::Uint(max_in, 128),
                    AbiValue::Bytes(hook_data.to_vec()),
                ]);
                plan.push(SWAP_EXACT_OUT_SINGLE, encode(&[swap_params])?);
                plan.push(
                    SETTLE_ALL,
                    encode(&[AbiValue::Address(input), AbiValue::Uint(max_in, 256)])?,
                );
                plan.push(
                    TAKE_ALL,
                    encode(&[
                        AbiValue::Address(output),
                        AbiValue::Uint(intent.amount, 256),
                    ])?,
                );
            }
        }

        Ok(plan)
    }

    fn pool_key_value(&self) -> CodecResult<AbiValue> {
        Ok(AbiValue::Tuple(vec![
            AbiValue::Address(self.pool.currency0),
            AbiValue::Address(self.pool.currency1),
            AbiValue::Uint(U256::from(self.pool.fee), 24),
            AbiValue::Int(self.tick_spacing_value()?, 24),
            AbiValue::Address(self.pool.hooks),
        ]))
    }

    fn tick_spacing_value(&self) -> CodecResult<I256> {
        I256::try_from(i64::from(self.pool.tick_spacing))
            .map_err(|_| CodecError::ValueOutOfRange { kind: "int", bits: 24 })
    }
}

/// An approval that cannot be embedded is a denial, not an encoding bug.
fn check_attestation(attestation: &Attestation) -> TransactorResult<()> {
    if attestation.signers.is_empty() || attestation.signatures.is_empty() {
        return Err(TransactorError::ComplianceDenied(
            "attestation carries no signatures".to_string(),
        ));
    }
    if attestation.signers.len() != attestation.signatures.len() {
        return Err(TransactorError::ComplianceDenied(format!(
            "attestation signer/signature counts differ: {} vs {}",
            attestation.signers.len(),
            attestation.signatures.len()
        )));
    }
    Ok(())
}
