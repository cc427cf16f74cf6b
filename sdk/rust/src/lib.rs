//! Client SDK for the swap attestation service.
//!
//! Thin HTTP wrapper for integrators that want to query the attestation
//! endpoint without pulling the full transactor crate.

pub mod client;

pub use client::{AttesterClient, VerifyRequest, VerifyResponse};
