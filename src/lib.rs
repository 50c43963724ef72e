//! Scripts for compiling and deploying the PixShare smart contracts.
//!
//! The pipeline runs in four stages: compile a contract to an ABI &
//! bytecode artifact, deploy the logic contract, encode its `initialize`
//! calldata, and deploy an ERC1967 proxy pointed at the logic contract
//! with that calldata baked into its construction. Stages persist their
//! outputs under `artifacts/` (and deployed addresses in the deployments
//! file), so any stage can be re-run on its own.
//!
//! Concurrent invocations against the same artifact names are not
//! serialized here; callers must not run two pipelines over the same
//! contract at once.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
mod commands;
pub mod compiler;
pub mod constants;
pub mod deploy;
pub mod deployments;
pub mod encoder;
pub mod errors;
pub mod resolver;
pub mod types;
