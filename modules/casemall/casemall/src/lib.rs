//! Casemall module
//!
//! Storefront backend for phone accessories: catalog administration,
//! per-user carts and pending orders with stock accounting.
//!
//! ## Public API
//!
//! The transport-agnostic API lives in the `casemall-sdk` crate and is
//! re-exported here. In-process consumers obtain a client with
//! [`CasemallModule::client`]; HTTP consumers use [`CasemallModule::router`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use casemall_sdk::{CasemallClientV1, CasemallError};

// === MODULE DEFINITION ===
pub mod module;
pub use module::CasemallModule;

// === LOCAL CLIENT ===
pub mod local_client;

pub mod config;
pub use config::CasemallConfig;

// === INTERNAL MODULES ===
// Exposed for tests; use the SDK types for stable APIs.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use infra::images::FsImageStore;
pub use infra::storage::migrations::Migrator;

#[cfg(test)]
pub(crate) mod test_support;
