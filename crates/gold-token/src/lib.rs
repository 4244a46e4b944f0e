//! gold-token: Typed client for the Gold Token contracts
//!
//! Bindings are generated from the contract ABIs at compile time, so every
//! call site is argument-checked by the compiler instead of going through a
//! name-indexed ABI lookup.

pub mod bindings;
pub mod client;
pub mod deployments;

pub use bindings::{GoldPriceOracle, GoldToken};
pub use client::GoldClient;
pub use deployments::Deployment;
