//! Core types and trait definitions for Greens account authentication.
//!
//! Two unrelated account collections, people and organizations, share one
//! login surface. This crate resolves credentials, remember tokens and ids
//! into a single [`identity::Identity`] and gates operations on its role.
//!
//! This crate is deliberately free of HTTP and database dependencies.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod credentials;
pub mod error;
pub mod gate;
pub mod identity;
pub mod provider;
pub mod store;
pub mod token;
pub mod validator;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
