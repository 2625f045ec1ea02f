//! Core types and services for the daily-diet tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! is reached only through the [`store::RecordStore`] trait; the session gate,
//! the meal repository and the metrics engine are written against it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod meal;
pub mod metrics;
pub mod repository;
pub mod session;
pub mod store;
pub mod user;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
