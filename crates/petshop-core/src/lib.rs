//! Core types and trait definitions for the pet store inventory.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; storage backends implement
//! [`store::PetStore`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod currency;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod listing;
pub mod paths;
pub mod pet;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
