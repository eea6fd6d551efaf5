//! API
//!
//! HTTP access to the records endpoint.

pub mod client;

pub use client::*;
