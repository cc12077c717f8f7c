//! Mini Shop Core - Shared types library.
//!
//! This crate provides common types used across all Mini Shop components:
//! - `storefront` - Catalog & cart store, page widgets, and the HTTP adapter
//! - `cli` - Command-line adapter over a directory-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, products, and sort keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
