//! Mini Shop storefront library.
//!
//! The catalog and cart store ([`shop::Shop`]) plus the small companion
//! widgets (contact form, to-do list, quiz, joke fetcher), and the axum
//! adapter that exposes them over HTTP. Kept as a library so the CLI and the
//! integration tests can drive the same code.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod blob;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod middleware;
pub mod quiz;
pub mod routes;
pub mod services;
pub mod shop;
pub mod state;
pub mod todo;
