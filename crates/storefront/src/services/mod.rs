//! External services used by the storefront.
//!
//! # Services
//!
//! - `joke` - Best-effort joke fetch with a fixed fallback

pub mod joke;

pub use joke::{DEFAULT_JOKE_API_URL, FALLBACK_JOKE, JokeClient, JokeError};
