//! Dashboard integration tests.

mod filter;
mod mutations;

#[cfg(feature = "http")]
mod http;
