//! GTIN lookup proxy.
//!
//! One endpoint, `POST /api/scan-gtin`, forwards the posted GTIN to the
//! configured product-data API and hands its JSON back unchanged. The API
//! key stays on the server.

#![deny(unsafe_code)]

mod client;
mod config;
mod error;
mod server;

pub use client::ScanClient;
pub use config::{API_KEY_ENV, API_URL_ENV, DEFAULT_BIND, DEFAULT_TIMEOUT_SECS, ProxyConfig};
pub use error::{ProxyError, Result};
pub use server::{SCAN_PATH, router, serve};
