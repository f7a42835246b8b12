//! Utility functions shared across the application.
//!
//! - [`key_generator`] - Redirect key derivation and branded-name validation
//! - [`url_validator`] - Target URL validation
//! - [`rate_limiter`] - Fixed-window per-client request counting
//! - [`qr`] - QR code rendering

pub mod key_generator;
pub mod qr;
pub mod rate_limiter;
pub mod url_validator;
