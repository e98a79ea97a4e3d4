//! Utility modules.

/// Serde helpers for Cloudflare's RFC3339 timestamp fields.
pub mod datetime;

/// Log sanitization utilities to keep response bodies out of logs.
pub mod log_sanitizer;
