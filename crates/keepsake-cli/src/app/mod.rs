//! Application-level utilities for the Keepsake CLI.
//!
//! This module provides:
//! - Config path resolution and loading
//! - The per-run session that owns the attempt limiter
//! - Passkey retry logic for retrieval

mod context;
mod resolver;
mod session;

// Re-export public API
pub use context::AppContext;
pub use resolver::resolve_config_path;
pub use session::retrieve_with_retry;
