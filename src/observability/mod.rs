//! Observability utilities for the NZBN MCP server.
//!
//! Two independent pieces:
//!
//! - [`init_tracing`] installs a `tracing` subscriber writing to stderr.
//! - [`Logger`] appends a markdown transcript of tool calls to a file.
//!
//! # Example
//!
//! ```no_run
//! use nzbn_mcp::observability::{init_tracing, Logger};
//! use std::collections::HashMap;
//! use std::path::Path;
//!
//! init_tracing("info", false).unwrap();
//!
//! let logger = Logger::new(Path::new("nzbn-mcp-transcript.md")).unwrap();
//! logger.log_session_start("nzbn_mcp", &HashMap::new()).unwrap();
//! logger.log_completion("done").unwrap();
//! ```

/// Markdown session transcript
pub mod logger;
/// `tracing` subscriber setup
pub mod subscriber;

// Re-export main types for convenience
pub use logger::Logger;
pub use subscriber::{env_filter, init_tracing};
