//! Tracing configuration for debugging selector construction.
//!
//! Supports three output formats controlled by `WYIL_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, one level per
//!   compared pair of types
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Follow the recursion of one query as a tree
//! WYIL_LOG=trace WYIL_LOG_FORMAT=tree my-tool
//!
//! # JSON (for tooling or sharing full traces)
//! WYIL_LOG=trace WYIL_LOG_FORMAT=json my-tool
//!
//! # Only the selector engine
//! WYIL_LOG="wyil_solver=trace" my-tool
//! ```
//!
//! The subscriber is only initialised when `WYIL_LOG` (or `RUST_LOG`) is set,
//! so there is zero overhead in normal builds.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to [`LogFormat::Text`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read the `WYIL_LOG_FORMAT` environment variable.
    fn from_env() -> Self {
        Self::parse(&std::env::var("WYIL_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `WYIL_LOG`, falling back to `RUST_LOG`.
///
/// `WYIL_LOG` takes precedence when both are set. Values use the same
/// syntax as `RUST_LOG` (e.g. `debug`, `wyil_solver=trace`).
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("WYIL_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `WYIL_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr.
pub fn init_tracing() {
    let has_wyil_log = std::env::var("WYIL_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_wyil_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    let format = LogFormat::from_env();

    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
