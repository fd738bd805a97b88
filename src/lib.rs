//! gocov-tree: Go coverage report viewer
//!
//! Turns the single-page HTML produced by `go tool cover -html` into a
//! self-contained page with a collapsible file tree and a source pane.

pub mod config;
pub mod error;
pub mod extract;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod staging;
pub mod tree;

pub use config::Config;
pub use error::{BeautifyError, TreeError};
pub use extract::{CoverageReport, SourceFile};
pub use pipeline::{run, RunSummary};
pub use tree::FileTree;
