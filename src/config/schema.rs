//! Config schema and deserialization

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Workspace prefix that OSS-Fuzz coverage builds record in front of every file
pub const DEFAULT_STRIP_PREFIX: &str = "/workspace/out/libfuzzer-coverage-x86_64/src";
pub const DEFAULT_OUTPUT: &str = "output.html";
pub const DEFAULT_DOWNLOAD_PATH: &str = "input.html";
pub const DEFAULT_SCRATCH_DIR: &str = "files";
pub const DEFAULT_TITLE: &str = "Go Coverage Report";

/// Where extracted files live between extraction and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Staging {
    /// Build the tree directly in memory (default)
    #[default]
    Memory,
    /// Write a scratch mirror to disk and read it back
    Disk,
}

/// Root config structure for .gocovtreerc.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Prefix removed from every recorded file path
    pub strip_prefix: String,

    /// Fail instead of keeping paths that do not contain the prefix
    pub require_prefix: bool,

    /// Output HTML path when none is given on the command line
    pub output: PathBuf,

    /// Where a report fetched from a URL is saved
    pub download_path: PathBuf,

    /// Page title
    pub title: String,

    /// Show per-file coverage percentages in the sidebar
    pub show_coverage: bool,

    pub staging: Staging,

    /// Scratch mirror root for disk staging
    pub scratch_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strip_prefix: DEFAULT_STRIP_PREFIX.to_string(),
            require_prefix: false,
            output: PathBuf::from(DEFAULT_OUTPUT),
            download_path: PathBuf::from(DEFAULT_DOWNLOAD_PATH),
            title: DEFAULT_TITLE.to_string(),
            show_coverage: true,
            staging: Staging::Memory,
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
        }
    }
}

/// Values given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub strip_prefix: Option<String>,
    pub require_prefix: bool,
    pub output: Option<PathBuf>,
    pub download_path: Option<PathBuf>,
    pub title: Option<String>,
    pub no_coverage: bool,
    pub stage_on_disk: bool,
    pub scratch_dir: Option<PathBuf>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(prefix) = cli.strip_prefix {
            self.strip_prefix = prefix;
        }
        if cli.require_prefix {
            self.require_prefix = true;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        if let Some(path) = cli.download_path {
            self.download_path = path;
        }
        if let Some(title) = cli.title {
            self.title = title;
        }
        if cli.no_coverage {
            self.show_coverage = false;
        }
        // Naming a scratch dir implies staging through it
        if cli.stage_on_disk || cli.scratch_dir.is_some() {
            self.staging = Staging::Disk;
        }
        if let Some(dir) = cli.scratch_dir {
            self.scratch_dir = dir;
        }
        self
    }
}
