//! Extraction of per-file sources from a Go coverage HTML report
//!
//! `go tool cover -html` emits a `<select>` of `<option value="fileN">path (NN.N%)</option>`
//! entries and, for each, a `<pre id="fileN">` holding the highlighted source.

use crate::error::BeautifyError;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::OnceLock;

/// One covered source file recovered from the report
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Selector value linking the option to its `<pre>` block
    pub id: String,
    /// Path as recorded in the report, without the coverage suffix
    pub recorded_path: String,
    /// Logical path after prefix stripping, split on `/`
    pub segments: Vec<String>,
    /// Statement coverage percentage, when the option text carries one
    pub coverage: Option<f64>,
    /// Inner markup of the `<pre>` block, verbatim
    pub content: String,
}

impl SourceFile {
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn logical_path(&self) -> String {
        self.segments.join("/")
    }
}

/// All files found in one report, in option order
#[derive(Debug, Clone, Default)]
pub struct CoverageReport {
    pub files: Vec<SourceFile>,
}

/// How recorded paths are turned into logical paths
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub strip_prefix: String,
    pub require_prefix: bool,
}

/// Text after the first occurrence of `prefix`, or the whole path when absent
pub fn strip_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return path;
    }
    match path.split_once(prefix) {
        Some((_, rest)) => rest,
        None => path,
    }
}

fn coverage_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*\S)\s+\((\d+(?:\.\d+)?)%\)$").expect("valid coverage regex"))
}

/// Split `name.go (83.3%)` into the path and its percentage
pub fn split_coverage(text: &str) -> (&str, Option<f64>) {
    let text = text.trim();
    match coverage_suffix().captures(text) {
        Some(caps) => {
            let path = caps.get(1).map_or(text, |m| m.as_str());
            let pct = caps.get(2).and_then(|m| m.as_str().parse().ok());
            (path, pct)
        }
        None => (text, None),
    }
}

fn selector(css: &str) -> Result<Selector, BeautifyError> {
    Selector::parse(css).map_err(|e| BeautifyError::Parse(format!("bad selector {}: {}", css, e)))
}

/// Parse the report and pair every selector option with its source block
pub fn extract(html: &str, options: &ExtractOptions) -> Result<CoverageReport, BeautifyError> {
    let document = Html::parse_document(html);
    let option_sel = selector("option")?;
    let pre_sel = selector("pre[id]")?;

    let blocks: HashMap<&str, String> = document
        .select(&pre_sel)
        .filter_map(|pre| pre.value().id().map(|id| (id, pre.inner_html())))
        .collect();

    let mut files = Vec::new();
    for option in document.select(&option_sel) {
        let id = option
            .value()
            .attr("value")
            .ok_or_else(|| BeautifyError::Parse("file option without a value".to_string()))?;
        let text: String = option.text().collect();
        let (recorded, coverage) = split_coverage(&text);

        if options.require_prefix && !recorded.contains(options.strip_prefix.as_str()) {
            return Err(BeautifyError::Parse(format!(
                "'{}' does not contain prefix '{}'",
                recorded, options.strip_prefix
            )));
        }

        let segments: Vec<String> = strip_prefix(recorded, &options.strip_prefix)
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            return Err(BeautifyError::Parse(format!(
                "option '{}' has an empty file path",
                id
            )));
        }

        let content = blocks
            .get(id)
            .ok_or_else(|| BeautifyError::Parse(format!("no source block with id '{}'", id)))?
            .clone();

        files.push(SourceFile {
            id: id.to_string(),
            recorded_path: recorded.to_string(),
            segments,
            coverage,
            content,
        });
    }

    tracing::debug!(files = files.len(), blocks = blocks.len(), "extracted report");
    Ok(CoverageReport { files })
}
