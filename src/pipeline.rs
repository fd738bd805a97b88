//! The end-to-end run: resolve input, extract, build the tree, render, write

use crate::config::{Config, Staging};
use crate::error::BeautifyError;
use crate::extract::{extract, CoverageReport, ExtractOptions};
use crate::input;
use crate::render::PageRenderer;
use crate::staging::ScratchMirror;
use crate::tree::FileTree;
use std::fs;
use std::path::PathBuf;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Local file the report was read from (the download when the input was a URL)
    pub input: PathBuf,
    pub output: PathBuf,
    /// Selector options found in the report
    pub options: usize,
    /// Distinct files in the generated tree
    pub files: usize,
}

/// Convert the report named by `input_arg` and write the page to `config.output`
pub fn run(input_arg: &str, config: &Config) -> Result<RunSummary, BeautifyError> {
    let input = input::resolve(input_arg, &config.download_path)?;
    let html = fs::read_to_string(&input).map_err(|e| BeautifyError::fs("Failed to read", &input, e))?;

    let report = extract(
        &html,
        &ExtractOptions {
            strip_prefix: config.strip_prefix.clone(),
            require_prefix: config.require_prefix,
        },
    )?;
    if report.files.is_empty() {
        tracing::debug!(input = %input.display(), "report contains no file options");
    }

    let tree = build_tree(&report, config)?;
    let page = PageRenderer::new(config.title.clone(), config.show_coverage).render(&tree)?;

    fs::write(&config.output, page)
        .map_err(|e| BeautifyError::fs("Failed to write", &config.output, e))?;
    tracing::info!(output = %config.output.display(), files = tree.file_count(), "wrote page");

    Ok(RunSummary {
        input,
        output: config.output.clone(),
        options: report.files.len(),
        files: tree.file_count(),
    })
}

fn build_tree(report: &CoverageReport, config: &Config) -> Result<FileTree, BeautifyError> {
    match config.staging {
        Staging::Memory => Ok(FileTree::from_files(&report.files)?),
        Staging::Disk => {
            let mirror = ScratchMirror::create(&config.scratch_dir)?;
            mirror.write_all(&report.files)?;
            let mut tree = FileTree::from_dir(mirror.root())?;
            mirror.remove()?;
            restore_coverage(&mut tree, report);
            Ok(tree)
        }
    }
}

/// The disk mirror only carries content; put percentages back from the report
fn restore_coverage(tree: &mut FileTree, report: &CoverageReport) {
    for file in &report.files {
        if let Some(entry) = tree.file_mut(&file.segments) {
            entry.coverage = file.coverage;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const REPORT: &str = r#"<html><body><select id="files">
<option value="file0">/workspace/out/libfuzzer-coverage-x86_64/src/pkg/a.go (75.0%)</option>
<option value="file1">/workspace/out/libfuzzer-coverage-x86_64/src/main.go (0.0%)</option>
</select>
<pre class="file" id="file0" style="display: none">X</pre>
<pre class="file" id="file1" style="display: none">package main</pre>
</body></html>"#;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            output: dir.path().join("out.html"),
            download_path: dir.path().join("input.html"),
            scratch_dir: dir.path().join("files"),
            ..Config::default()
        }
    }

    fn write_report(dir: &TempDir) -> String {
        let path = dir.path().join("coverage.html");
        fs::write(&path, REPORT).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn memory_run_writes_page() {
        let dir = TempDir::new().unwrap();
        let input = write_report(&dir);
        let config = config_in(&dir);

        let summary = run(&input, &config).unwrap();
        assert_eq!(summary.options, 2);
        assert_eq!(summary.files, 2);

        let page = fs::read_to_string(&config.output).unwrap();
        assert!(page.contains("<span class=\"directory\">pkg</span>"));
        assert!(page.contains("<pre style=\"display: none;\">X</pre>a.go"));
        assert!(!config.scratch_dir.exists());
    }

    #[test]
    fn disk_run_matches_memory_run_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let input = write_report(&dir);
        let memory = config_in(&dir);
        let disk = Config {
            staging: Staging::Disk,
            output: dir.path().join("disk.html"),
            ..config_in(&dir)
        };

        run(&input, &memory).unwrap();
        run(&input, &disk).unwrap();

        assert_eq!(
            fs::read_to_string(&memory.output).unwrap(),
            fs::read_to_string(&disk.output).unwrap()
        );
        assert!(!disk.scratch_dir.exists());
    }

    #[test]
    fn unsafe_segments_fail_in_both_staging_modes() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("unsafe.html");
        fs::write(
            &input,
            r#"<select><option value="f">pkg/..\\evil.go</option></select><pre id="f">x</pre>"#,
        )
        .unwrap();
        let input = input.to_string_lossy().into_owned();

        let memory = config_in(&dir);
        let disk = Config {
            staging: Staging::Disk,
            ..config_in(&dir)
        };
        for config in [memory, disk] {
            let err = run(&input, &config).unwrap_err();
            assert_eq!(err.exit_code(), 5, "{:?}", config.staging);
            assert!(!config.output.exists());
        }
        assert!(!dir.path().join("files").exists());
    }

    #[test]
    fn missing_input_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let missing = dir.path().join("nope.html");
        let err = run(&missing.to_string_lossy(), &config).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert!(!config.output.exists());
    }

    #[test]
    fn rerun_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.output, "stale content from an older run").unwrap();

        let input = write_report(&dir);
        run(&input, &config).unwrap();
        let first = fs::read_to_string(&config.output).unwrap();
        run(&input, &config).unwrap();
        let second = fs::read_to_string(&config.output).unwrap();

        assert_eq!(first, second);
        assert!(!second.contains("stale content"));
        assert_eq!(second.matches("<!DOCTYPE html>").count(), 1);
    }
}
