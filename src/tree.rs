//! In-memory file tree rebuilt from the report's recorded paths

use crate::error::{BeautifyError, TreeError};
use crate::extract::SourceFile;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// A leaf: one source file's highlighted markup
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub content: String,
    pub coverage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Directory(BTreeMap<String, Node>),
    File(FileEntry),
}

/// Root directory owning every node. Children are keyed by name, so
/// iteration is always in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileTree {
    root: BTreeMap<String, Node>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from extracted files. Later files replace earlier ones at the same path.
    pub fn from_files(files: &[SourceFile]) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        for file in files {
            tree.insert(
                &file.segments,
                FileEntry {
                    content: file.content.clone(),
                    coverage: file.coverage,
                },
            )?;
        }
        Ok(tree)
    }

    /// Read a scratch mirror back into a tree
    pub fn from_dir(root: &Path) -> Result<Self, BeautifyError> {
        let mut tree = Self::new();
        let walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                BeautifyError::fs("Failed to walk", path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let segments: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let content = std::fs::read_to_string(entry.path())
                .map_err(|e| BeautifyError::fs("Failed to read", entry.path(), e))?;
            tree.insert(
                &segments,
                FileEntry {
                    content,
                    coverage: None,
                },
            )?;
        }
        Ok(tree)
    }

    /// Place a file at `segments`, creating intermediate directories
    pub fn insert(&mut self, segments: &[String], entry: FileEntry) -> Result<(), TreeError> {
        check_segments(segments)?;
        let (name, dirs) = segments.split_last().ok_or(TreeError::EmptyPath)?;

        let mut children = &mut self.root;
        for (depth, dir) in dirs.iter().enumerate() {
            let node = children
                .entry(dir.clone())
                .or_insert_with(|| Node::Directory(BTreeMap::new()));
            children = match node {
                Node::Directory(next) => next,
                Node::File(_) => return Err(TreeError::Conflict(segments[..=depth].join("/"))),
            };
        }

        if let Some(Node::Directory(_)) = children.get(name) {
            return Err(TreeError::Conflict(segments.join("/")));
        }
        children.insert(name.clone(), Node::File(entry));
        Ok(())
    }

    /// Leaf at `segments`, if one exists
    pub fn file_mut(&mut self, segments: &[String]) -> Option<&mut FileEntry> {
        let (name, dirs) = segments.split_last()?;
        let mut children = &mut self.root;
        for dir in dirs {
            children = match children.get_mut(dir)? {
                Node::Directory(next) => next,
                Node::File(_) => return None,
            };
        }
        match children.get_mut(name)? {
            Node::File(entry) => Some(entry),
            Node::Directory(_) => None,
        }
    }

    /// Top-level entries in name order
    pub fn children(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.iter_files().count()
    }

    /// Depth-first, name-ordered walk yielding `(path, entry)` for every file
    pub fn iter_files(&self) -> impl Iterator<Item = (String, &FileEntry)> {
        let mut out = Vec::new();
        collect_files(&self.root, "", &mut out);
        out.into_iter()
    }
}

fn collect_files<'a>(
    children: &'a BTreeMap<String, Node>,
    prefix: &str,
    out: &mut Vec<(String, &'a FileEntry)>,
) {
    for (name, node) in children {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", prefix, name)
        };
        match node {
            Node::Directory(next) => collect_files(next, &path, out),
            Node::File(entry) => out.push((path, entry)),
        }
    }
}

/// Rejects paths that could not be mirrored safely under a directory
pub fn check_segments(segments: &[String]) -> Result<(), TreeError> {
    if segments.is_empty() {
        return Err(TreeError::EmptyPath);
    }
    if segments
        .iter()
        .any(|s| s.is_empty() || s == "." || s == ".." || s.contains('\\'))
    {
        return Err(TreeError::Unsafe(segments.join("/")));
    }
    Ok(())
}

/// Lines re-joined with a blank line between them; each line keeps its own terminator
pub fn spaced_lines(content: &str) -> String {
    content.split_inclusive('\n').collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(path: &str) -> Vec<String> {
        path.split('/').map(str::to_string).collect()
    }

    fn entry(content: &str) -> FileEntry {
        FileEntry {
            content: content.to_string(),
            coverage: None,
        }
    }

    #[test]
    fn files_are_nested_under_directories() {
        let mut tree = FileTree::new();
        tree.insert(&seg("pkg/a.go"), entry("A")).unwrap();
        tree.insert(&seg("pkg/sub/b.go"), entry("B")).unwrap();

        let paths: Vec<String> = tree.iter_files().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["pkg/a.go", "pkg/sub/b.go"]);
        assert!(matches!(tree.children().get("pkg"), Some(Node::Directory(_))));
    }

    #[test]
    fn entries_come_out_sorted_regardless_of_insert_order() {
        let mut tree = FileTree::new();
        for path in ["z.go", "b/x.go", "a.go", "B.go", "b/a.go"] {
            tree.insert(&seg(path), entry(path)).unwrap();
        }
        let paths: Vec<String> = tree.iter_files().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["B.go", "a.go", "b/a.go", "b/x.go", "z.go"]);
    }

    #[test]
    fn duplicate_path_overwrites() {
        let mut tree = FileTree::new();
        tree.insert(&seg("pkg/a.go"), entry("old")).unwrap();
        tree.insert(&seg("pkg/a.go"), entry("new")).unwrap();
        assert_eq!(tree.file_count(), 1);
        assert_eq!(tree.iter_files().next().unwrap().1.content, "new");
    }

    #[test]
    fn file_and_directory_with_same_name_conflict() {
        let mut tree = FileTree::new();
        tree.insert(&seg("pkg/a.go"), entry("A")).unwrap();
        assert_eq!(
            tree.insert(&seg("pkg"), entry("P")),
            Err(TreeError::Conflict("pkg".into()))
        );
        assert_eq!(
            tree.insert(&seg("pkg/a.go/c.go"), entry("C")),
            Err(TreeError::Conflict("pkg/a.go".into()))
        );
    }

    #[test]
    fn file_mut_finds_only_files() {
        let mut tree = FileTree::new();
        tree.insert(&seg("pkg/a.go"), entry("A")).unwrap();
        tree.file_mut(&seg("pkg/a.go")).unwrap().coverage = Some(12.5);
        assert_eq!(tree.iter_files().next().unwrap().1.coverage, Some(12.5));
        assert!(tree.file_mut(&seg("pkg")).is_none());
        assert!(tree.file_mut(&seg("pkg/missing.go")).is_none());
    }

    #[test]
    fn parent_and_backslash_segments_rejected() {
        let mut tree = FileTree::new();
        assert_eq!(
            tree.insert(&seg("pkg/../a.go"), entry("x")),
            Err(TreeError::Unsafe("pkg/../a.go".into()))
        );
        assert_eq!(
            tree.insert(&seg("pkg/a\\b.go"), entry("x")),
            Err(TreeError::Unsafe("pkg/a\\b.go".into()))
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn empty_segments_rejected() {
        let mut tree = FileTree::new();
        assert_eq!(tree.insert(&[], entry("x")), Err(TreeError::EmptyPath));
        assert!(tree.is_empty());
    }

    #[test]
    fn reads_mirror_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg/sub")).unwrap();
        std::fs::write(dir.path().join("pkg/a.go"), "A").unwrap();
        std::fs::write(dir.path().join("pkg/sub/b.go"), "B").unwrap();
        std::fs::write(dir.path().join("main.go"), "M").unwrap();

        let tree = FileTree::from_dir(dir.path()).unwrap();
        let files: Vec<(String, String)> = tree
            .iter_files()
            .map(|(p, e)| (p, e.content.clone()))
            .collect();
        assert_eq!(
            files,
            vec![
                ("main.go".to_string(), "M".to_string()),
                ("pkg/a.go".to_string(), "A".to_string()),
                ("pkg/sub/b.go".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn spaced_lines_separates_lines() {
        assert_eq!(spaced_lines("X"), "X");
        assert_eq!(spaced_lines("a\nb"), "a\n\nb");
        assert_eq!(spaced_lines("a\nb\n"), "a\n\nb\n");
        assert_eq!(spaced_lines(""), "");
    }
}
