//! Sidebar markup: nested `<ul>`/`<li>` lists built from the file tree

use super::escape_html;
use crate::tree::{spaced_lines, FileEntry, FileTree, Node};
use std::collections::BTreeMap;

/// Renders the tree as the inner items of the sidebar's top-level list
#[derive(Debug, Clone, Copy)]
pub struct TreeMarkup {
    show_coverage: bool,
}

impl TreeMarkup {
    pub fn new(show_coverage: bool) -> Self {
        Self { show_coverage }
    }

    pub fn render(&self, tree: &FileTree) -> String {
        let mut html = String::with_capacity(4096);
        self.render_children(&mut html, tree.children(), 0);
        html
    }

    fn render_children(&self, html: &mut String, children: &BTreeMap<String, Node>, depth: usize) {
        for (name, node) in children {
            match node {
                Node::Directory(next) => {
                    indent(html, depth);
                    html.push_str("<li><span class=\"directory\">");
                    html.push_str(&escape_html(name));
                    html.push_str("</span>\n");
                    indent(html, depth + 1);
                    html.push_str("<ul class=\"nested\">\n");
                    self.render_children(html, next, depth + 2);
                    indent(html, depth + 1);
                    html.push_str("</ul>\n");
                    indent(html, depth);
                    html.push_str("</li>\n");
                }
                Node::File(entry) => {
                    indent(html, depth);
                    self.render_file(html, name, entry);
                    html.push('\n');
                }
            }
        }
    }

    fn render_file(&self, html: &mut String, name: &str, entry: &FileEntry) {
        html.push_str("<li class=\"source-file\"><pre style=\"display: none;\">");
        html.push_str(&spaced_lines(&entry.content));
        html.push_str("</pre>");
        html.push_str(&escape_html(name));
        if let (true, Some(pct)) = (self.show_coverage, entry.coverage) {
            html.push_str(&format!(
                " <span class=\"coverage cov{}\">{:.1}%</span>",
                coverage_bucket(pct),
                pct
            ));
        }
        html.push_str("</li>");
    }
}

fn indent(html: &mut String, depth: usize) {
    for _ in 0..depth {
        html.push_str("  ");
    }
}

/// Map a percentage onto the report's `cov0`..`cov10` color classes
pub fn coverage_bucket(pct: f64) -> u8 {
    if pct <= 0.0 {
        0
    } else {
        ((pct / 10.0).ceil() as u8).clamp(1, 10)
    }
}
