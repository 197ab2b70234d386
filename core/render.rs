//! Rendering of a built [`SummaryEntry`] tree into `SUMMARY.md` text.
//!
//! Layout:
//!
//! ```text
//! # <summary title>
//!
//! - [<readme title>](README.md)
//! - [chapter](chapter/README.md)
//!   - [section](chapter/section/README.md)
//!     - [page](chapter/section/page.md)
//!
//!   - [intro](chapter/intro.md)
//! ```
//!
//! Directories come before the files next to them, and a directory line is
//! only written when the oracle finds markdown somewhere beneath it.

use crate::content::ContentOracle;
use crate::filter::README_FILENAME;
use crate::paths::{self, escape_link_target};
use crate::tree::{SummaryEntry, SummaryLink};
use std::fmt::Write;

pub fn render_summary(
    tree: &SummaryEntry,
    summary_title: &str,
    readme_title: &str,
    oracle: &mut ContentOracle<'_>,
) -> String {
    let mut summary = format!("# {}\n", summary_title);
    push_line(&mut summary, 0, readme_title, README_FILENAME);
    render_entry(tree, &mut summary, oracle);
    summary
}

fn render_entry(entry: &SummaryEntry, summary: &mut String, oracle: &mut ContentOracle<'_>) {
    let has_content = oracle.has_content(&entry.abs_path);

    if has_content && !entry.is_root() {
        let target = format!("{}/{}", escape_link_target(&entry.path), README_FILENAME);
        push_line(summary, entry.depth(), entry.base_name(), &target);
    }

    for child in &entry.children {
        render_entry(child, summary, oracle);
    }

    for link in &entry.links {
        render_link(link, summary);
    }

    if has_content && !summary.ends_with('\n') {
        summary.push('\n');
    }
}

fn render_link(link: &SummaryLink, summary: &mut String) {
    push_line(
        summary,
        paths::depth(&link.path),
        &link.title,
        &escape_link_target(&link.path),
    );
}

fn push_line(summary: &mut String, depth: usize, title: &str, target: &str) {
    // Writing into a String cannot fail.
    let _ = write!(summary, "\n{}- [{}]({})", "  ".repeat(depth), title, target);
}
