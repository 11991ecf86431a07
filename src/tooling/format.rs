//! Format archive listings as text.

use crate::tree::{DirectoryNode, TreeEntry};
use crate::types::EntryKind;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::{Deserialize, Serialize};

/// One row of an archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Listing output for JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingOutput {
    pub entries: Vec<ListingEntry>,
    pub files: usize,
    pub directories: usize,
    pub total_bytes: u64,
}

impl ListingOutput {
    pub fn from_tree(root: &DirectoryNode) -> Self {
        let entries: Vec<ListingEntry> = root
            .walk()
            .into_iter()
            .map(|(path, entry)| {
                let (kind, size, header) = match entry {
                    TreeEntry::File(file) => (EntryKind::File, file.len() as u64, file.headers()),
                    TreeEntry::Directory(dir) => (EntryKind::Directory, 0, dir.headers()),
                };
                ListingEntry {
                    path,
                    kind,
                    size,
                    modified: header
                        .mtime()
                        .and_then(|secs| i64::try_from(secs).ok())
                        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                        .map(|at| at.to_rfc3339()),
                }
            })
            .collect();
        let files = entries.iter().filter(|e| e.kind == EntryKind::File).count();
        Self {
            files,
            directories: entries.len() - files,
            total_bytes: entries.iter().map(|e| e.size).sum(),
            entries,
        }
    }
}

/// Format a listing as a table.
pub fn format_listing_text(listing: &ListingOutput) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Type", "Size", "Modified"]);
    for entry in &listing.entries {
        table.add_row(vec![
            entry.path.clone(),
            entry.kind.to_string(),
            entry.size.to_string(),
            entry.modified.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    format!(
        "{}\n{} files, {} directories, {} bytes",
        table, listing.files, listing.directories, listing.total_bytes
    )
}

/// Format a tree as an indented outline, directories suffixed with `/`.
pub fn format_tree_text(root: &DirectoryNode) -> String {
    let mut out = String::from("/\n");
    for (path, entry) in root.walk() {
        let depth = path.matches('/').count() + 1;
        let name = path.rsplit('/').next().unwrap_or(&path);
        let indent = "  ".repeat(depth);
        match entry {
            TreeEntry::Directory(_) => out.push_str(&format!("{}{}/\n", indent, name)),
            TreeEntry::File(file) => {
                out.push_str(&format!("{}{} ({} bytes)\n", indent, name, file.len()))
            }
        }
    }
    out
}
