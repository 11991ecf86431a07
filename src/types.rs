//! Core types shared by the tree, the packer, and the unpacker.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata key holding an entry's modification time in seconds since the epoch.
pub const MTIME_KEY: &str = "mtime";

/// Archive entry type. Serializes as `"file"` or `"directory"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header of a tree node or archive entry.
///
/// Inside the tree `name` is a single segment; in pack and decode records it
/// is the full archive path. `metadata` carries decoded header fields through
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryHeader {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl EntryHeader {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            metadata: BTreeMap::new(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::File)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory)
    }

    /// Modification time recorded in metadata, if any.
    pub fn mtime(&self) -> Option<u64> {
        self.metadata.get(MTIME_KEY).and_then(|v| v.parse().ok())
    }

    /// Same header under a different name.
    pub(crate) fn renamed(&self, name: String) -> Self {
        Self {
            name,
            kind: self.kind,
            metadata: self.metadata.clone(),
        }
    }
}
