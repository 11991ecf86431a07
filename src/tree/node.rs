//! Directory and file node types, path lookup, and insertion.

use crate::error::TarballError;
use crate::source::Blob;
use crate::tree::content::{FileContent, Resolved};
use crate::tree::path::{checked_segments, join, normalize_name, parent_path, split_segments, ROOT_NAME};
use crate::types::{EntryHeader, EntryKind};
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

/// File node: a name and an immutable content buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    header: EntryHeader,
    content: Vec<u8>,
}

impl FileNode {
    /// Build a file node from a header. The header kind is forced to file.
    pub fn new(header: EntryHeader, content: impl Into<Vec<u8>>) -> Self {
        Self {
            header: EntryHeader {
                kind: EntryKind::File,
                ..header
            },
            content: content.into(),
        }
    }

    /// Build a file node named after the final segment of `name`.
    pub fn with_name(name: &str, content: impl Into<Vec<u8>>) -> Self {
        Self::new(EntryHeader::file(normalize_name(name)), content)
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn headers(&self) -> &EntryHeader {
        &self.header
    }

    /// Raw bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Content decoded as UTF-8; invalid sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Detached copy of the content.
    pub fn to_vec(&self) -> Vec<u8> {
        self.content.clone()
    }

    pub fn to_blob(&self, mime_type: Option<&str>) -> Blob {
        let blob = Blob::new(self.content.clone());
        match mime_type {
            Some(mime_type) => blob.with_mime_type(mime_type),
            None => blob,
        }
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

impl fmt::Display for FileNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Directory node owning its child files and subdirectories.
///
/// File and directory names live in separate namespaces. Subdirectory names
/// are unique (adding a same-named directory replaces the old subtree); file
/// names are not checked, and `get_file` returns the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    header: EntryHeader,
    files: Vec<FileNode>,
    directories: Vec<DirectoryNode>,
}

/// One node reached by [`DirectoryNode::walk`].
#[derive(Debug, Clone, Copy)]
pub enum TreeEntry<'a> {
    File(&'a FileNode),
    Directory(&'a DirectoryNode),
}

impl Default for DirectoryNode {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryNode {
    /// Empty root node named `/`.
    pub fn new() -> Self {
        Self::with_name(ROOT_NAME)
    }

    /// Empty directory named after the final segment of `name`.
    pub fn with_name(name: &str) -> Self {
        Self::from_header(EntryHeader::directory(name))
    }

    /// Empty directory seeded from a header. The name is reduced to its final
    /// segment, an empty name means root, and metadata is kept.
    pub fn from_header(header: EntryHeader) -> Self {
        let name = match normalize_name(&header.name) {
            name if name.is_empty() || name == "\\" => ROOT_NAME.to_string(),
            name => name,
        };
        Self {
            header: EntryHeader {
                name,
                kind: EntryKind::Directory,
                metadata: header.metadata,
            },
            files: Vec::new(),
            directories: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn headers(&self) -> &EntryHeader {
        &self.header
    }

    pub fn is_root(&self) -> bool {
        self.header.name == ROOT_NAME
    }

    /// True when the directory has no files and no subdirectories.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    pub fn get_directories(&self) -> &[DirectoryNode] {
        &self.directories
    }

    pub fn get_files(&self) -> &[FileNode] {
        &self.files
    }

    /// Resolve `path` segment by segment through subdirectories. An empty path
    /// resolves to `self`.
    pub fn get_directory(&self, path: &str) -> Option<&DirectoryNode> {
        let mut current = self;
        for segment in split_segments(path) {
            current = current.directories.iter().find(|d| d.name() == segment)?;
        }
        Some(current)
    }

    pub fn get_directory_mut(&mut self, path: &str) -> Option<&mut DirectoryNode> {
        let mut current = self;
        for segment in split_segments(path) {
            current = current
                .directories
                .iter_mut()
                .find(|d| d.name() == segment)?;
        }
        Some(current)
    }

    /// First file named by the final segment of `path` inside its parent.
    pub fn get_file(&self, path: &str) -> Option<&FileNode> {
        let filename = normalize_name(path);
        if filename.is_empty() {
            return None;
        }
        self.get_directory(&parent_path(path))?
            .files
            .iter()
            .find(|f| f.name() == filename)
    }

    /// Resolve `path`, creating every missing directory along the way.
    /// Existing directories are reused, never replaced.
    pub fn get_or_create_directory(&mut self, path: &str) -> Result<&mut DirectoryNode, TarballError> {
        let segments = checked_segments(path)?;
        let mut current = self;
        for segment in segments {
            let index = match current.directories.iter().position(|d| d.name() == segment) {
                Some(index) => index,
                None => {
                    current.directories.push(DirectoryNode::with_name(&segment));
                    current.directories.len() - 1
                }
            };
            current = &mut current.directories[index];
        }
        Ok(current)
    }

    /// Attach a directory.
    ///
    /// Without `directory`, the final segment of `path` names a new empty
    /// directory placed under the rest of `path`. With `directory`, `path` is
    /// the parent location and the node keeps its own name. Missing parents
    /// are created. A same-named subdirectory in the parent is replaced along
    /// with its whole subtree.
    pub fn add_directory(
        &mut self,
        path: &str,
        directory: Option<DirectoryNode>,
    ) -> Result<&mut DirectoryNode, TarballError> {
        let (parent, directory) = match directory {
            Some(directory) => (path.to_string(), directory),
            None => {
                let segments = checked_segments(path)?;
                let name = segments
                    .last()
                    .ok_or_else(|| TarballError::invalid_path(path, "missing directory name"))?;
                (parent_path(path), DirectoryNode::with_name(name))
            }
        };
        if directory.is_root() {
            return Err(TarballError::invalid_path(
                path,
                "a root node cannot be attached as a subdirectory",
            ));
        }

        let parent = self.get_or_create_directory(&parent)?;
        let index = match parent
            .directories
            .iter()
            .position(|d| d.name() == directory.name())
        {
            Some(index) => {
                debug!(directory = directory.name(), "replacing existing directory");
                parent.directories[index] = directory;
                index
            }
            None => {
                parent.directories.push(directory);
                parent.directories.len() - 1
            }
        };
        Ok(&mut parent.directories[index])
    }

    /// Attach a file at `path`, creating missing parent directories.
    ///
    /// Content is converted to bytes first (reading blobs and sources), so a
    /// failed read leaves the tree untouched. A prebuilt [`FileNode`] keeps its
    /// own name, which must be a single segment. Existing files with the same
    /// name are kept; the new file is appended after them.
    pub async fn add_file(
        &mut self,
        path: &str,
        content: impl Into<FileContent>,
    ) -> Result<(), TarballError> {
        let mut segments = checked_segments(path)?;
        let node = match content.into().resolve().await? {
            Resolved::Node(node) => {
                let name = node.name();
                if name.is_empty() || name == ROOT_NAME || name.contains(['/', '\\']) {
                    return Err(TarballError::invalid_path(
                        path,
                        "file node name must be a single segment",
                    ));
                }
                node
            }
            Resolved::Bytes(bytes) => {
                let filename = segments
                    .pop()
                    .ok_or_else(|| TarballError::invalid_path(path, "missing file name"))?;
                FileNode::new(EntryHeader::file(filename), bytes)
            }
        };
        let parent = self.get_or_create_directory(&parent_path(path))?;
        parent.files.push(node);
        Ok(())
    }

    /// Every descendant in pre-order with its path relative to `self`.
    /// Files of a directory come before its subdirectories.
    pub fn walk(&self) -> Vec<(String, TreeEntry<'_>)> {
        let mut out = Vec::new();
        self.walk_into("", &mut out);
        out
    }

    fn walk_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, TreeEntry<'a>)>) {
        for file in &self.files {
            out.push((join(prefix, file.name()), TreeEntry::File(file)));
        }
        for directory in &self.directories {
            let path = join(prefix, directory.name());
            out.push((path.clone(), TreeEntry::Directory(directory)));
            directory.walk_into(&path, out);
        }
    }
}
