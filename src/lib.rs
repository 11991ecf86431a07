//! Gztar: In-Memory Tarball Trees
//!
//! Builds, edits, and inspects gzip-compressed tar archives entirely from
//! in-memory buffers. A [`DirectoryNode`] tree is addressed with
//! slash-separated paths, packed into `.tar.gz` bytes with
//! [`DirectoryNode::pack`], and rebuilt from a byte source with
//! [`DirectoryNode::create`].

pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod pack;
pub mod source;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod unpack;

pub use config::{GztarConfig, PackOptions, UnpackOptions};
pub use error::TarballError;
pub use source::{Blob, ByteSource};
pub use tree::{DirectoryNode, FileContent, FileNode, TreeEntry};
pub use types::{EntryHeader, EntryKind};
