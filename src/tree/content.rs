//! Accepted content forms for `DirectoryNode::add_file`.

use crate::error::TarballError;
use crate::source::{Blob, ByteSource};
use crate::tree::node::FileNode;

/// File content as handed to `add_file`.
///
/// Every form except `File` is converted into an owned byte buffer. `Blob`
/// and `Source` are read asynchronously.
#[derive(Debug)]
pub enum FileContent {
    /// A prebuilt node, attached as-is under its own name.
    File(FileNode),
    /// UTF-8 text.
    Text(String),
    /// An owned byte buffer.
    Buffer(Vec<u8>),
    Blob(Blob),
    Source(ByteSource),
}

pub(crate) enum Resolved {
    Node(FileNode),
    Bytes(Vec<u8>),
}

impl FileContent {
    pub(crate) async fn resolve(self) -> Result<Resolved, TarballError> {
        Ok(match self {
            FileContent::File(node) => Resolved::Node(node),
            FileContent::Text(text) => Resolved::Bytes(text.into_bytes()),
            FileContent::Buffer(bytes) => Resolved::Bytes(bytes),
            FileContent::Blob(blob) => Resolved::Bytes(ByteSource::from(blob).read_to_end().await?),
            FileContent::Source(source) => Resolved::Bytes(source.read_to_end().await?),
        })
    }
}

impl From<FileNode> for FileContent {
    fn from(node: FileNode) -> Self {
        FileContent::File(node)
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        FileContent::Text(text)
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        FileContent::Text(text.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        FileContent::Buffer(bytes)
    }
}

impl From<&[u8]> for FileContent {
    fn from(bytes: &[u8]) -> Self {
        FileContent::Buffer(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for FileContent {
    fn from(bytes: &[u8; N]) -> Self {
        FileContent::Buffer(bytes.to_vec())
    }
}

impl From<Blob> for FileContent {
    fn from(blob: Blob) -> Self {
        FileContent::Blob(blob)
    }
}

impl From<ByteSource> for FileContent {
    fn from(source: ByteSource) -> Self {
        FileContent::Source(source)
    }
}
