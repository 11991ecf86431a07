//! Byte sources
//!
//! Adapts blob-like and file-like inputs into a single asynchronous byte
//! stream consumed by `add_file` and by the unpack pipeline.

use crate::error::TarballError;
use std::fmt;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// MIME type attached to packed archives.
pub const GZIP_MIME_TYPE: &str = "application/gzip";

/// Immutable in-memory binary object with an optional MIME type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    bytes: Vec<u8>,
    mime_type: Option<String>,
}

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A readable source of archive or file bytes.
pub enum ByteSource {
    Blob(Blob),
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl ByteSource {
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        ByteSource::Reader(Box::new(reader))
    }

    /// Open a file on disk as a byte source.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, TarballError> {
        let file = tokio::fs::File::open(path.as_ref())
            .await
            .map_err(TarballError::Read)?;
        Ok(ByteSource::from(file))
    }

    /// Stream view over the source.
    pub fn into_reader(self) -> Box<dyn AsyncRead + Send + Unpin> {
        match self {
            ByteSource::Blob(blob) => Box::new(std::io::Cursor::new(blob.into_bytes())),
            ByteSource::Reader(reader) => reader,
        }
    }

    /// Read the whole source into memory.
    pub async fn read_to_end(self) -> Result<Vec<u8>, TarballError> {
        match self {
            ByteSource::Blob(blob) => Ok(blob.into_bytes()),
            ByteSource::Reader(mut reader) => {
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .await
                    .map_err(TarballError::Read)?;
                Ok(bytes)
            }
        }
    }
}

impl fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteSource::Blob(blob) => f.debug_tuple("Blob").field(&blob.size()).finish(),
            ByteSource::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<Blob> for ByteSource {
    fn from(blob: Blob) -> Self {
        ByteSource::Blob(blob)
    }
}

impl From<Vec<u8>> for ByteSource {
    fn from(bytes: Vec<u8>) -> Self {
        ByteSource::Blob(Blob::new(bytes))
    }
}

impl From<&[u8]> for ByteSource {
    fn from(bytes: &[u8]) -> Self {
        ByteSource::Blob(Blob::new(bytes))
    }
}

impl From<tokio::fs::File> for ByteSource {
    fn from(file: tokio::fs::File) -> Self {
        ByteSource::from_reader(file)
    }
}

impl From<Box<dyn AsyncRead + Send + Unpin>> for ByteSource {
    fn from(reader: Box<dyn AsyncRead + Send + Unpin>) -> Self {
        ByteSource::Reader(reader)
    }
}
