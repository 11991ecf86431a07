//! Unpack
//!
//! Rebuilds a tree from a `.tar.gz` (or plain `.tar`) byte source, one entry
//! at a time in archive order.

pub mod stream;

pub use stream::{DecodedEntry, EntryStream};

use crate::config::UnpackOptions;
use crate::error::TarballError;
use crate::source::ByteSource;
use crate::tree::path::{normalize_name, parent_path};
use crate::tree::{DirectoryNode, FileNode};
use crate::types::EntryKind;
use futures::{future, TryStreamExt};
use tracing::info;

impl DirectoryNode {
    /// Unpack `source` into a new root node with default options.
    pub async fn create(source: impl Into<ByteSource>) -> Result<DirectoryNode, TarballError> {
        Self::create_with(source, &UnpackOptions::default()).await
    }

    /// Unpack `source` into a new root node.
    ///
    /// Each entry is attached before the decoder is allowed to produce the
    /// next one, so tree insertion order matches archive order. Any decode
    /// failure aborts the whole operation and no partial tree is returned.
    pub async fn create_with(
        source: impl Into<ByteSource>,
        options: &UnpackOptions,
    ) -> Result<DirectoryNode, TarballError> {
        let mut root = DirectoryNode::new();
        let mut stream = EntryStream::open(source.into(), options);
        let mut count = 0usize;

        while let Some(entry) = stream.next().await {
            let DecodedEntry {
                header,
                content,
                advance,
            } = entry?;
            let attached = header.renamed(normalize_name(&header.name));

            match header.kind {
                EntryKind::Directory => {
                    content
                        .try_for_each(|_| future::ready(Ok(())))
                        .await
                        .map_err(TarballError::Decode)?;
                    let directory = DirectoryNode::from_header(attached);
                    root.add_directory(&parent_path(&header.name), Some(directory))?;
                }
                EntryKind::File => {
                    let bytes: Vec<u8> = content.try_concat().await.map_err(TarballError::Decode)?;
                    root.add_file(&header.name, FileNode::new(attached, bytes))
                        .await?;
                }
            }

            // A closed signal means the decoder already stopped; its error,
            // if any, arrives through the stream.
            let _ = advance.send(());
            count += 1;
        }

        stream.finish().await?;
        info!(entries = count, "unpacked archive");
        Ok(root)
    }
}
