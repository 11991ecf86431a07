//! Pack
//!
//! Flattens a tree into ordered archive records and encodes them as a gzip
//! compressed tar stream.

use crate::codec::{encode_tar, gzip, PackEntry};
use crate::config::PackOptions;
use crate::error::TarballError;
use crate::source::{Blob, GZIP_MIME_TYPE};
use crate::tree::path::join;
use crate::tree::DirectoryNode;
use tracing::info;

impl DirectoryNode {
    /// Archive records for this tree in depth-first pre-order.
    ///
    /// Each directory emits its files first, then each subdirectory in turn.
    /// A subdirectory without files gets an explicit directory record before
    /// its own contents; directories holding files are implied by those files.
    /// Names are relative to `self`.
    pub fn pack_entries(&self) -> Vec<PackEntry<'_>> {
        let mut entries = Vec::new();
        self.flatten_into("", &mut entries);
        entries
    }

    fn flatten_into<'a>(&'a self, prefix: &str, entries: &mut Vec<PackEntry<'a>>) {
        for file in self.get_files() {
            entries.push(PackEntry {
                header: file.headers().renamed(join(prefix, file.name())),
                content: Some(file.content()),
            });
        }
        for directory in self.get_directories() {
            let path = join(prefix, directory.name());
            if directory.get_files().is_empty() {
                entries.push(PackEntry {
                    header: directory.headers().renamed(path.clone()),
                    content: None,
                });
            }
            directory.flatten_into(&path, entries);
        }
    }

    /// Encode the tree as `.tar.gz` bytes.
    pub fn pack_with(&self, options: &PackOptions) -> Result<Vec<u8>, TarballError> {
        let entries = self.pack_entries();
        let tar = encode_tar(&entries, options).map_err(TarballError::Encode)?;
        let packed = gzip(&tar, options.compression_level).map_err(TarballError::Encode)?;
        info!(
            entries = entries.len(),
            tar_bytes = tar.len(),
            packed_bytes = packed.len(),
            "packed archive"
        );
        Ok(packed)
    }

    /// Encode the tree with default options into an `application/gzip` blob.
    pub async fn pack(&self) -> Result<Blob, TarballError> {
        let bytes = self.pack_with(&PackOptions::default())?;
        Ok(Blob::new(bytes).with_mime_type(GZIP_MIME_TYPE))
    }
}
