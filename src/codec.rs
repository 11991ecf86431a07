//! Tar and gzip codecs.
//!
//! Encoding is synchronous and fully in memory. Decompression is "maybe":
//! input that does not start with the gzip magic bytes is passed through as
//! plain tar.

use crate::config::PackOptions;
use crate::types::{EntryHeader, EntryKind};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Cursor, Read, Write};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// One record handed to the tar encoder. Directory records carry no content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry<'a> {
    pub header: EntryHeader,
    pub content: Option<&'a [u8]>,
}

/// Encode `entries` as a tar stream, in order.
pub fn encode_tar(entries: &[PackEntry<'_>], options: &PackOptions) -> io::Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());
    for entry in entries {
        let content = entry.content.unwrap_or_default();
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mtime(entry.header.mtime().unwrap_or(options.mtime));
        match entry.header.kind {
            EntryKind::File => {
                header.set_entry_type(tar::EntryType::Regular);
                header.set_mode(options.file_mode);
                builder.append_data(&mut header, &entry.header.name, content)?;
            }
            EntryKind::Directory => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_mode(options.directory_mode);
                let name = format!("{}/", entry.header.name.trim_end_matches('/'));
                builder.append_data(&mut header, name, io::empty())?;
            }
        }
    }
    builder.into_inner()
}

/// Gzip-compress `bytes` at `level` (clamped to 0..=9).
pub fn gzip(bytes: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level.min(9)));
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Wrap `reader` in a gzip decoder if the stream starts with the gzip magic,
/// otherwise return the stream unchanged.
pub fn gunzip_maybe<R>(mut reader: R) -> io::Result<Box<dyn Read + Send>>
where
    R: Read + Send + 'static,
{
    let mut magic = [0u8; 2];
    let mut filled = 0;
    while filled < magic.len() {
        match reader.read(&mut magic[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    let prefixed = Cursor::new(magic[..filled].to_vec()).chain(reader);
    if filled == magic.len() && magic == GZIP_MAGIC {
        Ok(Box::new(MultiGzDecoder::new(prefixed)))
    } else {
        Ok(Box::new(prefixed))
    }
}
