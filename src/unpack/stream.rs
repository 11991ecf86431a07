//! Decode pipeline
//!
//! Three stages connected by bounded channels:
//!
//! 1. an async task pumps chunks out of the [`ByteSource`];
//! 2. a blocking task gunzips (maybe) and tar-decodes those chunks;
//! 3. the caller receives one [`DecodedEntry`] at a time.
//!
//! The decoder does not move past an entry until the caller fires the
//! entry's `advance` signal, so at most one entry is in flight.

use crate::codec::gunzip_maybe;
use crate::config::UnpackOptions;
use crate::error::TarballError;
use crate::source::ByteSource;
use crate::types::{EntryHeader, EntryKind, MTIME_KEY};
use futures::stream::{self, BoxStream, StreamExt};
use std::io::{self, Read};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// One piece of a byte stream.
pub type Chunk = io::Result<Vec<u8>>;

const CONTENT_DEPTH: usize = 2;

/// One decoded archive entry.
pub struct DecodedEntry {
    /// Header with the full archive path as `name`.
    pub header: EntryHeader,
    /// Entry content. Must be read to the end or dropped before advancing.
    pub content: BoxStream<'static, Chunk>,
    /// Fire once the entry is handled to let the decoder continue.
    pub advance: oneshot::Sender<()>,
}

/// Entries decoded from a byte source, delivered in archive order.
pub struct EntryStream {
    entries: mpsc::Receiver<Result<DecodedEntry, TarballError>>,
    decoder: JoinHandle<()>,
}

impl EntryStream {
    /// Start the pipeline. Must be called within a Tokio runtime.
    pub fn open(source: ByteSource, options: &UnpackOptions) -> Self {
        let chunk_size = options.chunk_size.max(1);
        let (chunk_tx, chunk_rx) = mpsc::channel(options.read_ahead.max(1));
        tokio::spawn(pump_source(source.into_reader(), chunk_tx, chunk_size));

        let (entry_tx, entry_rx) = mpsc::channel(1);
        let decoder = tokio::task::spawn_blocking(move || {
            if let Err(err) = decode_entries(ChannelReader::new(chunk_rx), &entry_tx, chunk_size) {
                let _ = entry_tx.blocking_send(Err(err));
            }
        });

        Self {
            entries: entry_rx,
            decoder,
        }
    }

    /// Next entry, or `None` once the archive is exhausted.
    pub async fn next(&mut self) -> Option<Result<DecodedEntry, TarballError>> {
        self.entries.recv().await
    }

    /// Wait for the decoder to exit, surfacing a panic as an error.
    pub async fn finish(self) -> Result<(), TarballError> {
        drop(self.entries);
        self.decoder.await?;
        Ok(())
    }
}

async fn pump_source(
    mut reader: Box<dyn AsyncRead + Send + Unpin>,
    chunks: mpsc::Sender<Chunk>,
    chunk_size: usize,
) {
    loop {
        let mut buf = vec![0u8; chunk_size];
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                buf.truncate(n);
                if chunks.send(Ok(buf)).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                let _ = chunks.send(Err(err)).await;
                break;
            }
        }
    }
}

/// Blocking `Read` over chunks produced by the async pump.
struct ChannelReader {
    chunks: mpsc::Receiver<Chunk>,
    current: Vec<u8>,
    pos: usize,
    done: bool,
}

impl ChannelReader {
    fn new(chunks: mpsc::Receiver<Chunk>) -> Self {
        Self {
            chunks,
            current: Vec::new(),
            pos: 0,
            done: false,
        }
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pos >= self.current.len() {
            if self.done {
                return Ok(0);
            }
            match self.chunks.blocking_recv() {
                Some(Ok(chunk)) => {
                    self.current = chunk;
                    self.pos = 0;
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Err(err);
                }
                None => self.done = true,
            }
        }
        let n = buf.len().min(self.current.len() - self.pos);
        buf[..n].copy_from_slice(&self.current[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn decode_entries(
    reader: ChannelReader,
    entries: &mpsc::Sender<Result<DecodedEntry, TarballError>>,
    chunk_size: usize,
) -> Result<(), TarballError> {
    let reader = gunzip_maybe(reader).map_err(TarballError::Decode)?;
    let mut archive = tar::Archive::new(reader);
    for entry in archive.entries().map_err(TarballError::Decode)? {
        let mut entry = entry.map_err(TarballError::Decode)?;
        let Some(header) = entry_header(&entry) else {
            continue;
        };
        debug!(name = %header.name, kind = %header.kind, size = entry.size(), "decoded entry");

        let (content_tx, content_rx) = mpsc::channel(CONTENT_DEPTH);
        let (advance_tx, advance_rx) = oneshot::channel();
        let decoded = DecodedEntry {
            header,
            content: content_stream(content_rx),
            advance: advance_tx,
        };
        if entries.blocking_send(Ok(decoded)).is_err() {
            return Ok(());
        }

        let expected = entry.size();
        send_content(&mut entry, &content_tx, chunk_size, expected)?;
        drop(content_tx);

        if advance_rx.blocking_recv().is_err() {
            return Ok(());
        }
    }

    // The tar reader stops at the end-of-archive blocks. Reading the rest
    // lets the gzip decoder check its CRC32 and length trailer.
    let mut reader = archive.into_inner();
    io::copy(&mut reader, &mut io::sink()).map_err(TarballError::Decode)?;
    Ok(())
}

/// Header for a decoded entry, or `None` for entries the tree does not model.
fn entry_header<R: Read>(entry: &tar::Entry<'_, R>) -> Option<EntryHeader> {
    let raw = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
    let mut name = raw.as_str();
    while let Some(rest) = name.strip_prefix("./") {
        name = rest;
    }
    if name == "." || name.trim_matches('/').is_empty() {
        debug!(name = %raw, "skipping archive root entry");
        return None;
    }

    let entry_type = entry.header().entry_type();
    let kind = if entry_type.is_dir() || (entry_type.is_file() && name.ends_with('/')) {
        EntryKind::Directory
    } else if entry_type.is_file() || entry_type.is_contiguous() || entry_type.is_gnu_sparse() {
        EntryKind::File
    } else {
        warn!(name = %raw, entry_type = ?entry_type, "skipping unsupported entry type");
        return None;
    };

    let mut header = EntryHeader::new(name, kind);
    if let Ok(mtime) = entry.header().mtime() {
        header.metadata.insert(MTIME_KEY.to_string(), mtime.to_string());
    }
    Some(header)
}

fn send_content<R: Read>(
    entry: &mut R,
    content: &mpsc::Sender<Chunk>,
    chunk_size: usize,
    expected: u64,
) -> Result<(), TarballError> {
    let mut sent = 0u64;
    loop {
        let mut buf = vec![0u8; chunk_size];
        let n = match entry.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                let message = err.to_string();
                let _ = content.blocking_send(Err(err));
                return Err(TarballError::Decode(io::Error::new(io::ErrorKind::Other, message)));
            }
        };
        buf.truncate(n);
        sent += n as u64;
        // A dropped receiver means the caller stopped reading; the tar
        // decoder skips whatever is left when it moves on.
        if content.blocking_send(Ok(buf)).is_err() {
            return Ok(());
        }
    }
    if sent < expected {
        let err = io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("entry truncated: {} of {} bytes", sent, expected),
        );
        let message = err.to_string();
        let _ = content.blocking_send(Err(err));
        return Err(TarballError::Decode(io::Error::new(io::ErrorKind::UnexpectedEof, message)));
    }
    Ok(())
}

fn content_stream(rx: mpsc::Receiver<Chunk>) -> BoxStream<'static, Chunk> {
    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|chunk| (chunk, rx)) }).boxed()
}
