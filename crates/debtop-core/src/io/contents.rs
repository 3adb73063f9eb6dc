//! Decompressing line reader for Contents indices.
//!
//! Wraps a raw gzip-compressed byte source and exposes a lazy, forward-only
//! sequence of decoded text lines. Decompression is incremental: memory use
//! is bounded by the line buffer, never by the decompressed size of the
//! index (hundreds of megabytes for a real architecture).
//!
//! Per-line decode failures are recovered: a line that is not valid UTF-8
//! is skipped with a warning and the sequence continues. Stream-level
//! failures (corrupt gzip framing, the source dying mid-read) are fatal
//! and classified as [`ContentsError`].

use std::io;

use async_compression::tokio::bufread::GzipDecoder;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::io::StreamReader;

use crate::diag::Diagnostics;

/// Fatal failure of the decompressing line reader.
#[derive(Error, Debug)]
pub enum ContentsError {
    /// The compressed stream is corrupt or truncated.
    #[error("gzip stream is corrupt or truncated: {0}")]
    Decompression(#[source] io::Error),

    /// The underlying byte source failed mid-read.
    #[error("byte source failed mid-read: {0}")]
    Stream(#[source] io::Error),
}

/// Lazy line reader over a gzip-compressed byte source.
///
/// Forward-only and non-restartable: once [`next_line`](Self::next_line)
/// returns `Ok(None)` the source is exhausted. Dropping the reader releases
/// the decompression state and the source on every exit path.
pub struct ContentsReader<R, D> {
    input: BufReader<GzipDecoder<R>>,
    line: Vec<u8>,
    diag: D,
}

impl<R, D> ContentsReader<R, D>
where
    R: AsyncBufRead + Unpin,
    D: Diagnostics,
{
    /// Wrap a compressed byte source.
    pub fn new(source: R, diag: D) -> Self {
        Self {
            input: BufReader::new(GzipDecoder::new(source)),
            line: Vec::new(),
            diag,
        }
    }

    /// The injected diagnostics handle.
    pub fn diagnostics(&self) -> &D {
        &self.diag
    }

    /// Next decoded line, with its terminator (`\n` or `\r\n`) stripped.
    ///
    /// Returns `Ok(None)` when the source is exhausted. Lines that are not
    /// valid UTF-8 are skipped with a warning; they never end the sequence.
    pub async fn next_line(&mut self) -> Result<Option<String>, ContentsError> {
        loop {
            self.line.clear();
            let read = self
                .input
                .read_until(b'\n', &mut self.line)
                .await
                .map_err(classify)?;
            if read == 0 {
                return Ok(None);
            }

            if self.line.last() == Some(&b'\n') {
                self.line.pop();
                if self.line.last() == Some(&b'\r') {
                    self.line.pop();
                }
            }

            match std::str::from_utf8(&self.line) {
                Ok(text) => return Ok(Some(text.to_owned())),
                Err(err) => {
                    self.diag.warning(&format!("skipping undecodable line: {err}"));
                }
            }
        }
    }
}

impl<R, D> std::fmt::Debug for ContentsReader<R, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentsReader").finish_non_exhaustive()
    }
}

/// Adapt a fallible byte stream (e.g. an HTTP body) into a line reader.
pub fn reader_from_bytes<S, E, D>(
    stream: S,
    diag: D,
) -> ContentsReader<impl AsyncBufRead + Unpin, D>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
    D: Diagnostics,
{
    ContentsReader::new(StreamReader::new(stream.map_err(io::Error::other)), diag)
}

/// Split fatal reader errors into decompression vs. source failures.
///
/// The gzip decoder reports corrupt or truncated framing as
/// `UnexpectedEof` / `InvalidData` / `InvalidInput`; anything else came
/// through from the byte source itself.
fn classify(err: io::Error) -> ContentsError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput => {
            ContentsError::Decompression(err)
        }
        _ => ContentsError::Stream(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::NullDiagnostics;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn reader_over(bytes: Vec<u8>) -> ContentsReader<impl AsyncBufRead + Unpin, NullDiagnostics> {
        let stream =
            futures::stream::iter(vec![Ok::<_, io::Error>(Bytes::from(bytes))]);
        reader_from_bytes(stream, NullDiagnostics)
    }

    async fn collect(
        reader: &mut ContentsReader<impl AsyncBufRead + Unpin, NullDiagnostics>,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().await.unwrap() {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn test_reads_lines_with_terminators_stripped() {
        let mut reader = reader_over(gzip(b"bin/ls coreutils\r\nbin/cat coreutils\n"));
        let lines = collect(&mut reader).await;
        assert_eq!(lines, ["bin/ls coreutils", "bin/cat coreutils"]);
    }

    #[tokio::test]
    async fn test_final_line_without_terminator_is_kept() {
        let mut reader = reader_over(gzip(b"bin/ls coreutils\nbin/cat coreutils"));
        let lines = collect(&mut reader).await;
        assert_eq!(lines, ["bin/ls coreutils", "bin/cat coreutils"]);
    }

    #[tokio::test]
    async fn test_empty_gzip_yields_no_lines_and_no_error() {
        let mut reader = reader_over(gzip(b""));
        assert!(reader.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped_not_fatal() {
        let mut reader = reader_over(gzip(b"bin/ls coreutils\n\xff\xfe broken\nbin/cat coreutils\n"));
        let lines = collect(&mut reader).await;
        assert_eq!(lines, ["bin/ls coreutils", "bin/cat coreutils"]);
    }

    #[tokio::test]
    async fn test_truncated_gzip_is_decompression_error() {
        let full = gzip(b"bin/ls coreutils\nbin/cat coreutils\n");
        let mut reader = reader_over(full[..full.len() / 2].to_vec());

        let err = loop {
            match reader.next_line().await {
                Ok(Some(_)) => {}
                Ok(None) => panic!("truncated stream must not end cleanly"),
                Err(err) => break err,
            }
        };
        assert!(matches!(err, ContentsError::Decompression(_)));
    }

    #[tokio::test]
    async fn test_garbage_input_is_decompression_error() {
        let mut reader = reader_over(b"this is not gzip framing at all".to_vec());
        let err = reader.next_line().await.unwrap_err();
        assert!(matches!(err, ContentsError::Decompression(_)));
    }
}
