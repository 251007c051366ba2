//! Byte sinks and sources used by the serializer facade.
//!
//! The facade only ever writes one complete document or reads one complete
//! document, so these traits expose whole-buffer operations rather than a
//! streaming interface.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Destination for a serialized document.
pub trait ByteSink {
    fn write_all_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Origin of a document to deserialize.
pub trait ByteSource {
    fn read_all_bytes(&mut self) -> io::Result<Vec<u8>>;
}

/// Appends to an in-memory buffer.
impl ByteSink for Vec<u8> {
    fn write_all_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl ByteSource for &[u8] {
    fn read_all_bytes(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

/// Creates or truncates a file at the given path.
#[derive(Debug, Clone)]
pub struct FileSink(pub PathBuf);

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl ByteSink for FileSink {
    fn write_all_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        fs::write(&self.0, bytes)
    }
}

/// Reads a whole file.
#[derive(Debug, Clone)]
pub struct FileSource(pub PathBuf);

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl ByteSource for FileSource {
    fn read_all_bytes(&mut self) -> io::Result<Vec<u8>> {
        fs::read(&self.0)
    }
}

/// Writes to any open stream and flushes it.
#[derive(Debug)]
pub struct StreamSink<W>(pub W);

impl<W: Write> ByteSink for StreamSink<W> {
    fn write_all_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.0.write_all(bytes)?;
        self.0.flush()
    }
}

impl<W> StreamSink<W> {
    pub fn into_inner(self) -> W {
        self.0
    }
}

/// Reads any open stream to its end.
#[derive(Debug)]
pub struct StreamSource<R>(pub R);

impl<R: Read> ByteSource for StreamSource<R> {
    fn read_all_bytes(&mut self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.0.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
