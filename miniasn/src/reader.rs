//! Sequential access to the bytes and bits of an encoded message

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

/// Reads a byte source one byte or one bit at a time.  Bits are returned most
/// significant first.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,

    /// The byte currently being read bit by bit
    current: u8,

    /// Number of bits of `current` not yet returned
    remaining: u8,
}

impl ByteReader<BufReader<File>> {
    /// Open a file for reading
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            remaining: 0,
        }
    }

    /// Read the next whole byte, `None` at the end of the input.  Any bits of
    /// a partially read byte are discarded.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.remaining = 0;

        let mut buf = [0; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Read the next bit as 0 or 1, `None` at the end of the input
    pub fn read_bit(&mut self) -> io::Result<Option<u8>> {
        if self.remaining == 0 {
            let Some(byte) = self.read_byte()? else {
                return Ok(None);
            };
            self.current = byte;
            self.remaining = 8;
        }

        self.remaining -= 1;
        Ok(Some((self.current >> self.remaining) & 1))
    }

    /// Get back the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}
