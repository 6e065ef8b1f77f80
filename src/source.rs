//! Byte sources the reader can skip through.
//!
//! Skipping a value should not cost a decode. Sources that can seek move
//! their cursor; everything else reads the bytes into a scratch buffer and
//! drops them. Wrap arbitrary readers in [`Sequential`] (read-and-discard) or
//! [`Seekable`] (seek) to pick a strategy explicitly.

use std::{
    fs::File,
    io::{self, BufReader, Cursor, Read, Seek, SeekFrom},
};

use crate::Result;

fn unexpected_eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "failed to skip entire payload")
}

/// A readable byte stream that can move forward without returning bytes.
pub trait Source: Read {
    /// Skips exactly `n` bytes. Running out of input is an I/O error.
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        let mut scratch = [0u8; 512];
        let mut left = n;
        while left > 0 {
            let chunk = left.min(scratch.len() as u64) as usize;
            self.read_exact(&mut scratch[..chunk])?;
            left -= chunk as u64;
        }
        Ok(())
    }
}

impl Source for &[u8] {
    #[inline]
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        let bytes = *self;
        if n > bytes.len() as u64 {
            *self = &bytes[bytes.len()..];
            return Err(unexpected_eof().into());
        }
        *self = &bytes[n as usize..];
        Ok(())
    }
}

impl<T: AsRef<[u8]>> Source for Cursor<T> {
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        let len = self.get_ref().as_ref().len() as u64;
        let position = self.position().min(len);
        if n > len - position {
            self.set_position(len);
            return Err(unexpected_eof().into());
        }
        self.set_position(position + n);
        Ok(())
    }
}

fn seek_forward(seek: &mut impl Seek, n: u64) -> Result<()> {
    let offset = i64::try_from(n).map_err(|_| unexpected_eof())?;
    seek.seek(SeekFrom::Current(offset))?;
    Ok(())
}

/// Seeking past the end of a file succeeds; the next read reports the truncation.
impl Source for File {
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        seek_forward(self, n)
    }
}

impl<R: Read + Seek> Source for BufReader<R> {
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        let offset = i64::try_from(n).map_err(|_| unexpected_eof())?;
        self.seek_relative(offset)?;
        Ok(())
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    #[inline]
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        (**self).skip_bytes(n)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    #[inline]
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        (**self).skip_bytes(n)
    }
}

#[cfg(feature = "shared")]
impl<B: bytes::Buf> Source for bytes::buf::Reader<B> {
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        let buf = self.get_mut();
        let remaining = buf.remaining();
        if n > remaining as u64 {
            buf.advance(remaining);
            return Err(unexpected_eof().into());
        }
        buf.advance(n as usize);
        Ok(())
    }
}

/// Adapts any reader (a socket, a gzip decoder) by reading and discarding.
#[derive(Debug)]
pub struct Sequential<R> {
    inner: R,
}

impl<R: Read> Sequential<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Sequential<R> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read> Source for Sequential<R> {}

/// Adapts any seekable reader by seeking forward.
#[derive(Debug)]
pub struct Seekable<R> {
    inner: R,
}

impl<R: Read + Seek> Seekable<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Read for Seekable<R> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> Source for Seekable<R> {
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        seek_forward(&mut self.inner, n)
    }
}
