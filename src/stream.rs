//! Streaming JSON Lines responses.
//!
//! Insert, find, patch and remove answer with one JSON document per line.
//! [`JsonStream`] decodes those documents one at a time so the response is
//! never held in memory as a whole, and [`iterate`] drives a stream with a
//! typed callback.
//!
//! ```rust
//! use inceptiondb_client::stream::{self, JsonStream};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Document {
//!     id: i64,
//! }
//!
//! let mut stream = JsonStream::new(200, "{\"id\":1}\n{\"id\":2}\n".as_bytes());
//! let mut ids = Vec::new();
//! stream
//!     .for_each(|document: Document| {
//!         ids.push(document.id);
//!         Ok::<_, inceptiondb_client::error::Error>(stream::STOP)
//!     })
//!     .unwrap();
//! assert_eq!(ids, [1]);
//! assert!(stream.is_closed());
//! ```

/// Typed iteration over a stream with early termination.
pub mod iterate;

pub use iterate::{CONTINUE, Flow, STOP, iterate};

use crate::error::{Error, Result};

use serde::de::DeserializeOwned;
use std::io::{self, BufRead, BufReader, Read};

/// A JSON Lines response body decoded one value at a time.
///
/// The stream owns the response body. It closes itself at the end of the
/// body and after the first decode error; a closed stream only ever reports
/// the end of the stream.
pub struct JsonStream<R = Box<dyn Read + Send>> {
    status: u16,
    reader: Option<BufReader<R>>,
}

impl<R> std::fmt::Debug for JsonStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStream")
            .field("status", &self.status)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn is_json_whitespace(byte: &u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\r' | b'\t')
}

fn is_number_byte(byte: &u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
}

/// Skip whitespace between values, returning the first byte of the next
/// value without consuming it, or `None` at the end of the body.
fn skip_whitespace<R: Read>(reader: &mut BufReader<R>) -> io::Result<Option<u8>> {
    loop {
        let (skipped, next) = match reader.fill_buf() {
            Ok([]) => return Ok(None),
            Ok(buffer) => {
                let skipped = buffer.iter().take_while(|byte| is_json_whitespace(byte)).count();
                (skipped, buffer.get(skipped).copied())
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        reader.consume(skipped);
        if next.is_some() {
            return Ok(next);
        }
    }
}

/// Read the bytes of a top-level number, leaving the byte after it unread.
///
/// The reader-backed deserializer looks one byte past a number to find its
/// end and would swallow that byte.
fn read_number<R: Read>(reader: &mut BufReader<R>) -> io::Result<Vec<u8>> {
    let mut number = Vec::new();
    loop {
        let (taken, available) = match reader.fill_buf() {
            Ok(buffer) => {
                let taken = buffer.iter().take_while(|byte| is_number_byte(byte)).count();
                number.extend_from_slice(&buffer[..taken]);
                (taken, buffer.len())
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        reader.consume(taken);
        if available == 0 || taken < available {
            return Ok(number);
        }
    }
}

/// Decode the value starting at `first` from `reader`.
fn decode<T: DeserializeOwned, R: Read>(reader: &mut BufReader<R>, first: u8) -> Result<T> {
    if first == b'-' || first.is_ascii_digit() {
        let number = read_number(reader)?;
        return serde_json::from_slice(&number).map_err(Error::Decode);
    }
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    T::deserialize(&mut deserializer).map_err(Error::Decode)
}

impl<R> JsonStream<R> {
    /// The HTTP status code of the response that produced this stream.
    pub const fn status_code(&self) -> u16 {
        self.status
    }

    /// Whether the stream has been closed.
    pub const fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    /// Release the response body.
    ///
    /// Closing an already closed stream does nothing.
    pub fn close(&mut self) -> Result<()> {
        if self.reader.take().is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(status = self.status, "json stream closed");
        }
        Ok(())
    }
}

impl<R: Read> JsonStream<R> {
    /// Wrap a response body.
    pub fn new(status: u16, body: R) -> Self {
        Self {
            status,
            reader: Some(BufReader::new(body)),
        }
    }

    /// Decode the next value of the stream.
    ///
    /// Returns `Ok(None)` at the end of the stream. Any error closes the
    /// stream, so the following call returns `Ok(None)`.
    pub fn next<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let decoded = match skip_whitespace(reader) {
            Ok(None) => Ok(None),
            Ok(Some(first)) => decode(reader, first).map(Some),
            Err(err) => Err(Error::Io(err)),
        };
        match decoded {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => {
                self.close()?;
                Ok(None)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(status = self.status, error = %err, "json stream decode failed");
                self.close()?;
                Err(err)
            }
        }
    }

    /// Read the rest of the body without decoding it, then close the stream.
    pub(crate) fn drain(&mut self) -> Result<()> {
        if let Some(reader) = self.reader.as_mut() {
            io::copy(reader, &mut io::sink())?;
        }
        self.close()
    }

    /// Invoke `callback` for every remaining value, see [`iterate`].
    pub fn for_each<T, E, F>(&mut self, callback: F) -> Result<(), E>
    where
        T: DeserializeOwned,
        E: From<Error>,
        F: FnMut(T) -> Result<Flow, E>,
    {
        iterate(Some(self), Some(callback))
    }

    /// Decode every remaining value into a vector.
    pub fn collect_all<T: DeserializeOwned>(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        self.for_each(|item| {
            items.push(item);
            Ok::<_, Error>(CONTINUE)
        })?;
        Ok(items)
    }
}

/// Close a stream that may be absent.
pub fn close<R>(stream: Option<&mut JsonStream<R>>) -> Result<()> {
    match stream {
        Some(stream) => stream.close(),
        None => Ok(()),
    }
}

/// The status code of a stream that may be absent, `0` when it is.
pub fn status_code<R>(stream: Option<&JsonStream<R>>) -> u16 {
    stream.map_or(0, JsonStream::status_code)
}
