//! Framed record reading.
//!
//! Unformatted sequential files are sequences of length-delimited records.
//! Every record is framed by two identical 4-byte big-endian byte counts,
//! written by the producing Fortran runtime:
//!
//! ```text
//! | len:int32-be | payload[len] | len:int32-be |
//! ```
//!
//! [`RecordReader`] reads one record at a time into a caller-supplied
//! buffer, validating that head and tail agree. It never seeks and never
//! reads past the tail, so it works on pipes as well as files.

use crate::error::{Result, SmryError};
use std::io::{self, Read};

/// Reader for length-delimited records.
///
/// # Buffer Reuse
///
/// [`read_record`](RecordReader::read_record) fills a caller-owned `Vec`
/// that is resized to the payload length, so a single buffer can be reused
/// across records without repeated allocation.
pub struct RecordReader<R> {
    reader: R,
}

impl<R: Read> RecordReader<R> {
    /// Create a new record reader over any byte source.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one record into `buf`, returning the payload length.
    ///
    /// Returns `Ok(None)` on clean end-of-file, i.e. when the source is
    /// exhausted before the first head byte.
    ///
    /// # Errors
    ///
    /// - [`SmryError::TruncatedRecord`] if end-of-file is hit inside the
    ///   head, payload, or tail.
    /// - [`SmryError::HeadTailMismatch`] if the two length markers
    ///   disagree; both decoded values are reported.
    /// - [`SmryError::InvalidArgs`] if the head encodes a negative length.
    pub fn read_record(&mut self, buf: &mut Vec<u8>) -> Result<Option<usize>> {
        let mut head = [0u8; 4];
        match read_full(&mut self.reader, &mut head)? {
            0 => return Ok(None),
            4 => {}
            _ => return Err(SmryError::TruncatedRecord),
        }

        let length = i32::from_be_bytes(head);
        if length < 0 {
            return Err(SmryError::InvalidArgs {
                msg: format!("record head encodes negative length {}", length),
            });
        }
        let length = length as usize;

        buf.clear();
        buf.resize(length, 0);
        self.reader
            .read_exact(buf)
            .map_err(eof_as_truncation)?;

        let mut tail = [0u8; 4];
        self.reader
            .read_exact(&mut tail)
            .map_err(eof_as_truncation)?;

        if head != tail {
            return Err(SmryError::HeadTailMismatch {
                head: i32::from_be_bytes(head),
                tail: i32::from_be_bytes(tail),
            });
        }

        Ok(Some(length))
    }
}

fn eof_as_truncation(e: io::Error) -> SmryError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        SmryError::TruncatedRecord
    } else {
        SmryError::Io(e)
    }
}

/// Read until `buf` is full or the source is exhausted, returning the
/// number of bytes read. Distinguishes clean end-of-file (0 bytes) from
/// truncation mid-marker.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SmryError::Io(e)),
        }
    }
    Ok(total)
}
