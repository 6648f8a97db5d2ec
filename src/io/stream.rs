//! Streaming array reader.
//!
//! An *array* is the logical unit of these files: an 8-character keyword, an
//! element type, and a sequence of values. On disk it is one 16-byte header
//! record followed by one or more body records:
//!
//! ```text
//! |head| KEYWORD COUNT TYPE |tail| |head| VALUE1 VALUE2 .. VALUEN |tail|
//!      + ------------------ +          + ----------------------- +
//!      | array header       |          | array body              |
//! ```
//!
//! Large arrays are blocked: the body is split into consecutive records of
//! at most [`block_size`](crate::codec::ElementType::block_size) elements
//! each, with framing markers between them but no intervening headers.
//!
//! [`ArrayStream`] assembles arrays one at a time from any byte source. It
//! only ever reads forward, so it works on pipes, and it supports exactly
//! one record of lookahead through [`unget`](ArrayStream::unget). The
//! number of arrays in a file is not knowable ahead of time; read until the
//! returned array's [`is_end`](Array::is_end) reports the end sentinel.
//!
//! # Usage
//!
//! ```no_run
//! # fn main() -> smry::Result<()> {
//! let mut stream = smry::io::ArrayStream::from_path("CASE.UNSMRY")?;
//! loop {
//!     let array = stream.next()?;
//!     if array.is_end() {
//!         break;
//!     }
//!     println!("{} x{}", array.keyword_str(), array.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::codec::{to_native, ElementType};
use crate::error::{Result, SmryError};
use crate::io::record::RecordReader;
use crate::io::source;
use std::borrow::Cow;
use std::io::{BufRead, Read};
use std::path::Path;

/// Size in bytes of an array header record payload.
pub const ARRAY_HEADER_SIZE: usize = 16;

/// One logical array: keyword, element type, and body.
///
/// The body is stored in host byte order; endian conversion happens while
/// the array is assembled. A `count` of `-1` marks the end-of-stream
/// sentinel handed out by [`ArrayStream::next`]; real arrays always have
/// `count >= 0`.
#[derive(Debug, Clone)]
pub struct Array {
    keyword: [u8; 8],
    dtype: ElementType,
    count: i32,
    body: Vec<u8>,
}

/// Array body decoded into host values.
///
/// Fixed-width strings are yielded with their trailing space padding
/// intact; callers trim. The payload-free markers (`MESS`, `X231`) decode
/// to [`Values::Mess`].
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    /// 4-byte signed integers
    Inte(Vec<i32>),
    /// 4-byte floats
    Real(Vec<f32>),
    /// 8-byte floats
    Doub(Vec<f64>),
    /// Fixed-width strings, padding intact
    Str(Vec<String>),
    /// Fortran logicals, nonzero decoded as true
    Logi(Vec<bool>),
    /// No payload
    Mess,
}

impl Array {
    fn placeholder() -> Self {
        Self {
            keyword: *b"        ",
            dtype: ElementType::Mess,
            count: 0,
            body: Vec::new(),
        }
    }

    /// The raw 8-byte keyword, right-padded with spaces.
    pub fn keyword(&self) -> &[u8; 8] {
        &self.keyword
    }

    /// The keyword as text, padding intact.
    pub fn keyword_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.keyword)
    }

    /// Element type from the header tag.
    pub fn dtype(&self) -> ElementType {
        self.dtype
    }

    /// Declared element count. `-1` for the end sentinel.
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Number of elements in the body.
    pub fn len(&self) -> usize {
        self.count.max(0) as usize
    }

    /// True for the end-of-stream sentinel.
    pub fn is_end(&self) -> bool {
        self.count == -1
    }

    /// The body bytes, in host order. `body.len() == count * element_size`.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body into typed host values.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use smry::io::Values;
    ///
    /// # fn main() -> smry::Result<()> {
    /// # let mut stream = smry::io::ArrayStream::from_path("CASE.SMSPEC")?;
    /// let array = stream.next()?;
    /// if let Values::Str(keywords) = array.values() {
    ///     for kw in &keywords {
    ///         println!("{}", kw.trim_end());
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn values(&self) -> Values {
        let decode_i32 = |chunk: &[u8]| i32::from_ne_bytes(chunk.try_into().unwrap());
        match self.dtype {
            ElementType::Inte => {
                Values::Inte(self.body.chunks_exact(4).map(decode_i32).collect())
            }
            ElementType::Real => Values::Real(
                self.body
                    .chunks_exact(4)
                    .map(|c| f32::from_ne_bytes(c.try_into().unwrap()))
                    .collect(),
            ),
            ElementType::Doub => Values::Doub(
                self.body
                    .chunks_exact(8)
                    .map(|c| f64::from_ne_bytes(c.try_into().unwrap()))
                    .collect(),
            ),
            ElementType::Logi => Values::Logi(
                self.body.chunks_exact(4).map(|c| decode_i32(c) != 0).collect(),
            ),
            ElementType::Char | ElementType::C0nn(_) => Values::Str(
                self.body
                    .chunks_exact(self.dtype.element_size())
                    .map(|c| String::from_utf8_lossy(c).into_owned())
                    .collect(),
            ),
            ElementType::Mess | ElementType::X231 => Values::Mess,
        }
    }
}

/// Forward-only stream of arrays with single-record lookahead.
///
/// The stream owns one array cache that is overwritten by every call to
/// [`next`](ArrayStream::next); the borrow it returns makes retaining a
/// previous array across calls a compile error. Callers that need to keep
/// an array clone it.
///
/// The per-record scratch buffer and the body buffer are reused across
/// calls, grown but never shrunk, so steady-state streaming does not
/// allocate.
pub struct ArrayStream<R> {
    records: RecordReader<R>,
    scratch: Vec<u8>,
    last: Array,
    ungot: bool,
}

impl<R: Read> ArrayStream<R> {
    /// Create a stream over any byte source.
    pub fn new(reader: R) -> Self {
        Self {
            records: RecordReader::new(reader),
            scratch: Vec::new(),
            last: Array::placeholder(),
            ungot: false,
        }
    }

    /// Read the next array.
    ///
    /// Overwrites the internal cache in place: the returned reference, and
    /// everything borrowed from it, is valid until the following call to
    /// `next` on this stream.
    ///
    /// On clean end-of-file the cache mutates to the end sentinel
    /// (`count = -1`, [`Array::is_end`]); further calls keep returning the
    /// sentinel. A pending [`unget`](ArrayStream::unget) is consumed and
    /// the cached array returned without touching the source.
    ///
    /// # Errors
    ///
    /// Any framing or header error from the layers below: truncation,
    /// head/tail mismatch, unknown type tag, malformed header, or an array
    /// body that ends early or overruns its declared count.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&Array> {
        if self.ungot {
            self.ungot = false;
            return Ok(&self.last);
        }

        self.read_header()?;
        if !self.last.is_end() {
            self.read_body()?;
        }
        Ok(&self.last)
    }

    /// Mark the most recently read array for replay.
    ///
    /// The next call to [`next`](ArrayStream::next) returns the cached
    /// array again instead of reading. Only one array can be held this
    /// way; calling `unget` twice without an intervening `next` is a
    /// no-op. Calling it before the first `next` is not meaningful and
    /// replays the placeholder cache.
    ///
    /// Together with `next` this emulates peek, which is how consumers
    /// detect a report-step boundary without committing to it.
    pub fn unget(&mut self) {
        self.ungot = true;
    }

    /// Drain the stream into owned `(keyword, values)` pairs.
    ///
    /// Keywords keep their 8-character padding. Intended for
    /// specification files, where consumers want all parallel arrays at
    /// once.
    pub fn read_all(&mut self) -> Result<Vec<(String, Values)>> {
        let mut arrays = Vec::new();
        loop {
            let array = self.next()?;
            if array.is_end() {
                break;
            }
            arrays.push((array.keyword_str().into_owned(), array.values()));
        }
        Ok(arrays)
    }

    fn read_header(&mut self) -> Result<()> {
        let nbytes = match self.records.read_record(&mut self.scratch)? {
            None => {
                self.last.count = -1;
                self.last.body.clear();
                return Ok(());
            }
            Some(n) => n,
        };

        if nbytes != ARRAY_HEADER_SIZE {
            return Err(SmryError::InvalidHeader {
                msg: format!(
                    "header record is {} bytes, expected {}",
                    nbytes, ARRAY_HEADER_SIZE
                ),
            });
        }

        self.last.keyword.copy_from_slice(&self.scratch[0..8]);
        let count = i32::from_be_bytes(self.scratch[8..12].try_into().unwrap());
        let tag: [u8; 4] = self.scratch[12..16].try_into().unwrap();
        self.last.dtype = ElementType::from_tag(&tag)?;

        if count < 0 {
            return Err(SmryError::InvalidHeader {
                msg: format!(
                    "array '{}' declares negative count {}",
                    self.last.keyword_str(),
                    count
                ),
            });
        }

        self.last.count = count;
        Ok(())
    }

    fn read_body(&mut self) -> Result<()> {
        let dtype = self.last.dtype;
        let esize = dtype.element_size();
        self.last.body.clear();

        // MESS and X231 are header-only, nothing follows on disk
        if esize == 0 {
            return Ok(());
        }

        let mut remaining = self.last.count as usize;
        self.last.body.reserve(remaining * esize);

        while remaining > 0 {
            let nbytes = match self.records.read_record(&mut self.scratch)? {
                None => {
                    return Err(SmryError::BodyUnderrun {
                        keyword: self.last.keyword_str().into_owned(),
                        missing: remaining,
                    })
                }
                Some(n) => n,
            };

            if nbytes == 0 || nbytes % esize != 0 {
                return Err(SmryError::InvalidArgs {
                    msg: format!(
                        "body record of {} bytes does not hold a whole number of {}-byte elements",
                        nbytes, esize
                    ),
                });
            }

            let elems = nbytes / esize;
            if elems > remaining {
                return Err(SmryError::BodyOverrun {
                    keyword: self.last.keyword_str().into_owned(),
                    excess: elems - remaining,
                });
            }

            let offset = self.last.body.len();
            self.last.body.resize(offset + nbytes, 0);
            to_native(&mut self.last.body[offset..], &self.scratch, dtype, elems)?;
            remaining -= elems;
        }

        Ok(())
    }
}

impl ArrayStream<Box<dyn BufRead + Send>> {
    /// Open a file as an array stream.
    ///
    /// Gzip-compressed files are detected by their magic bytes and
    /// decompressed transparently. The file handle is owned by the stream
    /// and released when it drops.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(source::open(path)?))
    }
}
