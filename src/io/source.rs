//! File opening with transparent gzip decompression.
//!
//! Summary files pulled out of archives are frequently gzipped. Rather than
//! making every caller care, [`open`] peeks at the two gzip magic bytes
//! (31, 139) and routes through a streaming decoder when they match;
//! uncompressed files pass straight through. Either way the result is a
//! plain forward-only reader.

use crate::error::Result;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open a file for reading, decompressing gzip transparently.
///
/// Detection is by content, not file name, so `CASE.UNSMRY.gz` and a
/// renamed compressed file behave the same.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead + Send>> {
    let mut reader = BufReader::new(File::open(path)?);

    let magic = {
        let buffered = reader.fill_buf()?;
        buffered.len() >= 2 && buffered[0..2] == GZIP_MAGIC
    };

    if magic {
        Ok(Box::new(BufReader::new(GzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}
