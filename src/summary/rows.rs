//! Row materialisation from the summary stream.
//!
//! A summary data file is a flat concatenation of report-step groups:
//!
//! ```text
//! SEQHDR { MINISTEP PARAMS }+ SEQHDR { MINISTEP PARAMS }+ ...
//! ```
//!
//! Each SEQHDR opens a report step, each MINISTEP/PARAMS pair is one
//! sample. [`read_rows`] walks this protocol exactly once, forward, and
//! packs one row per ministep: the report step, the ministep number, and
//! the PARAMS entries selected by a [`ColumnPlan`]'s positions. Report
//! steps are numbered from 1, ministeps restart from whatever the file
//! records (conventionally 0) at every report step.
//!
//! The traversal is strict: the stream must open with a SEQHDR, every
//! mid-stream SEQHDR must be followed by a MINISTEP, and a MINISTEP must
//! be followed by its PARAMS. The first violation aborts with an error
//! naming what was expected and what was found.

use crate::codec::ElementType;
use crate::error::{Result, SmryError};
use crate::io::{Array, ArrayStream};
use std::io::Read;

/// Report-step group opener
pub const SEQHDR: &[u8; 8] = b"SEQHDR  ";
/// Sample timestamp keyword
pub const MINISTEP: &[u8; 8] = b"MINISTEP";
/// Sample value vector keyword
pub const PARAMS: &[u8; 8] = b"PARAMS  ";

/// Materialised summary rows in a packed buffer.
///
/// Every row is `8 + 4 * columns` bytes: a host-order `i32` report step,
/// a host-order `i32` ministep, then one `f32` per selected column, in
/// plan order. [`Row`] views decode on access.
#[derive(Debug, Clone)]
pub struct SummaryRows {
    columns: usize,
    data: Vec<u8>,
}

/// Borrowed view of one packed row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    bytes: &'a [u8],
    columns: usize,
}

impl SummaryRows {
    /// Bytes per row.
    pub fn width(&self) -> usize {
        8 + 4 * self.columns
    }

    /// Number of selected columns per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows, one per MINISTEP consumed.
    pub fn len(&self) -> usize {
        self.data.len() / self.width()
    }

    /// True when no ministep was read.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The packed row bytes, rows contiguous in read order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// View of row `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<Row<'_>> {
        let width = self.width();
        let start = index.checked_mul(width)?;
        let bytes = self.data.get(start..start + width)?;
        Some(Row {
            bytes,
            columns: self.columns,
        })
    }

    /// Iterate rows in read order.
    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        let columns = self.columns;
        self.data.chunks_exact(self.width()).map(move |bytes| Row {
            bytes,
            columns,
        })
    }
}

impl<'a> Row<'a> {
    /// Report step this sample belongs to, starting at 1.
    pub fn report_step(&self) -> i32 {
        i32::from_ne_bytes(self.bytes[0..4].try_into().unwrap())
    }

    /// Ministep number as recorded in the file.
    pub fn ministep(&self) -> i32 {
        i32::from_ne_bytes(self.bytes[4..8].try_into().unwrap())
    }

    /// Value of the selected column `k`, if in range.
    pub fn value(&self, k: usize) -> Option<f32> {
        if k >= self.columns {
            return None;
        }
        let start = 8 + 4 * k;
        Some(f32::from_ne_bytes(
            self.bytes[start..start + 4].try_into().unwrap(),
        ))
    }

    /// All selected values, in plan order.
    pub fn values(&self) -> Vec<f32> {
        (0..self.columns).map(|k| self.value(k).unwrap()).collect()
    }
}

fn describe(array: &Array) -> String {
    format!(
        "'{}' ({}, {} elements)",
        array.keyword_str().trim_end(),
        String::from_utf8_lossy(&array.dtype().tag()),
        array.count(),
    )
}

fn expect_seqhdr(array: &Array) -> Result<()> {
    if array.dtype() != ElementType::Inte {
        return Err(SmryError::Protocol {
            expected: "SEQHDR (INTE)",
            got: describe(array),
        });
    }
    Ok(())
}

fn parse_ministep(array: &Array) -> Result<i32> {
    if array.keyword() != MINISTEP || array.dtype() != ElementType::Inte || array.count() != 1 {
        return Err(SmryError::Protocol {
            expected: "MINISTEP (INTE, 1 element)",
            got: describe(array),
        });
    }
    Ok(i32::from_ne_bytes(array.body()[0..4].try_into().unwrap()))
}

/// Traverse a summary data stream and pack one row per ministep.
///
/// `positions` selects which PARAMS entries each row carries, typically
/// [`ColumnPlan::positions`](crate::summary::ColumnPlan::positions) from
/// the companion specification file. The stream must be positioned at the
/// start of the data file.
///
/// # Errors
///
/// - [`SmryError::Protocol`] when the stream does not open with a SEQHDR,
///   a mid-stream SEQHDR is not followed by a MINISTEP, or an unexpected
///   array turns up where MINISTEP or PARAMS was required.
/// - [`SmryError::TruncatedStream`] when the stream ends between a
///   MINISTEP and its PARAMS.
/// - [`SmryError::InvalidArgs`] when a position points outside a PARAMS
///   vector.
/// - Any framing error from the stream itself.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> smry::Result<()> {
/// let mut stream = smry::io::ArrayStream::from_path("CASE.UNSMRY")?;
/// let rows = smry::summary::read_rows(&mut stream, &[0, 2])?;
/// for row in rows.iter() {
///     println!(
///         "{}.{}: {:?}",
///         row.report_step(),
///         row.ministep(),
///         row.values(),
///     );
/// }
/// # Ok(())
/// # }
/// ```
pub fn read_rows<R: Read>(stream: &mut ArrayStream<R>, positions: &[usize]) -> Result<SummaryRows> {
    let mut rows = SummaryRows {
        columns: positions.len(),
        data: Vec::new(),
    };

    // the stream must open with a SEQHDR; an empty stream holds no rows
    {
        let array = stream.next()?;
        if array.is_end() {
            return Ok(rows);
        }
        if array.keyword() != SEQHDR {
            return Err(SmryError::Protocol {
                expected: "SEQHDR (INTE)",
                got: describe(array),
            });
        }
        expect_seqhdr(array)?;
    }
    let mut report_step: i32 = 1;

    loop {
        // between samples: either the next MINISTEP, a SEQHDR opening the
        // next report step, or a clean end
        let ministep = {
            let array = stream.next()?;
            if array.is_end() {
                break;
            }
            if array.keyword() == SEQHDR {
                expect_seqhdr(array)?;
                report_step += 1;

                let array = stream.next()?;
                if array.is_end() {
                    return Err(SmryError::Protocol {
                        expected: "MINISTEP after SEQHDR",
                        got: "end of stream".to_string(),
                    });
                }
                parse_ministep(array)?
            } else {
                parse_ministep(array)?
            }
        };

        let array = stream.next()?;
        if array.is_end() {
            return Err(SmryError::TruncatedStream);
        }
        if array.keyword() != PARAMS || array.dtype() != ElementType::Real {
            return Err(SmryError::Protocol {
                expected: "PARAMS (REAL)",
                got: describe(array),
            });
        }

        let body = array.body();
        rows.data.extend_from_slice(&report_step.to_ne_bytes());
        rows.data.extend_from_slice(&ministep.to_ne_bytes());
        for &position in positions {
            let start = position * 4;
            let value = body.get(start..start + 4).ok_or_else(|| {
                SmryError::InvalidArgs {
                    msg: format!(
                        "column position {} outside PARAMS vector of {} values",
                        position,
                        body.len() / 4,
                    ),
                }
            })?;
            rows.data.extend_from_slice(value);
        }
    }

    Ok(rows)
}
