//! smry: streaming reader for reservoir-simulation summary files.
//!
//! Legacy simulators write their results as unformatted sequential files,
//! a record format inherited from Fortran: every write lands on disk
//! framed by a pair of 4-byte big-endian length markers, and logical
//! *arrays* (an 8-character keyword, a type tag, and values) are spread
//! over a header record plus one or more blocked body records.
//!
//! This crate reads that format and the summary protocol layered on top
//! of it, strictly forward and with constant memory:
//!
//! - [`codec`]: the closed set of element types and big-endian/native
//!   conversion.
//! - [`io`]: framed record reading and [`ArrayStream`](io::ArrayStream),
//!   a forward-only array reader with single-record lookahead.
//! - [`summary`]: the indexing layer for `.SMSPEC`/`.UNSMRY` pairs:
//!   qualified column names from the specification's parallel arrays, and
//!   packed time-series rows from the SEQHDR/MINISTEP/PARAMS stream.
//!
//! # Usage
//!
//! ```no_run
//! use smry::io::{ArrayStream, Values};
//! use smry::summary::{read_rows, resolve_columns, ColumnInput};
//!
//! # fn main() -> smry::Result<()> {
//! // the specification file describes the matrix
//! let mut spec = ArrayStream::from_path("CASE.SMSPEC")?;
//! let arrays = spec.read_all()?;
//!
//! let find_strings = |name: &str| {
//!     arrays.iter().find(|(kw, _)| kw.trim_end() == name).and_then(|(_, v)| match v {
//!         Values::Str(s) => Some(s.clone()),
//!         _ => None,
//!     })
//! };
//! let find_ints = |name: &str| {
//!     arrays.iter().find(|(kw, _)| kw.trim_end() == name).and_then(|(_, v)| match v {
//!         Values::Inte(n) => Some(n.clone()),
//!         _ => None,
//!     })
//! };
//!
//! let keywords = find_strings("KEYWORDS").unwrap();
//! let wgnames = find_strings("WGNAMES").unwrap();
//! let nums = find_ints("NUMS").unwrap();
//!
//! let plan = resolve_columns(
//!     &ColumnInput {
//!         keywords: &keywords,
//!         wgnames: &wgnames,
//!         nums: &nums,
//!         ..Default::default()
//!     },
//!     ":",
//! )?;
//!
//! // the data file holds the rows
//! let mut data = ArrayStream::from_path("CASE.UNSMRY")?;
//! let rows = read_rows(&mut data, plan.positions())?;
//!
//! for row in rows.iter() {
//!     println!("{}.{}: {:?}", row.report_step(), row.ministep(), row.values());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Scope
//!
//! Reading only, 4-byte record markers only, unformatted variant only.
//! The reader never seeks: it works on pipes, and a bad file yields a
//! fatal error at the first inconsistency rather than a resync attempt.

pub mod codec;
pub mod error;
pub mod io;
pub mod summary;

pub use error::{Result, SmryError};
