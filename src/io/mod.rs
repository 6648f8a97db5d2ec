//! I/O module: framed records and the streaming array reader.
//!
//! Layered bottom-up: [`RecordReader`] handles the Fortran head/tail
//! framing, [`ArrayStream`] assembles typed arrays from header and body
//! records, and [`source::open`] gets bytes off disk (with transparent
//! gzip). Everything reads strictly forward with constant memory.

pub mod record;
pub mod source;
mod stream;

pub use record::RecordReader;
pub use stream::{Array, ArrayStream, Values, ARRAY_HEADER_SIZE};
