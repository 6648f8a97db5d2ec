//! Error types for smry

use std::fmt;

/// Result type alias for smry operations
pub type Result<T> = std::result::Result<T, SmryError>;

/// Error types that can occur while reading summary files
#[derive(Debug)]
pub enum SmryError {
    /// I/O error
    Io(std::io::Error),

    /// The two record length markers disagree
    HeadTailMismatch {
        /// Decoded head marker
        head: i32,
        /// Decoded tail marker
        tail: i32,
    },

    /// End of file inside a record
    TruncatedRecord,

    /// End of file where the summary protocol requires more data
    TruncatedStream,

    /// Array type tag not in the known set
    UnknownType {
        /// The four tag bytes as found on disk
        tag: [u8; 4],
    },

    /// Malformed array header record
    InvalidHeader {
        /// Error message
        msg: String,
    },

    /// End of file before the array body was complete
    BodyUnderrun {
        /// Keyword of the offending array
        keyword: String,
        /// Elements still outstanding
        missing: usize,
    },

    /// A body record carried more elements than the header promised
    BodyOverrun {
        /// Keyword of the offending array
        keyword: String,
        /// Elements in excess of the declared count
        excess: usize,
    },

    /// Summary stream violates the SEQHDR/MINISTEP/PARAMS protocol
    Protocol {
        /// What the protocol required at this point
        expected: &'static str,
        /// What was actually read
        got: String,
    },

    /// Invalid argument or malformed input
    InvalidArgs {
        /// Error message
        msg: String,
    },

    /// Known but unimplemented variant
    Unsupported {
        /// Error message
        msg: String,
    },
}

impl fmt::Display for SmryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmryError::Io(e) => write!(f, "I/O error: {}", e),
            SmryError::HeadTailMismatch { head, tail } => {
                write!(f, "head/tail mismatch: head ({}) != tail ({})", head, tail)
            }
            SmryError::TruncatedRecord => write!(f, "unexpected end-of-file inside record"),
            SmryError::TruncatedStream => {
                write!(f, "unexpected end-of-file in summary stream")
            }
            SmryError::UnknownType { tag } => {
                write!(f, "unknown type: '{}'", String::from_utf8_lossy(tag))
            }
            SmryError::InvalidHeader { msg } => write!(f, "invalid array header: {}", msg),
            SmryError::BodyUnderrun { keyword, missing } => {
                write!(
                    f,
                    "array '{}' not terminated correctly: {} elements missing",
                    keyword, missing
                )
            }
            SmryError::BodyOverrun { keyword, excess } => {
                write!(
                    f,
                    "array '{}' body overruns declared count by {} elements",
                    keyword, excess
                )
            }
            SmryError::Protocol { expected, got } => {
                write!(f, "protocol error: expected {}, got {}", expected, got)
            }
            SmryError::InvalidArgs { msg } => write!(f, "invalid argument: {}", msg),
            SmryError::Unsupported { msg } => write!(f, "unsupported: {}", msg),
        }
    }
}

impl std::error::Error for SmryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SmryError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SmryError {
    fn from(error: std::io::Error) -> Self {
        SmryError::Io(error)
    }
}
