//! Array element types.
//!
//! Every array carries a 4-character ASCII type tag in its header. The tag
//! determines both the element width in bytes and how large the body records
//! are blocked (numeric types are written 1000 elements per record, string
//! types 105).
//!
//! The set of tags is closed: `INTE`, `REAL`, `DOUB`, `CHAR`, `MESS`, `LOGI`,
//! `X231`, and `C001`..`C099` for fixed-width strings of the indicated byte
//! length. `MESS` and `X231` are markers and carry no payload.

use crate::error::{Result, SmryError};

/// Elements per body record for numeric types
pub const BLOCK_SIZE_NUMERIC: usize = 1000;

/// Elements per body record for character types
pub const BLOCK_SIZE_STRING: usize = 105;

/// Array element types.
///
/// The variants correspond one-to-one with the 4-character tags found in
/// array headers on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 4-byte signed integer (`INTE`)
    Inte,
    /// 4-byte IEEE 754 float (`REAL`)
    Real,
    /// 8-byte IEEE 754 float (`DOUB`)
    Doub,
    /// 8-byte fixed-width ASCII string (`CHAR`)
    Char,
    /// Message marker, zero payload bytes (`MESS`)
    Mess,
    /// 4-byte Fortran logical (`LOGI`)
    Logi,
    /// Count-extension marker, zero payload bytes (`X231`)
    X231,
    /// Fixed-width ASCII string of 1 to 99 bytes (`C001`..`C099`)
    C0nn(u8),
}

impl ElementType {
    /// Parse an element type from the 4 tag bytes of an array header.
    ///
    /// # Errors
    ///
    /// Returns [`SmryError::UnknownType`] for any tag outside the closed
    /// set, including `C000` and `CNNN` tags with non-digit characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use smry::codec::ElementType;
    ///
    /// assert_eq!(ElementType::from_tag(b"INTE").unwrap(), ElementType::Inte);
    /// assert_eq!(ElementType::from_tag(b"C042").unwrap(), ElementType::C0nn(42));
    /// assert!(ElementType::from_tag(b"FOOB").is_err());
    /// ```
    pub fn from_tag(tag: &[u8; 4]) -> Result<Self> {
        match tag {
            b"INTE" => Ok(ElementType::Inte),
            b"REAL" => Ok(ElementType::Real),
            b"DOUB" => Ok(ElementType::Doub),
            b"CHAR" => Ok(ElementType::Char),
            b"MESS" => Ok(ElementType::Mess),
            b"LOGI" => Ok(ElementType::Logi),
            b"X231" => Ok(ElementType::X231),
            &[b'C', h, t, u]
                if h.is_ascii_digit() && t.is_ascii_digit() && u.is_ascii_digit() =>
            {
                let width =
                    (h - b'0') as u16 * 100 + (t - b'0') as u16 * 10 + (u - b'0') as u16;
                match width {
                    1..=99 => Ok(ElementType::C0nn(width as u8)),
                    _ => Err(SmryError::UnknownType { tag: *tag }),
                }
            }
            _ => Err(SmryError::UnknownType { tag: *tag }),
        }
    }

    /// The 4 ASCII tag bytes for this type, the inverse of [`from_tag`].
    ///
    /// [`from_tag`]: ElementType::from_tag
    pub fn tag(&self) -> [u8; 4] {
        match self {
            ElementType::Inte => *b"INTE",
            ElementType::Real => *b"REAL",
            ElementType::Doub => *b"DOUB",
            ElementType::Char => *b"CHAR",
            ElementType::Mess => *b"MESS",
            ElementType::Logi => *b"LOGI",
            ElementType::X231 => *b"X231",
            ElementType::C0nn(width) => [b'C', b'0', b'0' + width / 10, b'0' + width % 10],
        }
    }

    /// Element width in bytes.
    ///
    /// Zero for the payload-free markers `MESS` and `X231`.
    pub fn element_size(&self) -> usize {
        match self {
            ElementType::Inte | ElementType::Real | ElementType::Logi => 4,
            ElementType::Doub | ElementType::Char => 8,
            ElementType::Mess | ElementType::X231 => 0,
            ElementType::C0nn(width) => *width as usize,
        }
    }

    /// Maximum elements per body record as specified by the format manual.
    ///
    /// The reader does not enforce this as an upper bound, see
    /// [`ArrayStream`](crate::io::ArrayStream).
    pub fn block_size(&self) -> usize {
        match self {
            ElementType::Char | ElementType::C0nn(_) => BLOCK_SIZE_STRING,
            _ => BLOCK_SIZE_NUMERIC,
        }
    }
}
