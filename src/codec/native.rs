//! Endian conversion between on-disk and host representations.
//!
//! Everything in the file format is big-endian. These functions are
//! type-aware memcpys: numeric elements are byte-swapped as needed for the
//! host, character elements pass through unchanged, and the payload-free
//! markers move nothing.

use crate::codec::ElementType;
use crate::error::{Result, SmryError};

/// Convert `elems` elements from on-disk (big-endian) to host representation.
///
/// `src` holds the raw bytes as read from disk, `dst` receives the
/// host-order bytes. Both must hold at least
/// `elems * dtype.element_size()` bytes.
///
/// # Errors
///
/// Returns [`SmryError::InvalidArgs`] if either buffer is too short.
///
/// # Examples
///
/// ```
/// use smry::codec::{to_native, ElementType};
///
/// let disk = [0x00, 0x00, 0x00, 0x2a];
/// let mut host = [0u8; 4];
/// to_native(&mut host, &disk, ElementType::Inte, 1).unwrap();
/// assert_eq!(i32::from_ne_bytes(host), 42);
/// ```
pub fn to_native(dst: &mut [u8], src: &[u8], dtype: ElementType, elems: usize) -> Result<()> {
    check_lengths(dst, src, dtype, elems)?;

    match dtype {
        ElementType::Mess | ElementType::X231 => {}
        ElementType::Char | ElementType::C0nn(_) => {
            let nbytes = elems * dtype.element_size();
            dst[..nbytes].copy_from_slice(&src[..nbytes]);
        }
        ElementType::Inte | ElementType::Real | ElementType::Logi => {
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)).take(elems) {
                let word = u32::from_be_bytes(s.try_into().unwrap());
                d.copy_from_slice(&word.to_ne_bytes());
            }
        }
        ElementType::Doub => {
            for (d, s) in dst.chunks_exact_mut(8).zip(src.chunks_exact(8)).take(elems) {
                let word = u64::from_be_bytes(s.try_into().unwrap());
                d.copy_from_slice(&word.to_ne_bytes());
            }
        }
    }

    Ok(())
}

/// Convert `elems` elements from host to on-disk (big-endian) representation.
///
/// The host-to-disk inverse of [`to_native`].
///
/// # Errors
///
/// Returns [`SmryError::InvalidArgs`] if either buffer is too short.
pub fn to_disk(dst: &mut [u8], src: &[u8], dtype: ElementType, elems: usize) -> Result<()> {
    check_lengths(dst, src, dtype, elems)?;

    match dtype {
        ElementType::Mess | ElementType::X231 => {}
        ElementType::Char | ElementType::C0nn(_) => {
            let nbytes = elems * dtype.element_size();
            dst[..nbytes].copy_from_slice(&src[..nbytes]);
        }
        ElementType::Inte | ElementType::Real | ElementType::Logi => {
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)).take(elems) {
                let word = u32::from_ne_bytes(s.try_into().unwrap());
                d.copy_from_slice(&word.to_be_bytes());
            }
        }
        ElementType::Doub => {
            for (d, s) in dst.chunks_exact_mut(8).zip(src.chunks_exact(8)).take(elems) {
                let word = u64::from_ne_bytes(s.try_into().unwrap());
                d.copy_from_slice(&word.to_be_bytes());
            }
        }
    }

    Ok(())
}

fn check_lengths(dst: &[u8], src: &[u8], dtype: ElementType, elems: usize) -> Result<()> {
    let nbytes = elems * dtype.element_size();
    if dst.len() < nbytes {
        return Err(SmryError::InvalidArgs {
            msg: format!(
                "destination holds {} bytes, {} elements of {:?} need {}",
                dst.len(),
                elems,
                dtype,
                nbytes
            ),
        });
    }
    if src.len() < nbytes {
        return Err(SmryError::InvalidArgs {
            msg: format!(
                "source holds {} bytes, {} elements of {:?} need {}",
                src.len(),
                elems,
                dtype,
                nbytes
            ),
        });
    }
    Ok(())
}
