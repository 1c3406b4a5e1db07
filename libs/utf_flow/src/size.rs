//! Calculates UTF-8 sizes without producing any output.

use crate::classify::byte_len;
use crate::error::Result;
use crate::mode::{Strict, Trusted, Validate};
use crate::sink::from_fn;
use crate::utf16;

/// Counts of a UTF-16 input measured as UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Utf8Len {
    /// The amount of code points after combining surrogate pairs.
    pub code_points: usize,
    /// The total byte length of those code points encoded as UTF-8.
    pub bytes: usize,
}

/// Calculates the amount of bytes needed to encode code points as UTF-8.
///
/// # Errors
///
/// Returns [`Error::CodePoint`](crate::Error::CodePoint) if a code point is
/// out of range.
///
/// # Examples
///
/// ```
/// let len = utf_flow::calculate_utf8([0x61_u32, 0xE4, 0x263A, 0x1F600]).expect("valid code points");
/// assert_eq!(len, 1 + 2 + 3 + 4);
/// ```
pub fn calculate_utf8<S>(src: S) -> Result<usize>
where
    S: IntoIterator,
    S::Item: Into<u32>,
{
    calculate_utf8_with::<Strict, S>(src)
}

/// Calculates the amount of bytes needed to encode code points as UTF-8
/// without validating them.
///
/// Code points above [`MAX_CODE_POINT`](crate::MAX_CODE_POINT) count as 4
/// bytes.
#[must_use]
pub fn calculate_utf8_trusted<S>(src: S) -> usize
where
    S: IntoIterator,
    S::Item: Into<u32>,
{
    src.into_iter().map(|cp| byte_len(cp.into())).sum()
}

/// Calculates the amount of bytes needed to encode code points as UTF-8 with
/// the validation mode `V`.
///
/// # Errors
///
/// Returns [`Err`] if `V` rejects a code point.
pub fn calculate_utf8_with<V, S>(src: S) -> Result<usize>
where
    V: Validate,
    S: IntoIterator,
    S::Item: Into<u32>,
{
    let mut len = 0usize;
    for cp in src {
        len += byte_len(V::code_point(cp.into())?);
    }

    Ok(len)
}

/// Calculates the amount of code points and UTF-8 bytes UTF-16 code units
/// convert to.
///
/// The result is the same as counting the output of
/// [`utf16_to_code_points`](crate::utf16_to_code_points) and
/// [`encode_utf16_to_utf8`](crate::encode_utf16_to_utf8).
///
/// # Errors
///
/// Returns [`Error::CharCode`](crate::Error::CharCode) if a unit is out of
/// range.
///
/// # Examples
///
/// ```
/// let len = utf_flow::calculate_utf16_as_utf8("ä😀".encode_utf16()).expect("valid text");
/// assert_eq!(len.code_points, 2);
/// assert_eq!(len.bytes, 6);
/// ```
pub fn calculate_utf16_as_utf8<S>(src: S) -> Result<Utf8Len>
where
    S: IntoIterator,
    S::Item: Into<u32>,
{
    calculate_utf16_as_utf8_with::<Strict, S>(src)
}

/// Calculates the amount of code points and UTF-8 bytes UTF-16 code units
/// convert to without validating the units.
#[must_use]
pub fn calculate_utf16_as_utf8_trusted<S>(src: S) -> Utf8Len
where
    S: IntoIterator,
    S::Item: Into<u32>,
{
    // the trusted conversion only fails if the sink does, which this one never does
    calculate_utf16_as_utf8_with::<Trusted, S>(src).unwrap_or_default()
}

/// Calculates the amount of code points and UTF-8 bytes UTF-16 code units
/// convert to with the validation mode `V`.
///
/// # Errors
///
/// Returns [`Err`] if `V` rejects a unit.
pub fn calculate_utf16_as_utf8_with<V, S>(src: S) -> Result<Utf8Len>
where
    V: Validate,
    S: IntoIterator,
    S::Item: Into<u32>,
{
    let mut len = Utf8Len::default();
    utf16::to_code_points_with::<V, _, _>(
        src,
        from_fn(|cp: u32| {
            len.code_points += 1;
            len.bytes += byte_len(cp);
            Ok(())
        }),
    )?;

    Ok(len)
}
