//! Constructors for common sources.
//!
//! A source is any [`IntoIterator`]. The transforms pull from it until it
//! returns [`None`], so a source is consumed exactly once, front to back.
//!
//! Code point and code unit sources may yield any integer type that converts
//! into [`u32`] without loss. Byte sources yield [`u8`].

use std::{iter, slice};

/// A source yielding exactly one value.
///
/// This is the equivalent of passing a single scalar to a transform.
///
/// # Examples
///
/// ```
/// let mut bytes = Vec::new();
/// utf_flow::encode_utf8(utf_flow::source::scalar(0x263A_u32), &mut bytes).expect("valid");
/// assert_eq!(bytes, [0xE2, 0x98, 0xBA]);
/// ```
pub fn scalar<T>(value: T) -> iter::Once<T> {
    iter::once(value)
}

/// A source reading a fixed in-memory sequence.
///
/// # Examples
///
/// ```
/// let units = [0x61_u16, 0xD83D, 0xDE00];
/// let mut cps = Vec::new();
/// utf_flow::utf16_to_code_points(utf_flow::source::array(&units), &mut cps).expect("valid units");
/// assert_eq!(cps, [0x61, 0x1F600]);
/// ```
pub fn array<T: Copy>(slice: &[T]) -> iter::Copied<slice::Iter<'_, T>> {
    slice.iter().copied()
}

/// A source reading a string as UTF-16 code units.
pub fn text(s: &str) -> std::str::EncodeUtf16<'_> {
    s.encode_utf16()
}

/// A source reading a string as code points.
pub fn chars(s: &str) -> impl Iterator<Item = u32> + '_ {
    s.chars().map(u32::from)
}
