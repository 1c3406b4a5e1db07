//! Converts between code points and UTF-8 bytes.
//!
//! Encoding packs each code point into 1 to 4 bytes:
//!
//! | Code point range     | Bytes                                 |
//! |----------------------|---------------------------------------|
//! | `0x0` - `0x7F`       | `0xxxxxxx`                            |
//! | `0x80` - `0x7FF`     | `110xxxxx 10xxxxxx`                   |
//! | `0x800` - `0xFFFF`   | `1110xxxx 10xxxxxx 10xxxxxx`          |
//! | `0x10000` - ...      | `11110xxx 10xxxxxx 10xxxxxx 10xxxxxx` |
//!
//! Decoding applies this in reverse, looking only at the leading byte to
//! determine the sequence length. Continuation bytes are not checked for
//! their `10` prefix, and over-long encodings or encoded surrogates are
//! decoded as-is.

use crate::error::{Error, Result, TruncatedError};
use crate::mode::{Strict, Trusted, Validate};
use crate::sink::Sink;

/// Encodes code points as UTF-8 bytes.
///
/// Each code point is validated before any of its bytes are written.
///
/// # Errors
///
/// Returns [`Error::CodePoint`] if a code point is out of range or the error
/// of the sink if it fails.
///
/// # Examples
///
/// ```
/// let mut bytes = Vec::new();
/// utf_flow::encode_utf8([0xE4_u32, 0x263A, 0x2070E], &mut bytes).expect("valid code points");
/// assert_eq!(bytes, [0xC3, 0xA4, 0xE2, 0x98, 0xBA, 0xF0, 0xA0, 0x9C, 0x8E]);
/// ```
pub fn encode<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u8>,
{
    encode_with::<Strict, S, D>(src, dst)
}

/// Encodes code points as UTF-8 bytes without validating them.
///
/// Code points above [`MAX_CODE_POINT`](crate::MAX_CODE_POINT) are packed
/// into 4 bytes with their excess bits dropped.
///
/// # Errors
///
/// Returns the error of the sink if it fails.
pub fn encode_trusted<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u8>,
{
    encode_with::<Trusted, S, D>(src, dst)
}

/// Encodes code points as UTF-8 bytes with the validation mode `V`.
///
/// # Errors
///
/// Returns [`Err`] if `V` rejects a code point or the sink fails.
pub fn encode_with<V, S, D>(src: S, mut dst: D) -> Result<()>
where
    V: Validate,
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u8>,
{
    for cp in src {
        let cp = V::code_point(cp.into())?;
        put_code_point(&mut dst, cp)?;
    }

    Ok(())
}

/// Writes the UTF-8 bytes of a single code point.
#[expect(clippy::cast_possible_truncation, reason = "values are masked")]
fn put_code_point<D: Sink<u8>>(dst: &mut D, cp: u32) -> Result<()> {
    match cp {
        0..0x80 => dst.put(cp as u8),
        0x80..0x800 => {
            dst.put((((cp >> 6) & 0x1F) | 0xC0) as u8)?;
            dst.put(((cp & 0x3F) | 0x80) as u8)
        },
        0x800..0x10000 => {
            dst.put((((cp >> 12) & 0x0F) | 0xE0) as u8)?;
            dst.put((((cp >> 6) & 0x3F) | 0x80) as u8)?;
            dst.put(((cp & 0x3F) | 0x80) as u8)
        },
        _ => {
            dst.put((((cp >> 18) & 0x07) | 0xF0) as u8)?;
            dst.put((((cp >> 12) & 0x3F) | 0x80) as u8)?;
            dst.put((((cp >> 6) & 0x3F) | 0x80) as u8)?;
            dst.put(((cp & 0x3F) | 0x80) as u8)
        },
    }
}

/// Decodes UTF-8 bytes into code points.
///
/// There is no trusted variant: the checks performed here are required to
/// find the sequence boundaries at all.
///
/// # Errors
///
/// - [`Error::StartByte`] if a sequence starts with a continuation byte or
///   with `0xF8..=0xFF`. No further bytes are read in that case.
/// - [`Error::Truncated`] if the source ends in the middle of a sequence. The
///   error holds the bytes of the incomplete sequence.
/// - The error of the sink if it fails.
///
/// # Examples
///
/// ```
/// let mut cps = Vec::new();
/// let err = utf_flow::decode_utf8([0x61, 0xF0, 0xA0, 0x9C], &mut cps).expect_err("truncated");
/// assert_eq!(cps, [0x61]);
/// assert_eq!(err.as_truncated().map(|t| t.bytes()), Some(&[0xF0, 0xA0, 0x9C][..]));
/// ```
pub fn decode<S, D>(src: S, mut dst: D) -> Result<()>
where
    S: IntoIterator<Item = u8>,
    D: Sink<u32>,
{
    let mut src = src.into_iter();
    while let Some(a) = src.next() {
        let cp = if a & 0x80 == 0 {
            u32::from(a)
        } else if a & 0xE0 == 0xC0 {
            let [a, b] = read_sequence(&mut src, a)?;
            (u32::from(a & 0x1F) << 6) | u32::from(b & 0x3F)
        } else if a & 0xF0 == 0xE0 {
            let [a, b, c] = read_sequence(&mut src, a)?;
            (u32::from(a & 0x0F) << 12) | (u32::from(b & 0x3F) << 6) | u32::from(c & 0x3F)
        } else if a & 0xF8 == 0xF0 {
            let [a, b, c, d] = read_sequence(&mut src, a)?;
            (u32::from(a & 0x07) << 18)
                | (u32::from(b & 0x3F) << 12)
                | (u32::from(c & 0x3F) << 6)
                | u32::from(d & 0x3F)
        } else {
            return Err(Error::StartByte(a));
        };

        dst.put(cp)?;
    }

    Ok(())
}

/// Reads the continuation bytes of an `N` byte sequence starting with `lead`.
fn read_sequence<I, const N: usize>(src: &mut I, lead: u8) -> Result<[u8; N], TruncatedError>
where
    I: Iterator<Item = u8>,
{
    let mut seq = [lead; N];
    let mut read = 1usize;
    while read < N {
        let Some(b) = src.next() else {
            return Err(TruncatedError::new(&seq[..read]));
        };

        seq[read] = b;
        read += 1;
    }

    Ok(seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const CODE_POINTS: &[u32] = &[0xE4, 0x263A, 0x2070E, 0xFE0F, 0x2601, 0xFE0F];
    const BYTES: &[u8] = &[
        0xC3, 0xA4, //
        0xE2, 0x98, 0xBA, //
        0xF0, 0xA0, 0x9C, 0x8E, //
        0xEF, 0xB8, 0x8F, //
        0xE2, 0x98, 0x81, //
        0xEF, 0xB8, 0x8F,
    ];

    #[test]
    fn encode_known() {
        let mut out = Vec::new();
        encode(CODE_POINTS.iter().copied(), &mut out).expect("valid code points");
        assert_eq!(out, BYTES);
    }

    #[test]
    fn decode_known() {
        let mut out = Vec::new();
        decode(BYTES.iter().copied(), &mut out).expect("valid utf-8");
        assert_eq!(out, CODE_POINTS);
    }

    #[test]
    fn encode_matches_std() {
        const CHARS: &[char] = &[
            '\0', 'a', '\u{7F}', '\u{80}', 'ä', '\u{7FF}', '\u{800}', '☺', '\u{FFFF}',
            '\u{10000}', '𠜎', char::MAX,
        ];

        for &c in CHARS {
            let mut out = Vec::new();
            encode([c], &mut out).expect("chars are valid");

            let mut buf = [0u8; 4];
            assert_eq!(out, c.encode_utf8(&mut buf).as_bytes(), "encoding of {c:?}");
        }
    }

    #[test]
    fn encode_rejects_out_of_range() {
        let mut out = Vec::new();
        let err = encode([0x41_u32, 0x110000], &mut out).expect_err("0x110000 is out of range");

        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(out, [0x41], "no bytes of the invalid code point");
    }

    #[test]
    fn encode_trusted_masks() {
        let mut out = Vec::new();
        encode_trusted([0x110000_u32], &mut out).expect("trusted never validates");
        assert_eq!(out, [0xF4, 0x90, 0x80, 0x80]);
    }

    #[test]
    fn decode_truncated_four_byte() {
        let mut out = Vec::new();
        let err = decode([0xF0, 0xA0, 0x9C], &mut out).expect_err("missing last byte");

        assert_eq!(err.kind(), ErrorKind::Truncated);
        assert_eq!(err.as_truncated().map(TruncatedError::bytes), Some(&[0xF0, 0xA0, 0x9C][..]));
        assert!(out.is_empty(), "nothing was complete");
    }

    #[test]
    fn decode_truncated_lead_only() {
        for lead in [0xC3, 0xE2, 0xF0] {
            let err = decode([0x61, lead], Vec::new()).expect_err("lone lead byte");
            assert_eq!(err.as_truncated().map(TruncatedError::bytes), Some(&[lead][..]));
        }
    }

    #[test]
    fn decode_illegal_start_byte() {
        for lead in [0x80, 0xBF, 0xF8, 0xFF] {
            let err = decode([lead], Vec::new()).expect_err("illegal lead byte");
            assert!(matches!(err, Error::StartByte(b) if b == lead), "wrong error: {err:?}");
        }
    }

    #[test]
    fn decode_stops_at_illegal_start_byte() {
        let mut src = [0x61, 0xFF, 0x62].into_iter();
        let mut out = Vec::new();
        decode(&mut src, &mut out).expect_err("illegal lead byte");

        assert_eq!(out, [0x61]);
        assert_eq!(src.next(), Some(0x62), "must not read past the illegal byte");
    }

    #[test]
    fn decode_is_permissive() {
        // over-long encoding of '/' and an encoded surrogate
        let mut out = Vec::new();
        decode([0xC0, 0xAF, 0xED, 0xA0, 0x80], &mut out).expect("not checked");
        assert_eq!(out, [0x2F, 0xD800]);
    }
}
