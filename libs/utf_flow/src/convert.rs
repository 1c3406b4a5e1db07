//! Direct conversions between UTF-16 code units and UTF-8 bytes.
//!
//! These chain two transforms: every code point produced by the first one is
//! immediately fed to the second one, so no intermediate buffer is used.
//! Errors of either step are returned unchanged.

use crate::error::Result;
use crate::mode::{Strict, Trusted, Validate};
use crate::sink::{Sink, from_fn};
use crate::source::scalar;
use crate::{utf8, utf16};

/// Encodes UTF-16 code units as UTF-8 bytes.
///
/// # Errors
///
/// Returns [`Error::CharCode`](crate::Error::CharCode) if a unit is out of
/// range or the error of the sink if it fails.
///
/// # Examples
///
/// ```
/// let mut bytes = Vec::new();
/// utf_flow::encode_utf16_to_utf8("ä☺".encode_utf16(), &mut bytes).expect("valid text");
/// assert_eq!(bytes, "ä☺".as_bytes());
/// ```
pub fn encode_utf16_to_utf8<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u8>,
{
    encode_utf16_to_utf8_with::<Strict, S, D>(src, dst)
}

/// Encodes UTF-16 code units as UTF-8 bytes without validating them.
///
/// # Errors
///
/// Returns the error of the sink if it fails.
pub fn encode_utf16_to_utf8_trusted<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u8>,
{
    encode_utf16_to_utf8_with::<Trusted, S, D>(src, dst)
}

/// Encodes UTF-16 code units as UTF-8 bytes with the validation mode `V`.
///
/// # Errors
///
/// Returns [`Err`] if `V` rejects a unit or the sink fails.
pub fn encode_utf16_to_utf8_with<V, S, D>(src: S, mut dst: D) -> Result<()>
where
    V: Validate,
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u8>,
{
    utf16::to_code_points_with::<V, _, _>(
        src,
        from_fn(|cp: u32| utf8::encode_with::<V, _, _>(scalar(cp), &mut dst)),
    )
}

/// Decodes UTF-8 bytes into UTF-16 code units.
///
/// # Errors
///
/// Returns the errors of [`decode_utf8`](crate::decode_utf8), including
/// [`Error::Truncated`](crate::Error::Truncated), as well as
/// [`Error::CodePoint`](crate::Error::CodePoint) if a sequence decodes to a
/// value above [`MAX_CODE_POINT`](crate::MAX_CODE_POINT).
///
/// # Examples
///
/// ```
/// let mut units = Vec::new();
/// utf_flow::decode_utf8_to_utf16("a😀".bytes(), &mut units).expect("valid utf-8");
/// assert_eq!(units, [0x61, 0xD83D, 0xDE00]);
/// ```
pub fn decode_utf8_to_utf16<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator<Item = u8>,
    D: Sink<u16>,
{
    decode_utf8_to_utf16_with::<Strict, S, D>(src, dst)
}

/// Decodes UTF-8 bytes into UTF-16 code units without validating the
/// decoded code points.
///
/// # Errors
///
/// Returns the structural errors of [`decode_utf8`](crate::decode_utf8) or
/// the error of the sink if it fails.
pub fn decode_utf8_to_utf16_trusted<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator<Item = u8>,
    D: Sink<u16>,
{
    decode_utf8_to_utf16_with::<Trusted, S, D>(src, dst)
}

/// Decodes UTF-8 bytes into UTF-16 code units with the validation mode `V`.
///
/// # Errors
///
/// Returns [`Err`] if decoding fails, `V` rejects a code point, or the sink
/// fails.
pub fn decode_utf8_to_utf16_with<V, S, D>(src: S, mut dst: D) -> Result<()>
where
    V: Validate,
    S: IntoIterator<Item = u8>,
    D: Sink<u16>,
{
    utf8::decode(
        src,
        from_fn(|cp: u32| utf16::from_code_points_with::<V, _, _>(scalar(cp), &mut dst)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind};

    const TEXT: &str = "ä☺𠜎️☁️";

    #[test]
    fn encode_text() {
        let mut out = Vec::new();
        encode_utf16_to_utf8(TEXT.encode_utf16(), &mut out).expect("valid text");
        assert_eq!(out, TEXT.as_bytes());
    }

    #[test]
    fn decode_text() {
        let mut out = Vec::new();
        decode_utf8_to_utf16(TEXT.bytes(), &mut out).expect("valid utf-8");
        assert_eq!(out, TEXT.encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn encode_lone_surrogate() {
        // lone surrogates are passed through and encoded like any other code point
        let mut out = Vec::new();
        encode_utf16_to_utf8([0xD800_u16], &mut out).expect("lone surrogates are allowed");
        assert_eq!(out, [0xED, 0xA0, 0x80]);
    }

    #[test]
    fn decode_propagates_truncation() {
        let mut out = Vec::new();
        let err = decode_utf8_to_utf16([0x61, 0xE2, 0x98], &mut out).expect_err("truncated");

        assert_eq!(out, [0x61]);
        match err {
            Error::Truncated(err) => assert_eq!(err.bytes(), &[0xE2, 0x98]),
            _ => panic!("incorrect error kind: {err:?}"),
        }
    }

    #[test]
    fn decode_rejects_large_code_point() {
        // 0xF7 0xBF 0xBF 0xBF decodes to 0x1FFFFF
        let err = decode_utf8_to_utf16([0xF7, 0xBF, 0xBF, 0xBF], Vec::new())
            .expect_err("beyond the unicode range");
        assert!(matches!(err, Error::CodePoint(0x1FFFFF)), "wrong error: {err:?}");
    }

    #[test]
    fn decode_trusted_accepts_large_code_point() {
        let mut out = Vec::new();
        decode_utf8_to_utf16_trusted([0xF7, 0xBF, 0xBF, 0xBF], &mut out)
            .expect("trusted never validates");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn encode_rejects_large_unit() {
        let err = encode_utf16_to_utf8([0x12345_u32], Vec::new()).expect_err("not a unit");
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn encode_trusted_truncates_large_unit() {
        // only the low 16 bits of 0x12345 are kept
        let mut out = Vec::new();
        encode_utf16_to_utf8_trusted([0x12345_u32], &mut out).expect("trusted never validates");
        assert_eq!(out, [0xE2, 0x8D, 0x85]);
    }

    #[test]
    fn encode_trusted_matches_strict_for_text() {
        let mut out = Vec::new();
        encode_utf16_to_utf8_trusted(TEXT.encode_utf16(), &mut out).expect("valid text");
        assert_eq!(out, TEXT.as_bytes());
    }
}
