//! Converts between UTF-16 code units and code points.
//!
//! A high surrogate immediately followed by a low surrogate is combined into
//! a single code point. Any other unit, including unpaired surrogates, is
//! passed through as a code point of the same value.

use crate::classify::{
    LOW_SURROGATE_START, SURROGATE_START, combine_surrogates, is_high_surrogate, is_low_surrogate,
};
use crate::error::Result;
use crate::mode::{Strict, Trusted, Validate};
use crate::sink::Sink;

/// Converts UTF-16 code units to code points, combining surrogate pairs.
///
/// # Errors
///
/// Returns [`Error::CharCode`](crate::Error::CharCode) if a unit is out of
/// range or the error of the sink if it fails.
///
/// # Examples
///
/// ```
/// let mut cps = Vec::new();
/// utf_flow::utf16_to_code_points([0x61_u16, 0xD83D, 0xDE00, 0xD83D], &mut cps).expect("valid units");
/// assert_eq!(cps, [0x61, 0x1F600, 0xD83D]);
/// ```
pub fn to_code_points<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u32>,
{
    to_code_points_with::<Strict, S, D>(src, dst)
}

/// Converts UTF-16 code units to code points without validating them.
///
/// Units above `0xFFFF` are truncated to 16 bits.
///
/// # Errors
///
/// Returns the error of the sink if it fails.
pub fn to_code_points_trusted<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u32>,
{
    to_code_points_with::<Trusted, S, D>(src, dst)
}

/// Converts UTF-16 code units to code points with the validation mode `V`.
///
/// # Errors
///
/// Returns [`Err`] if `V` rejects a unit or the sink fails.
pub fn to_code_points_with<V, S, D>(src: S, mut dst: D) -> Result<()>
where
    V: Validate,
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u32>,
{
    let mut units = src.into_iter().map(|u| V::char_code(u.into()));

    // a unit that was read as a potential low surrogate but turned out not to be one
    let mut pending = None;
    loop {
        let c1 = match pending.take() {
            Some(c1) => c1,
            None => match units.next().transpose()? {
                Some(c1) => c1,
                None => break,
            },
        };

        if is_high_surrogate(c1)
            && let Some(c2) = units.next().transpose()?
        {
            if is_low_surrogate(c2) {
                dst.put(combine_surrogates(c1, c2))?;
                continue;
            }

            pending = Some(c2);
        }

        dst.put(u32::from(c1))?;
    }

    Ok(())
}

/// Converts code points to UTF-16 code units, splitting supplementary code
/// points into surrogate pairs.
///
/// # Errors
///
/// Returns [`Error::CodePoint`](crate::Error::CodePoint) if a code point is
/// out of range or the error of the sink if it fails.
///
/// # Examples
///
/// ```
/// let mut units = Vec::new();
/// utf_flow::code_points_to_utf16([0x61_u32, 0x1F600], &mut units).expect("valid code points");
/// assert_eq!(units, [0x61, 0xD83D, 0xDE00]);
/// ```
pub fn from_code_points<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u16>,
{
    from_code_points_with::<Strict, S, D>(src, dst)
}

/// Converts code points to UTF-16 code units without validating them.
///
/// Code points above [`MAX_CODE_POINT`](crate::MAX_CODE_POINT) produce an
/// unspecified pair of units.
///
/// # Errors
///
/// Returns the error of the sink if it fails.
pub fn from_code_points_trusted<S, D>(src: S, dst: D) -> Result<()>
where
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u16>,
{
    from_code_points_with::<Trusted, S, D>(src, dst)
}

/// Converts code points to UTF-16 code units with the validation mode `V`.
///
/// # Errors
///
/// Returns [`Err`] if `V` rejects a code point or the sink fails.
pub fn from_code_points_with<V, S, D>(src: S, mut dst: D) -> Result<()>
where
    V: Validate,
    S: IntoIterator,
    S::Item: Into<u32>,
    D: Sink<u16>,
{
    for cp in src {
        let cp = V::code_point(cp.into())?;
        match u16::try_from(cp) {
            Ok(unit) => dst.put(unit)?,
            Err(_) => {
                let (high, low) = split_surrogates(cp);
                dst.put(high)?;
                dst.put(low)?;
            },
        }
    }

    Ok(())
}

/// Splits a supplementary code point into its surrogate pair.
#[expect(clippy::cast_possible_truncation, reason = "only for trusted input")]
fn split_surrogates(cp: u32) -> (u16, u16) {
    let cp = cp - 0x10000;
    let high = ((cp >> 10) as u16).wrapping_add(SURROGATE_START);
    let low = ((cp % 0x400) as u16) + LOW_SURROGATE_START;
    (high, low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind};

    const TEXT: &str = "ä☺𠜎️☁️";
    const CODE_POINTS: &[u32] = &[0xE4, 0x263A, 0x2070E, 0xFE0F, 0x2601, 0xFE0F];

    #[test]
    fn text_to_code_points() {
        let mut out = Vec::new();
        to_code_points(TEXT.encode_utf16(), &mut out).expect("valid text");
        assert_eq!(out, CODE_POINTS);
    }

    #[test]
    fn code_points_to_text() {
        let mut out = Vec::new();
        from_code_points(CODE_POINTS.iter().copied(), &mut out).expect("valid code points");
        assert_eq!(out, TEXT.encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn emoji_pair() {
        let mut out = Vec::new();
        to_code_points([0xD83D_u16, 0xDE00], &mut out).expect("valid units");
        assert_eq!(out, [0x1F600]);
    }

    #[test]
    fn lone_high_at_end() {
        let mut out = Vec::new();
        to_code_points([0xD83D_u16], &mut out).expect("valid units");
        assert_eq!(out, [0xD83D]);
    }

    #[test]
    fn high_followed_by_non_surrogate() {
        let mut out = Vec::new();
        to_code_points([0xD83D_u16, 0x61, 0x62], &mut out).expect("valid units");
        assert_eq!(out, [0xD83D, 0x61, 0x62], "the follow-up unit must not be dropped");
    }

    #[test]
    fn high_followed_by_high_pair() {
        let mut out = Vec::new();
        to_code_points([0xD83D_u16, 0xD83D, 0xDE00], &mut out).expect("valid units");
        assert_eq!(out, [0xD83D, 0x1F600], "the second high surrogate still pairs");
    }

    #[test]
    fn low_surrogates_pass_through() {
        let mut out = Vec::new();
        to_code_points([0xDE00_u16, 0xDE00], &mut out).expect("valid units");
        assert_eq!(out, [0xDE00, 0xDE00]);
    }

    #[test]
    fn rejects_large_unit() {
        let mut out = Vec::new();
        let err = to_code_points([0x61_u32, 0x10000], &mut out).expect_err("not a code unit");
        assert!(matches!(err, Error::CharCode(0x10000)), "wrong error: {err:?}");
        assert_eq!(out, [0x61]);
    }

    #[test]
    fn rejects_large_unit_after_high() {
        let err = to_code_points([0xD83D_u32, 0x10000], Vec::new()).expect_err("not a code unit");
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn trusted_truncates_units() {
        let mut out = Vec::new();
        to_code_points_trusted([0x10061_u32], &mut out).expect("trusted never validates");
        assert_eq!(out, [0x61]);
    }

    #[test]
    fn split_boundaries() {
        assert_eq!(split_surrogates(0x10000), (0xD800, 0xDC00));
        assert_eq!(split_surrogates(0x1F600), (0xD83D, 0xDE00));
        assert_eq!(split_surrogates(0x10FFFF), (0xDBFF, 0xDFFF));
    }

    #[test]
    fn rejects_out_of_range_code_point() {
        let mut out = Vec::new();
        let err = from_code_points([0x110000_u32], &mut out).expect_err("out of range");
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(out.is_empty(), "nothing may be written");
    }

    #[test]
    fn trusted_does_not_panic() {
        let mut out = Vec::new();
        from_code_points_trusted([u32::MAX], &mut out).expect("trusted never validates");
        assert_eq!(out.len(), 2);
    }
}
