//! Helpers for working with text indexed by UTF-16 code units.
//!
//! Some environments measure text in UTF-16 code units and expose code
//! points only through helpers like these. They are built on top of the
//! UTF-16 transforms.

use crate::classify::{Numeric, assert_code_point};
use crate::error::Result;
use crate::sink::{TextSink, from_fn};
use crate::utf16;

/// Builds text from a sequence of code points.
///
/// Every value is validated with [`assert_code_point`], so floats holding
/// integers are accepted as well.
///
/// # Errors
///
/// Returns the error for the first invalid value. Surrogate code points are
/// in range but cannot be represented in a [`String`], so they fail with
/// [`Error::UnpairedSurrogate`](crate::Error::UnpairedSurrogate) unless they
/// form a valid pair.
///
/// # Examples
///
/// ```
/// let text = utf_flow::compat::from_code_points([0xE4_u32, 0x263A, 0x2070E]).expect("valid code points");
/// assert_eq!(text, "ä☺𠜎");
/// ```
pub fn from_code_points<I>(code_points: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: Numeric,
{
    let code_points = code_points.into_iter();
    let mut text = TextSink::with_capacity(code_points.size_hint().0);
    for cp in code_points {
        let cp = assert_code_point(cp)?;
        utf16::from_code_points([cp], &mut text)?;
    }

    text.finish()
}

/// Gets the code point starting at the UTF-16 code unit `index` of `text`.
///
/// If a surrogate pair starts at `index`, the combined code point is
/// returned. If `index` points at the second half of a pair, only that half
/// is returned.
///
/// Returns [`None`] if `index` is out of bounds.
///
/// # Examples
///
/// ```
/// let text = "ä☺𠜎";
/// assert_eq!(utf_flow::compat::code_point_at(text, 2), Some(0x2070E));
/// assert_eq!(utf_flow::compat::code_point_at(text, 3), Some(0xDF0E));
/// assert_eq!(utf_flow::compat::code_point_at(text, 4), None);
/// ```
#[must_use]
pub fn code_point_at(text: &str, index: usize) -> Option<u32> {
    let mut first = None;

    // a code point is at most 2 units, so never read more than that
    let units = text.encode_utf16().skip(index).take(2);
    utf16::to_code_points_trusted(
        units,
        from_fn(|cp: u32| {
            first.get_or_insert(cp);
            Ok(())
        }),
    )
    .ok()?;

    first
}

/// Provides [`code_point_at`] as a method.
pub trait CodePointExt {
    /// Gets the code point starting at the UTF-16 code unit `index`.
    ///
    /// See [`code_point_at`] for details.
    #[must_use]
    fn code_point_at(&self, index: usize) -> Option<u32>;
}

impl CodePointExt for str {
    fn code_point_at(&self, index: usize) -> Option<u32> {
        code_point_at(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind};

    const TEXT: &str = "ä☺𠜎️☁️";
    const CODE_POINTS: &[u32] = &[0xE4, 0x263A, 0x2070E, 0xFE0F, 0x2601, 0xFE0F];

    #[test]
    fn from_code_points_known() {
        let text = from_code_points(CODE_POINTS.iter().copied()).expect("valid code points");
        assert_eq!(text, TEXT);
    }

    #[test]
    fn from_code_points_floats() {
        let text = from_code_points([72.0_f64, 105.0]).expect("integer floats are fine");
        assert_eq!(text, "Hi");
    }

    #[test]
    fn from_code_points_rejects() {
        let err = from_code_points([0x61_u32, 0x110000]).expect_err("out of range");
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = from_code_points([f64::NAN]).expect_err("not a number");
        assert_eq!(err.kind(), ErrorKind::Argument);

        let err = from_code_points([0xD800_u32]).expect_err("lone surrogate");
        assert!(matches!(err, Error::UnpairedSurrogate(0xD800)), "wrong error: {err:?}");
    }

    #[test]
    fn from_code_points_empty() {
        let text = from_code_points(std::iter::empty::<u32>()).expect("empty is valid");
        assert_eq!(text, "");
    }

    #[test]
    fn code_point_at_known() {
        assert_eq!(code_point_at(TEXT, 0), Some(0xE4));
        assert_eq!(code_point_at(TEXT, 1), Some(0x263A));
        assert_eq!(code_point_at(TEXT, 2), Some(CODE_POINTS[2]));
        assert_eq!(code_point_at(TEXT, 3), Some(0xDF0E), "second half of a pair");
        assert_eq!(code_point_at(TEXT, 4), Some(0xFE0F));
    }

    #[test]
    fn code_point_at_out_of_bounds() {
        let len = TEXT.encode_utf16().count();
        assert_eq!(code_point_at(TEXT, len - 1), Some(0xFE0F));
        assert_eq!(code_point_at(TEXT, len), None);
        assert_eq!(code_point_at("", 0), None);
    }

    #[test]
    fn code_point_at_method() {
        assert_eq!(TEXT.code_point_at(2), Some(0x2070E));
    }
}
