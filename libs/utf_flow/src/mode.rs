//! Compile-time selection of input validation.
//!
//! Every transform is generic over a [`Validate`] mode. [`Strict`] checks
//! every code point and code unit before using it. [`Trusted`] skips those
//! checks for callers that already validated their data; out-of-range input
//! then produces unspecified values instead of an error, but never panics.
//!
//! The structural checks of the UTF-8 decoder (illegal starting bytes and
//! truncated sequences) are not validation and apply in both modes.

use crate::classify::{validate_char_code, validate_code_point};
use crate::error::Result;

mod private {
    pub trait Sealed {}
}

/// A validation mode. See the [module docs](self).
///
/// This trait is sealed.
pub trait Validate: private::Sealed {
    /// Checks a code point.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the mode validates and `cp` is out of range.
    fn code_point(cp: u32) -> Result<u32>;

    /// Checks and narrows a UTF-16 code unit.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the mode validates and `unit` is out of range.
    fn char_code(unit: u32) -> Result<u16>;
}

/// Validates all input. This is what the functions without a suffix use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

/// Skips input validation. Used by the `_trusted` functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trusted;

impl private::Sealed for Strict {}
impl private::Sealed for Trusted {}

impl Validate for Strict {
    #[inline]
    fn code_point(cp: u32) -> Result<u32> {
        validate_code_point(cp)
    }

    #[inline]
    fn char_code(unit: u32) -> Result<u16> {
        validate_char_code(unit)
    }
}

impl Validate for Trusted {
    #[inline]
    fn code_point(cp: u32) -> Result<u32> {
        Ok(cp)
    }

    #[inline]
    #[expect(clippy::cast_possible_truncation)]
    fn char_code(unit: u32) -> Result<u16> {
        Ok(unit as u16)
    }
}
