//! Classification and validation of single code points and code units.
//!
//! The transforms only ever see integers, so the checks in here are mostly
//! range checks. [`assert_code_point`] and [`assert_char_code`] additionally
//! accept floating point values, which is where non-integer input gets
//! rejected.

use crate::MAX_CODE_POINT;
use crate::error::{Error, Result};

/// First UTF-16 surrogate code unit.
pub const SURROGATE_START: u16 = 0xD800;
/// First UTF-16 low surrogate code unit.
pub const LOW_SURROGATE_START: u16 = 0xDC00;
/// Last UTF-16 surrogate code unit.
pub const SURROGATE_END: u16 = 0xDFFF;

/// Gets the amount of bytes the UTF-8 encoding of `cp` takes up.
///
/// This does not validate `cp`. Anything above `0xFFFF` is reported as 4
/// bytes. Use [`byte_len_of`] for a checked version.
#[must_use]
pub const fn byte_len(cp: u32) -> usize {
    match cp {
        0..0x80 => 1,
        0x80..0x800 => 2,
        0x800..0x10000 => 3,
        _ => 4,
    }
}

/// Gets the amount of bytes the UTF-8 encoding of `cp` takes up.
///
/// # Errors
///
/// Returns [`Error::CodePoint`] if `cp` is greater than [`MAX_CODE_POINT`].
pub fn byte_len_of(cp: u32) -> Result<usize> {
    validate_code_point(cp).map(byte_len)
}

/// Checks that `cp` is a valid code point.
///
/// # Errors
///
/// Returns [`Error::CodePoint`] if `cp` is greater than [`MAX_CODE_POINT`].
pub fn validate_code_point(cp: u32) -> Result<u32> {
    if cp <= MAX_CODE_POINT {
        Ok(cp)
    } else {
        Err(Error::CodePoint(cp.into()))
    }
}

/// Checks that `c` is a valid UTF-16 code unit and narrows it.
///
/// # Errors
///
/// Returns [`Error::CharCode`] if `c` is greater than `0xFFFF`.
pub fn validate_char_code(c: u32) -> Result<u16> {
    u16::try_from(c).map_err(|_| Error::CharCode(c.into()))
}

/// Whether `unit` is any surrogate, high or low.
#[must_use]
pub const fn is_surrogate(unit: u16) -> bool {
    matches!(unit, SURROGATE_START..=SURROGATE_END)
}

/// Whether `unit` is a high (leading) surrogate.
#[must_use]
pub const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, SURROGATE_START..LOW_SURROGATE_START)
}

/// Whether `unit` is a low (trailing) surrogate.
#[must_use]
pub const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, LOW_SURROGATE_START..=SURROGATE_END)
}

/// Combines a surrogate pair into the code point it represents.
///
/// The inputs are not checked to actually be a high and low surrogate.
#[must_use]
pub const fn combine_surrogates(high: u16, low: u16) -> u32 {
    let high = high.wrapping_sub(SURROGATE_START) as u32;
    let low = low.wrapping_sub(LOW_SURROGATE_START) as u32;
    (high << 10).wrapping_add(low).wrapping_add(0x10000)
}

/// Validates a numeric value as a code point.
///
/// Unlike [`validate_code_point`], this accepts any primitive number. Floats
/// must hold an integer value.
///
/// # Errors
///
/// Returns [`Error::NotInteger`] for NaN, infinite, or fractional floats and
/// [`Error::CodePoint`] for values outside of `0..=0x10FFFF`.
///
/// # Examples
///
/// ```
/// use utf_flow::classify::assert_code_point;
///
/// assert_eq!(assert_code_point(0x1F600_u32).ok(), Some(0x1F600));
/// assert_eq!(assert_code_point(65.0_f64).ok(), Some(65));
/// assert!(assert_code_point(-1_i32).is_err());
/// assert!(assert_code_point(f64::NAN).is_err());
/// ```
pub fn assert_code_point<N: Numeric>(value: N) -> Result<u32> {
    let int = value.to_integer("code point")?;
    match u32::try_from(int) {
        Ok(cp) if cp <= MAX_CODE_POINT => Ok(cp),
        _ => Err(Error::CodePoint(int)),
    }
}

/// Validates a numeric value as a UTF-16 code unit.
///
/// Unlike [`validate_char_code`], this accepts any primitive number. Floats
/// must hold an integer value.
///
/// # Errors
///
/// Returns [`Error::NotInteger`] for NaN, infinite, or fractional floats and
/// [`Error::CharCode`] for values outside of `0..=0xFFFF`.
pub fn assert_char_code<N: Numeric>(value: N) -> Result<u16> {
    let int = value.to_integer("char code")?;
    u16::try_from(int).map_err(|_| Error::CharCode(int))
}

mod private {
    pub trait Sealed {}
}

/// Primitive numbers accepted by [`assert_code_point`] and
/// [`assert_char_code`].
///
/// This trait is sealed.
pub trait Numeric: Copy + private::Sealed {
    /// Converts the value to an integer, failing if it isn't integer-valued.
    ///
    /// Integers that don't fit into [`i128`] saturate.
    #[doc(hidden)]
    fn to_integer(self, what: &'static str) -> Result<i128>;
}

macro_rules! impl_numeric_int {
    ($($Ty:ty)*) => { $(
        impl private::Sealed for $Ty {}
        impl Numeric for $Ty {
            fn to_integer(self, _what: &'static str) -> Result<i128> {
                Ok(i128::try_from(self).unwrap_or(i128::MAX))
            }
        }
    )* };
}

macro_rules! impl_numeric_float {
    ($($Ty:ty)*) => { $(
        impl private::Sealed for $Ty {}
        impl Numeric for $Ty {
            #[expect(clippy::cast_possible_truncation)]
            fn to_integer(self, what: &'static str) -> Result<i128> {
                if self.is_finite() && self.fract() == 0.0 {
                    // saturates for values beyond the i128 range, which are out of range anyway
                    Ok(self as i128)
                } else {
                    Err(Error::NotInteger { what, value: self.into() })
                }
            }
        }
    )* };
}

impl_numeric_int!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);
impl_numeric_float!(f32 f64);

impl private::Sealed for char {}
impl Numeric for char {
    fn to_integer(self, _what: &'static str) -> Result<i128> {
        Ok(u32::from(self).into())
    }
}
