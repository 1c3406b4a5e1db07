//! Streaming conversion between UTF-8 bytes, UTF-16 code units, and Unicode
//! code points.
//!
//! Every conversion is a pull-based transform: it takes a source, which is
//! any [`IntoIterator`], and a [`Sink`] that receives the output one value at
//! a time. The transform drives both until the source is exhausted, in a
//! single pass and without buffering.
//!
//! The transforms are:
//!
//! - [`encode_utf8`]: code points to UTF-8 bytes
//! - [`decode_utf8`]: UTF-8 bytes to code points
//! - [`utf16_to_code_points`]: UTF-16 code units to code points
//! - [`code_points_to_utf16`]: code points to UTF-16 code units
//! - [`encode_utf16_to_utf8`]: UTF-16 code units to UTF-8 bytes
//! - [`decode_utf8_to_utf16`]: UTF-8 bytes to UTF-16 code units
//!
//! Additionally, [`calculate_utf8`] and [`calculate_utf16_as_utf8`] measure
//! the UTF-8 length of their input without producing it.
//!
//! Inputs are validated by default. Each transform has a `_trusted` twin
//! that skips validation, and a `_with` version that is generic over the
//! [`Validate`] mode. See [`mode`] for details.
//!
//! # Examples
//!
//! ```
//! let mut bytes = Vec::new();
//! utf_flow::encode_utf16_to_utf8("ä☺𠜎".encode_utf16(), &mut bytes).expect("valid text");
//! assert_eq!(bytes, [0xC3, 0xA4, 0xE2, 0x98, 0xBA, 0xF0, 0xA0, 0x9C, 0x8E]);
//!
//! let mut code_points = Vec::new();
//! utf_flow::decode_utf8(bytes, &mut code_points).expect("valid utf-8");
//! assert_eq!(code_points, [0xE4, 0x263A, 0x2070E]);
//! ```

// for benchmarks
#[cfg(test)]
use criterion as _;

pub mod classify;
pub mod compat;
pub mod convert;
mod error;
pub mod mode;
pub mod sink;
pub mod size;
pub mod source;
pub mod stream;
pub mod utf16;
pub mod utf8;

pub use convert::{decode_utf8_to_utf16, encode_utf16_to_utf8};
pub use error::{Error, ErrorKind, Result, TruncatedError};
pub use mode::{Strict, Trusted, Validate};
pub use sink::Sink;
pub use size::{Utf8Len, calculate_utf8, calculate_utf16_as_utf8};
pub use utf8::{decode as decode_utf8, encode as encode_utf8};
pub use utf16::{from_code_points as code_points_to_utf16, to_code_points as utf16_to_code_points};

/// The highest valid Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;
