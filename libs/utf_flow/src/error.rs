//! Error handling types.
//!
//! Every transform in this crate shares one error type. [`TruncatedError`] is
//! additionally exposed on its own since it is the one error meant to be
//! recovered from.

use std::{fmt, io};

use arrayvec::ArrayVec;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Potential errors to encounter when converting between code points, UTF-8
/// bytes, and UTF-16 code units.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A numeric value handed to a validating conversion was NaN, infinite, or
    /// had a fractional part.
    #[error("illegal {what}: {value} is not an integer")]
    NotInteger { what: &'static str, value: f64 },
    /// A code point was outside of `0..=0x10FFFF`.
    #[error("illegal code point: {0}")]
    CodePoint(i128),
    /// A UTF-16 code unit was outside of `0..=0xFFFF`.
    #[error("illegal char code: {0}")]
    CharCode(i128),
    /// A UTF-8 sequence started with a byte that cannot start a sequence.
    #[error("illegal starting byte: {0:#04x}")]
    StartByte(u8),
    /// A surrogate without its counterpart cannot be rendered as text.
    #[error("unpaired surrogate: {0:#06x}")]
    UnpairedSurrogate(u16),
    /// The source ended in the middle of a multi-byte UTF-8 sequence.
    #[error(transparent)]
    Truncated(#[from] TruncatedError),
    /// A bounded sink ran out of space.
    #[error("sink capacity exhausted")]
    Capacity,
    /// The error originated from an [`io::Write`] sink.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value was not of an acceptable shape, f.e. not an integer.
    Argument,
    /// A value was well-typed but outside of its legal domain.
    Range,
    /// A multi-byte sequence was cut short by the end of the source.
    Truncated,
    /// The sink refused a value.
    Sink,
}

impl Error {
    /// Gets the broad kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInteger { .. } => ErrorKind::Argument,
            Self::CodePoint(_)
            | Self::CharCode(_)
            | Self::StartByte(_)
            | Self::UnpairedSurrogate(_) => ErrorKind::Range,
            Self::Truncated(_) => ErrorKind::Truncated,
            Self::Capacity | Self::Io(_) => ErrorKind::Sink,
        }
    }

    /// Gets the truncated sequence if this is a [`Error::Truncated`].
    #[must_use]
    pub fn as_truncated(&self) -> Option<&TruncatedError> {
        match self {
            Self::Truncated(err) => Some(err),
            _ => None,
        }
    }
}

/// A UTF-8 source was exhausted before a multi-byte sequence was complete.
///
/// Holds the leading byte and every continuation byte read before the source
/// ran out, in read order. Callers can hold onto these bytes and prepend them
/// to the next chunk of input, which is what
/// [`ChunkDecoder`](crate::stream::ChunkDecoder) does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("truncated utf-8 sequence: {}", hex_list(.bytes))]
pub struct TruncatedError {
    bytes: ArrayVec<u8, 4>,
}

impl TruncatedError {
    /// Creates a new error from the bytes read so far.
    ///
    /// At most 4 bytes are kept.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().take(4).collect(),
        }
    }

    /// The bytes of the incomplete sequence.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Converts this error into the incomplete sequence.
    #[must_use]
    pub fn into_bytes(self) -> ArrayVec<u8, 4> {
        self.bytes
    }
}

fn hex_list(bytes: &[u8]) -> impl fmt::Display + '_ {
    struct HexList<'a>(&'a [u8]);

    impl fmt::Display for HexList<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut iter = self.0.iter();
            if let Some(first) = iter.next() {
                write!(f, "{first:#04x}")?;
                for b in iter {
                    write!(f, ", {b:#04x}")?;
                }
            }

            Ok(())
        }
    }

    HexList(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_message_lists_bytes() {
        let err = TruncatedError::new(&[0xF0, 0xA0, 0x9C]);
        assert_eq!(
            err.to_string(),
            "truncated utf-8 sequence: 0xf0, 0xa0, 0x9c"
        );
    }

    #[test]
    fn truncated_keeps_at_most_four() {
        let err = TruncatedError::new(&[1, 2, 3, 4, 5]);
        assert_eq!(err.bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn kinds() {
        assert_eq!(Error::CodePoint(0x110000).kind(), ErrorKind::Range);
        assert_eq!(Error::StartByte(0xFF).kind(), ErrorKind::Range);
        assert_eq!(
            Error::NotInteger {
                what: "code point",
                value: f64::NAN
            }
            .kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            Error::from(TruncatedError::new(&[0xC3])).kind(),
            ErrorKind::Truncated
        );
        assert_eq!(Error::Capacity.kind(), ErrorKind::Sink);
    }
}
