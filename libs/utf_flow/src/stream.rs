//! Decoding UTF-8 that arrives in chunks.
//!
//! A multi-byte sequence may be split across two chunks. [`ChunkDecoder`]
//! catches the [`TruncatedError`] at the end of a chunk, keeps its bytes, and
//! decodes them together with the start of the next chunk.

use std::{iter, slice};

use arrayvec::ArrayVec;

use crate::error::{Error, Result, TruncatedError};
use crate::mode::{Strict, Trusted, Validate};
use crate::sink::Sink;
use crate::{convert, utf8};

type ChunkSource<'a> =
    iter::Chain<iter::Copied<slice::Iter<'a, u8>>, iter::Copied<slice::Iter<'a, u8>>>;

/// Decodes UTF-8 input split into several chunks.
///
/// # Examples
///
/// ```
/// use utf_flow::stream::ChunkDecoder;
///
/// let mut decoder = ChunkDecoder::new();
/// let mut cps = Vec::new();
///
/// // "☺" is split after its first byte
/// decoder.decode(&[0x61, 0xE2], &mut cps).expect("valid so far");
/// decoder.decode(&[0x98, 0xBA], &mut cps).expect("valid so far");
/// decoder.finish().expect("nothing left over");
///
/// assert_eq!(cps, [0x61, 0x263A]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChunkDecoder {
    pending: ArrayVec<u8, 4>,
}

impl ChunkDecoder {
    /// Creates a new decoder without any pending bytes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: ArrayVec::new_const(),
        }
    }

    /// The bytes of an incomplete sequence carried over from the last chunk.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Decodes the next chunk into code points.
    ///
    /// If the chunk ends in the middle of a sequence, the sequence is held
    /// back and this still returns [`Ok`].
    ///
    /// # Errors
    ///
    /// Returns the non-truncation errors of [`decode_utf8`](crate::decode_utf8)
    /// and any error of the sink unchanged, even a truncation. Pending bytes
    /// are dropped in that case.
    pub fn decode<D: Sink<u32>>(&mut self, chunk: &[u8], dst: D) -> Result<()> {
        self.feed(chunk, dst, |src, dst| utf8::decode(src, dst))
    }

    /// Decodes the next chunk into UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns the non-truncation errors of
    /// [`decode_utf8_to_utf16`](crate::decode_utf8_to_utf16). Pending bytes
    /// are dropped in that case.
    pub fn decode_to_utf16<D: Sink<u16>>(&mut self, chunk: &[u8], dst: D) -> Result<()> {
        self.decode_to_utf16_with::<Strict, D>(chunk, dst)
    }

    /// Decodes the next chunk into UTF-16 code units without validating the
    /// decoded code points.
    ///
    /// # Errors
    ///
    /// Returns the structural errors of [`decode_utf8`](crate::decode_utf8)
    /// other than truncation, or the error of the sink.
    pub fn decode_to_utf16_trusted<D: Sink<u16>>(&mut self, chunk: &[u8], dst: D) -> Result<()> {
        self.decode_to_utf16_with::<Trusted, D>(chunk, dst)
    }

    /// Decodes the next chunk into UTF-16 code units with the validation
    /// mode `V`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if decoding fails for reasons other than truncation,
    /// `V` rejects a code point, or the sink fails.
    pub fn decode_to_utf16_with<V: Validate, D: Sink<u16>>(
        &mut self,
        chunk: &[u8],
        dst: D,
    ) -> Result<()> {
        self.feed(chunk, dst, |src, dst| {
            convert::decode_utf8_to_utf16_with::<V, _, _>(src, dst)
        })
    }

    /// Finishes decoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`] with the pending bytes if the last chunk
    /// ended in the middle of a sequence.
    pub fn finish(self) -> Result<()> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            Err(TruncatedError::new(&self.pending).into())
        }
    }

    fn feed<D, F>(&mut self, chunk: &[u8], dst: D, decode: F) -> Result<()>
    where
        F: FnOnce(ChunkSource<'_>, &mut Tracked<D>) -> Result<()>,
    {
        let carried = std::mem::take(&mut self.pending);
        let src = carried.iter().copied().chain(chunk.iter().copied());
        let mut dst = Tracked {
            inner: dst,
            failed: false,
        };

        // only a truncation raised by the decoder itself is carried over
        match decode(src, &mut dst) {
            Err(Error::Truncated(err)) if !dst.failed => {
                log::trace!("carrying {} byte(s) into the next chunk", err.bytes().len());
                self.pending = err.into_bytes();
                Ok(())
            },
            res => res,
        }
    }
}

/// Remembers whether the wrapped sink ever failed.
struct Tracked<D> {
    inner: D,
    failed: bool,
}

impl<T, D: Sink<T>> Sink<T> for Tracked<D> {
    fn put(&mut self, value: T) -> Result<()> {
        let res = self.inner.put(value);
        self.failed |= res.is_err();
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const TEXT: &str = "ä☺𠜎️☁️ and some ascii";

    #[test]
    fn every_split_point() {
        let bytes = TEXT.as_bytes();
        let expected: Vec<u32> = TEXT.chars().map(u32::from).collect();

        for split in 0..=bytes.len() {
            let (a, b) = bytes.split_at(split);

            let mut decoder = ChunkDecoder::new();
            let mut out = Vec::new();
            decoder.decode(a, &mut out).expect("first chunk");
            decoder.decode(b, &mut out).expect("second chunk");
            decoder.finish().expect("complete input");

            assert_eq!(out, expected, "split at {split}");
        }
    }

    #[test]
    fn single_byte_chunks_to_utf16() {
        let expected: Vec<u16> = TEXT.encode_utf16().collect();

        let mut decoder = ChunkDecoder::new();
        let mut out = Vec::new();
        for b in TEXT.bytes() {
            decoder.decode_to_utf16(&[b], &mut out).expect("valid so far");
        }

        decoder.finish().expect("complete input");
        assert_eq!(out, expected);
    }

    #[test]
    fn pending_is_exposed() {
        let mut decoder = ChunkDecoder::new();
        decoder.decode(&[0xF0, 0xA0], Vec::new()).expect("truncation is held back");
        assert_eq!(decoder.pending(), &[0xF0, 0xA0]);

        decoder.decode(&[0x9C], Vec::new()).expect("truncation is held back");
        assert_eq!(decoder.pending(), &[0xF0, 0xA0, 0x9C]);

        let err = decoder.finish().expect_err("incomplete at the end");
        assert_eq!(err.kind(), ErrorKind::Truncated);
        assert_eq!(err.as_truncated().map(TruncatedError::bytes), Some(&[0xF0, 0xA0, 0x9C][..]));
    }

    #[test]
    fn sink_truncation_is_not_carried() {
        let mut decoder = ChunkDecoder::new();
        let mut seen = Vec::new();
        let err = decoder
            .decode(
                b"abc",
                crate::sink::from_fn(|cp: u32| {
                    seen.push(cp);
                    if cp == 0x62 {
                        Err(TruncatedError::new(&[0xEE]).into())
                    } else {
                        Ok(())
                    }
                }),
            )
            .expect_err("the sink error must be returned");

        assert_eq!(err.as_truncated().map(TruncatedError::bytes), Some(&[0xEE][..]));
        assert_eq!(seen, [0x61, 0x62], "no more values after the sink failed");
        assert_eq!(decoder.pending(), &[] as &[u8], "nothing is carried over");
    }

    #[test]
    fn trusted_to_utf16() {
        // 0xF4 0x90 0x80 0x80 decodes to 0x110000, which only trusted mode accepts
        let bytes = [0x61, 0xF4, 0x90, 0x80, 0x80];

        let mut decoder = ChunkDecoder::new();
        let err = decoder.decode_to_utf16(&bytes, Vec::new()).expect_err("out of range");
        assert_eq!(err.kind(), ErrorKind::Range);

        let mut decoder = ChunkDecoder::new();
        let mut out = Vec::new();
        let (a, b) = bytes.split_at(3);
        decoder.decode_to_utf16_trusted(a, &mut out).expect("trusted never validates");
        decoder.decode_to_utf16_trusted(b, &mut out).expect("trusted never validates");
        decoder.finish().expect("complete input");

        assert_eq!(out.len(), 3, "a single unit and a pair: {out:x?}");
        assert_eq!(out.first(), Some(&0x61));
    }

    #[test]
    fn illegal_byte_is_reported() {
        let mut decoder = ChunkDecoder::new();
        decoder.decode(&[0xC3], Vec::new()).expect("truncation is held back");

        let err = decoder.decode(&[0xA4, 0xFF], Vec::new()).expect_err("illegal byte");
        assert!(matches!(err, Error::StartByte(0xFF)), "wrong error: {err:?}");
    }
}
