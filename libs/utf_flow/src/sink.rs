//! The [`Sink`] trait and common implementations.

use std::io;

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Consumes the values produced by a transform, one at a time and in order.
///
/// Returning [`Err`] aborts the transform, which then returns the error
/// unchanged. This is also the only way to stop a transform early.
///
/// Implemented for [`Vec`], [`SmallVec`], [`ArrayVec`], and mutable references
/// to other sinks. Use [`from_fn`] for ad-hoc sinks.
pub trait Sink<T> {
    /// Accepts the next value.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the sink cannot accept the value.
    fn put(&mut self, value: T) -> Result<()>;
}

// this implementation is required so sinks can be reborrowed
impl<T, S: Sink<T> + ?Sized> Sink<T> for &mut S {
    #[inline]
    fn put(&mut self, value: T) -> Result<()> {
        (**self).put(value)
    }
}

impl<T> Sink<T> for Vec<T> {
    #[inline]
    fn put(&mut self, value: T) -> Result<()> {
        self.push(value);
        Ok(())
    }
}

impl<A: smallvec::Array> Sink<A::Item> for SmallVec<A> {
    #[inline]
    fn put(&mut self, value: A::Item) -> Result<()> {
        self.push(value);
        Ok(())
    }
}

/// Fails with [`Error::Capacity`] once the vector is full.
impl<T, const N: usize> Sink<T> for ArrayVec<T, N> {
    #[inline]
    fn put(&mut self, value: T) -> Result<()> {
        self.try_push(value).map_err(|_| Error::Capacity)
    }
}

/// Struct created by [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Creates an ad-hoc [`Sink`] from a function.
///
/// # Examples
///
/// ```
/// let mut total = 0u32;
/// utf_flow::decode_utf8(
///     *b"abc",
///     utf_flow::sink::from_fn(|cp: u32| {
///         total += cp;
///         Ok(())
///     }),
/// )
/// .expect("ascii is valid");
/// assert_eq!(total, 0x61 + 0x62 + 0x63);
/// ```
pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: FnMut(T) -> Result<()>,
{
    FromFn(f)
}

impl<T, F> Sink<T> for FromFn<F>
where
    F: FnMut(T) -> Result<()>,
{
    #[inline]
    fn put(&mut self, value: T) -> Result<()> {
        (self.0)(value)
    }
}

/// A sink that discards values and only counts them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count(pub usize);

impl<T> Sink<T> for Count {
    #[inline]
    fn put(&mut self, _value: T) -> Result<()> {
        self.0 += 1;
        Ok(())
    }
}

/// Writes bytes to an [`io::Write`] implementation.
///
/// Every byte is a separate `write_all` call, so the writer should be
/// buffered.
#[derive(Debug)]
pub struct IoSink<W>(pub W);

impl<W: io::Write> Sink<u8> for IoSink<W> {
    #[inline]
    fn put(&mut self, value: u8) -> Result<()> {
        Ok(self.0.write_all(&[value])?)
    }
}

/// Accumulates UTF-16 code units and renders them as a [`String`] at the end.
///
/// # Examples
///
/// ```
/// use utf_flow::sink::TextSink;
///
/// let mut text = TextSink::new();
/// text.extend_from_slice(&[0x48, 0x69, 0x20]);
/// utf_flow::code_points_to_utf16([0x1F600_u32], &mut text).expect("valid code point");
/// assert_eq!(text.finish().expect("valid utf-16"), "Hi 😀");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextSink {
    units: Vec<u16>,
}

impl TextSink {
    /// Creates a new empty text sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// Creates a new empty text sink with space for at least `capacity` units.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            units: Vec::with_capacity(capacity),
        }
    }

    /// Appends several code units at once.
    pub fn extend_from_slice(&mut self, units: &[u16]) {
        self.units.extend_from_slice(units);
    }

    /// The code units accumulated so far.
    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    /// The amount of code units accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether no code units have been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Renders the accumulated code units as text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnpairedSurrogate`] if the units contain a surrogate
    /// that isn't part of a valid pair.
    pub fn finish(self) -> Result<String> {
        char::decode_utf16(self.units)
            .map(|c| c.map_err(|err| Error::UnpairedSurrogate(err.unpaired_surrogate())))
            .collect()
    }

    /// Renders the accumulated code units as text, replacing unpaired
    /// surrogates with [`char::REPLACEMENT_CHARACTER`].
    #[must_use]
    pub fn finish_lossy(self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

impl Sink<u16> for TextSink {
    #[inline]
    fn put(&mut self, value: u16) -> Result<()> {
        self.units.push(value);
        Ok(())
    }
}
