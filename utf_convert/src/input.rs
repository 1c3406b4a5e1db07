//! Reading input in any [`Encoding`] as code points.

use std::io::{self, Read};

use anyhow::Context as _;
use utf_flow::classify::{assert_code_point, byte_len, is_high_surrogate};
use utf_flow::sink::from_fn;
use utf_flow::stream::ChunkDecoder;
use utf_flow::{Sink, Utf8Len, Validate, size, utf16};

use crate::encoding::{ByteOrder, Encoding};

/// How much input is read at once.
const CHUNK_SIZE: usize = 64 * 1024;

/// Reads all of `reader` and passes the decoded code points to `dst`.
///
/// Returns the amount of bytes read.
pub fn read_code_points<V, R, D>(encoding: Encoding, reader: R, dst: D) -> anyhow::Result<u64>
where
    V: Validate,
    R: Read,
    D: Sink<u32>,
{
    match encoding {
        Encoding::Utf8 => read_utf8(reader, dst),
        Encoding::Utf16le => read_utf16::<V, _, _>(ByteOrder::Little, reader, dst),
        Encoding::Utf16be => read_utf16::<V, _, _>(ByteOrder::Big, reader, dst),
        Encoding::Points => read_points(reader, dst),
    }
}

fn read_utf8<R: Read, D: Sink<u32>>(reader: R, mut dst: D) -> anyhow::Result<u64> {
    let mut decoder = ChunkDecoder::new();
    let total = for_each_chunk(reader, |chunk| {
        decoder.decode(chunk, &mut dst)?;
        Ok(())
    })?;

    decoder.finish()?;
    Ok(total)
}

fn read_utf16<V, R, D>(order: ByteOrder, reader: R, mut dst: D) -> anyhow::Result<u64>
where
    V: Validate,
    R: Read,
    D: Sink<u32>,
{
    let mut units = Utf16Units::new(order);
    let mut buf = Vec::new();
    let total = for_each_chunk(reader, |chunk| {
        buf.clear();
        units.feed(chunk, &mut buf);
        utf16::to_code_points_with::<V, _, _>(buf.iter().copied(), &mut dst)?;
        Ok(())
    })?;

    buf.clear();
    units.finish(&mut buf)?;
    utf16::to_code_points_with::<V, _, _>(buf, &mut dst)?;
    Ok(total)
}

fn read_points<R: Read, D: Sink<u32>>(mut reader: R, mut dst: D) -> anyhow::Result<u64> {
    let mut text = String::new();
    let total = reader
        .read_to_string(&mut text)
        .context("code point input must be valid utf-8")?;

    for token in text.split_whitespace() {
        dst.put(parse_code_point(token)?)?;
    }

    Ok(total as u64)
}

/// Measures all of `reader` as UTF-8 without keeping the decoded input.
pub fn measure<V, R>(encoding: Encoding, reader: R) -> anyhow::Result<Utf8Len>
where
    V: Validate,
    R: Read,
{
    let mut len = Utf8Len::default();
    let Some(order) = encoding.utf16_order() else {
        let counter = from_fn(|cp: u32| {
            len.code_points += 1;
            len.bytes += byte_len(V::code_point(cp)?);
            Ok(())
        });

        read_code_points::<V, _, _>(encoding, reader, counter)?;
        return Ok(len);
    };

    // a trailing high surrogate is held back, so every chunk measures independently
    let mut units = Utf16Units::new(order);
    let mut buf = Vec::new();
    for_each_chunk(reader, |chunk| {
        buf.clear();
        units.feed(chunk, &mut buf);
        add_len(&mut len, size::calculate_utf16_as_utf8_with::<V, _>(buf.iter().copied())?);
        Ok(())
    })?;

    buf.clear();
    units.finish(&mut buf)?;
    add_len(&mut len, size::calculate_utf16_as_utf8_with::<V, _>(buf)?);
    Ok(len)
}

fn add_len(total: &mut Utf8Len, len: Utf8Len) {
    total.code_points += len.code_points;
    total.bytes += len.bytes;
}

fn for_each_chunk<R, F>(mut reader: R, mut f: F) -> anyhow::Result<u64>
where
    R: Read,
    F: FnMut(&[u8]) -> anyhow::Result<()>,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err).context("cannot read input"),
        };

        let chunk = buf.get(..read).context("reader returned an invalid length")?;
        f(chunk).with_context(|| format!("invalid input after byte offset {total}"))?;
        total += read as u64;
    }

    Ok(total)
}

/// Parses a single code point in any of the supported notations.
///
/// The value is checked to be in range, regardless of validation mode, since
/// there is no sensible value to substitute.
fn parse_code_point(token: &str) -> anyhow::Result<u32> {
    let hex = token
        .strip_prefix("U+")
        .or_else(|| token.strip_prefix("u+"))
        .or_else(|| token.strip_prefix("0x"))
        .or_else(|| token.strip_prefix("0X"));

    let value = match hex {
        Some(hex) => i128::from_str_radix(hex, 16),
        None => token.parse::<i128>(),
    };

    let value = value.with_context(|| format!("`{token}` is not a code point"))?;
    Ok(assert_code_point(value)?)
}

/// Splits a byte stream into UTF-16 code units.
///
/// Chunk boundaries may split a code unit or a surrogate pair. Both are held
/// back until the next chunk.
#[derive(Debug)]
pub struct Utf16Units {
    order: ByteOrder,
    odd: Option<u8>,
    high: Option<u16>,
}

impl Utf16Units {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            odd: None,
            high: None,
        }
    }

    /// Appends the complete code units in `chunk` to `out`.
    ///
    /// A trailing high surrogate is held back, so `out` should only contain
    /// units of the current chunk.
    pub fn feed(&mut self, chunk: &[u8], out: &mut Vec<u16>) {
        if chunk.is_empty() {
            return;
        }

        out.extend(self.high.take());

        let mut bytes = chunk;
        if let Some(first) = self.odd.take()
            && let Some((&second, rest)) = bytes.split_first()
        {
            out.push(self.order.read([first, second]));
            bytes = rest;
        }

        let (pairs, rest) = bytes.as_chunks::<2>();
        out.extend(pairs.iter().map(|&pair| self.order.read(pair)));
        self.odd = rest.first().copied();

        if out.last().is_some_and(|&unit| is_high_surrogate(unit)) {
            self.high = out.pop();
        }
    }

    /// Appends any held back surrogate to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the input ended in the middle of a code unit.
    pub fn finish(self, out: &mut Vec<u16>) -> anyhow::Result<()> {
        out.extend(self.high);
        match self.odd {
            Some(byte) => anyhow::bail!("input ends with half a utf-16 code unit: {byte:#04x}"),
            None => Ok(()),
        }
    }
}
