//! Writing code points in any [`Encoding`].

use std::io::{self, Write};
use std::marker::PhantomData;

use utf_flow::sink::{IoSink, from_fn};
use utf_flow::source::scalar;
use utf_flow::{Sink, Validate, utf8, utf16};

use crate::encoding::{ByteOrder, Encoding};

/// A [`Sink`] that encodes code points and writes them to `W`.
///
/// Each code point is checked by the validation mode `V`.
#[derive(Debug)]
pub struct Output<V, W> {
    encoding: Encoding,
    writer: W,
    count: usize,
    _mode: PhantomData<V>,
}

impl<V: Validate, W: Write> Output<V, W> {
    pub fn new(encoding: Encoding, writer: W) -> Self {
        Self {
            encoding,
            writer,
            count: 0,
            _mode: PhantomData,
        }
    }

    /// Flushes the writer and returns how many code points were written.
    pub fn finish(mut self) -> io::Result<usize> {
        if self.encoding == Encoding::Points && self.count != 0 {
            self.writer.write_all(b"\n")?;
        }

        self.writer.flush()?;
        Ok(self.count)
    }

    fn put_units(&mut self, order: ByteOrder, cp: u32) -> utf_flow::Result<()> {
        let writer = &mut self.writer;
        utf16::from_code_points_with::<V, _, _>(
            scalar(cp),
            from_fn(|unit: u16| Ok(writer.write_all(&order.write(unit))?)),
        )
    }

    fn put_point(&mut self, cp: u32) -> utf_flow::Result<()> {
        let cp = V::code_point(cp)?;
        let sep = if self.count == 0 { "" } else { " " };
        write!(self.writer, "{sep}U+{cp:04X}")?;
        Ok(())
    }
}

impl<V: Validate, W: Write> Sink<u32> for Output<V, W> {
    fn put(&mut self, cp: u32) -> utf_flow::Result<()> {
        match self.encoding {
            Encoding::Utf8 => utf8::encode_with::<V, _, _>(scalar(cp), IoSink(&mut self.writer))?,
            Encoding::Utf16le => self.put_units(ByteOrder::Little, cp)?,
            Encoding::Utf16be => self.put_units(ByteOrder::Big, cp)?,
            Encoding::Points => self.put_point(cp)?,
        }

        self.count += 1;
        Ok(())
    }
}
