//! Console appender writing each record to stderr in one piece.
//!
//! Records are assembled in a stack buffer first, so concurrent records
//! don't interleave and a record costs a single write in the common case.

use std::io::{self, Write as _};

use arrayvec::ArrayVec;
use log::Record;
use log4rs::append::Append;
use log4rs::encode::{self, Color, Encode, Style};

use super::WRITE_BUF_SIZE;

#[derive(Debug)]
pub struct ConsoleAppender {
    encoder: Box<dyn Encode>,
    color: bool,
}

impl ConsoleAppender {
    pub fn new(encoder: Box<dyn Encode>, color: bool) -> Self {
        Self { encoder, color }
    }
}

impl Append for ConsoleAppender {
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        let mut writer = ConsoleWriter::new(self.color);
        self.encoder.encode(&mut writer, record)?;
        Ok(writer.flush()?)
    }

    fn flush(&self) {
        _ = io::stderr().flush();
    }
}

/// Stack-buffered writer to stderr.
///
/// If a write exceeds the remaining capacity, the buffer is flushed first.
#[derive(Debug)]
struct ConsoleWriter {
    color: bool,
    buf: ArrayVec<u8, WRITE_BUF_SIZE>,
}

impl ConsoleWriter {
    const fn new(color: bool) -> Self {
        Self {
            color,
            buf: ArrayVec::new_const(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.buf.remaining_capacity() < buf.len() {
            self.flush()?;
        }

        if buf.len() > self.buf.capacity() {
            io::stderr().write(buf)
        } else {
            self.buf.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(&self.buf)?;
        self.buf.clear();
        stderr.flush()
    }
}

/// The 256-color palette index of a log4rs color.
fn palette_index(color: Color) -> u8 {
    match color {
        Color::Black => 0,
        Color::Red => 1,
        Color::Green => 2,
        Color::Yellow => 3,
        Color::Blue => 4,
        Color::Magenta => 5,
        Color::Cyan => 6,
        Color::White => 7,
    }
}

impl encode::Write for ConsoleWriter {
    fn set_style(&mut self, style: &Style) -> io::Result<()> {
        if !self.color {
            return Ok(());
        }

        self.write_all(b"\x1b[0m")?;
        if let Some(text) = style.text {
            write!(self, "\x1b[38;5;{}m", palette_index(text))?;
        }

        if let Some(background) = style.background {
            write!(self, "\x1b[48;5;{}m", palette_index(background))?;
        }

        if style.intense == Some(true) {
            self.write_all(b"\x1b[1m")?;
        }

        Ok(())
    }
}
