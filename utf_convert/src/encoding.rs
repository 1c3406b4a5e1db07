use clap::ValueEnum;

/// A text encoding understood on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    /// UTF-8 bytes.
    Utf8,
    /// UTF-16 code units, little endian.
    Utf16le,
    /// UTF-16 code units, big endian.
    Utf16be,
    /// Whitespace-separated code points, either as `U+XXXX`, `0xXXXX`, or
    /// decimal.
    Points,
}

/// Byte order of UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl Encoding {
    /// The byte order, if this is a UTF-16 encoding.
    pub fn utf16_order(self) -> Option<ByteOrder> {
        match self {
            Self::Utf16le => Some(ByteOrder::Little),
            Self::Utf16be => Some(ByteOrder::Big),
            Self::Utf8 | Self::Points => None,
        }
    }
}

impl ByteOrder {
    pub fn read(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    pub fn write(self, unit: u16) -> [u8; 2] {
        match self {
            Self::Little => unit.to_le_bytes(),
            Self::Big => unit.to_be_bytes(),
        }
    }
}
