//! Compression codec support for archives and bare compressed streams.
//!
//! The same three codecs appear in two roles: as the outer compression of a
//! tar archive (`.tar.gz`, `.tar.bz2`, `.tar.xz`) and as bare single-stream
//! compressed files with no container structure (`.gz`, `.bz2`, `.xz`).

use std::fs::File;
use std::io::Read;

use crate::Result;

/// Compression codec recognized by the extraction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip (deflate) compression.
    Gzip,
    /// Bzip2 (Burrows-Wheeler) compression.
    Bzip2,
    /// Xz (LZMA2) compression.
    Xz,
}

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
/// Bzip2 magic bytes (`BZh`).
const BZIP2_MAGIC: [u8; 3] = [0x42, 0x5a, 0x68];
/// Xz magic bytes.
const XZ_MAGIC: [u8; 6] = [0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];

impl CompressionCodec {
    /// Returns the bare file extension for this codec.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Bzip2 => "bz2",
            Self::Xz => "xz",
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
        }
    }

    /// Maps a bare extension (`gz`, `bz2`, `xz`) to a codec.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "gz" => Some(Self::Gzip),
            "bz2" => Some(Self::Bzip2),
            "xz" => Some(Self::Xz),
            _ => None,
        }
    }

    /// Wraps a reader in the decompressor for this codec.
    #[must_use]
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> Box<dyn Read + 'a> {
        match self {
            Self::Gzip => Box::new(flate2::read::GzDecoder::new(reader)),
            Self::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
            Self::Xz => Box::new(xz2::read::XzDecoder::new(reader)),
        }
    }

    /// Detects the codec of a file from its leading magic bytes.
    ///
    /// Returns `None` when the header matches no known codec (for tar this
    /// means "try reading it uncompressed"). Short files simply fail to
    /// match.
    pub fn sniff(file: &mut File) -> Result<Option<Self>> {
        use std::io::Seek;

        let mut header = [0u8; 6];
        let read = file.read(&mut header)?;
        file.rewind()?;

        Ok(Self::match_magic(&header[..read]))
    }

    fn match_magic(header: &[u8]) -> Option<Self> {
        if header.starts_with(&GZIP_MAGIC) {
            Some(Self::Gzip)
        } else if header.starts_with(&BZIP2_MAGIC) {
            Some(Self::Bzip2)
        } else if header.starts_with(&XZ_MAGIC) {
            Some(Self::Xz)
        } else {
            None
        }
    }
}
