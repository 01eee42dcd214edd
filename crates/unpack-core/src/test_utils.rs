//! Test utilities for building archives, including deliberately hostile ones.
//!
//! The tar builder here writes raw GNU headers instead of going through
//! `tar::Builder`, because the builder API refuses the absolute and
//! `..`-bearing member names the safety filter tests need.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

/// Builder for TAR test archives with arbitrary (including unsafe) names.
///
/// # Examples
///
/// ```
/// use unpack_core::test_utils::TarTestBuilder;
///
/// let tar_data = TarTestBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .build();
/// ```
pub struct TarTestBuilder {
    data: Vec<u8>,
}

impl TarTestBuilder {
    /// Creates a new TAR test builder.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Adds a regular file with mode 0o644. The name is stored verbatim,
    /// leading slashes and `..` components included.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        write_name(&mut header, path);
        header.set_cksum();
        self.append(&header, data);
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        write_name(&mut header, path);
        header.set_cksum();
        self.append(&header, &[]);
        self
    }

    /// Adds a symlink; the target is stored verbatim, absolute or not.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        write_name(&mut header, path);
        write_link_name(&mut header, target);
        header.set_cksum();
        self.append(&header, &[]);
        self
    }

    /// Adds a hardlink to another member.
    #[must_use]
    pub fn add_hardlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Link);
        write_name(&mut header, path);
        write_link_name(&mut header, target);
        header.set_cksum();
        self.append(&header, &[]);
        self
    }

    /// Adds a character device node.
    #[must_use]
    pub fn add_char_device(mut self, path: &str, major: u32, minor: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o666);
        header.set_entry_type(tar::EntryType::Char);
        header.set_device_major(major).unwrap();
        header.set_device_minor(minor).unwrap();
        write_name(&mut header, path);
        header.set_cksum();
        self.append(&header, &[]);
        self
    }

    /// Adds a block device node.
    #[must_use]
    pub fn add_block_device(mut self, path: &str, major: u32, minor: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o666);
        header.set_entry_type(tar::EntryType::Block);
        header.set_device_major(major).unwrap();
        header.set_device_minor(minor).unwrap();
        write_name(&mut header, path);
        header.set_cksum();
        self.append(&header, &[]);
        self
    }

    /// Adds a FIFO (named pipe).
    #[must_use]
    pub fn add_fifo(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Fifo);
        write_name(&mut header, path);
        header.set_cksum();
        self.append(&header, &[]);
        self
    }

    /// Builds and returns the TAR archive data.
    #[must_use]
    pub fn build(mut self) -> Vec<u8> {
        // Two zero blocks mark end of archive.
        self.data.extend_from_slice(&[0u8; 1024]);
        self.data
    }

    fn append(&mut self, header: &tar::Header, data: &[u8]) {
        self.data.extend_from_slice(header.as_bytes());
        self.data.extend_from_slice(data);
        let partial = data.len() % 512;
        if partial != 0 {
            self.data.extend_from_slice(&vec![0u8; 512 - partial]);
        }
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the member name into the raw GNU header field, bypassing the
/// relative-path checks in `Header::set_path`.
fn write_name(header: &mut tar::Header, path: &str) {
    let gnu = header.as_gnu_mut().unwrap();
    assert!(path.len() < gnu.name.len(), "test name too long: {path}");
    gnu.name[..path.len()].copy_from_slice(path.as_bytes());
}

fn write_link_name(header: &mut tar::Header, target: &str) {
    let gnu = header.as_gnu_mut().unwrap();
    assert!(
        target.len() < gnu.linkname.len(),
        "test link target too long: {target}"
    );
    gnu.linkname[..target.len()].copy_from_slice(target.as_bytes());
}

/// Builder for ZIP test archives.
///
/// # Examples
///
/// ```
/// use unpack_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_file("file.txt", b"content")
///     .add_directory("dir/")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file to the archive.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Gzip-compresses a byte slice.
#[must_use]
pub fn gzip_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder =
        flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Bzip2-compresses a byte slice.
#[must_use]
pub fn bzip2_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Xz-compresses a byte slice.
#[must_use]
pub fn xz_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tar_builder_roundtrip() {
        let data = TarTestBuilder::new()
            .add_directory("d/")
            .add_file("d/f.txt", b"payload")
            .build();

        let mut archive = tar::Archive::new(&data[..]);
        let names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["d/", "d/f.txt"]);
    }

    #[test]
    fn test_tar_builder_keeps_unsafe_names() {
        let data = TarTestBuilder::new()
            .add_file("/abs.txt", b"x")
            .add_file("../up.txt", b"y")
            .build();

        let mut archive = tar::Archive::new(&data[..]);
        let mut entries = archive.entries().unwrap();
        let first = entries.next().unwrap().unwrap();
        assert_eq!(first.path_bytes().as_ref(), b"/abs.txt");
        let second = entries.next().unwrap().unwrap();
        assert_eq!(second.path_bytes().as_ref(), b"../up.txt");
    }

    #[test]
    fn test_compress_helpers_roundtrip() {
        use std::io::Read;

        let original = b"sample stream";
        let mut out = Vec::new();
        flate2::read::GzDecoder::new(&gzip_compress(original)[..])
            .read_to_end(&mut out)
            .unwrap();
        assert_eq!(out, original);
    }
}
