//! Safe archive extraction into job-scoped workspaces.
//!
//! `unpack-core` extracts uploaded archives (zip, tar with optional
//! gzip/bzip2/xz compression, and bare single-stream compressed files) to a
//! destination directory. Every tar member passes through a safety filter
//! that neutralizes path traversal, absolute-path writes, device nodes, and
//! link targets escaping the destination tree. Ambiguous inputs (a `.gz`
//! that is really a renamed `.tar.gz`) are resolved by trying the plain
//! decompression first and falling back to tar.
//!
//! # Examples
//!
//! ```no_run
//! use unpack_core::extract_archive;
//! use unpack_core::report::NoopSink;
//! use unpack_core::types::DestDir;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dest = DestDir::create(Path::new("/data/extract/job-1"))?;
//! let report = extract_archive(Path::new("upload.tar.gz"), &dest, &mut NoopSink)?;
//! println!("extracted {} entries", report.entries_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod filter;
pub mod formats;
pub mod listing;
pub mod report;
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::extract_archive;
pub use error::ExtractError;
pub use error::Result;
pub use formats::compression::CompressionCodec;
pub use formats::detect::ArchiveFormat;
pub use formats::detect::resolve_format;
pub use listing::list_extracted;
pub use report::ExtractionReport;
pub use report::NoopSink;
pub use report::ProgressSink;
pub use types::DestDir;
pub use types::ExtractedEntry;
