//! Core types: validated destination directories and extracted entries.

mod dest_dir;
mod entry;

pub use dest_dir::DestDir;
pub use entry::ExtractedEntry;
