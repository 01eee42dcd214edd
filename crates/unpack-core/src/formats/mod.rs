//! Archive format handling: detection, codecs, and per-format extraction.

pub mod common;
pub mod compression;
pub mod detect;
pub mod plain;
pub mod tar;
pub mod zip;
