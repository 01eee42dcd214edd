//! Per-member safety filtering for tar extraction.
//!
//! Every archive member is screened before it touches the filesystem. The
//! filter is a pure function from member metadata to a [`MemberDecision`];
//! it never performs I/O, which keeps the neutralization rules independently
//! testable. A malicious or malformed member is neutralized or skipped, never
//! allowed to abort extraction of the remaining legitimate content.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Coarse classification of a tar member for filtering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Regular file contents.
    File,
    /// Directory entry.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Hard link to another member.
    HardLink,
    /// Character/block device, FIFO, or other special node.
    Special,
}

/// Decision for a single archive member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDecision {
    /// The member is safe as stored; extract it unchanged.
    PassThrough,
    /// The member is extracted under a neutralized name and/or link target.
    Rewrite {
        /// Destination-relative path to extract to.
        path: PathBuf,
        /// Replacement link target, for link members.
        link_target: Option<PathBuf>,
    },
    /// The member is not extracted at all; the run continues.
    Skip {
        /// Why the member was rejected.
        reason: &'static str,
    },
}

/// Screens one archive member.
///
/// Rules:
/// 1. Device, FIFO, and other special members are skipped outright.
/// 2. Leading path separators are stripped from member names, so absolute
///    names become relative to the destination root.
/// 3. Absolute symlink/hardlink targets are rewritten to relative form by
///    stripping their leading separators.
/// 4. A member whose name still steps outside the destination (`..`) after
///    stripping is skipped; containment is non-negotiable.
/// 5. Everything else passes through unchanged.
#[must_use]
pub fn screen_member(
    kind: MemberKind,
    path: &Path,
    link_target: Option<&Path>,
) -> MemberDecision {
    if kind == MemberKind::Special {
        return MemberDecision::Skip {
            reason: "special member (device/FIFO) is never extracted",
        };
    }

    let stripped_path = strip_leading_separators(path);
    if stripped_path.as_os_str().is_empty() {
        return MemberDecision::Skip {
            reason: "member name is empty after neutralization",
        };
    }
    if escapes_destination(&stripped_path) {
        return MemberDecision::Skip {
            reason: "member name traverses outside the destination",
        };
    }
    let path_rewritten = stripped_path.as_path() != path;

    let mut target_rewritten = false;
    let new_target = link_target.map(|target| {
        if target.is_absolute() {
            target_rewritten = true;
            strip_leading_separators(target)
        } else {
            target.to_path_buf()
        }
    });

    if path_rewritten || target_rewritten {
        MemberDecision::Rewrite {
            path: stripped_path,
            link_target: new_target,
        }
    } else {
        MemberDecision::PassThrough
    }
}

/// Removes root/prefix components so the path is relative.
fn strip_leading_separators(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}

/// Returns `true` when any `..` component remains in the path.
fn escapes_destination(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::ParentDir))
}
