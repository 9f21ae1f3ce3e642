//! Filesystem access behind a trait so the walker never touches `std::fs` itself

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ProbeError;

use super::entry::{DirectoryEntry, EntryKind};

/// Lists a directory and classifies each child.
///
/// Implementations must classify without following symlinks, and must
/// decide mount-point status independently of directory status.
pub trait FilesystemProbe {
    fn list_children(&self, path: &Path) -> Result<Vec<DirectoryEntry>, ProbeError>;
}

impl<P: FilesystemProbe + ?Sized> FilesystemProbe for &P {
    fn list_children(&self, path: &Path) -> Result<Vec<DirectoryEntry>, ProbeError> {
        (**self).list_children(path)
    }
}

/// Probe backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProbe;

impl FilesystemProbe for HostProbe {
    fn list_children(&self, path: &Path) -> Result<Vec<DirectoryEntry>, ProbeError> {
        let parent = fs::metadata(path)?;
        if !parent.is_dir() {
            return Err(ProbeError::NotADirectory);
        }

        let children = fs::read_dir(path)?.map(|e| e.map(|e| e.path()));
        let entries = classify_all(children, &parent)?;

        tracing::debug!(path = %path.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }
}

/// Classify every listed child. A failed read of the listing fails the whole
/// directory; only per-child stat failures are absorbed.
fn classify_all(
    children: impl IntoIterator<Item = io::Result<PathBuf>>,
    parent: &fs::Metadata,
) -> Result<Vec<DirectoryEntry>, ProbeError> {
    let mut entries = Vec::new();
    for child in children {
        entries.push(probe_entry(&absolute(&child?), parent));
    }
    Ok(entries)
}

/// Classify one child. Failures are folded into a conservative entry.
fn probe_entry(path: &Path, parent: &fs::Metadata) -> DirectoryEntry {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot stat entry");
            return DirectoryEntry::new(path, EntryKind::RegularFile).with_readable(false);
        }
    };

    if meta.file_type().is_symlink() {
        let target = match fs::read_link(path) {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot read link");
                return unreadable_link(path);
            }
        };
        // Resolved only for existence and sort order, never for descent.
        let resolved = fs::metadata(path).ok();
        return DirectoryEntry::symlink(
            path,
            target,
            resolved.is_some(),
            resolved.is_some_and(|m| m.is_dir()),
        );
    }

    let kind = classify(&meta, parent);
    DirectoryEntry::new(path, kind)
        .with_readable(has_access(path, Access::Read))
        .with_executable(kind == EntryKind::RegularFile && has_access(path, Access::Execute))
}

/// A link whose target text cannot be read is shown as broken, pointing at
/// its own name.
fn unreadable_link(path: &Path) -> DirectoryEntry {
    let name = path.file_name().unwrap_or_default();
    DirectoryEntry::symlink(path, name, false, false)
}

#[cfg(unix)]
fn classify(meta: &fs::Metadata, parent: &fs::Metadata) -> EntryKind {
    use std::os::unix::fs::{FileTypeExt, MetadataExt};

    let ft = meta.file_type();
    if ft.is_block_device() {
        EntryKind::BlockDevice
    } else if ft.is_char_device() {
        EntryKind::CharDevice
    } else if ft.is_fifo() {
        EntryKind::Fifo
    } else if ft.is_socket() {
        EntryKind::Socket
    } else if ft.is_dir() && meta.dev() != parent.dev() {
        EntryKind::MountPoint
    } else if ft.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::RegularFile
    }
}

#[cfg(not(unix))]
fn classify(meta: &fs::Metadata, _parent: &fs::Metadata) -> EntryKind {
    if meta.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::RegularFile
    }
}

#[derive(Debug, Clone, Copy)]
enum Access {
    Read,
    Execute,
}

#[cfg(unix)]
fn has_access(path: &Path, access: Access) -> bool {
    use nix::unistd::{AccessFlags, access as check};

    let flags = match access {
        Access::Read => AccessFlags::R_OK,
        Access::Execute => AccessFlags::X_OK,
    };
    check(path, flags).is_ok()
}

#[cfg(not(unix))]
fn has_access(path: &Path, access: Access) -> bool {
    match access {
        Access::Read => fs::metadata(path).is_ok(),
        Access::Execute => false,
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
