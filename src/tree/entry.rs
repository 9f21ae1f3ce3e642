//! Directory entries and their display classification

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// Filesystem kind of an entry, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Directory,
    RegularFile,
    Symlink,
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    /// Root of a separately mounted filesystem. Wins over `Directory`.
    MountPoint,
}

impl EntryKind {
    /// Directories and mount points: the kinds the walker may descend into.
    pub fn is_directory(self) -> bool {
        matches!(self, EntryKind::Directory | EntryKind::MountPoint)
    }
}

/// Semantic style of an output fragment. Sinks decide what each looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    MountPoint,
    Directory,
    Symlink,
    BrokenSymlink,
    Executable,
    File,
    PlainText,
}

/// A single child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Whether the current process may list the entry (directories) or read it.
    pub readable: bool,
    /// Whether the current process may execute the entry.
    pub executable: bool,
    /// Raw link text. Present iff `kind == Symlink`.
    pub symlink_target: Option<PathBuf>,
    pub symlink_target_exists: bool,
    /// Whether the entry resolves to a directory when links are followed.
    /// Used only for ordering.
    pub is_dir: bool,
}

impl DirectoryEntry {
    /// Entry for anything that is not a symlink. Use [`DirectoryEntry::symlink`]
    /// for links so the target is always recorded.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        debug_assert!(
            kind != EntryKind::Symlink,
            "symlink entries must be built with DirectoryEntry::symlink"
        );
        Self::with_kind(path.into(), kind)
    }

    fn with_kind(path: PathBuf, kind: EntryKind) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            name,
            is_dir: kind.is_directory(),
            path,
            kind,
            readable: true,
            executable: false,
            symlink_target: None,
            symlink_target_exists: false,
        }
    }

    /// Entry for a symlink with the given raw target.
    pub fn symlink(
        path: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        target_exists: bool,
        target_is_dir: bool,
    ) -> Self {
        let mut entry = Self::with_kind(path.into(), EntryKind::Symlink);
        entry.symlink_target = Some(target.into());
        entry.symlink_target_exists = target_exists;
        entry.is_dir = target_is_dir;
        entry
    }

    pub fn with_readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    pub fn with_executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    /// Display category, evaluated in fixed precedence.
    pub fn category(&self) -> Category {
        match self.kind {
            EntryKind::BlockDevice => Category::BlockDevice,
            EntryKind::CharDevice => Category::CharDevice,
            EntryKind::Fifo => Category::Fifo,
            EntryKind::Socket => Category::Socket,
            EntryKind::MountPoint => Category::MountPoint,
            EntryKind::Directory => Category::Directory,
            EntryKind::Symlink if self.symlink_target_exists => Category::Symlink,
            EntryKind::Symlink => Category::BrokenSymlink,
            EntryKind::RegularFile if self.executable => Category::Executable,
            EntryKind::RegularFile => Category::File,
        }
    }

    /// Final path segment of the link target, not the whole target path.
    pub fn target_name(&self) -> Option<String> {
        self.symlink_target.as_deref().map(last_segment)
    }

    /// Sort key: directories first, then by name.
    pub fn sort_key(&self) -> (bool, &str) {
        (!self.is_dir, &self.name)
    }
}

/// Last component of a path as written: `..` stays `..`, `/` becomes empty.
fn last_segment(path: &Path) -> String {
    match path.components().next_back() {
        Some(Component::Normal(s)) => s.to_string_lossy().to_string(),
        Some(Component::ParentDir) => "..".to_string(),
        _ => String::new(),
    }
}

/// Sort entries in place by `(!is_dir, name)`.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
