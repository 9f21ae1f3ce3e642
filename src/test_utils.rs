//! Test utilities: temporary directory trees, an in-memory probe and a
//! recording sink.
//!
//! This module is only compiled for tests and benchmarks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::ProbeError;
use crate::tree::{Category, DirectoryEntry, FilesystemProbe, OutputSink};

/// A temporary directory for building test trees.
///
/// The directory is removed when dropped. Permissions changed with
/// [`TestDir::set_mode`] are restored first so cleanup cannot fail.
pub struct TestDir {
    dir: TempDir,
    #[cfg(unix)]
    locked: RefCell<Vec<PathBuf>>,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            dir,
            #[cfg(unix)]
            locked: RefCell::new(Vec::new()),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add a directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `link` whose raw target text is `target`.
    #[cfg(unix)]
    pub fn add_symlink(&self, target: &str, link: &str) -> PathBuf {
        let link_path = self.dir.path().join(link);
        std::os::unix::fs::symlink(target, &link_path).expect("Failed to create symlink");
        link_path
    }

    /// Change permission bits. Restored to `0o755` on drop.
    #[cfg(unix)]
    pub fn set_mode(&self, path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path)
            .expect("Failed to stat path")
            .permissions();
        perms.set_mode(mode);
        fs::set_permissions(path, perms).expect("Failed to set permissions");
        self.locked.borrow_mut().push(path.to_path_buf());
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl Drop for TestDir {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;

        for path in self.locked.borrow().iter() {
            let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
        }
    }
}

/// Permission checks are meaningless for root, which can read anything.
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        nix::unistd::geteuid().is_root()
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Probe that serves listings from a map and records what was listed.
#[derive(Debug, Default)]
pub struct MemoryProbe {
    dirs: HashMap<PathBuf, Result<Vec<DirectoryEntry>, ProbeError>>,
    listed: RefCell<Vec<PathBuf>>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>, entries: Vec<DirectoryEntry>) -> Self {
        self.dirs.insert(path.into(), Ok(entries));
        self
    }

    pub fn with_failure(mut self, path: impl Into<PathBuf>, error: ProbeError) -> Self {
        self.dirs.insert(path.into(), Err(error));
        self
    }

    /// Paths passed to `list_children`, in call order.
    pub fn listed(&self) -> Vec<PathBuf> {
        self.listed.borrow().clone()
    }
}

impl FilesystemProbe for MemoryProbe {
    fn list_children(&self, path: &Path) -> Result<Vec<DirectoryEntry>, ProbeError> {
        self.listed.borrow_mut().push(path.to_path_buf());
        self.dirs
            .get(path)
            .cloned()
            .unwrap_or(Err(ProbeError::NotFound))
    }
}

/// Sink that keeps every fragment with its category.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub lines: Vec<Vec<(String, Category)>>,
    current: Vec<(String, Category)>,
}

impl RecordingSink {
    /// Plain text of all lines, newline-terminated.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            for (text, _) in line {
                out.push_str(text);
            }
            out.push('\n');
        }
        out
    }
}

impl OutputSink for RecordingSink {
    fn write_fragment(&mut self, text: &str, category: Category) -> std::io::Result<()> {
        self.current.push((text.to_string(), category));
        Ok(())
    }

    fn end_line(&mut self) -> std::io::Result<()> {
        self.lines.push(std::mem::take(&mut self.current));
        Ok(())
    }
}
