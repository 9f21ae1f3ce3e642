//! Twig - a tree command that lists symlinks but never follows them

pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{ProbeError, TraversalError};
pub use output::{JsonFormatter, OutputConfig, StreamingFormatter, print_json};
pub use tree::{
    Category, DirectoryEntry, EntryKind, ErrorPolicy, FilesystemProbe, HostProbe, OutputSink,
    RenderSummary, TreeWalker, WalkerConfig,
};
