//! Directory tree walking logic
//!
//! - `probe`: lists and classifies directory children (`FilesystemProbe`)
//! - `walker`: sorts, draws and recurses (`TreeWalker`)
//! - `sink`: where rendered fragments go (`OutputSink`)

mod config;
mod entry;
mod probe;
mod sink;
mod traversal;
mod walker;

pub use config::{ErrorPolicy, WalkerConfig};
pub use entry::{Category, DirectoryEntry, EntryKind, sort_entries};
pub use probe::{FilesystemProbe, HostProbe};
pub use sink::{OutputSink, RenderSummary};
pub use traversal::RenderState;
pub use walker::TreeWalker;
