//! Configuration types for the tree walker

/// What to do when a subdirectory's listing fails mid-walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Record the error in the summary and carry on with the next sibling.
    Continue,
}

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// `None` = unlimited, `Some(0)` = list the root's children only.
    pub max_depth: Option<usize>,
    /// Draw branch lines; when off, connectors become blank padding.
    pub draw_lines: bool,
    pub on_error: ErrorPolicy,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            draw_lines: true,
            on_error: ErrorPolicy::Abort,
        }
    }
}
