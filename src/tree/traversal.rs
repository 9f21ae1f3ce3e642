//! Per-level render state and branch drawing.

use super::config::WalkerConfig;

const BRANCH: &str = "├──";
const LAST_BRANCH: &str = "└──";
const PIPE: &str = "│  ";
const BLANK: &str = "   ";

/// Immutable state handed to each recursive call.
///
/// Each descent derives a fresh state; nothing is shared between levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub prefix: String,
    pub depth_remaining: Option<usize>,
    pub draw_lines: bool,
}

impl RenderState {
    /// State for the top-level directory.
    pub fn root(config: &WalkerConfig) -> Self {
        Self {
            prefix: String::new(),
            depth_remaining: config.max_depth,
            draw_lines: config.draw_lines,
        }
    }

    /// Whether children at this level may be expanded.
    pub fn can_descend(&self) -> bool {
        self.depth_remaining.is_none_or(|d| d > 0)
    }

    /// Connector drawn before an entry's name.
    pub fn connector(&self, is_last: bool) -> &'static str {
        match (self.draw_lines, is_last) {
            (false, _) => BLANK,
            (true, false) => BRANCH,
            (true, true) => LAST_BRANCH,
        }
    }

    /// State for the children of an entry at this level.
    pub fn descend(&self, is_last: bool) -> Self {
        let segment = if self.draw_lines && !is_last {
            PIPE
        } else {
            BLANK
        };
        Self {
            prefix: format!("{}{}", self.prefix, segment),
            depth_remaining: self.depth_remaining.map(|d| d.saturating_sub(1)),
            draw_lines: self.draw_lines,
        }
    }
}
