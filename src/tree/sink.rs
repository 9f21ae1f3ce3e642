//! Output sink trait and render summary

use crate::error::TraversalError;

use super::entry::Category;

/// Receives rendered lines as `(text, category)` fragments.
///
/// A line is closed by `end_line`. How a category looks is up to the sink.
pub trait OutputSink {
    fn write_fragment(&mut self, text: &str, category: Category) -> std::io::Result<()>;

    fn end_line(&mut self) -> std::io::Result<()>;

    fn finish(&mut self, _summary: &RenderSummary) -> std::io::Result<()> {
        Ok(())
    }
}

impl<O: OutputSink + ?Sized> OutputSink for &mut O {
    fn write_fragment(&mut self, text: &str, category: Category) -> std::io::Result<()> {
        (**self).write_fragment(text, category)
    }

    fn end_line(&mut self) -> std::io::Result<()> {
        (**self).end_line()
    }

    fn finish(&mut self, summary: &RenderSummary) -> std::io::Result<()> {
        (**self).finish(summary)
    }
}

/// Counts for a rendered subtree, plus subtrees skipped under
/// [`ErrorPolicy::Continue`](super::ErrorPolicy::Continue).
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub directories: usize,
    pub files: usize,
    pub errors: Vec<TraversalError>,
}

impl RenderSummary {
    pub fn merge(&mut self, other: RenderSummary) {
        self.directories += other.directories;
        self.files += other.files;
        self.errors.extend(other.errors);
    }
}
