//! Streaming output formatter
//!
//! `StreamingFormatter` writes each fragment as soon as the walker produces
//! it, styling it with `termcolor`.

use std::io;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::tree::{Category, OutputSink};

use super::config::OutputConfig;
use super::style::style_for;

/// Streaming output formatter - writes directly without buffering lines.
pub struct StreamingFormatter<W = StandardStream> {
    writer: W,
}

impl StreamingFormatter<StandardStream> {
    /// Formatter on stdout.
    pub fn new(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self::with_writer(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: WriteColor> OutputSink for StreamingFormatter<W> {
    fn write_fragment(&mut self, text: &str, category: Category) -> io::Result<()> {
        match style_for(category) {
            Some(spec) => {
                self.writer.set_color(&spec)?;
                write!(self.writer, "{}", text)?;
                self.writer.reset()
            }
            None => write!(self.writer, "{}", text),
        }
    }

    fn end_line(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    fn finish(&mut self, _summary: &crate::tree::RenderSummary) -> io::Result<()> {
        self.writer.flush()
    }
}
