//! JSON output formatting

use std::io;

use serde::Serialize;

use crate::tree::{Category, OutputSink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonFragment {
    pub text: String,
    pub category: Category,
}

/// Collects rendered lines for JSON output.
#[derive(Debug, Default)]
pub struct JsonFormatter {
    lines: Vec<Vec<JsonFragment>>,
    current: Vec<JsonFragment>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Vec<JsonFragment>] {
        &self.lines
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.lines)
    }
}

impl OutputSink for JsonFormatter {
    fn write_fragment(&mut self, text: &str, category: Category) -> io::Result<()> {
        self.current.push(JsonFragment {
            text: text.to_string(),
            category,
        });
        Ok(())
    }

    fn end_line(&mut self) -> io::Result<()> {
        self.lines.push(std::mem::take(&mut self.current));
        Ok(())
    }
}

/// Print collected lines as pretty-printed JSON to stdout.
pub fn print_json(formatter: &JsonFormatter) -> io::Result<()> {
    let json = formatter.to_json().map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
