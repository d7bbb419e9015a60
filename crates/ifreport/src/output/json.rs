//! JSON output.

use std::io::Write;

use serde::Serialize;

/// JSON output helper.
pub struct JsonOutput<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonOutput<W> {
    /// Create a new JSON output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Enable or disable pretty printing.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write a serializable value followed by a newline.
    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> crate::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
