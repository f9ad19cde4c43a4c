//! Console sinks.

use std::io::{self, Write};

/// Destination for every piece of user-facing text: prompts, diagnostics,
/// help listings, and command output.
pub trait Console {
    /// Write `text` verbatim. No newline is appended.
    fn print(&mut self, text: &str);
}

/// Console writing to the process's standard output.
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl StdoutConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdoutConsole {
    fn print(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        // Prompts carry no newline, so flush every write.
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            log::warn!("console write failed: {e}");
        }
    }
}

/// Console that captures output in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    buf: String,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far.
    pub fn contents(&self) -> &str {
        &self.buf
    }

    /// Return the captured text and clear the buffer.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

impl Console for BufferConsole {
    fn print(&mut self, text: &str) {
        self.buf.push_str(text);
    }
}
