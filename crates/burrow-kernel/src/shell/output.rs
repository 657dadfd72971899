//! Output sinks for the shell.
//!
//! Built-ins never talk to a terminal or a thread directly. They append to
//! an [`OutputSink`]; whoever owns the sink decides where the bytes go.

/// Append-only consumer of shell output.
pub trait OutputSink {
    /// Append to standard output.
    fn stdout(&mut self, bytes: &[u8]);

    /// Append to standard error.
    fn stderr(&mut self, bytes: &[u8]);

    /// Present the prompt for the next line. Defaults to plain stdout.
    fn prompt(&mut self, prompt: &str) {
        self.stdout(prompt.as_bytes());
    }
}

/// Sink that keeps everything in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stdout as a string (lossy UTF-8 conversion).
    pub fn out(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Stderr as a string (lossy UTF-8 conversion).
    pub fn err(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Drop everything captured so far.
    pub fn clear(&mut self) {
        self.stdout.clear();
        self.stderr.clear();
    }
}

impl OutputSink for CapturedOutput {
    fn stdout(&mut self, bytes: &[u8]) {
        self.stdout.extend_from_slice(bytes);
    }

    fn stderr(&mut self, bytes: &[u8]) {
        self.stderr.extend_from_slice(bytes);
    }
}
