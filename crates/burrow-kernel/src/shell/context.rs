//! Execution context for built-ins.

use super::output::OutputSink;
use super::registry::BuiltinRegistry;
use crate::vfs::FileSystem;

/// Everything a built-in may touch while it runs.
pub struct ExecContext<'a> {
    /// Virtual filesystem (including the cwd).
    pub fs: &'a mut FileSystem,
    /// Where output goes.
    pub out: &'a mut dyn OutputSink,
    /// Home directory, for `cd` with no argument.
    pub home: &'a str,
    /// The command table, for `help`.
    pub registry: &'a BuiltinRegistry,
}

impl ExecContext<'_> {
    /// Write text to stdout.
    pub fn print(&mut self, text: &str) {
        self.out.stdout(text.as_bytes());
    }

    /// Write text plus a newline to stdout.
    pub fn println(&mut self, text: &str) {
        self.out.stdout(text.as_bytes());
        self.out.stdout(b"\n");
    }

    /// Write text plus a newline to stderr.
    pub fn eprintln(&mut self, text: &str) {
        self.out.stderr(text.as_bytes());
        self.out.stderr(b"\n");
    }
}
