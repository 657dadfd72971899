//! The built-in command interface.

use thiserror::Error;

use super::context::ExecContext;
use crate::vfs::FsError;

/// Failure raised by a built-in. The shell prints it as
/// `<name>: error: <detail>` and sets exit code 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuiltinError {
    #[error("{path}: {source}")]
    Path {
        path: String,
        #[source]
        source: FsError,
    },

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not implemented")]
    NotImplemented,
}

impl BuiltinError {
    /// Attach the path an `FsError` happened on.
    pub fn at(path: &str) -> impl FnOnce(FsError) -> BuiltinError + '_ {
        move |source| BuiltinError::Path {
            path: path.to_string(),
            source,
        }
    }
}

/// Result of running a built-in: its exit code, or an error for the shell
/// to report.
pub type BuiltinResult = Result<u8, BuiltinError>;

/// A statically registered shell command.
pub trait Builtin: Send + Sync {
    /// Command name as typed.
    fn name(&self) -> &'static str;

    /// One-line description for `help`.
    fn summary(&self) -> &'static str;

    /// Usage synopsis for `help <name>` and usage errors.
    fn usage(&self) -> &'static str;

    /// Run with the arguments that followed the command name.
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult;
}
