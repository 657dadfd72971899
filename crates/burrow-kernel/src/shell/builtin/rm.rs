//! rm — Remove files (not implemented).

use crate::shell::{Builtin, BuiltinError, BuiltinResult, ExecContext};

/// Rm builtin: accepted so scripts get a clear answer, but removal is not
/// supported by this shell.
pub struct Rm;

impl Builtin for Rm {
    fn name(&self) -> &'static str {
        "rm"
    }

    fn summary(&self) -> &'static str {
        "Remove files (not implemented)"
    }

    fn usage(&self) -> &'static str {
        "rm <file>..."
    }

    fn execute(&self, _args: &[String], _ctx: &mut ExecContext<'_>) -> BuiltinResult {
        Err(BuiltinError::NotImplemented)
    }
}
