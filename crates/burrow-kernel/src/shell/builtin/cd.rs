//! cd — Change the current working directory.

use crate::shell::{Builtin, BuiltinError, BuiltinResult, ExecContext};

/// Cd builtin: change directory, defaulting to the home directory.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn summary(&self) -> &'static str {
        "Change the current directory"
    }

    fn usage(&self) -> &'static str {
        "cd [path]"
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        let target = match args {
            [] => ctx.home,
            [path] => path.as_str(),
            _ => return Err(BuiltinError::Usage(self.usage())),
        };
        ctx.fs
            .change_directory(target)
            .map_err(BuiltinError::at(target))?;
        Ok(0)
    }
}
