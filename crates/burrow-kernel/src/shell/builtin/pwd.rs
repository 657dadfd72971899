//! pwd — Print working directory.

use crate::shell::{Builtin, BuiltinResult, ExecContext};

/// Pwd builtin: print the absolute path of the cwd.
pub struct Pwd;

impl Builtin for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn summary(&self) -> &'static str {
        "Print the current directory"
    }

    fn usage(&self) -> &'static str {
        "pwd"
    }

    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        let path = ctx.fs.current_path();
        ctx.println(&path);
        Ok(0)
    }
}
