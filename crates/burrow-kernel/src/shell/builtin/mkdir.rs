//! mkdir — Create directories.

use crate::shell::{Builtin, BuiltinError, BuiltinResult, ExecContext};

/// Mkdir builtin: create each named directory; `-p` creates parents too.
pub struct Mkdir;

impl Builtin for Mkdir {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn summary(&self) -> &'static str {
        "Create directories"
    }

    fn usage(&self) -> &'static str {
        "mkdir [-p] <dir>..."
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        let (parents, paths) = match args {
            [flag, rest @ ..] if flag == "-p" => (true, rest),
            _ => (false, args),
        };
        if paths.is_empty() {
            return Err(BuiltinError::Usage(self.usage()));
        }

        let mut status = 0;
        for path in paths {
            let created = if parents {
                ctx.fs.create_directory_path(path)
            } else {
                ctx.fs.create_directory(path)
            };
            if let Err(e) = created {
                ctx.eprintln(&format!("mkdir: cannot create directory '{path}': {e}"));
                status = 1;
            }
        }
        Ok(status)
    }
}
