//! ls — List directory contents.

use crate::shell::{Builtin, BuiltinError, BuiltinResult, ExecContext};
use crate::vfs::DirEntry;

/// Ls builtin: list a directory, directories first, each group in creation order.
pub struct Ls;

impl Builtin for Ls {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn summary(&self) -> &'static str {
        "List directory contents"
    }

    fn usage(&self) -> &'static str {
        "ls [-l] [path]"
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        let mut long_format = false;
        let mut path: Option<&str> = None;
        for arg in args {
            match arg.as_str() {
                "-l" => long_format = true,
                _ if path.is_none() => path = Some(arg.as_str()),
                _ => return Err(BuiltinError::Usage(self.usage())),
            }
        }
        let path = path.unwrap_or("");

        let entries = ctx.fs.list_directory(path).map_err(BuiltinError::at(path))?;
        let (dirs, others): (Vec<&DirEntry>, Vec<&DirEntry>) =
            entries.iter().partition(|e| e.is_directory());

        for entry in dirs.into_iter().chain(others) {
            if long_format {
                let line = format!("{} {:>8} {}", entry.mode_string(), entry.size, entry.name);
                ctx.println(&line);
            } else {
                ctx.println(&entry.name);
            }
        }
        Ok(0)
    }
}
