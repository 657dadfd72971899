//! write — Write words to a file.

use crate::shell::{Builtin, BuiltinError, BuiltinResult, ExecContext};

/// Write builtin: `write <file> <words>...` replaces the file's contents
/// with the words joined by spaces plus a trailing newline, creating the
/// file if needed.
pub struct Write;

impl Builtin for Write {
    fn name(&self) -> &'static str {
        "write"
    }

    fn summary(&self) -> &'static str {
        "Write text to a file"
    }

    fn usage(&self) -> &'static str {
        "write <file> <words>..."
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        let Some((path, words)) = args.split_first() else {
            return Err(BuiltinError::Usage(self.usage()));
        };
        let mut content = words.join(" ");
        content.push('\n');
        ctx.fs
            .write_file(path, content.as_bytes())
            .map_err(BuiltinError::at(path))?;
        Ok(0)
    }
}
