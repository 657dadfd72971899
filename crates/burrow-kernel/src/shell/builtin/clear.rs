//! clear — Clear the terminal.

use crate::shell::{Builtin, BuiltinResult, ExecContext};

/// Erase the display and home the cursor.
pub const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[H";

/// Clear builtin: emit the ANSI clear-screen sequence.
pub struct Clear;

impl Builtin for Clear {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn summary(&self) -> &'static str {
        "Clear the screen"
    }

    fn usage(&self) -> &'static str {
        "clear"
    }

    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        ctx.print(CLEAR_SEQUENCE);
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtin::testing::run;
    use crate::vfs::FileSystem;

    #[test]
    fn test_clear_emits_sequence() {
        let mut fs = FileSystem::new();
        let (result, out) = run(&Clear, &mut fs, &[]);
        assert_eq!(result, Ok(0));
        assert_eq!(out.out(), CLEAR_SEQUENCE);
    }
}
