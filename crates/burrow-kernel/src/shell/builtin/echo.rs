//! echo — Print arguments to stdout.

use crate::shell::{Builtin, BuiltinResult, ExecContext};

/// Echo builtin: prints its arguments separated by single spaces.
pub struct Echo;

impl Builtin for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn summary(&self) -> &'static str {
        "Print arguments"
    }

    fn usage(&self) -> &'static str {
        "echo [words]..."
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        ctx.println(&args.join(" "));
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtin::testing::run;
    use crate::vfs::FileSystem;

    #[test]
    fn test_echo_simple() {
        let mut fs = FileSystem::new();
        let (result, out) = run(&Echo, &mut fs, &["hello"]);
        assert_eq!(result, Ok(0));
        assert_eq!(out.out(), "hello\n");
    }

    #[test]
    fn test_echo_multiple() {
        let mut fs = FileSystem::new();
        let (_, out) = run(&Echo, &mut fs, &["hello", "big world"]);
        assert_eq!(out.out(), "hello big world\n");
    }

    #[test]
    fn test_echo_empty() {
        let mut fs = FileSystem::new();
        let (result, out) = run(&Echo, &mut fs, &[]);
        assert_eq!(result, Ok(0));
        assert_eq!(out.out(), "\n");
    }
}
