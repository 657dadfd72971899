//! touch — Create empty files.

use crate::shell::{Builtin, BuiltinError, BuiltinResult, ExecContext};

/// Touch builtin: create an empty file for each path that does not exist.
pub struct Touch;

impl Builtin for Touch {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn summary(&self) -> &'static str {
        "Create empty files"
    }

    fn usage(&self) -> &'static str {
        "touch <file>..."
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        if args.is_empty() {
            return Err(BuiltinError::Usage(self.usage()));
        }

        let mut status = 0;
        for path in args {
            if ctx.fs.exists(path) {
                continue;
            }
            if let Err(e) = ctx.fs.create_file(path, b"") {
                ctx.eprintln(&format!("touch: cannot touch '{path}': {e}"));
                status = 1;
            }
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtin::testing::run;
    use crate::vfs::FileSystem;

    #[test]
    fn test_touch_creates_empty_file() {
        let mut fs = FileSystem::new();
        let (result, _) = run(&Touch, &mut fs, &["a", "b"]);
        assert_eq!(result, Ok(0));
        assert_eq!(fs.read_file("a").unwrap(), b"");
        assert!(fs.is_file("b"));
    }

    #[test]
    fn test_touch_existing_is_noop() {
        let mut fs = FileSystem::new();
        fs.write_file("keep", b"data").unwrap();
        fs.create_directory("dir").unwrap();
        let (result, _) = run(&Touch, &mut fs, &["keep", "dir"]);
        assert_eq!(result, Ok(0));
        assert_eq!(fs.read_file("keep").unwrap(), b"data");
        assert!(fs.is_directory("dir"));
    }

    #[test]
    fn test_touch_missing_parent() {
        let mut fs = FileSystem::new();
        let (result, out) = run(&Touch, &mut fs, &["/no/such", "fine"]);
        assert_eq!(result, Ok(1));
        assert_eq!(
            out.err(),
            "touch: cannot touch '/no/such': No such file or directory\n"
        );
        assert!(fs.is_file("fine"));
    }
}
