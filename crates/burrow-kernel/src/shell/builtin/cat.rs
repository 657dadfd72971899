//! cat — Print file contents.

use crate::shell::{Builtin, BuiltinError, BuiltinResult, ExecContext};

/// Cat builtin: print each file in turn, reporting failures as it goes.
pub struct Cat;

impl Builtin for Cat {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn summary(&self) -> &'static str {
        "Print file contents"
    }

    fn usage(&self) -> &'static str {
        "cat <file>..."
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        if args.is_empty() {
            return Err(BuiltinError::Usage(self.usage()));
        }

        let mut status = 0;
        for path in args {
            match ctx.fs.read_file(path) {
                Ok(data) => {
                    ctx.out.stdout(data);
                    if !data.is_empty() && !data.ends_with(b"\n") {
                        ctx.out.stdout(b"\n");
                    }
                }
                Err(e) => {
                    ctx.eprintln(&format!("cat: {path}: {e}"));
                    status = 1;
                }
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

    fn make_fs() -> FileSystem {
        let mut fs = FileSystem::new();
        fs.write_file("/test.txt", b"hello world").unwrap();
        fs.write_file("/lines.txt", b"one\ntwo\n").unwrap();
        fs.write_file("/empty", b"").unwrap();
        fs.create_directory_path("/dir").unwrap();
        fs.write_file("/dir/nested.txt", b"nested content").unwrap();
        fs
    }

    #[test]
    fn test_cat_adds_missing_newline() {
        let mut fs = make_fs();
        let (result, out) = run(&Cat, &mut fs, &["/test.txt"]);
        assert_eq!(result, Ok(0));
        assert_eq!(out.out(), "hello world\n");
    }

    #[test]
    fn test_cat_keeps_existing_newline() {
        let mut fs = make_fs();
        let (_, out) = run(&Cat, &mut fs, &["/lines.txt"]);
        assert_eq!(out.out(), "one\ntwo\n");
    }

    #[test]
    fn test_cat_empty_file() {
        let mut fs = make_fs();
        let (result, out) = run(&Cat, &mut fs, &["/empty"]);
        assert_eq!(result, Ok(0));
        assert!(out.stdout.is_empty());
    }

    #[test]
    fn test_cat_empty_file_adds_no_blank_line() {
        let mut fs = make_fs();
        let (result, out) = run(&Cat, &mut fs, &["/lines.txt", "/empty", "/test.txt"]);
        assert_eq!(result, Ok(0));
        assert_eq!(out.out(), "one\ntwo\nhello world\n");
    }

    #[test]
    fn test_cat_relative() {
        let mut fs = make_fs();
        fs.change_directory("/dir").unwrap();
        let (_, out) = run(&Cat, &mut fs, &["nested.txt"]);
        assert_eq!(out.out(), "nested content\n");
    }

    #[test]
    fn test_cat_continues_after_failure() {
        let mut fs = make_fs();
        let (result, out) = run(&Cat, &mut fs, &["/missing", "/dir", "/test.txt"]);
        assert_eq!(result, Ok(1));
        assert_eq!(out.out(), "hello world\n");
        assert_eq!(
            out.err(),
            "cat: /missing: No such file or directory\ncat: /dir: Not a regular file\n"
        );
    }

    #[test]
    fn test_cat_no_args() {
        let mut fs = make_fs();
        let (result, _) = run(&Cat, &mut fs, &[]);
        assert_eq!(result, Err(BuiltinError::Usage("cat <file>...")));
    }
}
