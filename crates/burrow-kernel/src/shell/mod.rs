//! The shell: one input line in, one exit code out.
//!
//! ```text
//! line ──tokenize──▶ [name, args..] ──lookup──▶ Builtin::execute(args, ctx)
//!                                                  │
//!                              FileSystem ◀────────┤
//!                              OutputSink ◀────────┘
//! ```
//!
//! `exit` is handled here rather than in the command table because it is
//! the only command that changes the shell's own run state.
//!
//! Exit codes: `0` success, `1` command failure or syntax error, `2` bad
//! `exit` argument, `127` unknown command.

pub mod builtin;
mod context;
mod output;
pub mod prompt;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::ExecContext;
pub use output::{CapturedOutput, OutputSink};
pub use registry::BuiltinRegistry;
pub use traits::{Builtin, BuiltinError, BuiltinResult};

use tracing::debug;

use crate::config::KernelConfig;
use crate::lexer::{LexError, tokenize};
use crate::vfs::{FileSystem, FsResult, bootstrap};

/// Success.
pub const EXIT_OK: u8 = 0;
/// A command failed, or the line could not be tokenized.
pub const EXIT_FAILURE: u8 = 1;
/// `exit` was given something that is not a number in 0..=255.
pub const EXIT_BAD_ARGUMENT: u8 = 2;
/// No built-in with that name.
pub const EXIT_NOT_FOUND: u8 = 127;

pub(crate) const EXIT_SUMMARY: &str = "Leave the shell";
pub(crate) const EXIT_USAGE: &str = "exit [code]";

/// Whether the shell accepts more input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal: reached through `exit` or end of input.
    Stopped,
}

/// Fixed identity strings shown in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub host: String,
    /// Home directory, abbreviated to `~` in the prompt and the target of a
    /// bare `cd`.
    pub home: String,
}

impl Identity {
    pub fn from_config(config: &KernelConfig) -> Self {
        Self {
            user: config.user.clone(),
            host: config.host.clone(),
            home: config.home_dir(),
        }
    }
}

/// Shell state: the filesystem it drives, the command table, and the
/// run state and last exit code.
#[derive(Debug)]
pub struct Shell {
    fs: FileSystem,
    registry: BuiltinRegistry,
    identity: Identity,
    state: RunState,
    last_exit: u8,
    color: bool,
}

impl Shell {
    /// Wrap an already populated filesystem.
    pub fn new(fs: FileSystem, identity: Identity) -> Self {
        let mut registry = BuiltinRegistry::new();
        register_builtins(&mut registry);
        Self {
            fs,
            registry,
            identity,
            state: RunState::Running,
            last_exit: EXIT_OK,
            color: true,
        }
    }

    /// Build a fresh filesystem, seed it from `config`, and wrap it.
    pub fn from_config(config: &KernelConfig) -> FsResult<Self> {
        let identity = Identity::from_config(config);
        let mut fs = FileSystem::new();
        bootstrap::apply(&mut fs, &config.seed, &identity.home, &config.initial_cwd())?;
        let mut shell = Self::new(fs, identity);
        shell.color = config.color;
        Ok(shell)
    }

    /// Turn prompt colors on or off.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn fs(&self) -> &FileSystem {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut FileSystem {
        &mut self.fs
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn registry(&self) -> &BuiltinRegistry {
        &self.registry
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Exit code of the most recent non-empty line.
    pub fn last_exit_code(&self) -> u8 {
        self.last_exit
    }

    /// Stop because the input source is exhausted.
    pub fn end_of_input(&mut self) {
        self.state = RunState::Stopped;
    }

    /// The prompt for the next line.
    pub fn prompt(&self) -> String {
        let path = prompt::abbreviate_home(&self.fs.current_path(), &self.identity.home);
        prompt::render(
            &self.identity.user,
            &self.identity.host,
            &path,
            self.last_exit == EXIT_OK,
            self.color,
        )
    }

    /// Run one line and return its exit code.
    ///
    /// A blank line returns 0 without touching any state. Command failures
    /// never stop the shell; only `exit` does.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn OutputSink) -> u8 {
        let words = match tokenize(line) {
            Ok(words) => words,
            Err(e) => {
                let message = match e {
                    LexError::UnterminatedQuote => "burrow: syntax error: unterminated quote\n",
                    LexError::OutOfMemory => "burrow: syntax error: out of memory\n",
                };
                out.stderr(message.as_bytes());
                self.last_exit = EXIT_FAILURE;
                return EXIT_FAILURE;
            }
        };
        let Some((name, args)) = words.split_first() else {
            return EXIT_OK;
        };

        let code = if name == "exit" {
            self.exit(args, out)
        } else {
            self.dispatch(name, args, out)
        };
        debug!(command = %name, argc = args.len(), code, "line executed");
        self.last_exit = code;
        code
    }

    fn exit(&mut self, args: &[String], out: &mut dyn OutputSink) -> u8 {
        let code = match args {
            [] => EXIT_OK,
            [arg] => match arg.parse::<u8>() {
                Ok(code) => code,
                Err(_) => {
                    out.stderr(format!("exit: {arg}: numeric argument required\n").as_bytes());
                    EXIT_BAD_ARGUMENT
                }
            },
            _ => {
                out.stderr(b"exit: too many arguments\n");
                return EXIT_FAILURE;
            }
        };
        self.state = RunState::Stopped;
        code
    }

    fn dispatch(&mut self, name: &str, args: &[String], out: &mut dyn OutputSink) -> u8 {
        let Some(builtin) = self.registry.get(name) else {
            out.stderr(format!("{name}: command not found\n").as_bytes());
            return EXIT_NOT_FOUND;
        };

        let mut ctx = ExecContext {
            fs: &mut self.fs,
            out: &mut *out,
            home: &self.identity.home,
            registry: &self.registry,
        };
        match builtin.execute(args, &mut ctx) {
            Ok(code) => code,
            Err(e) => {
                out.stderr(format!("{name}: error: {e}\n").as_bytes());
                EXIT_FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        let mut config = KernelConfig::default();
        config.color = false;
        Shell::from_config(&config).unwrap()
    }

    fn run(shell: &mut Shell, line: &str) -> (u8, CapturedOutput) {
        let mut out = CapturedOutput::new();
        let code = shell.execute_line(line, &mut out);
        (code, out)
    }

    #[test]
    fn starts_running_in_home() {
        let shell = shell();
        assert!(shell.is_running());
        assert_eq!(shell.last_exit_code(), 0);
        assert_eq!(shell.fs().current_path(), "/home/user");
        assert_eq!(shell.prompt(), "user@burrow:~$ ");
    }

    #[test]
    fn blank_line_is_noop() {
        let mut shell = shell();
        run(&mut shell, "cat /missing");
        let (code, out) = run(&mut shell, "   ");
        assert_eq!(code, 0);
        assert!(out.stdout.is_empty() && out.stderr.is_empty());
        assert_eq!(shell.last_exit_code(), 1);
    }

    #[test]
    fn unknown_command() {
        let mut shell = shell();
        let (code, out) = run(&mut shell, "frobnicate --now");
        assert_eq!(code, EXIT_NOT_FOUND);
        assert_eq!(out.err(), "frobnicate: command not found\n");
        assert_eq!(shell.last_exit_code(), EXIT_NOT_FOUND);
    }

    #[test]
    fn syntax_error() {
        let mut shell = shell();
        let (code, out) = run(&mut shell, "write f \"oops");
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out.err(), "burrow: syntax error: unterminated quote\n");
        assert!(!shell.fs().exists("f"));
    }

    #[test]
    fn builtin_error_is_reported() {
        let mut shell = shell();
        let (code, out) = run(&mut shell, "ls /nope");
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out.err(), "ls: error: /nope: No such file or directory\n");
        assert!(shell.is_running());
    }

    #[test]
    fn rm_reports_not_implemented() {
        let mut shell = shell();
        let (code, out) = run(&mut shell, "rm anything");
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out.err(), "rm: error: not implemented\n");
    }

    #[test]
    fn exit_without_code() {
        let mut shell = shell();
        let (code, _) = run(&mut shell, "exit");
        assert_eq!(code, 0);
        assert_eq!(shell.state(), RunState::Stopped);
    }

    #[test]
    fn exit_with_code() {
        let mut shell = shell();
        let (code, _) = run(&mut shell, "exit 42");
        assert_eq!(code, 42);
        assert!(!shell.is_running());
    }

    #[test]
    fn exit_with_bad_code() {
        let mut shell = shell();
        let (code, out) = run(&mut shell, "exit soon");
        assert_eq!(code, EXIT_BAD_ARGUMENT);
        assert_eq!(out.err(), "exit: soon: numeric argument required\n");
        assert!(!shell.is_running());

        let mut shell = self::shell();
        assert_eq!(run(&mut shell, "exit 256").0, EXIT_BAD_ARGUMENT);
    }

    #[test]
    fn exit_with_too_many_arguments_keeps_running() {
        let mut shell = shell();
        let (code, out) = run(&mut shell, "exit 1 2");
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out.err(), "exit: too many arguments\n");
        assert!(shell.is_running());
    }

    #[test]
    fn prompt_tracks_cwd_and_status() {
        let mut shell = shell();
        run(&mut shell, "cd /tmp");
        assert_eq!(shell.prompt(), "user@burrow:/tmp$ ");
        shell.set_color(true);
        let before = shell.prompt();
        run(&mut shell, "cat nothing");
        assert_ne!(shell.prompt(), before);
    }

    #[test]
    fn end_of_input_stops() {
        let mut shell = shell();
        shell.end_of_input();
        assert_eq!(shell.state(), RunState::Stopped);
    }
}
