//! The read-eval loop: prompt, read a line, execute, repeat.

use tracing::{debug, info};

use crate::channel::InputSource;
use crate::shell::{OutputSink, Shell};

/// Something the shell can prompt, read from, and write to.
pub trait Terminal: InputSource + OutputSink {}

impl<T: InputSource + OutputSink> Terminal for T {}

/// Drive `shell` from `term` until `exit` or end of input. Returns the
/// final exit code.
///
/// Each iteration renders the prompt, blocks for a line, and executes it.
/// End of input stops the shell and keeps the last command's code.
pub fn run<T: Terminal>(shell: &mut Shell, term: &mut T) -> u8 {
    info!(cwd = %shell.fs().current_path(), "session started");
    while shell.is_running() {
        let prompt = shell.prompt();
        term.prompt(&prompt);
        match term.read_line() {
            Some(line) => {
                shell.execute_line(&line, term);
            }
            None => {
                debug!("end of input");
                shell.end_of_input();
            }
        }
    }
    let code = shell.last_exit_code();
    info!(code, "session finished");
    code
}
