//! Built-in commands for burrow.
//!
//! These are the whole command set; there is nothing to exec.

mod cat;
mod cd;
mod clear;
mod echo;
mod help;
mod ls;
mod mkdir;
mod pwd;
mod rm;
mod touch;
mod write;

use super::BuiltinRegistry;

/// Register all built-ins, in the order `help` lists them.
pub fn register_builtins(registry: &mut BuiltinRegistry) {
    registry.register(ls::Ls);
    registry.register(cd::Cd);
    registry.register(pwd::Pwd);
    registry.register(cat::Cat);
    registry.register(echo::Echo);
    registry.register(mkdir::Mkdir);
    registry.register(touch::Touch);
    registry.register(clear::Clear);
    registry.register(help::Help);
    registry.register(rm::Rm);
    registry.register(write::Write);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::shell::{Builtin, BuiltinResult, CapturedOutput, ExecContext};
    use crate::vfs::FileSystem;

    pub const HOME: &str = "/home/user";

    /// Run one built-in against `fs` and capture what it printed.
    pub fn run(
        builtin: &dyn Builtin,
        fs: &mut FileSystem,
        args: &[&str],
    ) -> (BuiltinResult, CapturedOutput) {
        let mut registry = BuiltinRegistry::new();
        register_builtins(&mut registry);
        let mut out = CapturedOutput::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let result = {
            let mut ctx = ExecContext {
                fs,
                out: &mut out,
                home: HOME,
                registry: &registry,
            };
            builtin.execute(&args, &mut ctx)
        };
        (result, out)
    }
}
