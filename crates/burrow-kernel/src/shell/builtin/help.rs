//! help — Describe the built-in commands.

use crate::shell::{Builtin, BuiltinError, BuiltinResult, EXIT_SUMMARY, EXIT_USAGE, ExecContext};

/// Help builtin: list every command, or show one command's usage.
pub struct Help;

impl Builtin for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn summary(&self) -> &'static str {
        "Show help for commands"
    }

    fn usage(&self) -> &'static str {
        "help [command]"
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> BuiltinResult {
        match args {
            [] => {
                let mut text = String::from("Built-in commands:\n");
                for builtin in ctx.registry.iter() {
                    text.push_str(&format!("  {:<8} {}\n", builtin.name(), builtin.summary()));
                }
                text.push_str(&format!("  {:<8} {}\n", "exit", EXIT_SUMMARY));
                ctx.print(&text);
                Ok(0)
            }
            [name] if name == "exit" => {
                ctx.println(&format!("usage: {EXIT_USAGE}"));
                Ok(0)
            }
            [name] => match ctx.registry.get(name) {
                Some(builtin) => {
                    ctx.println(&format!("usage: {}", builtin.usage()));
                    ctx.println(&format!("  {}", builtin.summary()));
                    Ok(0)
                }
                None => {
                    ctx.eprintln(&format!("help: no help topics match '{name}'"));
                    Ok(1)
                }
            },
            _ => Err(BuiltinError::Usage(self.usage())),
        }
    }
}
