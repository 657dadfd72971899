//! burrow REPL — terminal front-end for the burrow kernel.
//!
//! The kernel runs on its own thread. This side plays the part of the UI:
//! it renders each `Prompt` message with rustyline, pushes the typed line
//! into the kernel's stdin channel, and copies `Stdout`/`Stderr` messages to
//! the real terminal until the kernel reports `Exit`.
//!
//! Non-interactive use (`-c` or piped stdin) feeds the script one line per
//! prompt through the same channel.

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use directories::BaseDirs;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use burrow_kernel::{HostMessage, Kernel, KernelConfig, Transcript};

/// Command-line flags for the `burrow` binary.
#[derive(Debug, Default, Parser)]
#[command(name = "burrow")]
#[command(about = "An in-memory POSIX-like shell with a virtual filesystem")]
#[command(version)]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/burrow/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// User name shown in the prompt
    #[arg(long)]
    pub user: Option<String>,

    /// Host name shown in the prompt
    #[arg(long)]
    pub host: Option<String>,

    /// Run these commands (one per line) and exit
    #[arg(short = 'c')]
    pub command: Option<String>,
}

/// `$XDG_CONFIG_HOME/burrow/config.toml`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|d| d.config_dir().join("burrow").join("config.toml"))
}

fn history_path() -> Option<PathBuf> {
    BaseDirs::new().map(|d| d.data_dir().join("burrow").join("history.txt"))
}

/// Load the configuration the flags ask for.
///
/// An explicit `--config` must exist. The default path is optional; when it
/// is missing the built-in defaults apply. `--user`/`--host` override the
/// file either way.
pub fn load_config(cli: &Cli) -> Result<KernelConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => read_config(&path)?,
            _ => KernelConfig::default(),
        },
    };
    if let Some(user) = &cli.user {
        config.user = user.clone();
    }
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<KernelConfig> {
    debug!(path = %path.display(), "loading config");
    KernelConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Entry point: pick script or interactive mode and return the exit code.
pub fn run(cli: Cli) -> Result<u8> {
    let mut config = load_config(&cli)?;

    if let Some(command) = &cli.command {
        config.color = false;
        return run_script(&config, command);
    }

    if !io::stdin().is_terminal() {
        let mut script = String::new();
        io::stdin()
            .read_to_string(&mut script)
            .context("Failed to read script from stdin")?;
        config.color = false;
        return run_script(&config, &script);
    }

    if !io::stdout().is_terminal() {
        config.color = false;
    }
    run_interactive(&config)
}

/// Run `script` through a kernel and collect what it printed.
pub fn execute_script(config: &KernelConfig, script: &str) -> Result<Transcript> {
    burrow_kernel::run_script(config, script.lines()).context("Kernel failed")
}

/// Run `script`, copy its output to the terminal, and return its exit code.
pub fn run_script(config: &KernelConfig, script: &str) -> Result<u8> {
    let transcript = execute_script(config, script)?;
    io::stdout().write_all(transcript.stdout.as_bytes())?;
    io::stdout().flush()?;
    io::stderr().write_all(transcript.stderr.as_bytes())?;
    Ok(transcript.exit_code)
}

/// Interactive session on the controlling terminal.
pub fn run_interactive(config: &KernelConfig) -> Result<u8> {
    let mut editor = DefaultEditor::new().context("Failed to create editor")?;

    let history = history_path();
    if let Some(ref path) = history {
        let _ = editor.load_history(path);
    }

    let mut kernel = Kernel::spawn(config).context("Failed to start kernel")?;
    let mut exit_code = None;

    while let Some(message) = kernel.recv_blocking() {
        match message {
            HostMessage::Stdout(bytes) => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(&bytes)?;
                stdout.flush()?;
            }
            HostMessage::Stderr(bytes) => {
                io::stderr().write_all(&bytes)?;
            }
            HostMessage::Prompt(prompt) => match editor.readline(&prompt) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    let accepted = kernel.send_line(&line);
                    if accepted < line.len() + 1 {
                        let kept = accepted.saturating_sub(1);
                        warn!(kept, len = line.len(), "input line truncated");
                        eprintln!("burrow: input too long, truncated to {kept} bytes");
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    kernel.send_line("");
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    kernel.close_input();
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    kernel.close_input();
                }
            },
            HostMessage::Exit(code) => {
                exit_code = Some(code);
                break;
            }
        }
    }

    if let Some(ref path) = history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.save_history(path);
    }

    let joined = kernel.join().context("Kernel thread failed")?;
    Ok(exit_code.unwrap_or(joined))
}
