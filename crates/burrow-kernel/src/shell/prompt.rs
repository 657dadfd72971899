//! Prompt rendering.

use owo_colors::OwoColorize;

/// Replace a leading `home` with `~`.
///
/// Only whole components match: with home `/home/user`, the path
/// `/home/username` is left alone.
pub fn abbreviate_home(path: &str, home: &str) -> String {
    if home.is_empty() || home == "/" {
        return path.to_string();
    }
    if path == home {
        return "~".to_string();
    }
    match path.strip_prefix(home) {
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

/// Render `user@host:path$ `.
///
/// With `color`, the identity is green, the path blue, and the `$` green
/// or red depending on whether the previous command succeeded.
pub fn render(user: &str, host: &str, path: &str, last_ok: bool, color: bool) -> String {
    if !color {
        return format!("{user}@{host}:{path}$ ");
    }
    let identity = format!("{user}@{host}");
    let glyph = if last_ok {
        "$".green().bold().to_string()
    } else {
        "$".red().bold().to_string()
    };
    format!(
        "{}:{}{} ",
        identity.green().bold(),
        path.blue().bold(),
        glyph
    )
}
