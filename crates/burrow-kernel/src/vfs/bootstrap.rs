//! One-time population of a fresh filesystem before the shell starts.

use tracing::info;

use super::error::FsResult;
use super::fs::FileSystem;
use super::resolve::SEPARATOR;
use crate::config::SeedConfig;

/// Create the seed directories and files, then move into `cwd`.
///
/// Directories are created with `mkdir -p` semantics, so seeding is
/// repeatable. Files are written with create-or-overwrite semantics and
/// their parent directories are created as needed.
pub fn apply(fs: &mut FileSystem, seed: &SeedConfig, home: &str, cwd: &str) -> FsResult<()> {
    fs.create_directory_path(home)?;
    for dir in &seed.directories {
        fs.create_directory_path(dir)?;
    }
    for file in &seed.files {
        if let Some(idx) = file.path.rfind(SEPARATOR) {
            if idx > 0 {
                fs.create_directory_path(&file.path[..idx])?;
            }
        }
        fs.write_file(&file.path, file.content.as_bytes())?;
    }
    fs.change_directory(cwd)?;
    info!(
        directories = seed.directories.len(),
        files = seed.files.len(),
        cwd,
        "filesystem seeded"
    );
    Ok(())
}
