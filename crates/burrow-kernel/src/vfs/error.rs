//! Filesystem error taxonomy, shared by the VFS and the shell built-ins.

use thiserror::Error;

/// Result alias for VFS operations.
pub type FsResult<T> = Result<T, FsError>;

/// Why a VFS operation failed.
///
/// Messages are fixed per kind; callers add the path and command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("No such file or directory")]
    FileNotFound,

    #[error("Not a directory")]
    NotADirectory,

    #[error("Not a regular file")]
    NotAFile,

    #[error("File exists")]
    FileExists,

    /// Reserved: no current operation removes directories.
    #[error("Directory not empty")]
    DirectoryNotEmpty,

    #[error("Invalid path")]
    InvalidPath,

    /// Reserved: permission bits are stored but never checked.
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Out of memory")]
    OutOfMemory,
}
