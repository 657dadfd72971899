//! Virtual Filesystem (VFS) for burrow.
//!
//! One in-memory tree of typed inodes, addressed by POSIX-style paths:
//!
//! - **InodeTree**: owns every inode; directories own their children
//! - **resolve**: maps a path plus a starting directory to an inode
//! - **FileSystem**: the facade the shell talks to (create, read, write,
//!   list, chdir)
//!
//! # Design
//!
//! ```text
//! FileSystem ── cwd ─────────────┐
//!     │                          ▼
//!     └── InodeTree { id -> Inode { parent: id, data: Directory([id, ..]) } }
//! ```
//!
//! Parent links are plain ids, so they never keep anything alive. Permission
//! bits are recorded for display and never checked. Symlinks can exist in the
//! tree but are never followed.

pub mod bootstrap;
mod error;
mod fs;
mod inode;
mod resolve;
mod tree;

pub use error::{FsError, FsResult};
pub use fs::FileSystem;
pub use inode::{
    DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, DirEntry, Inode, InodeData, InodeId, InodeKind,
};
pub use resolve::{SEPARATOR, resolve, resolve_parent};
pub use tree::InodeTree;
