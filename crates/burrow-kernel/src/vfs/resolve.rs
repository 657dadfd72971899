//! Path resolution over an [`InodeTree`].
//!
//! Stateless: every call takes the tree and the directory to start from.

use super::error::{FsError, FsResult};
use super::inode::InodeId;
use super::tree::InodeTree;

/// Path component separator.
pub const SEPARATOR: char = '/';

/// Map `path` to an inode, starting at `cwd` (or the root for absolute paths).
///
/// - An empty path resolves to `cwd`.
/// - Empty components are skipped, `.` is a no-op, `..` moves to the parent
///   (the root's `..` is the root).
/// - Descending through a non-directory fails with `NotADirectory`; a missing
///   name fails with `FileNotFound`.
///
/// The final node may be of any kind; callers check it.
pub fn resolve(tree: &InodeTree, path: &str, cwd: InodeId) -> FsResult<InodeId> {
    let mut current = if path.starts_with(SEPARATOR) {
        tree.root()
    } else {
        cwd
    };

    for component in path.split(SEPARATOR) {
        match component {
            "" | "." => {}
            ".." => {
                let node = tree.get(current).ok_or(FsError::FileNotFound)?;
                if let Some(parent) = node.parent() {
                    current = parent;
                }
            }
            name => {
                current = tree
                    .child(current, name)?
                    .ok_or(FsError::FileNotFound)?;
            }
        }
    }
    Ok(current)
}

/// Split `path` into the directory that should contain it and the final name.
///
/// - No separator: the parent is `cwd` and the name is the whole path.
/// - Separator at position 0 only: the parent is the root.
/// - Otherwise the text before the last separator is resolved with
///   [`resolve`].
///
/// Fails with `InvalidPath` when the final name is empty.
pub fn resolve_parent<'p>(
    tree: &InodeTree,
    path: &'p str,
    cwd: InodeId,
) -> FsResult<(InodeId, &'p str)> {
    let (parent, name) = match path.rfind(SEPARATOR) {
        None => (cwd, path),
        Some(0) => (tree.root(), &path[1..]),
        Some(idx) => (resolve(tree, &path[..idx], cwd)?, &path[idx + 1..]),
    };
    if name.is_empty() {
        return Err(FsError::InvalidPath);
    }
    Ok((parent, name))
}
