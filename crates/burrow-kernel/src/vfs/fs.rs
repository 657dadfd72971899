//! The VFS facade: path-based operations over one inode tree and a cwd.

use tracing::debug;

use super::error::{FsError, FsResult};
use super::inode::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, DirEntry, Inode, InodeData, InodeId};
use super::resolve::{SEPARATOR, resolve, resolve_parent};
use super::tree::InodeTree;

/// In-memory filesystem with a current directory.
///
/// All data is lost when dropped. Single-threaded: callers hold it by
/// `&mut` for any mutation, including `change_directory`.
#[derive(Debug)]
pub struct FileSystem {
    tree: InodeTree,
    cwd: InodeId,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    /// Create a filesystem holding only `/`, with `/` as the cwd.
    pub fn new() -> Self {
        Self {
            tree: InodeTree::new(),
            cwd: InodeId::ROOT,
        }
    }

    /// The underlying tree.
    pub fn tree(&self) -> &InodeTree {
        &self.tree
    }

    /// Detach and release an entry and everything below it.
    ///
    /// Moves the cwd to the parent of the released subtree if the cwd was
    /// inside it, so the cwd always names a live directory.
    pub fn remove_subtree(&mut self, path: &str) -> FsResult<usize> {
        let target = self.resolve(path)?;
        let parent = self
            .tree
            .get(target)
            .and_then(Inode::parent)
            .ok_or(FsError::InvalidPath)?;
        let cwd_inside = self.is_ancestor_or_self(target, self.cwd);
        let released = self.tree.remove_subtree(target)?;
        if cwd_inside {
            self.cwd = parent;
        }
        Ok(released)
    }

    /// The current directory.
    pub fn cwd(&self) -> InodeId {
        self.cwd
    }

    /// Look up an inode by id.
    pub fn inode(&self, id: InodeId) -> Option<&Inode> {
        self.tree.get(id)
    }

    /// Resolve a path relative to the cwd.
    pub fn resolve(&self, path: &str) -> FsResult<InodeId> {
        resolve(&self.tree, path, self.cwd)
    }

    fn node(&self, id: InodeId) -> FsResult<&Inode> {
        self.tree.get(id).ok_or(FsError::FileNotFound)
    }

    fn is_ancestor_or_self(&self, ancestor: InodeId, mut id: InodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.tree.get(id).and_then(Inode::parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn create(&mut self, path: &str, mode: u32, data: InodeData) -> FsResult<InodeId> {
        let (parent, name) = resolve_parent(&self.tree, path, self.cwd)?;
        if !self.node(parent)?.is_directory() {
            return Err(FsError::NotADirectory);
        }
        self.tree.insert(parent, name, mode, data)
    }

    /// Create a file with `content`. Fails with `FileExists` if the name is taken.
    pub fn create_file(&mut self, path: &str, content: &[u8]) -> FsResult<InodeId> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(content.len())
            .map_err(|_| FsError::OutOfMemory)?;
        bytes.extend_from_slice(content);
        let id = self.create(path, DEFAULT_FILE_MODE, InodeData::File(bytes))?;
        debug!(path, %id, "file created");
        Ok(id)
    }

    /// Create a single directory. The parent must already exist.
    pub fn create_directory(&mut self, path: &str) -> FsResult<InodeId> {
        let id = self.create(path, DEFAULT_DIR_MODE, InodeData::Directory(Vec::new()))?;
        debug!(path, %id, "directory created");
        Ok(id)
    }

    /// Create a directory and any missing ancestors (`mkdir -p`).
    ///
    /// Existing directories along the way are reused; an existing
    /// non-directory component fails with `NotADirectory`.
    pub fn create_directory_path(&mut self, path: &str) -> FsResult<InodeId> {
        let mut current = if path.starts_with(SEPARATOR) {
            self.tree.root()
        } else {
            self.cwd
        };

        for component in path.split(SEPARATOR) {
            match component {
                "" | "." => {}
                ".." => {
                    if let Some(parent) = self.node(current)?.parent() {
                        current = parent;
                    }
                }
                name => {
                    current = match self.tree.child(current, name)? {
                        Some(existing) => {
                            if !self.node(existing)?.is_directory() {
                                return Err(FsError::NotADirectory);
                            }
                            existing
                        }
                        None => self.tree.insert(
                            current,
                            name,
                            DEFAULT_DIR_MODE,
                            InodeData::Directory(Vec::new()),
                        )?,
                    };
                }
            }
        }
        Ok(current)
    }

    fn file_id(&self, path: &str) -> FsResult<InodeId> {
        let id = self.resolve(path)?;
        if !self.node(id)?.is_file() {
            return Err(FsError::NotAFile);
        }
        Ok(id)
    }

    fn file_bytes_mut(&mut self, id: InodeId) -> FsResult<&mut Vec<u8>> {
        match self.tree.get_mut(id).map(|n| &mut n.data) {
            Some(InodeData::File(bytes)) => Ok(bytes),
            Some(_) => Err(FsError::NotAFile),
            None => Err(FsError::FileNotFound),
        }
    }

    /// Read a file's contents.
    pub fn read_file(&self, path: &str) -> FsResult<&[u8]> {
        let id = self.file_id(path)?;
        match &self.node(id)?.data {
            InodeData::File(bytes) => Ok(bytes),
            _ => Err(FsError::NotAFile),
        }
    }

    /// Replace a file's contents, creating the file if it does not exist.
    ///
    /// Only `FileNotFound` triggers creation; other resolution failures
    /// are returned unchanged.
    pub fn write_file(&mut self, path: &str, content: &[u8]) -> FsResult<()> {
        let id = match self.file_id(path) {
            Ok(id) => id,
            Err(FsError::FileNotFound) => {
                self.create_file(path, content)?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(content.len())
            .map_err(|_| FsError::OutOfMemory)?;
        fresh.extend_from_slice(content);
        *self.file_bytes_mut(id)? = fresh;
        Ok(())
    }

    /// Append to an existing file.
    pub fn append_file(&mut self, path: &str, content: &[u8]) -> FsResult<()> {
        let id = self.file_id(path)?;
        let bytes = self.file_bytes_mut(id)?;
        bytes
            .try_reserve(content.len())
            .map_err(|_| FsError::OutOfMemory)?;
        bytes.extend_from_slice(content);
        Ok(())
    }

    /// List a directory in creation order.
    pub fn list_directory(&self, path: &str) -> FsResult<Vec<DirEntry>> {
        let id = self.resolve(path)?;
        let children = self.node(id)?.children().ok_or(FsError::NotADirectory)?;
        Ok(children
            .iter()
            .filter_map(|child| self.tree.get(*child))
            .map(DirEntry::from)
            .collect())
    }

    /// Metadata snapshot for one path.
    pub fn stat(&self, path: &str) -> FsResult<DirEntry> {
        let id = self.resolve(path)?;
        Ok(DirEntry::from(self.node(id)?))
    }

    /// Change the current directory.
    pub fn change_directory(&mut self, path: &str) -> FsResult<()> {
        let id = self.resolve(path)?;
        if !self.node(id)?.is_directory() {
            return Err(FsError::NotADirectory);
        }
        self.cwd = id;
        Ok(())
    }

    /// Absolute path of the cwd; the root renders as `/`.
    pub fn current_path(&self) -> String {
        self.tree.path_of(self.cwd)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    pub fn is_directory(&self, path: &str) -> bool {
        self.resolve(path)
            .ok()
            .and_then(|id| self.tree.get(id))
            .is_some_and(Inode::is_directory)
    }

    pub fn is_file(&self, path: &str) -> bool {
        self.resolve(path)
            .ok()
            .and_then(|id| self.tree.get(id))
            .is_some_and(Inode::is_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::inode::InodeKind;

    #[test]
    fn create_and_read_file() {
        let mut fs = FileSystem::new();
        fs.create_file("/hello.txt", b"hello").unwrap();
        assert_eq!(fs.read_file("/hello.txt").unwrap(), b"hello");
    }

    #[test]
    fn create_file_twice_fails() {
        let mut fs = FileSystem::new();
        fs.create_file("a", b"").unwrap();
        assert_eq!(fs.create_file("a", b"x"), Err(FsError::FileExists));
    }

    #[test]
    fn create_file_under_file_fails() {
        let mut fs = FileSystem::new();
        fs.create_file("a", b"").unwrap();
        assert_eq!(fs.create_file("a/b", b""), Err(FsError::NotADirectory));
    }

    #[test]
    fn create_directory_requires_parent() {
        let mut fs = FileSystem::new();
        assert_eq!(fs.create_directory("/a/b"), Err(FsError::FileNotFound));
        fs.create_directory("/a").unwrap();
        fs.create_directory("/a/b").unwrap();
        assert!(fs.is_directory("/a/b"));
    }

    #[test]
    fn directory_path_is_idempotent() {
        let mut fs = FileSystem::new();
        let first = fs.create_directory_path("/a/b/c").unwrap();
        let second = fs.create_directory_path("/a/b/c").unwrap();
        assert_eq!(first, second);
        assert_eq!(fs.list_directory("/a").unwrap().len(), 1);
        assert_eq!(fs.tree().live_count(), 4);
    }

    #[test]
    fn directory_path_through_file_fails() {
        let mut fs = FileSystem::new();
        fs.create_file("/a", b"").unwrap();
        assert_eq!(fs.create_directory_path("/a/b"), Err(FsError::NotADirectory));
    }

    #[test]
    fn write_creates_then_overwrites() {
        let mut fs = FileSystem::new();
        fs.write_file("f", b"one").unwrap();
        fs.write_file("f", b"two").unwrap();
        assert_eq!(fs.read_file("f").unwrap(), b"two");
    }

    #[test]
    fn overwrite_replaces_whole_content() {
        let mut fs = FileSystem::new();
        fs.write_file("f", b"a much longer first version").unwrap();
        fs.write_file("f", b"short").unwrap();
        assert_eq!(fs.read_file("f").unwrap(), b"short");
        assert_eq!(fs.list_directory("/").unwrap()[0].size, 5);
        fs.write_file("f", b"").unwrap();
        assert_eq!(fs.read_file("f").unwrap(), b"");
    }

    #[test]
    fn failed_write_keeps_existing_content() {
        let mut fs = FileSystem::new();
        fs.write_file("keep", b"intact").unwrap();
        fs.create_directory("d").unwrap();
        assert_eq!(fs.write_file("d", b"x"), Err(FsError::NotAFile));
        assert_eq!(fs.read_file("keep").unwrap(), b"intact");
    }

    #[test]
    fn write_surfaces_other_resolution_errors() {
        let mut fs = FileSystem::new();
        fs.create_file("f", b"").unwrap();
        assert_eq!(fs.write_file("f/g", b"x"), Err(FsError::NotADirectory));
        assert_eq!(fs.write_file("/missing/g", b"x"), Err(FsError::FileNotFound));
    }

    #[test]
    fn write_to_directory_fails() {
        let mut fs = FileSystem::new();
        fs.create_directory("d").unwrap();
        assert_eq!(fs.write_file("d", b"x"), Err(FsError::NotAFile));
        assert_eq!(fs.read_file("d"), Err(FsError::NotAFile));
    }

    #[test]
    fn append_extends() {
        let mut fs = FileSystem::new();
        fs.write_file("log", b"a\n").unwrap();
        fs.append_file("log", b"b\n").unwrap();
        assert_eq!(fs.read_file("log").unwrap(), b"a\nb\n");
    }

    #[test]
    fn append_requires_existing_file() {
        let mut fs = FileSystem::new();
        assert_eq!(fs.append_file("nope", b"x"), Err(FsError::FileNotFound));
    }

    #[test]
    fn list_keeps_creation_order() {
        let mut fs = FileSystem::new();
        fs.create_file("b.txt", b"").unwrap();
        fs.create_directory("a").unwrap();
        fs.create_file("c.txt", b"123").unwrap();
        let entries = fs.list_directory("/").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "a", "c.txt"]);
        assert_eq!(entries[1].kind, InodeKind::Directory);
        assert_eq!(entries[2].size, 3);
    }

    #[test]
    fn list_file_fails() {
        let mut fs = FileSystem::new();
        fs.create_file("f", b"").unwrap();
        assert_eq!(fs.list_directory("f"), Err(FsError::NotADirectory));
    }

    #[test]
    fn change_directory_and_current_path() {
        let mut fs = FileSystem::new();
        assert_eq!(fs.current_path(), "/");
        fs.create_directory_path("/home/user").unwrap();
        fs.change_directory("/home/user").unwrap();
        assert_eq!(fs.current_path(), "/home/user");
        fs.change_directory("..").unwrap();
        assert_eq!(fs.current_path(), "/home");
        fs.create_file("f", b"").unwrap();
        assert_eq!(fs.change_directory("f"), Err(FsError::NotADirectory));
        assert_eq!(fs.current_path(), "/home");
    }

    #[test]
    fn relative_operations_use_cwd() {
        let mut fs = FileSystem::new();
        fs.create_directory_path("/work").unwrap();
        fs.change_directory("/work").unwrap();
        fs.write_file("notes", b"x").unwrap();
        assert!(fs.is_file("/work/notes"));
    }

    #[test]
    fn predicates_swallow_errors() {
        let mut fs = FileSystem::new();
        fs.create_file("f", b"").unwrap();
        assert!(fs.exists("f"));
        assert!(fs.is_file("f"));
        assert!(!fs.is_directory("f"));
        assert!(!fs.exists("f/x"));
        assert!(!fs.is_file("missing"));
        assert!(fs.is_directory("/"));
    }

    #[test]
    fn remove_subtree_moves_cwd_out() {
        let mut fs = FileSystem::new();
        fs.create_directory_path("/a/b").unwrap();
        fs.change_directory("/a/b").unwrap();
        assert_eq!(fs.remove_subtree("/a").unwrap(), 2);
        assert_eq!(fs.current_path(), "/");
        assert!(!fs.exists("/a"));
    }
}
