//! The inode tree: an arena of inodes with strictly hierarchical ownership.
//!
//! Directories own their children through the ordered child-id list; the
//! `parent` field is only a back-reference. Releasing a directory releases
//! its whole subtree, and that walk is iterative so tree depth never turns
//! into stack depth.

use std::collections::HashMap;

use tracing::trace;

use super::error::{FsError, FsResult};
use super::inode::{DEFAULT_DIR_MODE, Inode, InodeData, InodeId};

/// Owner of every inode in one filesystem instance.
#[derive(Debug)]
pub struct InodeTree {
    nodes: HashMap<InodeId, Inode>,
    /// Next id to hand out. Never decremented.
    next_id: u64,
}

impl Default for InodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl InodeTree {
    /// Create a tree holding only the root directory (id 0).
    pub fn new() -> Self {
        let root = Inode {
            id: InodeId::ROOT,
            name: String::new(),
            mode: DEFAULT_DIR_MODE,
            parent: None,
            data: InodeData::Directory(Vec::new()),
        };
        let mut nodes = HashMap::new();
        nodes.insert(InodeId::ROOT, root);
        Self { nodes, next_id: 1 }
    }

    pub fn root(&self) -> InodeId {
        InodeId::ROOT
    }

    /// Look up a live inode.
    pub fn get(&self, id: InodeId) -> Option<&Inode> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: InodeId) -> Option<&mut Inode> {
        self.nodes.get_mut(&id)
    }

    /// Number of live inodes, root included.
    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    /// The id the next created inode will receive.
    pub fn peek_next_id(&self) -> u64 {
        self.next_id
    }

    /// Find a child of `dir` by exact name.
    ///
    /// Returns `NotADirectory` if `dir` is not a directory.
    pub fn child(&self, dir: InodeId, name: &str) -> FsResult<Option<InodeId>> {
        let node = self.nodes.get(&dir).ok_or(FsError::FileNotFound)?;
        let children = node.children().ok_or(FsError::NotADirectory)?;
        Ok(children
            .iter()
            .copied()
            .find(|id| self.nodes.get(id).is_some_and(|c| c.name == name)))
    }

    /// Allocate a new inode and link it under `parent`.
    ///
    /// Fails with `NotADirectory` if the parent is not a directory and with
    /// `FileExists` if a sibling already has `name`.
    pub fn insert(
        &mut self,
        parent: InodeId,
        name: &str,
        mode: u32,
        data: InodeData,
    ) -> FsResult<InodeId> {
        if name.is_empty() || name.contains('/') || name == "." || name == ".." {
            return Err(FsError::InvalidPath);
        }
        if self.child(parent, name)?.is_some() {
            return Err(FsError::FileExists);
        }

        let id = InodeId::from_raw(self.next_id);
        let parent_node = self.nodes.get_mut(&parent).ok_or(FsError::FileNotFound)?;
        match &mut parent_node.data {
            InodeData::Directory(children) => {
                children
                    .try_reserve(1)
                    .map_err(|_| FsError::OutOfMemory)?;
                children.push(id);
            }
            _ => return Err(FsError::NotADirectory),
        }
        self.next_id += 1;

        trace!(%id, %parent, name, "inode created");
        self.nodes.insert(
            id,
            Inode {
                id,
                name: name.to_string(),
                mode,
                parent: Some(parent),
                data,
            },
        );
        Ok(id)
    }

    /// Unlink `id` from its parent and release it together with every
    /// descendant. Returns the number of inodes released.
    ///
    /// The root cannot be released.
    pub fn remove_subtree(&mut self, id: InodeId) -> FsResult<usize> {
        if id == InodeId::ROOT {
            return Err(FsError::InvalidPath);
        }
        let parent = self
            .nodes
            .get(&id)
            .ok_or(FsError::FileNotFound)?
            .parent;
        if let Some(parent) = parent {
            if let Some(InodeData::Directory(children)) =
                self.nodes.get_mut(&parent).map(|p| &mut p.data)
            {
                children.retain(|child| *child != id);
            }
        }

        let mut released = 0;
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                if let InodeData::Directory(children) = node.data {
                    pending.extend(children);
                }
                released += 1;
            }
        }
        trace!(%id, released, "subtree released");
        Ok(released)
    }

    /// Build the absolute path of `id` by walking parent links.
    pub fn path_of(&self, id: InodeId) -> String {
        let mut names = Vec::new();
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            match node.parent {
                Some(parent) => {
                    names.push(node.name.as_str());
                    current = self.nodes.get(&parent);
                }
                None => break,
            }
        }
        if names.is_empty() {
            return "/".to_string();
        }
        names.reverse();
        let mut path = String::new();
        for name in names {
            path.push('/');
            path.push_str(name);
        }
        path
    }
}
