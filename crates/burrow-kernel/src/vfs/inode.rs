//! Inode types — the nodes of the filesystem tree.

use std::fmt;

/// Default permission bits for new directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Default permission bits for new files.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Identity of an inode. The root is always `InodeId::ROOT`; every other id
/// is handed out once by the tree and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InodeId(u64);

impl InodeId {
    /// The root directory.
    pub const ROOT: InodeId = InodeId(0);

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for InodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of inode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeKind {
    File,
    Directory,
    /// Reserved. Stored but never followed during resolution.
    Symlink,
}

/// Type-specific payload.
#[derive(Debug, Clone)]
pub enum InodeData {
    /// File contents.
    File(Vec<u8>),
    /// Children in creation order.
    Directory(Vec<InodeId>),
    /// Link target, kept verbatim.
    Symlink(String),
}

/// One filesystem entry.
///
/// `parent` is a plain id into the same tree. It is used for `..` and for
/// rebuilding absolute paths; it never owns anything.
#[derive(Debug, Clone)]
pub struct Inode {
    pub(crate) id: InodeId,
    pub(crate) name: String,
    pub(crate) mode: u32,
    pub(crate) parent: Option<InodeId>,
    pub(crate) data: InodeData,
}

impl Inode {
    pub fn id(&self) -> InodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Permission bits (display only).
    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn parent(&self) -> Option<InodeId> {
        self.parent
    }

    pub fn data(&self) -> &InodeData {
        &self.data
    }

    pub fn kind(&self) -> InodeKind {
        match self.data {
            InodeData::File(_) => InodeKind::File,
            InodeData::Directory(_) => InodeKind::Directory,
            InodeData::Symlink(_) => InodeKind::Symlink,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.data, InodeData::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.data, InodeData::Directory(_))
    }

    /// Size in bytes: content length for files, target length for symlinks,
    /// 0 for directories.
    pub fn size(&self) -> u64 {
        match &self.data {
            InodeData::File(bytes) => bytes.len() as u64,
            InodeData::Directory(_) => 0,
            InodeData::Symlink(target) => target.len() as u64,
        }
    }

    /// Child ids, if this is a directory.
    pub fn children(&self) -> Option<&[InodeId]> {
        match &self.data {
            InodeData::Directory(children) => Some(children),
            _ => None,
        }
    }
}

/// A snapshot of one entry, as returned by `list_directory` and `stat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub id: InodeId,
    /// Name of the entry (not full path).
    pub name: String,
    pub kind: InodeKind,
    /// Unix permission bits, e.g. `0o644`.
    pub mode: u32,
    /// Size in bytes (0 for directories).
    pub size: u64,
}

impl DirEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == InodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == InodeKind::File
    }

    /// Render the mode as `ls -l` does, e.g. `drwxr-xr-x`.
    pub fn mode_string(&self) -> String {
        let type_char = match self.kind {
            InodeKind::Directory => 'd',
            InodeKind::File => '-',
            InodeKind::Symlink => 'l',
        };
        let mut out = String::with_capacity(10);
        out.push(type_char);
        for shift in [6u32, 3, 0] {
            let bits = (self.mode >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        out
    }
}

impl From<&Inode> for DirEntry {
    fn from(inode: &Inode) -> Self {
        Self {
            id: inode.id,
            name: inode.name.clone(),
            kind: inode.kind(),
            mode: inode.mode,
            size: inode.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_string_directory() {
        let entry = DirEntry {
            id: InodeId::ROOT,
            name: "/".into(),
            kind: InodeKind::Directory,
            mode: DEFAULT_DIR_MODE,
            size: 0,
        };
        assert_eq!(entry.mode_string(), "drwxr-xr-x");
    }

    #[test]
    fn mode_string_file() {
        let entry = DirEntry {
            id: InodeId::from_raw(3),
            name: "notes".into(),
            kind: InodeKind::File,
            mode: DEFAULT_FILE_MODE,
            size: 12,
        };
        assert_eq!(entry.mode_string(), "-rw-r--r--");
    }
}
