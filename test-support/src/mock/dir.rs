//! 内存中的 sysfs 树
//!
//! [`MemDirOps`] 实现 [`DirOps`]，用于在没有真实 `/sys` 的环境下构造任意目录结构，
//! 并可以把指定目录标记为不可读以注入扫描失败。
//!
//! 子项按插入顺序返回，测试可以据此精确控制扫描顺序。

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use sysdir::path::{join_path, normalize_path, resolve_link_target};
use sysdir::{DirOps, EntryKind, RawEntry, SysfsError};

const MAX_LINK_DEPTH: usize = 40;

#[derive(Debug, Clone)]
enum Node {
    Dir(Vec<String>),
    File { value: Vec<u8>, mode: u32 },
    Link(String),
}

/// 内存目录树后端
#[derive(Debug, Clone)]
pub struct MemDirOps {
    nodes: BTreeMap<String, Node>,
    unreadable: BTreeSet<String>,
}

impl Default for MemDirOps {
    fn default() -> Self {
        Self::new()
    }
}

fn split_parent(path: &str) -> (String, String) {
    match path.rfind('/') {
        Some(0) => (String::from("/"), path[1..].to_string()),
        Some(pos) => (path[..pos].to_string(), path[pos + 1..].to_string()),
        None => (String::from("/"), path.to_string()),
    }
}

impl MemDirOps {
    /// 创建只有根目录的空树
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(String::from("/"), Node::Dir(Vec::new()));
        Self {
            nodes,
            unreadable: BTreeSet::new(),
        }
    }

    fn insert(&mut self, path: &str, node: Node) {
        let path = normalize_path(path);
        if path == "/" {
            return;
        }
        let (parent, name) = split_parent(&path);
        self.dir(&parent);
        if let Some(Node::Dir(children)) = self.nodes.get_mut(&parent) {
            if !children.contains(&name) {
                children.push(name);
            }
        }
        let keep_dir =
            matches!(node, Node::Dir(_)) && matches!(self.nodes.get(&path), Some(Node::Dir(_)));
        if !keep_dir {
            self.nodes.insert(path, node);
        }
    }

    /// 创建目录（自动创建缺失的上级目录）
    pub fn dir(&mut self, path: &str) -> &mut Self {
        self.insert(path, Node::Dir(Vec::new()));
        self
    }

    /// 创建只读属性文件（权限 0444）
    pub fn attr(&mut self, path: &str, value: &str) -> &mut Self {
        self.attr_with_mode(path, value, 0o444)
    }

    /// 创建指定权限的属性文件
    pub fn attr_with_mode(&mut self, path: &str, value: &str, mode: u32) -> &mut Self {
        self.insert(
            path,
            Node::File {
                value: value.as_bytes().to_vec(),
                mode,
            },
        );
        self
    }

    /// 创建符号链接，`target` 可以是相对路径
    pub fn link(&mut self, path: &str, target: &str) -> &mut Self {
        self.insert(path, Node::Link(target.to_string()));
        self
    }

    /// 把目录标记为不可读：`stat` 仍然成功，`read_dir` 返回 [`SysfsError::ReadError`]
    pub fn unreadable(&mut self, path: &str) -> &mut Self {
        let path = normalize_path(path);
        self.dir(&path);
        self.unreadable.insert(path);
        self
    }

    /// 逐级跟随路径中的符号链接
    ///
    /// `follow_last` 为 `false` 时最后一个组件即使是链接也不跟随。
    fn resolve_with(&self, path: &str, follow_last: bool) -> Result<String, SysfsError> {
        let mut pending: VecDeque<String> = components(path);
        let mut resolved = String::from("/");
        let mut hops = 0;

        while let Some(name) = pending.pop_front() {
            let candidate = join_path(&resolved, &name);
            match self.nodes.get(&candidate) {
                Some(Node::Link(target)) if follow_last || !pending.is_empty() => {
                    hops += 1;
                    if hops > MAX_LINK_DEPTH {
                        return Err(SysfsError::NotFound);
                    }
                    let mut rest = components(&resolve_link_target(&resolved, target));
                    rest.extend(pending);
                    pending = rest;
                    resolved = String::from("/");
                }
                Some(_) => resolved = candidate,
                None => return Err(SysfsError::NotFound),
            }
        }
        Ok(resolved)
    }

    fn resolve(&self, path: &str) -> Result<String, SysfsError> {
        self.resolve_with(path, true)
    }
}

fn components(path: &str) -> VecDeque<String> {
    normalize_path(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl DirOps for MemDirOps {
    fn stat(&self, path: &str) -> Result<EntryKind, SysfsError> {
        let path = self.resolve(path)?;
        match self.nodes.get(&path) {
            Some(Node::Dir(_)) => Ok(EntryKind::Directory),
            Some(Node::File { .. }) => Ok(EntryKind::File),
            Some(Node::Link(_)) => Ok(EntryKind::Symlink),
            None => Err(SysfsError::NotFound),
        }
    }

    fn read_dir(&self, path: &str) -> Result<Vec<RawEntry>, SysfsError> {
        let path = self.resolve(path)?;
        if self.unreadable.contains(&path) {
            return Err(SysfsError::ReadError);
        }
        let Some(Node::Dir(children)) = self.nodes.get(&path) else {
            return Err(SysfsError::NotFound);
        };
        let entries = children
            .iter()
            .filter_map(|name| {
                let (kind, mode) = match self.nodes.get(&join_path(&path, name))? {
                    Node::Dir(_) => (EntryKind::Directory, 0o755),
                    Node::File { mode, .. } => (EntryKind::File, *mode),
                    Node::Link(_) => (EntryKind::Symlink, 0o777),
                };
                Some(RawEntry {
                    name: name.clone(),
                    kind,
                    mode,
                })
            })
            .collect();
        Ok(entries)
    }

    fn read_link(&self, path: &str) -> Result<String, SysfsError> {
        let path = self.resolve_with(path, false)?;
        match self.nodes.get(&path) {
            Some(Node::Link(target)) => Ok(target.clone()),
            Some(_) => Err(SysfsError::InvalidArgument),
            None => Err(SysfsError::NotFound),
        }
    }

    fn read_attr(&self, path: &str) -> Result<Vec<u8>, SysfsError> {
        let path = self.resolve(path)?;
        match self.nodes.get(&path) {
            Some(Node::File { value, .. }) => Ok(value.clone()),
            Some(_) => Err(SysfsError::InvalidArgument),
            None => Err(SysfsError::NotFound),
        }
    }

    fn real_path(&self, path: &str) -> Result<String, SysfsError> {
        self.resolve(path)
    }
}
