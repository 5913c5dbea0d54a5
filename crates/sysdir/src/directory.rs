//! sysfs 目录快照
//!
//! [`Directory`] 是某个 sysfs 目录在扫描时刻的内容：属性、符号链接和子目录。
//! 子目录本身也是 [`Directory`]，默认只记录路径而不读取，调用
//! [`Directory::read_all_subdirs`] 后才递归填充。
//!
//! 快照与其子目录快照是单一所有权的树，释放（drop）时整棵树随之释放。

use log::{debug, trace};

use crate::SysfsError;
use crate::attribute::{AttrMethod, Attribute};
use crate::link::Link;
use crate::ops::{DirOps, EntryKind};
use crate::path::{join_path, name_from_path, normalize_path, resolve_link_target};

/// 目录快照
#[derive(Debug)]
pub struct Directory {
    name: String,
    path: String,
    attributes: Vec<Attribute>,
    links: Vec<Link>,
    subdirs: Vec<Directory>,
    populated: bool,
}

impl Directory {
    /// 打开目录
    ///
    /// 只确认路径存在且是目录，不读取内容。
    ///
    /// # 错误
    ///
    /// - 路径为空或没有名称组件：[`SysfsError::InvalidArgument`]
    /// - 路径不存在或不是目录：[`SysfsError::NotFound`]
    pub fn open(ops: &dyn DirOps, path: &str) -> Result<Self, SysfsError> {
        if path.is_empty() {
            return Err(SysfsError::InvalidArgument);
        }
        let path = normalize_path(path);
        let name = name_from_path(&path)?.to_string();

        match ops.stat(&path)? {
            EntryKind::Directory => {}
            _ => return Err(SysfsError::NotFound),
        }

        Ok(Self::unpopulated(name, path))
    }

    fn unpopulated(name: String, path: String) -> Self {
        Self {
            name,
            path,
            attributes: Vec::new(),
            links: Vec::new(),
            subdirs: Vec::new(),
            populated: false,
        }
    }

    /// 扫描目录的直接子项
    ///
    /// 子目录只记录路径，不读取内容。失败时快照保持调用前的状态。
    /// 单个链接或属性值读取失败不影响整体扫描。
    pub fn read(&mut self, ops: &dyn DirOps) -> Result<(), SysfsError> {
        let entries = ops.read_dir(&self.path)?;
        // 路径本身可能经过符号链接，链接目标要相对真实位置解析
        let link_base = if entries.iter().any(|e| e.kind == EntryKind::Symlink) {
            ops.real_path(&self.path)?
        } else {
            self.path.clone()
        };

        let mut attributes = Vec::new();
        let mut links = Vec::new();
        let mut subdirs = Vec::new();

        for entry in entries {
            let path = join_path(&self.path, &entry.name);
            match entry.kind {
                EntryKind::Directory => subdirs.push(Self::unpopulated(entry.name, path)),
                EntryKind::Symlink => match ops.read_link(&path) {
                    Ok(target) => links.push(Link {
                        target: resolve_link_target(&link_base, &target),
                        name: entry.name,
                        path,
                    }),
                    Err(err) => debug!("skip unreadable link {}: {}", path, err),
                },
                EntryKind::File => {
                    let method = AttrMethod::from_mode(entry.mode);
                    let value = if method.contains(AttrMethod::SHOW) {
                        match ops.read_attr(&path) {
                            Ok(raw) => Some(String::from_utf8_lossy(&raw).into_owned()),
                            Err(err) => {
                                debug!("attribute {} has no value: {}", path, err);
                                None
                            }
                        }
                    } else {
                        None
                    };
                    attributes.push(Attribute {
                        name: entry.name,
                        path,
                        value,
                        method,
                    });
                }
            }
        }

        self.attributes = attributes;
        self.links = links;
        self.subdirs = subdirs;
        self.populated = true;
        Ok(())
    }

    /// 递归扫描所有子目录（深度优先）
    ///
    /// 返回遇到的第一个错误，已扫描成功的子目录保持填充状态。
    pub fn read_all_subdirs(&mut self, ops: &dyn DirOps) -> Result<(), SysfsError> {
        if !self.populated {
            self.read(ops)?;
        }
        for subdir in &mut self.subdirs {
            subdir.read_all_subdirs(ops)?;
        }
        Ok(())
    }

    /// 目录名称（路径的最后一个组件）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 规范化后的绝对路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 是否已经扫描过
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// 属性列表（扫描顺序）
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// 符号链接列表（扫描顺序）
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// 子目录列表（扫描顺序）
    pub fn subdirs(&self) -> &[Directory] {
        &self.subdirs
    }

    /// 按名称查找属性
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// 按名称查找符号链接
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.name == name)
    }

    /// 按名称查找子目录
    pub fn subdir(&self, name: &str) -> Option<&Directory> {
        self.subdirs.iter().find(|dir| dir.name == name)
    }

    /// 按名称取属性值
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Attribute::value)
    }
}

impl Drop for Directory {
    fn drop(&mut self) {
        trace!("close directory {}", self.path);
    }
}
