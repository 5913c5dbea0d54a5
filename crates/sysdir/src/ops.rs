//! 目录读取后端 trait 定义和宿主机实现
//!
//! [`Directory`](crate::Directory) 不直接访问文件系统，而是通过 [`DirOps`] 完成
//! 打开、列目录、读链接、读属性和求真实路径五种原语。这样同一套对象图构建逻辑既可以运行在
//! 真实的 `/sys` 上（[`HostDirOps`]），也可以运行在测试用的内存树上。

use std::fs;
use std::os::unix::fs::PermissionsExt;

use log::trace;

use crate::SysfsError;

/// 目录项类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 子目录
    Directory,
    /// 符号链接
    Symlink,
    /// 普通文件（sysfs 属性）
    File,
}

/// 后端返回的原始目录项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// 目录项名称（不含路径）
    pub name: String,
    /// 目录项类型
    pub kind: EntryKind,
    /// 权限位（低 12 位）
    pub mode: u32,
}

/// 目录读取后端
///
/// 所有路径都是绝对路径。
pub trait DirOps: Send + Sync {
    /// 查询路径最终指向的对象类型（跟随符号链接）
    fn stat(&self, path: &str) -> Result<EntryKind, SysfsError>;

    /// 列出目录的直接子项
    ///
    /// 子项类型不跟随符号链接判断。返回顺序即扫描顺序。
    fn read_dir(&self, path: &str) -> Result<Vec<RawEntry>, SysfsError>;

    /// 读取符号链接的目标（原样返回，可能是相对路径）
    fn read_link(&self, path: &str) -> Result<String, SysfsError>;

    /// 读取属性文件的原始内容
    fn read_attr(&self, path: &str) -> Result<Vec<u8>, SysfsError>;

    /// 求路径的真实位置：跟随路径中每一级符号链接后的规范化绝对路径
    ///
    /// 目录内链接的相对目标必须相对于该目录的真实位置解析。
    fn real_path(&self, path: &str) -> Result<String, SysfsError>;
}

/// 基于 `std::fs` 的宿主机后端
///
/// `read_dir` 的结果按名称排序，使同一目录的扫描顺序在不同运行之间保持稳定。
#[derive(Debug, Default, Clone, Copy)]
pub struct HostDirOps;

impl HostDirOps {
    /// 创建宿主机后端
    pub const fn new() -> Self {
        Self
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

impl DirOps for HostDirOps {
    fn stat(&self, path: &str) -> Result<EntryKind, SysfsError> {
        let meta = fs::metadata(path)?;
        Ok(kind_of(meta.file_type()))
    }

    fn read_dir(&self, path: &str) -> Result<Vec<RawEntry>, SysfsError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                trace!("skip non-utf8 entry in {}", path);
                continue;
            };
            let meta = entry.metadata()?;
            entries.push(RawEntry {
                name,
                kind: kind_of(meta.file_type()),
                mode: meta.permissions().mode() & 0o7777,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_link(&self, path: &str) -> Result<String, SysfsError> {
        let target = fs::read_link(path)?;
        target
            .into_os_string()
            .into_string()
            .map_err(|_| SysfsError::ReadError)
    }

    fn read_attr(&self, path: &str) -> Result<Vec<u8>, SysfsError> {
        Ok(fs::read(path)?)
    }

    fn real_path(&self, path: &str) -> Result<String, SysfsError> {
        fs::canonicalize(path)?
            .into_os_string()
            .into_string()
            .map_err(|_| SysfsError::ReadError)
    }
}
