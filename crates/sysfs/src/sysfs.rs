//! sysfs 访问上下文
//!
//! [`Sysfs`] 把挂载点和目录读取后端打包在一起，显式传给每个 `open` 操作，
//! 避免在对象图构建过程中依赖进程级隐式状态。

use std::fmt;
use std::sync::Arc;

use sysdir::path::join_path;
use sysdir::{DirOps, Directory, HostDirOps, SysfsError};

use crate::{SYSFS_BUS_NAME, SYSFS_CLASS_NAME};

/// sysfs 访问上下文
#[derive(Clone)]
pub struct Sysfs {
    mnt_path: String,
    ops: Arc<dyn DirOps>,
}

impl Sysfs {
    /// 使用指定挂载点和后端创建上下文
    pub fn new(mnt_path: &str, ops: Arc<dyn DirOps>) -> Self {
        Self {
            mnt_path: mnt_path.trim_end_matches('/').to_string(),
            ops,
        }
    }

    /// 使用探测到的挂载点和宿主机后端创建上下文
    ///
    /// 挂载点无法确定时返回 [`SysfsError::NotFound`]。
    pub fn host() -> Result<Self, SysfsError> {
        let mnt_path = sysdir::mount_path()?;
        Ok(Self::new(&mnt_path, Arc::new(HostDirOps::new())))
    }

    /// 挂载点（不带结尾的 `/`）
    pub fn mnt_path(&self) -> &str {
        &self.mnt_path
    }

    /// 目录读取后端
    pub fn ops(&self) -> &dyn DirOps {
        self.ops.as_ref()
    }

    /// `<挂载点>/class/<name>`
    pub fn class_path(&self, name: &str) -> String {
        join_path(&join_path(&self.mnt_path, SYSFS_CLASS_NAME), name)
    }

    /// `<挂载点>/bus`
    pub fn bus_path(&self) -> String {
        join_path(&self.mnt_path, SYSFS_BUS_NAME)
    }

    /// 打开并扫描一个目录（不递归）
    pub(crate) fn read_directory(&self, path: &str) -> Result<Directory, SysfsError> {
        let mut dir = Directory::open(self.ops(), path)?;
        dir.read(self.ops())?;
        Ok(dir)
    }

    /// 列出 `<挂载点>/<subsystem>` 下所有子目录的名称（扫描顺序）
    pub(crate) fn subsystem_names(&self, subsystem: &str) -> Result<Vec<String>, SysfsError> {
        let dir = self.read_directory(&join_path(&self.mnt_path, subsystem))?;
        Ok(dir.subdirs().iter().map(|d| d.name().to_string()).collect())
    }
}

impl fmt::Debug for Sysfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sysfs")
            .field("mnt_path", &self.mnt_path)
            .finish_non_exhaustive()
    }
}
