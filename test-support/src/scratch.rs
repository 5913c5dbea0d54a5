//! 临时磁盘目录树

use std::fs;
use std::io;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// 在系统临时目录下创建的目录树，释放时整体删除
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// 创建新的空目录
    pub fn new(prefix: &str) -> io::Result<Self> {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!("{}-{}-{}", prefix, std::process::id(), id));
        fs::create_dir_all(&root)?;
        // 临时目录本身可能位于符号链接之下
        let root = fs::canonicalize(&root)?;
        Ok(Self { root })
    }

    /// 根目录的绝对路径
    pub fn path(&self) -> &str {
        self.root.to_str().expect("temp dir is not valid UTF-8")
    }

    fn full(&self, rel: &str) -> PathBuf {
        self.root.join(rel.trim_start_matches('/'))
    }

    /// 创建目录（自动创建缺失的上级目录）
    pub fn dir(&self, rel: &str) -> io::Result<&Self> {
        fs::create_dir_all(self.full(rel))?;
        Ok(self)
    }

    /// 写入属性文件并设置权限
    pub fn attr(&self, rel: &str, value: &str, mode: u32) -> io::Result<&Self> {
        let path = self.full(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, value)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))?;
        Ok(self)
    }

    /// 创建符号链接
    pub fn link(&self, rel: &str, target: &str) -> io::Result<&Self> {
        let path = self.full(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        symlink(Path::new(target), &path)?;
        Ok(self)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
