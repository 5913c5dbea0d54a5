//! sysfs 错误类型
//!
//! 定义了读取 sysfs 时可能出现的错误，可通过 [`SysfsError::to_errno()`] 转换为 POSIX 错误码。

use core::fmt;
use std::io;

/// sysfs 错误类型
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysfsError {
    /// 无效参数 (-EINVAL)，例如空路径或路径中没有名称组件
    InvalidArgument,
    /// 路径不存在或无法确定 sysfs 挂载点 (-ENOENT)
    NotFound,
    /// 目录存在但无法读取 (-EIO)
    ReadError,
    /// 内存不足 (-ENOMEM)
    AllocationFailure,
}

impl SysfsError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            SysfsError::NotFound => -2,
            SysfsError::ReadError => -5,
            SysfsError::AllocationFailure => -12,
            SysfsError::InvalidArgument => -22,
        }
    }
}

impl fmt::Display for SysfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SysfsError::InvalidArgument => "invalid argument",
            SysfsError::NotFound => "no such file or directory",
            SysfsError::ReadError => "read error",
            SysfsError::AllocationFailure => "out of memory",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for SysfsError {}

impl From<io::Error> for SysfsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SysfsError::NotFound,
            io::ErrorKind::InvalidInput => SysfsError::InvalidArgument,
            io::ErrorKind::OutOfMemory => SysfsError::AllocationFailure,
            _ => SysfsError::ReadError,
        }
    }
}
