//! sysfs 挂载点探测
//!
//! 挂载点在进程内只探测一次，结果缓存在 [`MOUNT_PATH`] 中。
//! 探测顺序：
//!
//! 1. 环境变量 `SYSFS_PATH`
//! 2. `/proc/mounts` 中第一个类型为 `sysfs` 的挂载项

use std::fs;

use lazy_static::lazy_static;
use log::debug;

use crate::SysfsError;

/// 覆盖挂载点的环境变量
pub const SYSFS_PATH_ENV: &str = "SYSFS_PATH";

/// 挂载表路径
pub const PROC_MOUNTS_PATH: &str = "/proc/mounts";

/// sysfs 的文件系统类型名
pub const SYSFS_FSTYPE: &str = "sysfs";

lazy_static! {
    /// 进程级缓存的挂载点探测结果
    static ref MOUNT_PATH: Result<String, SysfsError> = discover_mount_path();
}

/// 获取 sysfs 挂载点
///
/// 首次调用时探测，之后返回缓存结果。
pub fn mount_path() -> Result<String, SysfsError> {
    MOUNT_PATH.clone()
}

fn discover_mount_path() -> Result<String, SysfsError> {
    if let Ok(path) = std::env::var(SYSFS_PATH_ENV) {
        let path = path.trim_end_matches('/');
        if !path.is_empty() {
            debug!("sysfs mount point from {}: {}", SYSFS_PATH_ENV, path);
            return Ok(path.to_string());
        }
    }

    let mounts = fs::read_to_string(PROC_MOUNTS_PATH).map_err(|err| {
        debug!("cannot read {}: {}", PROC_MOUNTS_PATH, err);
        SysfsError::NotFound
    })?;
    let path = parse_mounts(&mounts).ok_or(SysfsError::NotFound)?;
    debug!("sysfs mounted at {}", path);
    Ok(path)
}

/// 从挂载表文本中取第一个 sysfs 的挂载目录
///
/// 每行格式为 `<设备> <挂载目录> <类型> <选项> <dump> <pass>`。
pub fn parse_mounts(mounts: &str) -> Option<String> {
    mounts.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        let _device = fields.next()?;
        let dir = fields.next()?;
        let fstype = fields.next()?;
        (fstype == SYSFS_FSTYPE).then(|| unescape_mount_dir(dir))
    })
}

/// 还原挂载表中的八进制转义（如空格写作 `\040`）
fn unescape_mount_dir(dir: &str) -> String {
    let bytes = dir.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 4 <= bytes.len() {
            let value = std::str::from_utf8(&bytes[i + 1..i + 4])
                .ok()
                .and_then(|digits| u8::from_str_radix(digits, 8).ok());
            if let Some(value) = value {
                out.push(value);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
