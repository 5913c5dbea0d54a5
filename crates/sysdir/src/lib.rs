//! sysfs 目录快照层
//!
//! 此 crate 把一个 sysfs 目录读成内存中的快照，是上层设备/驱动/类对象图的唯一数据来源：
//!
//! - [`Directory`] - 目录快照（属性、符号链接、子目录）
//! - [`Attribute`] / [`AttrMethod`] - 属性文件及其访问方式
//! - [`Link`] - 符号链接，目标已解析为绝对路径
//! - [`DirOps`] - 目录读取后端 trait，[`HostDirOps`] 为基于 `std::fs` 的实现
//! - 路径辅助函数与挂载点探测
//!
//! # 后端解耦
//!
//! 快照的构建只依赖 [`DirOps`] 提供的四个原语，测试时可替换为内存实现。

mod attribute;
mod directory;
mod error;
mod link;
pub mod mount;
mod ops;
pub mod path;

pub use attribute::{AttrMethod, Attribute};
pub use directory::Directory;
pub use error::SysfsError;
pub use link::Link;
pub use mount::{mount_path, parse_mounts};
pub use ops::{DirOps, EntryKind, HostDirOps, RawEntry};
pub use path::{
    PathComponent, join_path, name_from_path, normalize_path, parse_path, resolve_link_target,
};
