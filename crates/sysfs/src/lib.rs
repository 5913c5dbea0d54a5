//! sysfs 对象图
//!
//! 此 crate 把 sysfs 中三棵相互独立的子树（设备、驱动、设备类）读成内存对象，
//! 并沿着类设备目录中的符号链接把它们连成一张图：
//!
//! - [`Device`] - 设备节点，[`Device::open_tree`] 递归构建设备树
//! - [`Driver`] - 驱动节点
//! - [`ClassDevice`] - 类设备，拥有其链接到的设备和驱动
//! - [`DeviceClass`] - 设备类，拥有其全部类设备
//! - [`Sysfs`] - 挂载点与目录读取后端组成的访问上下文
//!
//! # 所有权模型
//!
//! 所有权严格呈树状：类拥有类设备，类设备拥有设备与驱动，设备拥有子设备，
//! 每个节点拥有自己的目录快照。设备与驱动之间的互相引用是 `Weak`，释放时从不经过。
//!
//! 每个 `open` 要么返回完整构建的节点，要么返回错误；释放即 `drop`。

#![allow(clippy::module_inception)]

mod bus;
mod class;
mod device;
mod driver;
mod sysfs;

pub use bus::{find_device_bus_name, list_buses};
pub use class::{ClassDevice, DeviceClass, list_classes};
pub use device::Device;
pub use driver::Driver;
pub use sysfs::Sysfs;

pub use sysdir::{AttrMethod, Attribute, DirOps, Directory, HostDirOps, Link, SysfsError};

/// 类子树目录名
pub const SYSFS_CLASS_NAME: &str = "class";
/// 总线子树目录名
pub const SYSFS_BUS_NAME: &str = "bus";
/// 总线下存放设备链接的目录名
pub const SYSFS_DEVICES_NAME: &str = "devices";
/// 类设备中指向设备的链接名（前缀）
pub const SYSFS_DEVICE_LINK: &str = "device";
/// 类设备中指向驱动的链接名（前缀）
pub const SYSFS_DRIVER_LINK: &str = "driver";
/// 存放设备名称的属性名
pub const SYSFS_NAME_ATTRIBUTE: &str = "name";
