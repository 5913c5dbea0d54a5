//! 设备节点与设备树
//!
//! [`Device`] 对应 `<挂载点>/devices/` 下的一个目录。[`Device::open`] 只读取设备自身，
//! [`Device::open_tree`] 把所有子目录递归地构建为子设备。
//!
//! # 所有权
//!
//! - 设备拥有自己的目录快照和全部子设备
//! - 指向驱动的引用是 [`Weak`]，只用于查询，释放时从不经过它
//!
//! 释放设备时先释放全部子设备，再释放自身。

use std::collections::VecDeque;
use std::sync::{Arc, OnceLock, Weak};

use log::{debug, trace, warn};
use sysdir::{Attribute, Directory, SysfsError};

use crate::bus::BusIndex;
use crate::driver::Driver;
use crate::{SYSFS_NAME_ATTRIBUTE, Sysfs};

/// sysfs 设备
#[derive(Debug)]
pub struct Device {
    /// 设备在总线上的标识（目录名）
    bus_id: String,
    /// 所在总线名称，未找到时为空
    bus_name: String,
    /// `name` 属性的值（去掉结尾的换行），没有该属性时为空
    name: String,
    directory: Directory,
    /// 子设备，后构建的在前
    children: VecDeque<Device>,
    /// 当前绑定的驱动（弱引用）
    driver: OnceLock<Weak<Driver>>,
}

impl Device {
    /// 打开单个设备
    ///
    /// # 错误
    ///
    /// - `path` 为空：[`SysfsError::InvalidArgument`]
    /// - 目录不存在或无法读取：[`SysfsError::NotFound`] / [`SysfsError::ReadError`]
    pub fn open(sysfs: &Sysfs, path: &str) -> Result<Self, SysfsError> {
        Self::open_with(sysfs, path, &BusIndex::load_or_empty(sysfs))
    }

    fn open_with(sysfs: &Sysfs, path: &str, buses: &BusIndex) -> Result<Self, SysfsError> {
        if path.is_empty() {
            return Err(SysfsError::InvalidArgument);
        }
        let directory = sysfs.read_directory(path).map_err(|err| {
            debug!("invalid device at {}: {}", path, err);
            err
        })?;

        let bus_id = directory.name().to_string();
        let bus_name = buses.lookup(sysfs, &bus_id).unwrap_or_default();
        let name = directory
            .value_of(SYSFS_NAME_ATTRIBUTE)
            .map(|value| value.strip_suffix('\n').unwrap_or(value).to_string())
            .unwrap_or_default();

        Ok(Self {
            bus_id,
            bus_name,
            name,
            directory,
            children: VecDeque::new(),
            driver: OnceLock::new(),
        })
    }

    /// 打开设备及其全部子孙设备
    ///
    /// 设备目录下的每个子目录都被当作子设备递归打开。任何一个子孙失败时，
    /// 已构建的整棵子树被释放并返回该错误，不会返回部分构建的树。
    pub fn open_tree(sysfs: &Sysfs, path: &str) -> Result<Self, SysfsError> {
        Self::build_tree(sysfs, path, &BusIndex::load_or_empty(sysfs))
    }

    fn build_tree(sysfs: &Sysfs, path: &str, buses: &BusIndex) -> Result<Self, SysfsError> {
        let mut root = Self::open_with(sysfs, path, buses)?;

        let subdirs: Vec<String> = root
            .directory
            .subdirs()
            .iter()
            .map(|dir| dir.path().to_string())
            .collect();

        for subdir in subdirs {
            match Self::build_tree(sysfs, &subdir, buses) {
                Ok(child) => root.children.push_front(child),
                Err(err) => {
                    warn!("error opening device tree at {}: {}", subdir, err);
                    return Err(err);
                }
            }
        }

        Ok(root)
    }

    /// 设备在总线上的标识
    pub fn bus_id(&self) -> &str {
        &self.bus_id
    }

    /// 所在总线名称，未找到时为空
    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }

    /// 设备声明的名称，没有 `name` 属性时为空
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 设备目录的绝对路径
    pub fn path(&self) -> &str {
        self.directory.path()
    }

    /// 设备的目录快照
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// 按名称查找设备属性
    ///
    /// 返回的引用指向设备自身的快照，随设备释放而失效。
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.directory.attribute(name)
    }

    /// 子设备（后构建的在前）
    pub fn children(&self) -> impl Iterator<Item = &Device> {
        self.children.iter()
    }

    /// 子设备数量
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// 按 bus id 查找直接子设备
    pub fn child(&self, bus_id: &str) -> Option<&Device> {
        self.children.iter().find(|child| child.bus_id == bus_id)
    }

    /// 子孙设备总数（不含自身）
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// 当前绑定的驱动
    pub fn driver(&self) -> Option<Arc<Driver>> {
        self.driver.get().and_then(Weak::upgrade)
    }

    /// 设置绑定的驱动，只能设置一次
    pub(crate) fn set_driver(&self, driver: &Arc<Driver>) -> bool {
        self.driver.set(Arc::downgrade(driver)).is_ok()
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        self.children.clear();
        trace!("close device {}", self.directory.path());
    }
}
