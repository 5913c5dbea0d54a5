//! 设备类与类设备
//!
//! `<挂载点>/class/<类名>/` 下的每个子目录是一个类设备。类设备目录中以
//! `device` 和 `driver` 开头的符号链接分别指向设备子树和驱动子树中的对应条目，
//! 打开类设备时会顺着它们构建 [`Device`] 与 [`Driver`]，并在二者之间建立双向弱引用。
//!
//! 类设备拥有解析得到的设备和驱动；设备与驱动互相之间只持有弱引用。

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, trace, warn};
use sysdir::path::{join_path, name_from_path};
use sysdir::{Attribute, Directory, SysfsError};

use crate::device::Device;
use crate::driver::{Driver, bind};
use crate::{SYSFS_CLASS_NAME, SYSFS_DEVICE_LINK, SYSFS_DRIVER_LINK, Sysfs};

enum LinkKind {
    Device,
    Driver,
}

/// 按名称前缀识别链接类型
///
/// 以 `device` 开头的是设备链接，以 `driver` 开头的是驱动链接。
fn link_kind(name: &str) -> Option<LinkKind> {
    if name.starts_with(SYSFS_DEVICE_LINK) {
        Some(LinkKind::Device)
    } else if name.starts_with(SYSFS_DRIVER_LINK) {
        Some(LinkKind::Driver)
    } else {
        None
    }
}

/// 类设备
#[derive(Debug)]
pub struct ClassDevice {
    name: String,
    directory: Directory,
    device: Option<Arc<Device>>,
    driver: Option<Arc<Driver>>,
}

impl ClassDevice {
    /// 打开类设备并解析其 `device` / `driver` 链接
    ///
    /// 链接目标无法打开时跳过该链接；同类链接只采用扫描到的第一个。
    ///
    /// # 错误
    ///
    /// - `path` 为空或没有名称组件：[`SysfsError::InvalidArgument`]
    /// - 目录不存在或无法读取：[`SysfsError::NotFound`] / [`SysfsError::ReadError`]
    pub fn open(sysfs: &Sysfs, path: &str) -> Result<Self, SysfsError> {
        if path.is_empty() {
            return Err(SysfsError::InvalidArgument);
        }
        let name = name_from_path(path)
            .map_err(|err| {
                debug!("invalid class device path {}", path);
                err
            })?
            .to_string();

        let mut directory = sysfs.read_directory(path).map_err(|err| {
            debug!("error opening class device at {}: {}", path, err);
            err
        })?;
        if let Err(err) = directory.read_all_subdirs(sysfs.ops()) {
            debug!("incomplete subdirectories under {}: {}", path, err);
        }

        let mut cdev = Self {
            name,
            directory,
            device: None,
            driver: None,
        };
        cdev.resolve_links(sysfs);
        Ok(cdev)
    }

    /// 按类名和设备名打开类设备
    pub fn open_by_name(sysfs: &Sysfs, class: &str, name: &str) -> Result<Self, SysfsError> {
        if class.is_empty() || name.is_empty() {
            return Err(SysfsError::InvalidArgument);
        }
        Self::open(sysfs, &join_path(&sysfs.class_path(class), name))
    }

    fn resolve_links(&mut self, sysfs: &Sysfs) {
        for link in self.directory.links() {
            match link_kind(link.name()) {
                Some(LinkKind::Device) => {
                    if self.device.is_some() {
                        debug!("ignore extra device link {}", link.path());
                        continue;
                    }
                    match Device::open(sysfs, link.target()) {
                        Ok(device) => {
                            let device = Arc::new(device);
                            if let Some(driver) = &self.driver {
                                bind(&device, driver);
                            }
                            self.device = Some(device);
                        }
                        Err(err) => debug!("skip device link {}: {}", link.path(), err),
                    }
                }
                Some(LinkKind::Driver) => {
                    if self.driver.is_some() {
                        debug!("ignore extra driver link {}", link.path());
                        continue;
                    }
                    match Driver::open(sysfs, link.target()) {
                        Ok(driver) => {
                            let driver = Arc::new(driver);
                            if let Some(device) = &self.device {
                                bind(device, &driver);
                            }
                            self.driver = Some(driver);
                        }
                        Err(err) => debug!("skip driver link {}: {}", link.path(), err),
                    }
                }
                None => {}
            }
        }
    }

    /// 类设备名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 类设备目录的绝对路径
    pub fn path(&self) -> &str {
        self.directory.path()
    }

    /// 类设备的目录快照
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// 按名称查找类设备属性
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.directory.attribute(name)
    }

    /// `device` 链接指向的设备
    pub fn device(&self) -> Option<&Arc<Device>> {
        self.device.as_ref()
    }

    /// `driver` 链接指向的驱动
    pub fn driver(&self) -> Option<&Arc<Driver>> {
        self.driver.as_ref()
    }
}

impl Drop for ClassDevice {
    fn drop(&mut self) {
        trace!("close class device {}", self.directory.path());
    }
}

/// 设备类
#[derive(Debug)]
pub struct DeviceClass {
    name: String,
    directory: Directory,
    /// 类设备，后打开的在前
    devices: VecDeque<ClassDevice>,
}

impl DeviceClass {
    /// 打开设备类及其全部类设备
    ///
    /// 单个类设备打开失败只记录日志并跳过。
    ///
    /// # 错误
    ///
    /// - `name` 为空：[`SysfsError::InvalidArgument`]
    /// - 类目录不存在或无法读取：[`SysfsError::NotFound`] / [`SysfsError::ReadError`]
    pub fn open(sysfs: &Sysfs, name: &str) -> Result<Self, SysfsError> {
        if name.is_empty() {
            return Err(SysfsError::InvalidArgument);
        }
        let path = sysfs.class_path(name);
        let directory = sysfs.read_directory(&path).map_err(|err| {
            debug!("class {} not supported on this system: {}", name, err);
            err
        })?;

        let mut devices = VecDeque::new();
        for subdir in directory.subdirs() {
            match ClassDevice::open(sysfs, subdir.path()) {
                Ok(cdev) => devices.push_front(cdev),
                Err(err) => warn!("error opening class device at {}: {}", subdir.path(), err),
            }
        }

        Ok(Self {
            name: name.to_string(),
            directory,
            devices,
        })
    }

    /// 类名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 类目录的绝对路径
    pub fn path(&self) -> &str {
        self.directory.path()
    }

    /// 类的目录快照
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// 类设备（后打开的在前）
    pub fn devices(&self) -> impl Iterator<Item = &ClassDevice> {
        self.devices.iter()
    }

    /// 类设备数量
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// 按名称查找类设备
    pub fn device(&self, name: &str) -> Option<&ClassDevice> {
        self.devices.iter().find(|cdev| cdev.name == name)
    }
}

impl Drop for DeviceClass {
    fn drop(&mut self) {
        trace!("close class {}", self.directory.path());
    }
}

/// 列出系统中所有设备类的名称
pub fn list_classes(sysfs: &Sysfs) -> Result<Vec<String>, SysfsError> {
    sysfs.subsystem_names(SYSFS_CLASS_NAME)
}
