//! 驱动节点

use std::sync::{Arc, OnceLock, Weak};

use log::{debug, trace};
use sysdir::{Attribute, Directory, Link, SysfsError};

use crate::Sysfs;
use crate::device::Device;

/// sysfs 驱动
#[derive(Debug)]
pub struct Driver {
    name: String,
    directory: Directory,
    /// 当前绑定的设备（弱引用）
    device: OnceLock<Weak<Device>>,
}

impl Driver {
    /// 打开驱动目录
    ///
    /// # 错误
    ///
    /// - `path` 为空：[`SysfsError::InvalidArgument`]
    /// - 目录不存在或无法读取：[`SysfsError::NotFound`] / [`SysfsError::ReadError`]
    pub fn open(sysfs: &Sysfs, path: &str) -> Result<Self, SysfsError> {
        if path.is_empty() {
            return Err(SysfsError::InvalidArgument);
        }
        let directory = sysfs.read_directory(path).map_err(|err| {
            debug!("invalid driver at {}: {}", path, err);
            err
        })?;

        Ok(Self {
            name: directory.name().to_string(),
            directory,
            device: OnceLock::new(),
        })
    }

    /// 驱动名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 驱动目录的绝对路径
    pub fn path(&self) -> &str {
        self.directory.path()
    }

    /// 驱动的目录快照
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// 按名称查找驱动属性
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.directory.attribute(name)
    }

    /// 驱动目录中的符号链接（通常指向已绑定的各个设备）
    pub fn links(&self) -> &[Link] {
        self.directory.links()
    }

    /// 当前绑定的设备
    pub fn device(&self) -> Option<Arc<Device>> {
        self.device.get().and_then(Weak::upgrade)
    }

    /// 设置绑定的设备，只能设置一次
    pub(crate) fn set_device(&self, device: &Arc<Device>) -> bool {
        self.device.set(Arc::downgrade(device)).is_ok()
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        trace!("close driver {}", self.directory.path());
    }
}

/// 建立设备与驱动之间的双向弱引用
pub(crate) fn bind(device: &Arc<Device>, driver: &Arc<Driver>) {
    if !device.set_driver(driver) {
        debug!("device {} already bound to a driver", device.path());
    }
    if !driver.set_device(device) {
        debug!("driver {} already bound to a device", driver.path());
    }
}
