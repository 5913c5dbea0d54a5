//! 总线查询
//!
//! 每条总线在 `<挂载点>/bus/<总线名>/devices/` 下为挂在其上的设备放置一个以
//! bus id 命名的链接。由设备反查所属总线即逐个检查这些目录。
//!
//! `BusIndex` 记录一次扫描得到的总线列表，构建整棵设备树时只扫描一次 `bus` 目录。

use log::debug;
use sysdir::SysfsError;
use sysdir::path::join_path;

use crate::{SYSFS_BUS_NAME, SYSFS_DEVICES_NAME, Sysfs};

/// 总线列表快照：总线名与其 `devices` 目录路径
#[derive(Debug, Default)]
pub(crate) struct BusIndex {
    buses: Vec<(String, String)>,
}

impl BusIndex {
    /// 扫描 `<挂载点>/bus`
    pub(crate) fn load(sysfs: &Sysfs) -> Result<Self, SysfsError> {
        let bus_dir = sysfs.read_directory(&sysfs.bus_path())?;
        let buses = bus_dir
            .subdirs()
            .iter()
            .map(|bus| (bus.name().to_string(), join_path(bus.path(), SYSFS_DEVICES_NAME)))
            .collect();
        Ok(Self { buses })
    }

    /// 扫描 `<挂载点>/bus`，失败时得到空列表
    pub(crate) fn load_or_empty(sysfs: &Sysfs) -> Self {
        Self::load(sysfs).unwrap_or_else(|err| {
            debug!("bus directory unavailable: {}", err);
            Self::default()
        })
    }

    /// 查找包含 `bus_id` 的总线
    pub(crate) fn lookup(&self, sysfs: &Sysfs, bus_id: &str) -> Result<String, SysfsError> {
        if bus_id.is_empty() {
            return Err(SysfsError::InvalidArgument);
        }
        for (name, devices) in &self.buses {
            if sysfs.ops().stat(&join_path(devices, bus_id)).is_ok() {
                return Ok(name.clone());
            }
        }
        debug!("device {} is not on any bus", bus_id);
        Err(SysfsError::NotFound)
    }
}

/// 查找设备所在总线的名称
///
/// # 错误
///
/// - `bus_id` 为空：[`SysfsError::InvalidArgument`]
/// - 总线目录无法读取：对应的读取错误
/// - 没有任何总线包含该设备：[`SysfsError::NotFound`]
pub fn find_device_bus_name(sysfs: &Sysfs, bus_id: &str) -> Result<String, SysfsError> {
    if bus_id.is_empty() {
        return Err(SysfsError::InvalidArgument);
    }
    BusIndex::load(sysfs)?.lookup(sysfs, bus_id)
}

/// 列出系统中所有总线的名称
pub fn list_buses(sysfs: &Sysfs) -> Result<Vec<String>, SysfsError> {
    sysfs.subsystem_names(SYSFS_BUS_NAME)
}
