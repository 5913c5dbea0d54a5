//! 各测试共用的内存 sysfs 树

#![allow(dead_code)]

use std::sync::Arc;

use sysfs::Sysfs;
use test_support::MemDirOps;

pub const MNT: &str = "/sys";
pub const NIC: &str = "/sys/devices/pci0000:00/0000:00:03.0";
pub const E1000: &str = "/sys/bus/pci/drivers/e1000";

/// 一台带网卡和环回接口的小系统
///
/// ```text
/// /sys/devices/pci0000:00/0000:00:03.0      name = "eth0\n"
/// /sys/bus/pci/devices/0000:00:03.0   -> ../../../devices/pci0000:00/0000:00:03.0
/// /sys/bus/pci/drivers/e1000/0000:00:03.0 -> ../../../../devices/pci0000:00/0000:00:03.0
/// /sys/class/net/eth0/{device,driver}
/// /sys/class/net/lo
/// ```
pub fn small_system() -> MemDirOps {
    let mut fs = MemDirOps::new();
    fs.attr(&format!("{NIC}/name"), "eth0\n")
        .attr(&format!("{NIC}/vendor"), "0x8086\n")
        .dir("/sys/devices/platform/serial8250")
        .link("/sys/bus/pci/devices/0000:00:03.0", "../../../devices/pci0000:00/0000:00:03.0")
        .link(&format!("{E1000}/0000:00:03.0"), "../../../../devices/pci0000:00/0000:00:03.0")
        .attr(&format!("{E1000}/uevent"), "DRIVER=e1000\n")
        .dir("/sys/bus/platform/devices")
        .attr("/sys/class/net/eth0/address", "52:54:00:12:34:56\n")
        .link("/sys/class/net/eth0/device", "../../../devices/pci0000:00/0000:00:03.0")
        .link("/sys/class/net/eth0/driver", "../../../bus/pci/drivers/e1000")
        .dir("/sys/class/net/eth0/queues/rx-0")
        .attr("/sys/class/net/lo/address", "00:00:00:00:00:00\n");
    fs
}

pub fn sysfs_over(fs: MemDirOps) -> Sysfs {
    Sysfs::new(MNT, Arc::new(fs))
}
