use sysdir::{AttrMethod, DirOps, Directory, SysfsError};
use test_support::{MemDirOps, init_log_capture, take_messages_with_prefix};

fn sample_tree() -> MemDirOps {
    let mut fs = MemDirOps::new();
    fs.attr("/sys/class/net/eth0/address", "52:54:00:12:34:56\n")
        .attr_with_mode("/sys/class/net/eth0/flush", "", 0o200)
        .link("/sys/class/net/eth0/device", "../../../devices/pci0000:00/0000:00:03.0")
        .dir("/sys/class/net/eth0/queues/rx-0")
        .attr("/sys/class/net/eth0/queues/rx-0/rps_cpus", "0\n")
        .dir("/sys/devices/pci0000:00/0000:00:03.0");
    fs
}

#[test]
fn test_open_missing_directory() {
    let fs = sample_tree();
    assert_eq!(Directory::open(&fs, "/sys/class/block").unwrap_err(), SysfsError::NotFound);
}

#[test]
fn test_open_empty_path() {
    let fs = sample_tree();
    assert_eq!(Directory::open(&fs, "").unwrap_err(), SysfsError::InvalidArgument);
}

#[test]
fn test_open_regular_file_is_not_a_directory() {
    let fs = sample_tree();
    let err = Directory::open(&fs, "/sys/class/net/eth0/address").unwrap_err();
    assert_eq!(err, SysfsError::NotFound);
}

#[test]
fn test_open_does_not_read() {
    let fs = sample_tree();
    let dir = Directory::open(&fs, "/sys/class/net/eth0/").unwrap();
    assert_eq!(dir.name(), "eth0");
    assert_eq!(dir.path(), "/sys/class/net/eth0");
    assert!(!dir.is_populated());
    assert!(dir.attributes().is_empty());
}

#[test]
fn test_read_classifies_entries() {
    let fs = sample_tree();
    let mut dir = Directory::open(&fs, "/sys/class/net/eth0").unwrap();
    dir.read(&fs).unwrap();

    assert_eq!(dir.attributes().len(), 2);
    assert_eq!(dir.value_of("address"), Some("52:54:00:12:34:56\n"));

    let flush = dir.attribute("flush").unwrap();
    assert_eq!(flush.method(), AttrMethod::STORE);
    assert_eq!(flush.value(), None);

    let link = dir.link("device").unwrap();
    assert_eq!(link.path(), "/sys/class/net/eth0/device");
    assert_eq!(link.target(), "/sys/devices/pci0000:00/0000:00:03.0");

    assert_eq!(dir.subdirs().len(), 1);
    let queues = dir.subdir("queues").unwrap();
    assert_eq!(queues.path(), "/sys/class/net/eth0/queues");
    assert!(!queues.is_populated());
}

#[test]
fn test_read_keeps_scan_order() {
    let mut fs = MemDirOps::new();
    fs.dir("/sys/class/net/lo").dir("/sys/class/net/eth1").dir("/sys/class/net/eth0");
    let mut dir = Directory::open(&fs, "/sys/class/net").unwrap();
    dir.read(&fs).unwrap();
    let names: Vec<&str> = dir.subdirs().iter().map(Directory::name).collect();
    assert_eq!(names, ["lo", "eth1", "eth0"]);
}

#[test]
fn test_read_unreadable_directory() {
    let mut fs = sample_tree();
    fs.unreadable("/sys/class/net/eth0");
    let mut dir = Directory::open(&fs, "/sys/class/net/eth0").unwrap();
    assert_eq!(dir.read(&fs).unwrap_err(), SysfsError::ReadError);
    assert!(!dir.is_populated());
}

#[test]
fn test_read_all_subdirs() {
    let fs = sample_tree();
    let mut dir = Directory::open(&fs, "/sys/class/net/eth0").unwrap();
    dir.read_all_subdirs(&fs).unwrap();

    let rx = dir.subdir("queues").and_then(|q| q.subdir("rx-0")).unwrap();
    assert!(rx.is_populated());
    assert_eq!(rx.value_of("rps_cpus"), Some("0\n"));
}

#[test]
fn test_read_all_subdirs_reports_failure() {
    let mut fs = sample_tree();
    fs.unreadable("/sys/class/net/eth0/queues/rx-0");
    let mut dir = Directory::open(&fs, "/sys/class/net/eth0").unwrap();
    assert_eq!(dir.read_all_subdirs(&fs).unwrap_err(), SysfsError::ReadError);
    assert!(dir.subdir("queues").unwrap().is_populated());
}

#[test]
fn test_stat_follows_links() {
    let fs = sample_tree();
    assert!(fs.stat("/sys/class/net/eth0/device").is_ok());
    let dir = Directory::open(&fs, "/sys/class/net/eth0/device").unwrap();
    assert_eq!(dir.name(), "device");
}

#[test]
fn test_link_targets_resolve_from_real_location() {
    let mut fs = MemDirOps::new();
    fs.dir("/sys/devices/pci0000:00/0000:00:03.0")
        .attr("/sys/devices/pci0000:00/0000:00:03.0/net/eth0/address", "52:54:00:12:34:56\n")
        .link("/sys/devices/pci0000:00/0000:00:03.0/net/eth0/device", "../../../0000:00:03.0")
        .link("/sys/class/net/eth0", "../../devices/pci0000:00/0000:00:03.0/net/eth0");

    let mut dir = Directory::open(&fs, "/sys/class/net/eth0").unwrap();
    dir.read(&fs).unwrap();

    assert_eq!(dir.path(), "/sys/class/net/eth0");
    assert_eq!(dir.value_of("address"), Some("52:54:00:12:34:56\n"));
    let device = dir.link("device").unwrap();
    assert_eq!(device.path(), "/sys/class/net/eth0/device");
    assert_eq!(device.target(), "/sys/devices/pci0000:00/0000:00:03.0");
}

#[test]
fn test_real_path_follows_every_component() {
    let mut fs = MemDirOps::new();
    fs.dir("/sys/devices/virtual/net/lo/queues")
        .link("/sys/class/net/lo", "../../devices/virtual/net/lo");
    assert_eq!(
        fs.real_path("/sys/class/net/lo/queues").unwrap(),
        "/sys/devices/virtual/net/lo/queues"
    );
    assert_eq!(fs.real_path("/sys/class/net/eth0").unwrap_err(), SysfsError::NotFound);
}

#[test]
fn test_drop_releases_snapshot_once() {
    init_log_capture();
    let fs = sample_tree();
    let mut dir = Directory::open(&fs, "/sys/class/net/eth0").unwrap();
    dir.read(&fs).unwrap();
    drop(dir);

    let closed = take_messages_with_prefix("close directory /sys/class/net/eth0");
    assert_eq!(
        closed,
        [
            "close directory /sys/class/net/eth0",
            "close directory /sys/class/net/eth0/queues",
        ]
    );
}
