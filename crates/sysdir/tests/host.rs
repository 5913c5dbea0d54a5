use sysdir::{AttrMethod, DirOps, Directory, EntryKind, HostDirOps, RawEntry, SysfsError};
use test_support::ScratchDir;

const SERIAL: &str = "devices/platform/serial8250";

fn scratch_tree() -> ScratchDir {
    let tree = ScratchDir::new("sysdir-host").unwrap();
    tree.dir(SERIAL).unwrap();
    tree.attr(&format!("{SERIAL}/uevent"), "DRIVER=serial8250\n", 0o644).unwrap();
    tree.attr(&format!("{SERIAL}/modalias"), "platform:serial8250\n", 0o444).unwrap();
    tree.link(&format!("{SERIAL}/driver"), "../../../bus/platform/drivers/serial8250").unwrap();
    tree.dir("bus/platform/drivers/serial8250").unwrap();
    tree
}

#[test]
fn test_host_read_dir_is_sorted() {
    let tree = scratch_tree();
    let ops = HostDirOps::new();
    let entries = ops.read_dir(&format!("{}/{SERIAL}", tree.path())).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["driver", "modalias", "uevent"]);
    assert_eq!(
        entries[0],
        RawEntry {
            name: "driver".to_string(),
            kind: EntryKind::Symlink,
            mode: entries[0].mode,
        }
    );
}

#[test]
fn test_host_directory_snapshot() {
    let tree = scratch_tree();
    let ops = HostDirOps::new();
    let mut dir = Directory::open(&ops, &format!("{}/{SERIAL}", tree.path())).unwrap();
    dir.read(&ops).unwrap();

    assert_eq!(dir.name(), "serial8250");
    assert_eq!(dir.value_of("modalias"), Some("platform:serial8250\n"));
    assert_eq!(
        dir.attribute("uevent").unwrap().method(),
        AttrMethod::SHOW | AttrMethod::STORE
    );
    assert_eq!(
        dir.link("driver").unwrap().target(),
        format!("{}/bus/platform/drivers/serial8250", tree.path())
    );
    assert!(dir.subdirs().is_empty());
}

#[test]
fn test_host_snapshot_through_symlinked_directory() {
    let tree = scratch_tree();
    tree.link("class/tty/ttyS0", &format!("../../{SERIAL}")).unwrap();
    let ops = HostDirOps::new();

    let path = format!("{}/class/tty/ttyS0", tree.path());
    let mut dir = Directory::open(&ops, &path).unwrap();
    dir.read(&ops).unwrap();

    assert_eq!(dir.path(), path);
    assert_eq!(ops.real_path(&path).unwrap(), format!("{}/{SERIAL}", tree.path()));
    assert_eq!(
        dir.link("driver").unwrap().target(),
        format!("{}/bus/platform/drivers/serial8250", tree.path())
    );
}

#[test]
fn test_host_open_missing() {
    let tree = scratch_tree();
    let ops = HostDirOps::new();
    let err = Directory::open(&ops, &format!("{}/class/net", tree.path())).unwrap_err();
    assert_eq!(err, SysfsError::NotFound);
    assert_eq!(err.to_errno(), -2);
}

#[test]
fn test_host_stat_follows_link() {
    let tree = scratch_tree();
    let ops = HostDirOps::new();
    let kind = ops.stat(&format!("{}/{SERIAL}/driver", tree.path())).unwrap();
    assert_eq!(kind, EntryKind::Directory);
}
