//! sysfs 路径辅助函数
//!
//! sysfs 中的路径全部是字符串形式的绝对路径。本模块负责：
//!
//! - 将路径拆分为组件并规范化（处理 `.`、`..` 和重复的 `/`）
//! - 取路径最后一个组件作为节点名称
//! - 将符号链接的相对目标解析为绝对路径

use crate::SysfsError;

/// 路径组件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent<'a> {
    /// 根目录 "/"
    Root,
    /// 当前目录 "."
    Current,
    /// 父目录 ".."
    Parent,
    /// 正常的文件名
    Normal(&'a str),
}

/// 将路径字符串解析为组件列表
pub fn parse_path(path: &str) -> Vec<PathComponent<'_>> {
    let mut components = Vec::new();

    if path.starts_with('/') {
        components.push(PathComponent::Root);
    }

    for part in path.split('/').filter(|s| !s.is_empty()) {
        let component = match part {
            "." => PathComponent::Current,
            ".." => PathComponent::Parent,
            name => PathComponent::Normal(name),
        };
        components.push(component);
    }

    components
}

/// 规范化路径（处理 ".." 和 "."）
pub fn normalize_path(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    let mut is_absolute = false;

    for component in parse_path(path) {
        match component {
            PathComponent::Root => is_absolute = true,
            PathComponent::Current => {}
            PathComponent::Parent => {
                if is_absolute {
                    // 绝对路径：不能越过根目录
                    stack.pop();
                } else if matches!(stack.last(), Some(last) if *last != "..") {
                    stack.pop();
                } else {
                    stack.push("..");
                }
            }
            PathComponent::Normal(name) => stack.push(name),
        }
    }

    if stack.is_empty() {
        if is_absolute {
            String::from("/")
        } else {
            String::from(".")
        }
    } else if is_absolute {
        String::from("/") + &stack.join("/")
    } else {
        stack.join("/")
    }
}

/// 取路径的最后一个组件作为名称
///
/// 结尾的 `/` 会被忽略。路径为空或只有根目录时返回 [`SysfsError::InvalidArgument`]。
pub fn name_from_path(path: &str) -> Result<&str, SysfsError> {
    path.rsplit('/')
        .find(|s| !s.is_empty())
        .ok_or(SysfsError::InvalidArgument)
}

/// 拼接目录路径与子项名称
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    let mut path = String::with_capacity(dir.len() + name.len() + 1);
    path.push_str(dir);
    path.push('/');
    path.push_str(name);
    path
}

/// 解析符号链接目标
///
/// sysfs 中的链接目标通常是相对路径（如 `../../devices/pci0000:00`），
/// 相对于链接所在目录 `dir` 解析后返回规范化的绝对路径。
pub fn resolve_link_target(dir: &str, target: &str) -> String {
    if target.starts_with('/') {
        normalize_path(target)
    } else {
        normalize_path(&join_path(dir, target))
    }
}
