//! sysfs 符号链接

/// 单个符号链接的快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) target: String,
}

impl Link {
    /// 链接名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 链接自身的绝对路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 链接目标，已解析为规范化的绝对路径
    pub fn target(&self) -> &str {
        &self.target
    }
}
