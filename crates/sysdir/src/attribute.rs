//! sysfs 属性
//!
//! 属性是目录中的普通文件，内容为一行文本（通常以 `\n` 结尾）。

use bitflags::bitflags;

bitflags! {
    /// 属性支持的访问方式
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttrMethod: u8 {
        /// 可读（内核提供 show 回调）
        const SHOW = 0x01;
        /// 可写（内核提供 store 回调）
        const STORE = 0x02;
    }
}

impl AttrMethod {
    /// 由文件权限位推导访问方式
    ///
    /// 只看属主位：sysfs 属性的属主总是 root，属主位即内核回调的有无。
    pub fn from_mode(mode: u32) -> Self {
        let mut method = AttrMethod::empty();
        if mode & 0o400 != 0 {
            method |= AttrMethod::SHOW;
        }
        if mode & 0o200 != 0 {
            method |= AttrMethod::STORE;
        }
        method
    }
}

/// 单个属性文件的快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) value: Option<String>,
    pub(crate) method: AttrMethod,
}

impl Attribute {
    /// 属性名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 属性文件的绝对路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 扫描时读到的原始值
    ///
    /// 只写属性或读取失败的属性没有值。
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// 访问方式
    pub fn method(&self) -> AttrMethod {
        self.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_mode() {
        assert_eq!(AttrMethod::from_mode(0o444), AttrMethod::SHOW);
        assert_eq!(AttrMethod::from_mode(0o644), AttrMethod::SHOW | AttrMethod::STORE);
        assert_eq!(AttrMethod::from_mode(0o200), AttrMethod::STORE);
        assert!(AttrMethod::from_mode(0o044).is_empty());
    }
}
