//! 测试支持 crate
//!
//! 提供 Mock 实现和测试工具：
//!
//! - [`MemDirOps`] - 内存目录树，可注入读取失败
//! - [`init_log_capture`] / [`take_records`] - 按线程捕获 `log` 输出
//! - [`ScratchDir`] - 临时的磁盘目录树，用于测试宿主机后端

pub mod mock;
mod scratch;

pub use mock::dir::MemDirOps;
pub use mock::logger::{CapturedRecord, init_log_capture, take_messages_with_prefix, take_records};
pub use scratch::ScratchDir;
