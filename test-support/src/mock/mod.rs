//! Mock 实现模块
//!
//! 提供目录读取后端和日志记录器的 Mock 实现，用于测试

pub mod dir;
pub mod logger;
