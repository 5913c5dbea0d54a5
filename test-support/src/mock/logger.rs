//! 日志捕获
//!
//! 安装一个全局 `log` 记录器，把记录写入**当前线程**的缓冲区。
//! 测试框架为每个测试分配独立线程，因此并行测试之间互不干扰。

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// 捕获到的一条日志
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// 日志级别
    pub level: Level,
    /// 格式化后的消息
    pub message: String,
}

thread_local! {
    static RECORDS: RefCell<Vec<CapturedRecord>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let captured = CapturedRecord {
            level: record.level(),
            message: record.args().to_string(),
        };
        RECORDS.with(|records| records.borrow_mut().push(captured));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// 安装捕获记录器（多次调用只安装一次），并清空当前线程的缓冲区
pub fn init_log_capture() {
    INIT.call_once(|| {
        // 其他记录器已安装时保持原状，捕获结果为空
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// 取出当前线程捕获的全部日志
pub fn take_records() -> Vec<CapturedRecord> {
    RECORDS.with(|records| records.borrow_mut().drain(..).collect())
}

/// 取出当前线程捕获的、以 `prefix` 开头的日志消息
pub fn take_messages_with_prefix(prefix: &str) -> Vec<String> {
    take_records()
        .into_iter()
        .filter(|record| record.message.starts_with(prefix))
        .map(|record| record.message)
        .collect()
}
