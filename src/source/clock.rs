use chrono::{Local, NaiveDate};

/// 时钟：为默认过滤周期提供 "今天"
///
/// 管道内部从不直接读取系统时间，由边界注入。
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 本地系统时钟 (仅在程序入口使用)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 固定日期时钟 (测试/回放)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
