//! 驱动层模块
//!
//! 本模块把振动器服务接口落到内核暴露的设备节点上，包括：
//! - 设备节点写入（[`HapticSink`] trait，sysfs / mock 两种实现）
//! - 完成回调（[`VibratorCallback`]）与后台计时线程
//! - 服务对象 [`Vibrator`]：效果、组合、PWLE 等全部接口
//!
//! # 并发模型
//!
//! 每个带回调的调用启动一个独立的后台线程，睡眠到播放结束后通知回调。
//! 这些线程不可取消、互相之间没有顺序保证，并发调用可能交错写入设备节点。

mod builder;
pub mod callback;
pub mod effects;
mod error;
pub mod mock;
pub mod sink;
pub mod timer;
mod vibrator;

pub use builder::{VibratorBuilder, VibratorConfig};
pub use callback::{CallbackError, ChannelCallback, VibratorCallback};
pub use error::{DriverError, EX_SERVICE_SPECIFIC};
pub use mock::MockSink;
pub use sink::{DEFAULT_SYSFS_ROOT, HapticNode, HapticSink, SinkError, SysfsSink};
pub use vibrator::Vibrator;

// 重新导出协议层类型，方便上层只依赖本 crate
pub use vibrator_protocol as protocol;
