//! 后台计时线程
//!
//! 所有线程都是"发射后不管"的：不保存 `JoinHandle`，不可取消，
//! 进程退出时由操作系统回收。

use crate::callback::VibratorCallback;
use crate::error::DriverError;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, trace};

/// 启动一个分离的命名线程执行 `job`
pub fn spawn_detached<F>(label: &str, job: F) -> Result<(), DriverError>
where
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name(format!("vibrator-{label}"))
        .spawn(job)
        .map(drop)
        .map_err(DriverError::ThreadSpawn)
}

/// 在 `delay` 之后通知一次 `callback`
///
/// 回调失败只记录日志。
pub fn notify_after(
    label: &'static str,
    delay: Duration,
    callback: Arc<dyn VibratorCallback>,
) -> Result<(), DriverError> {
    spawn_detached(label, move || {
        trace!("Starting {} on another thread", label);
        spin_sleep::sleep(delay);
        trace!("Notifying {} complete", label);
        notify(label, callback.as_ref());
    })
}

/// 立即通知回调，失败时记录日志
pub(crate) fn notify(label: &str, callback: &dyn VibratorCallback) {
    if let Err(e) = callback.on_complete() {
        error!("Failed to call onComplete for {}: {}", label, e);
    }
}

/// 毫秒数转换为 `Duration`，负值视为 0
pub(crate) fn millis(ms: i64) -> Duration {
    Duration::from_millis(ms.max(0).unsigned_abs())
}
