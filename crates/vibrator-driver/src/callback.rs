//! 完成回调
//!
//! 带回调的调用在播放结束后通知一次 [`VibratorCallback::on_complete`]。
//! 回调失败只记录日志，不会重试。
//!
//! # 使用示例
//!
//! ```rust
//! use vibrator_driver::{ChannelCallback, VibratorCallback};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let (callback, rx) = ChannelCallback::new();
//! let callback = Arc::new(callback) as Arc<dyn VibratorCallback>;
//!
//! // 通常由后台计时线程调用
//! callback.on_complete().unwrap();
//! assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
//! ```

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::time::Instant;
use thiserror::Error;

/// 回调执行失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("completion callback failed: {0}")]
pub struct CallbackError(pub String);

/// 完成回调 Trait
///
/// 回调在后台计时线程中执行，因此要求 `Send + Sync`。
pub trait VibratorCallback: Send + Sync {
    /// 播放完成时调用，每次调用恰好一次
    fn on_complete(&self) -> Result<(), CallbackError>;
}

impl<F> VibratorCallback for F
where
    F: Fn() -> Result<(), CallbackError> + Send + Sync,
{
    fn on_complete(&self) -> Result<(), CallbackError> {
        self()
    }
}

/// 通过 Channel 转发完成事件
///
/// 发送的是回调触发时刻，调用方可以用 `recv_timeout` 等待播放结束。
#[derive(Debug, Clone)]
pub struct ChannelCallback {
    sender: Sender<Instant>,
}

impl ChannelCallback {
    /// 创建回调及对应的接收端
    pub fn new() -> (Self, Receiver<Instant>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl VibratorCallback for ChannelCallback {
    fn on_complete(&self) -> Result<(), CallbackError> {
        self.sender
            .send(Instant::now())
            .map_err(|_| CallbackError("receiver dropped".to_string()))
    }
}
