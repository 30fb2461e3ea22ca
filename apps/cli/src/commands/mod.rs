//! 命令定义和实现

pub mod compose;
pub mod config;
pub mod encode;
pub mod info;
pub mod on;
pub mod perform;
pub mod pwle;

pub use compose::ComposeCommand;
pub use config::ConfigCommand;
pub use encode::EncodeCommand;
pub use on::OnCommand;
pub use perform::PerformCommand;
pub use pwle::ComposePwleCommand;

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};

/// 等待回调时在播放时长之外额外允许的时间
const WAIT_MARGIN: Duration = Duration::from_secs(1);

/// 等待完成回调
pub(crate) fn wait_for_completion(rx: &Receiver<Instant>, expected_ms: u64) -> Result<()> {
    println!("⏳ 等待播放完成（{} ms）...", expected_ms);
    rx.recv_timeout(Duration::from_millis(expected_ms) + WAIT_MARGIN)
        .context("等待完成回调超时")?;
    println!("✅ 播放完成");
    Ok(())
}
