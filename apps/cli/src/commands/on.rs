//! 定时振动命令

use super::wait_for_completion;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use vibrator_driver::{ChannelCallback, Vibrator};

/// 定时振动参数
#[derive(Args, Debug)]
pub struct OnCommand {
    /// 振动时长（毫秒）
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    pub ms: i32,

    /// 等待振动结束
    #[arg(long)]
    pub wait: bool,
}

impl OnCommand {
    pub fn execute(&self, vibrator: &Vibrator) -> Result<()> {
        if !self.wait {
            vibrator.on(self.ms, None)?;
            println!("✅ 开始振动 {} ms", self.ms);
            return Ok(());
        }

        let (callback, rx) = ChannelCallback::new();
        vibrator.on(self.ms, Some(Arc::new(callback)))?;
        wait_for_completion(&rx, self.ms.unsigned_abs().into())
    }
}
