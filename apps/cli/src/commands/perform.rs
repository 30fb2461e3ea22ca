//! 预定义效果命令

use super::wait_for_completion;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use vibrator_driver::protocol::{Effect, EffectStrength};
use vibrator_driver::{ChannelCallback, Vibrator};

/// 预定义效果参数
#[derive(Args, Debug)]
pub struct PerformCommand {
    /// 效果名称（如 click, heavy_click, texture_tick）
    pub effect: Effect,

    /// 效果强度
    #[arg(short, long, default_value = "medium")]
    pub strength: EffectStrength,

    /// 等待效果结束
    #[arg(long)]
    pub wait: bool,
}

impl PerformCommand {
    pub fn execute(&self, vibrator: &Vibrator) -> Result<()> {
        if !self.wait {
            let duration_ms = vibrator.perform(self.effect, self.strength, None)?;
            println!("✅ {} ({}): {} ms", self.effect, self.strength, duration_ms);
            return Ok(());
        }

        let (callback, rx) = ChannelCallback::new();
        let duration_ms = vibrator.perform(self.effect, self.strength, Some(Arc::new(callback)))?;
        println!("✅ {} ({}): {} ms", self.effect, self.strength, duration_ms);
        wait_for_completion(&rx, duration_ms.unsigned_abs().into())
    }
}
