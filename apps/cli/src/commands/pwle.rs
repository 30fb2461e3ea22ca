//! PWLE 组合命令

use super::wait_for_completion;
use crate::composition::Composition;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use vibrator_driver::protocol::PrimitivePwle;
use vibrator_driver::{ChannelCallback, Vibrator, VibratorCallback};

/// PWLE 组合参数
#[derive(Args, Debug)]
pub struct ComposePwleCommand {
    /// PWLE 组合文件（JSON）
    pub file: PathBuf,

    /// 等待播放结束
    #[arg(long)]
    pub wait: bool,
}

impl ComposePwleCommand {
    pub fn execute(&self, vibrator: &Vibrator) -> Result<()> {
        let composition = Composition::<PrimitivePwle>::load(&self.file)?;
        info!(
            "Playing PWLE '{}' with {} primitives",
            composition.name,
            composition.segments.len()
        );

        let (callback, rx) = ChannelCallback::new();
        let callback: Option<Arc<dyn VibratorCallback>> =
            if self.wait { Some(Arc::new(callback)) } else { None };
        let pwle = vibrator.compose_pwle(&composition.segments, callback)?;
        debug!("Wrote PWLE command: {}", pwle.command);
        println!(
            "✅ PWLE 已写入（{} 段，{} ms）",
            pwle.segment_count, pwle.total_duration_ms
        );

        if self.wait {
            wait_for_completion(&rx, pwle.total_duration_ms.into())?;
        }
        Ok(())
    }
}
