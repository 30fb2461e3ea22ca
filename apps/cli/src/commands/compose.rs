//! 组合效果命令

use super::wait_for_completion;
use crate::composition::Composition;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use vibrator_driver::protocol::CompositeEffect;
use vibrator_driver::{ChannelCallback, Vibrator, VibratorCallback};

/// 组合效果参数
#[derive(Args, Debug)]
pub struct ComposeCommand {
    /// 组合文件（JSON）
    pub file: PathBuf,

    /// 等待播放结束
    #[arg(long)]
    pub wait: bool,
}

impl ComposeCommand {
    pub fn execute(&self, vibrator: &Vibrator) -> Result<()> {
        let composition = Composition::<CompositeEffect>::load(&self.file)?;
        info!(
            "Composing '{}' with {} primitives",
            composition.name,
            composition.segments.len()
        );

        let (callback, rx) = ChannelCallback::new();
        let callback: Option<Arc<dyn VibratorCallback>> =
            if self.wait { Some(Arc::new(callback)) } else { None };
        vibrator.compose(&composition.segments, callback)?;
        println!("✅ 组合效果已开始（{} 项）", composition.segments.len());

        if self.wait {
            wait_for_completion(&rx, expected_duration_ms(vibrator, &composition)?)?;
        }
        Ok(())
    }
}

/// 组合效果的预计时长（延迟 + 原语时长之和）
fn expected_duration_ms(
    vibrator: &Vibrator,
    composition: &Composition<CompositeEffect>,
) -> Result<u64> {
    let mut total = 0u64;
    for e in &composition.segments {
        let duration = vibrator.primitive_duration(e.primitive)?;
        total += u64::from(e.delay_ms.max(0).unsigned_abs()) + u64::from(duration.unsigned_abs());
    }
    Ok(total)
}
