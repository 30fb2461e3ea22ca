//! 离线编码命令
//!
//! 只做校验与编码，不访问任何设备节点，便于在主机上调试组合文件。

use crate::composition::Composition;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use vibrator_driver::effects::SUPPORTED_BRAKING;
use vibrator_driver::protocol::{COMPOSE_PWLE_SIZE_MAX, PrimitivePwle, encode_pwle};

/// 离线编码参数
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// PWLE 组合文件（JSON）
    pub file: PathBuf,

    /// 只输出指令串
    #[arg(short, long)]
    pub quiet: bool,
}

impl EncodeCommand {
    pub fn execute(&self) -> Result<()> {
        let composition = Composition::<PrimitivePwle>::load(&self.file)?;
        let pwle = encode_pwle(&composition.segments, COMPOSE_PWLE_SIZE_MAX, SUPPORTED_BRAKING)
            .with_context(|| format!("编码失败: {}", self.file.display()))?;

        println!("{}", pwle.command);
        if !self.quiet {
            if !composition.name.is_empty() {
                println!("名称: {}", composition.name);
            }
            if !composition.description.is_empty() {
                println!("描述: {}", composition.description);
            }
            println!("分段数: {}", pwle.segment_count);
            println!("总时长: {} ms", pwle.total_duration_ms);
        }
        Ok(())
    }
}
