//! # Vibrator Protocol
//!
//! 振动器 HAL 的数据类型与指令编码（无硬件依赖）
//!
//! ## 模块
//!
//! - `constants`: 设备限制与效果表常量
//! - `types`: 效果、原语、刹车类型、能力位等接口类型
//! - `pwle`: PWLE（分段线性包络）指令字符串编码
//! - `format`: 与驱动约定一致的浮点数文本格式
//!
//! ## 数据流
//!
//! ```text
//! Vec<PrimitivePwle> (上层组合)
//!     ↓ encode_pwle() 校验 + 编码
//! PwleCommand { command, total_duration_ms }
//!     ↓ vibrator-driver 写入设备节点
//! Kernel driver (sysfs)
//! ```

pub mod constants;
pub mod format;
pub mod pwle;
pub mod types;

// 重新导出常用类型
pub use constants::*;
pub use pwle::{PwleCommand, encode_pwle};
pub use types::*;

use thiserror::Error;

/// 平台服务异常码：非法参数
pub const EX_ILLEGAL_ARGUMENT: i32 = -3;
/// 平台服务异常码：不支持的操作
pub const EX_UNSUPPORTED_OPERATION: i32 = -7;

/// 接口层错误类型
///
/// 所有校验失败都是输入的确定性函数，重试同样的输入必然得到同样的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VibratorError {
    /// 数值越界、空序列或超长序列等
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 效果、原语或刹车类型不在支持集合中
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl VibratorError {
    /// 映射为平台服务异常码
    pub fn exception_code(&self) -> i32 {
        match self {
            VibratorError::InvalidArgument(_) => EX_ILLEGAL_ARGUMENT,
            VibratorError::UnsupportedOperation(_) => EX_UNSUPPORTED_OPERATION,
        }
    }

    /// 是否为非法参数错误
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, VibratorError::InvalidArgument(_))
    }

    /// 是否为不支持的操作
    pub fn is_unsupported(&self) -> bool {
        matches!(self, VibratorError::UnsupportedOperation(_))
    }
}
