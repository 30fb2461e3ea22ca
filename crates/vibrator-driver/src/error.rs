//! 驱动层错误类型定义

use crate::sink::SinkError;
use thiserror::Error;
use vibrator_protocol::VibratorError;

/// 平台服务异常码：服务自定义错误
pub const EX_SERVICE_SPECIFIC: i32 = -8;

/// 驱动层错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 参数校验失败或操作不支持
    #[error("Protocol error: {0}")]
    Protocol(#[from] VibratorError),

    /// 设备节点写入失败
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// 后台计时线程创建失败
    #[error("Failed to spawn timer thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// 配置无效（如 sysfs 根目录不存在）
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DriverError {
    /// 映射为平台服务异常码
    pub fn exception_code(&self) -> i32 {
        match self {
            DriverError::Protocol(e) => e.exception_code(),
            DriverError::Sink(_) | DriverError::ThreadSpawn(_) | DriverError::Config(_) => {
                EX_SERVICE_SPECIFIC
            },
        }
    }

    /// 内部的协议层错误（如果有）
    pub fn as_protocol(&self) -> Option<&VibratorError> {
        match self {
            DriverError::Protocol(e) => Some(e),
            _ => None,
        }
    }

    /// 是否为非法参数错误
    pub fn is_invalid_argument(&self) -> bool {
        self.as_protocol().is_some_and(VibratorError::is_invalid_argument)
    }

    /// 是否为不支持的操作
    pub fn is_unsupported(&self) -> bool {
        self.as_protocol().is_some_and(VibratorError::is_unsupported)
    }
}
