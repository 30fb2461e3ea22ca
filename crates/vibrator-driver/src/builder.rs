//! Builder 模式实现
//!
//! 提供链式构造 `Vibrator` 实例的便捷方式。

use crate::error::DriverError;
use crate::sink::{DEFAULT_SYSFS_ROOT, HapticSink, SysfsSink};
use crate::vibrator::Vibrator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use vibrator_protocol::Capabilities;

/// 服务配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VibratorConfig {
    /// 对外报告的能力位
    ///
    /// 带宽-幅度表只在包含 `FREQUENCY_CONTROL` 时可用。
    pub capabilities: Capabilities,
}

impl Default for VibratorConfig {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::ON_CALLBACK | Capabilities::PERFORM_CALLBACK,
        }
    }
}

/// Vibrator Builder（链式构造）
///
/// # Example
///
/// ```no_run
/// use vibrator_driver::VibratorBuilder;
///
/// // 使用默认 sysfs 目录
/// let vibrator = VibratorBuilder::new().build().unwrap();
///
/// // 自定义节点目录
/// let vibrator = VibratorBuilder::new()
///     .sysfs_root("/sys/class/leds/vibrator/device")
///     .pwle_node("pwle")
///     .build()
///     .unwrap();
/// ```
///
/// 测试中通常直接注入 [`MockSink`](crate::MockSink)：
///
/// ```rust
/// use std::sync::Arc;
/// use vibrator_driver::{MockSink, VibratorBuilder};
///
/// let sink = Arc::new(MockSink::new());
/// let vibrator = VibratorBuilder::new().sink(sink.clone()).build().unwrap();
/// vibrator.off().unwrap();
/// assert_eq!(sink.writes().len(), 2);
/// ```
#[derive(Default)]
pub struct VibratorBuilder {
    /// sysfs 节点目录，默认 [`DEFAULT_SYSFS_ROOT`]
    sysfs_root: Option<PathBuf>,
    /// PWLE 节点文件名
    pwle_node: Option<String>,
    /// 显式指定的写入端（优先于 sysfs 配置）
    sink: Option<Arc<dyn HapticSink>>,
    config: VibratorConfig,
}

impl VibratorBuilder {
    /// 创建新的 Builder
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 sysfs 节点目录
    pub fn sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = Some(root.into());
        self
    }

    /// 设置 PWLE 节点文件名
    pub fn pwle_node(mut self, name: impl Into<String>) -> Self {
        self.pwle_node = Some(name.into());
        self
    }

    /// 使用自定义写入端
    pub fn sink(mut self, sink: Arc<dyn HapticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// 设置能力位
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.config.capabilities = capabilities;
        self
    }

    /// 设置完整配置
    pub fn config(mut self, config: VibratorConfig) -> Self {
        self.config = config;
        self
    }

    /// 构建 Vibrator 实例
    ///
    /// # Errors
    /// - `DriverError::Config`: 未指定写入端且 sysfs 目录不存在
    pub fn build(self) -> Result<Vibrator, DriverError> {
        let sink = match self.sink {
            Some(sink) => sink,
            None => {
                let root = self.sysfs_root.unwrap_or_else(|| PathBuf::from(DEFAULT_SYSFS_ROOT));
                if !root.is_dir() {
                    return Err(DriverError::Config(format!(
                        "sysfs root {} is not a directory",
                        root.display()
                    )));
                }
                info!("Using haptic sysfs nodes under {}", root.display());

                let mut sysfs = SysfsSink::new(root);
                if let Some(name) = self.pwle_node {
                    sysfs = sysfs.with_pwle_file(name);
                }
                Arc::new(sysfs) as Arc<dyn HapticSink>
            },
        };

        Ok(Vibrator::new(sink, self.config))
    }
}
