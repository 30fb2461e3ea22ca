//! 设备节点写入
//!
//! 振动器驱动通过 sysfs 暴露若干属性文件，服务只需要向其中写入文本。
//! [`HapticSink`] 把这一能力抽象出来，使服务逻辑不依赖具体的传输方式。

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

/// aw8697 触觉驱动的默认 sysfs 目录
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/bus/i2c/drivers/aw8697_haptic/2-005a/";

/// 设备节点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticNode {
    /// 启停（`1` 开始，`0` 停止）
    Activate,
    /// 下一次启动的持续时间（毫秒）
    Duration,
    /// 固件波形索引
    Index,
    /// PWLE 指令串
    Pwle,
}

impl HapticNode {
    /// 默认文件名
    pub fn default_file_name(self) -> &'static str {
        match self {
            HapticNode::Activate => "activate",
            HapticNode::Duration => "duration",
            HapticNode::Index => "index",
            HapticNode::Pwle => "pwle",
        }
    }
}

impl fmt::Display for HapticNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_file_name())
    }
}

/// 设备写入错误
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write {node} node: {source}")]
    Write {
        node: HapticNode,
        #[source]
        source: std::io::Error,
    },
}

/// 设备写入端
///
/// 实现者保证把文本原样转交给驱动。服务会在多个线程中共享同一个实现，
/// 因此要求 `Send + Sync`。
pub trait HapticSink: Send + Sync {
    /// 向指定节点写入文本
    fn write(&self, node: HapticNode, value: &str) -> Result<(), SinkError>;
}

/// sysfs 设备写入端
///
/// 每个节点对应根目录下的一个文件，每次写入都会截断后重写整个文件。
#[derive(Debug, Clone)]
pub struct SysfsSink {
    root: PathBuf,
    pwle_file: String,
}

impl SysfsSink {
    /// 以 `root` 为节点目录创建
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pwle_file: HapticNode::Pwle.default_file_name().to_string(),
        }
    }

    /// 覆盖 PWLE 节点的文件名（不同驱动命名不一致）
    pub fn with_pwle_file(mut self, file_name: impl Into<String>) -> Self {
        self.pwle_file = file_name.into();
        self
    }

    /// 节点目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 节点对应的文件路径
    pub fn node_path(&self, node: HapticNode) -> PathBuf {
        match node {
            HapticNode::Pwle => self.root.join(&self.pwle_file),
            other => self.root.join(other.default_file_name()),
        }
    }
}

impl Default for SysfsSink {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT)
    }
}

impl HapticSink for SysfsSink {
    fn write(&self, node: HapticNode, value: &str) -> Result<(), SinkError> {
        let path = self.node_path(node);
        trace!("Writing {:?} to {}", value, path.display());
        fs::write(&path, value).map_err(|source| SinkError::Write { node, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_paths() {
        let sink = SysfsSink::new("/tmp/haptic");
        assert_eq!(sink.node_path(HapticNode::Activate), PathBuf::from("/tmp/haptic/activate"));
        assert_eq!(sink.node_path(HapticNode::Duration), PathBuf::from("/tmp/haptic/duration"));
        assert_eq!(sink.node_path(HapticNode::Index), PathBuf::from("/tmp/haptic/index"));
        assert_eq!(sink.node_path(HapticNode::Pwle), PathBuf::from("/tmp/haptic/pwle"));

        let sink = sink.with_pwle_file("pwle_queue");
        assert_eq!(sink.node_path(HapticNode::Pwle), PathBuf::from("/tmp/haptic/pwle_queue"));
    }

    #[test]
    fn test_default_root() {
        let sink = SysfsSink::default();
        assert_eq!(sink.root(), Path::new(DEFAULT_SYSFS_ROOT));
        assert!(
            sink.node_path(HapticNode::Index)
                .ends_with("aw8697_haptic/2-005a/index")
        );
    }

    #[test]
    fn test_write_truncates_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SysfsSink::new(dir.path());

        sink.write(HapticNode::Duration, "1000").unwrap();
        sink.write(HapticNode::Duration, "20").unwrap();

        let content = fs::read_to_string(dir.path().join("duration")).unwrap();
        assert_eq!(content, "20");
    }

    #[test]
    fn test_write_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SysfsSink::new(dir.path().join("does-not-exist"));

        let err = sink.write(HapticNode::Activate, "1").unwrap_err();
        match err {
            SinkError::Write { node, .. } => assert_eq!(node, HapticNode::Activate),
        }
    }
}
