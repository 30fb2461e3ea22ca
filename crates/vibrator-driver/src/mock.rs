//! Mock 设备写入端
//!
//! 记录所有写入，可注入写入失败，用于无硬件测试。
//! 内部锁中毒时直接 panic，避免丢失写入记录。

use crate::sink::{HapticNode, HapticSink, SinkError};
use std::collections::HashSet;
use std::sync::Mutex;

/// 记录写入的设备写入端
///
/// # 示例
///
/// ```rust
/// use vibrator_driver::{HapticNode, HapticSink, MockSink};
///
/// let sink = MockSink::new();
/// sink.write(HapticNode::Activate, "1").unwrap();
/// assert_eq!(sink.writes(), vec![(HapticNode::Activate, "1".to_string())]);
/// ```
#[derive(Debug, Default)]
pub struct MockSink {
    writes: Mutex<Vec<(HapticNode, String)>>,
    failing: Mutex<HashSet<HapticNode>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 之后对 `node` 的写入全部失败
    pub fn fail_on(&self, node: HapticNode) {
        self.failing.lock().expect("MockSink lock poisoned").insert(node);
    }

    /// 按顺序返回全部写入记录
    pub fn writes(&self) -> Vec<(HapticNode, String)> {
        self.writes.lock().expect("MockSink lock poisoned").clone()
    }

    /// 某个节点最后一次写入的值
    pub fn last_value(&self, node: HapticNode) -> Option<String> {
        self.writes().into_iter().rev().find(|(n, _)| *n == node).map(|(_, v)| v)
    }

    /// 清空写入记录
    pub fn clear(&self) {
        self.writes.lock().expect("MockSink lock poisoned").clear();
    }
}

impl HapticSink for MockSink {
    fn write(&self, node: HapticNode, value: &str) -> Result<(), SinkError> {
        let should_fail = self.failing.lock().expect("MockSink lock poisoned").contains(&node);
        if should_fail {
            return Err(SinkError::Write {
                node,
                source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "injected failure"),
            });
        }

        self.writes
            .lock()
            .expect("MockSink lock poisoned")
            .push((node, value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let sink = MockSink::new();
        sink.write(HapticNode::Index, "2").unwrap();
        sink.write(HapticNode::Duration, "15").unwrap();
        sink.write(HapticNode::Index, "0").unwrap();

        assert_eq!(sink.writes().len(), 3);
        assert_eq!(sink.last_value(HapticNode::Index).as_deref(), Some("0"));
        assert_eq!(sink.last_value(HapticNode::Activate), None);

        sink.clear();
        assert!(sink.writes().is_empty());
    }

    #[test]
    fn test_injected_failure() {
        let sink = MockSink::new();
        sink.fail_on(HapticNode::Pwle);

        assert!(sink.write(HapticNode::Pwle, "S:0").is_err());
        assert!(sink.write(HapticNode::Activate, "1").is_ok());
        assert_eq!(sink.writes(), vec![(HapticNode::Activate, "1".to_string())]);
    }

    #[test]
    #[should_panic(expected = "MockSink lock poisoned")]
    fn test_poisoned_lock_panics() {
        let sink = std::sync::Arc::new(MockSink::new());
        let holder = sink.clone();
        let result = std::thread::spawn(move || {
            let _guard = holder.writes.lock().unwrap();
            panic!("writer died while holding the lock");
        })
        .join();
        assert!(result.is_err());

        sink.writes();
    }
}
