//! 组合文件
//!
//! 组合效果与 PWLE 组合都以 JSON 保存，可以是裸数组，也可以带名称与描述：
//!
//! ```json
//! {
//!   "name": "ramp",
//!   "description": "150 Hz 渐强后刹车",
//!   "segments": [
//!     {"type": "active", "start_amplitude": 0.0, "start_frequency": 150.0,
//!      "end_amplitude": 1.0, "end_frequency": 150.0, "duration_ms": 100},
//!     {"type": "braking", "braking": "CLAB", "duration_ms": 20}
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 带元数据的组合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition<T> {
    /// 组合名称
    #[serde(default)]
    pub name: String,

    /// 组合描述
    #[serde(default)]
    pub description: String,

    /// 组合内容
    pub segments: Vec<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CompositionFile<T> {
    Bare(Vec<T>),
    Named(Composition<T>),
}

impl<T> From<CompositionFile<T>> for Composition<T> {
    fn from(file: CompositionFile<T>) -> Self {
        match file {
            CompositionFile::Bare(segments) => Composition {
                name: String::new(),
                description: String::new(),
                segments,
            },
            CompositionFile::Named(composition) => composition,
        }
    }
}

impl<T: DeserializeOwned> Composition<T> {
    /// 从 JSON 文本解析
    pub fn parse(content: &str) -> Result<Self> {
        let file: CompositionFile<T> =
            serde_json::from_str(content).context("解析组合 JSON 失败")?;
        Ok(file.into())
    }

    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取组合文件失败: {}", path.display()))?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibrator_protocol::{Braking, CompositeEffect, CompositePrimitive, PrimitivePwle};

    #[test]
    fn test_parse_bare_array() {
        let composition: Composition<CompositeEffect> = Composition::parse(
            r#"[{"primitive": "CLICK", "scale": 0.5}, {"delay_ms": 20, "primitive": "thud", "scale": 1.0}]"#,
        )
        .unwrap();
        assert_eq!(composition.segments.len(), 2);
        assert_eq!(composition.segments[0].delay_ms, 0);
        assert_eq!(composition.segments[1].primitive, CompositePrimitive::Thud);
    }

    #[test]
    fn test_parse_named() {
        let composition: Composition<PrimitivePwle> = Composition::parse(
            r#"{
                "name": "stop",
                "segments": [{"type": "braking", "braking": "clab", "duration_ms": 10}]
            }"#,
        )
        .unwrap();
        assert_eq!(composition.name, "stop");
        assert!(composition.description.is_empty());
        assert!(matches!(
            composition.segments[0],
            PrimitivePwle::Braking(b) if b.braking == Braking::Clab
        ));
    }

    #[test]
    fn test_parse_unknown_primitive_fails() {
        let result: Result<Composition<CompositeEffect>> =
            Composition::parse(r#"[{"primitive": "BUZZ", "scale": 0.5}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Composition<PrimitivePwle>> =
            Composition::load(dir.path().join("missing.json"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
