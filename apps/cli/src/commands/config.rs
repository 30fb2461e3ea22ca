//! 配置管理命令
//!
//! 用于管理 CLI 配置（sysfs 目录、PWLE 节点名、频率控制能力）

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use vibrator_driver::protocol::Capabilities;
use vibrator_driver::{DEFAULT_SYSFS_ROOT, VibratorConfig};

/// 配置文件路径
fn config_dir() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;

    path.push("vibrator");
    Ok(path)
}

fn config_file() -> Result<PathBuf> {
    let mut path = config_dir()?;
    path.push("config.toml");
    Ok(path)
}

/// CLI 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// sysfs 节点目录
    pub sysfs_root: Option<PathBuf>,

    /// PWLE 节点文件名
    pub pwle_node: Option<String>,

    /// 是否报告频率控制能力（启用带宽-幅度表）
    pub frequency_control: bool,
}

impl CliConfig {
    /// 加载配置，文件不存在时返回默认配置
    pub fn load() -> Result<Self> {
        let path = config_file()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("读取配置文件失败")?;
        Self::parse(&content).with_context(|| format!("解析配置文件失败: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 保存配置
    pub fn save(&self) -> Result<()> {
        let dir = config_dir()?;
        fs::create_dir_all(&dir).context("创建配置目录失败")?;

        let content = toml::to_string_pretty(self).context("序列化配置失败")?;
        fs::write(config_file()?, content).context("写入配置文件失败")?;

        Ok(())
    }

    /// 按名称修改一个配置项
    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sysfs_root" => self.sysfs_root = Some(PathBuf::from(value)),
            "pwle_node" => self.pwle_node = Some(value.to_string()),
            "frequency_control" => {
                self.frequency_control = value
                    .parse()
                    .with_context(|| format!("frequency_control 需要 true/false，得到 {}", value))?;
            },
            other => anyhow::bail!("未知配置项: {}", other),
        }
        Ok(())
    }

    /// 对外报告的能力位
    pub fn capabilities(&self) -> Capabilities {
        let mut capabilities = VibratorConfig::default().capabilities;
        if self.frequency_control {
            capabilities.insert(Capabilities::FREQUENCY_CONTROL);
        }
        capabilities
    }
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 设置配置项（sysfs_root / pwle_node / frequency_control）
    Set {
        /// 配置项名称
        key: String,

        /// 配置值
        value: String,
    },

    /// 获取配置项
    Get {
        /// 配置项名称
        #[arg(default_value = "all")]
        key: String,
    },

    /// 显示配置文件路径
    Path,
}

impl ConfigCommand {
    pub fn execute(&self) -> Result<()> {
        match self {
            ConfigCommand::Set { key, value } => Self::set_(key, value),

            ConfigCommand::Get { key } => Self::get_(key),

            ConfigCommand::Path => {
                println!("{}", config_file()?.display());
                Ok(())
            },
        }
    }

    fn set_(key: &str, value: &str) -> Result<()> {
        let mut config = CliConfig::load()?;
        config.apply(key, value)?;
        config.save()?;

        println!("✅ 设置 {} = {}", key, value);
        Ok(())
    }

    fn get_(key: &str) -> Result<()> {
        let config = CliConfig::load()?;

        match key {
            "sysfs_root" => match config.sysfs_root {
                Some(root) => println!("{}", root.display()),
                None => println!("(未设置，默认 {})", DEFAULT_SYSFS_ROOT),
            },

            "pwle_node" => match config.pwle_node {
                Some(node) => println!("{}", node),
                None => println!("(未设置，默认 pwle)"),
            },

            "frequency_control" => println!("{}", config.frequency_control),

            "all" => {
                println!("Vibrator CLI 配置:");
                println!("  sysfs_root: {:?}", config.sysfs_root);
                println!("  pwle_node: {:?}", config.pwle_node);
                println!("  frequency_control: {}", config.frequency_control);
            },

            other => anyhow::bail!("未知配置项: {}", other),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = CliConfig::parse("pwle_node = \"pwle_queue\"\n").unwrap();
        assert_eq!(config.pwle_node.as_deref(), Some("pwle_queue"));
        assert_eq!(config.sysfs_root, None);
        assert!(!config.frequency_control);
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(CliConfig::parse("frequency_control = \"yes\"\n").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CliConfig {
            sysfs_root: Some(PathBuf::from("/tmp/haptic")),
            pwle_node: None,
            frequency_control: true,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(CliConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_apply() {
        let mut config = CliConfig::default();
        config.apply("sysfs_root", "/tmp/haptic").unwrap();
        config.apply("pwle_node", "pwle_queue").unwrap();
        config.apply("frequency_control", "true").unwrap();
        assert_eq!(config.sysfs_root, Some(PathBuf::from("/tmp/haptic")));
        assert_eq!(config.pwle_node.as_deref(), Some("pwle_queue"));
        assert!(config.frequency_control);

        assert!(config.apply("frequency_control", "maybe").is_err());
        assert!(config.apply("interface", "can0").is_err());
    }

    #[test]
    fn test_capabilities_from_config() {
        let config = CliConfig::default();
        assert!(!config.capabilities().contains(Capabilities::FREQUENCY_CONTROL));
        assert!(config.capabilities().contains(Capabilities::ON_CALLBACK));

        let config = CliConfig {
            frequency_control: true,
            ..CliConfig::default()
        };
        assert!(config.capabilities().contains(Capabilities::FREQUENCY_CONTROL));
    }
}
