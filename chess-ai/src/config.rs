//! AI 配置
//!
//! 配置可以由难度直接生成，也可以从 JSON 文件加载。

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 允许的最大搜索深度
pub const MAX_SEARCH_DEPTH: u8 = 6;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=1
    Easy,
    /// 中等：depth=2
    #[default]
    Medium,
    /// 困难：depth=3
    Hard,
}

impl Difficulty {
    /// 对应的搜索深度
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Search depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u8, max: u8 },
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
    /// 随机选步器的种子；None 时使用系统熵
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            max_depth: difficulty.depth(),
            seed: None,
        }
    }

    /// 固定随机种子
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::DepthTooLarge {
                depth: self.max_depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        Ok(())
    }

    /// 从 JSON 文件加载配置
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read AI config {}", path.display()))?;
        let config: AiConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid AI config {}", path.display()))?;
        config.validate()?;

        info!("Loaded AI config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// 加载配置，失败时使用默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{:#}, using default AI config", e);
                Self::default()
            }
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chess-ai-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_difficulty_depths() {
        assert_eq!(AiConfig::from_difficulty(Difficulty::Easy).max_depth, 1);
        assert_eq!(AiConfig::from_difficulty(Difficulty::Medium).max_depth, 2);
        assert_eq!(AiConfig::from_difficulty(Difficulty::Hard).max_depth, 3);
        assert_eq!(AiConfig::default().difficulty, Difficulty::Medium);
        assert_eq!(AiConfig::default().seed, None);
    }

    #[test]
    fn test_validate_depth() {
        let mut config = AiConfig::default();
        config.max_depth = MAX_SEARCH_DEPTH;
        assert!(config.validate().is_ok());

        config.max_depth = MAX_SEARCH_DEPTH + 1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DepthTooLarge {
                depth: MAX_SEARCH_DEPTH + 1,
                max: MAX_SEARCH_DEPTH
            })
        );
    }

    #[test]
    fn test_load_config_file() {
        let path = temp_config("load", r#"{"difficulty":"Hard","max_depth":4,"seed":99}"#);
        let config = AiConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_seed_is_optional() {
        let path = temp_config("noseed", r#"{"difficulty":"Easy","max_depth":1}"#);
        let config = AiConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config, AiConfig::from_difficulty(Difficulty::Easy));
    }

    #[test]
    fn test_load_rejects_deep_search() {
        let path = temp_config("deep", r#"{"difficulty":"Hard","max_depth":9}"#);
        let err = AiConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::DepthTooLarge { depth: 9, .. })
        ));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let missing = std::env::temp_dir().join("chess-ai-missing-config.json");
        assert_eq!(AiConfig::load_or_default(&missing), AiConfig::default());

        let path = temp_config("broken", "{ not json");
        assert_eq!(AiConfig::load_or_default(&path), AiConfig::default());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AiConfig::from_difficulty(Difficulty::Hard).with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let decoded: AiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }
}
