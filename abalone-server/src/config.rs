//! 服务端配置
//!
//! 从 `ABALONE_CONFIG` 环境变量指定的 JSON 文件加载，未指定时使用默认值。

use std::path::{Path, PathBuf};

use abalone_protocol::{Board, Layout};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_ENV: &str = "ABALONE_CONFIG";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取失败
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// 解析失败
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// 配置值不合法
    #[error("invalid config: {0}")]
    Validation(String),
}

/// 服务端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 同时存在的房间数上限
    pub max_rooms: usize,
    /// 每个玩家消息通道的容量
    pub channel_capacity: usize,
    /// 默认日志过滤（RUST_LOG 优先）
    pub log_filter: String,
    /// 本地对战的起始布局，缺省为标准开局
    pub start_layout: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_rooms: 64,
            channel_capacity: 32,
            log_filter: "abalone_server=info,abalone_protocol=info".to_string(),
            start_layout: None,
        }
    }
}

impl ServerConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// 从 JSON 文本解析，缺省字段取默认值
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 按环境变量加载，未设置时使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rooms == 0 {
            return Err(ConfigError::Validation("max_rooms must be > 0".into()));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Validation(
                "channel_capacity must be > 0".into(),
            ));
        }
        if let Some(layout) = &self.start_layout {
            Layout::parse(layout).map_err(|e| ConfigError::Validation(e.to_string()))?;
        }
        Ok(())
    }

    /// 起始棋盘
    pub fn start_board(&self) -> Result<Board, ConfigError> {
        match &self.start_layout {
            Some(layout) => {
                Layout::parse(layout).map_err(|e| ConfigError::Validation(e.to_string()))
            }
            None => Ok(Board::initial()),
        }
    }
}
