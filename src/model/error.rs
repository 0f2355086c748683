//! 统一错误类型

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("HTTP请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("翻译服务错误: {0}")]
    Translation(String),
    #[error("配置错误: {0}")]
    Config(String),
    #[error("状态错误: {0}")]
    State(String),
}
