//! 运行配置：从进程环境变量读取（main 中先通过 dotenvy 加载 .env）

use std::time::Duration;

use crate::model::error::AppError;

// === 常量定义（消除魔法值） ===
pub const ENV_EMAIL: &str = "TRANSLATION_EMAIL";
pub const ENV_ENDPOINT: &str = "TRANSLATION_ENDPOINT";
pub const ENV_SOURCE_LANG: &str = "TRANSLATION_SOURCE_LANG";
pub const ENV_TIMEOUT_SECS: &str = "TRANSLATION_TIMEOUT_SECS";

pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_SOURCE_LANG: &str = "sk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 联系邮箱，作为 `de` 参数发送给翻译服务用于限流识别
    pub email: String,
    pub endpoint: String,
    /// 源语言，整个进程内固定
    pub source_lang: String,
    /// 未设置时不限制请求时长
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意键值查找函数构建配置，便于测试时不触碰真实环境变量
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let email = non_empty(ENV_EMAIL)
            .ok_or_else(|| AppError::Config(format!("缺少环境变量 {}", ENV_EMAIL)))?;
        let endpoint = non_empty(ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let source_lang = non_empty(ENV_SOURCE_LANG)
            .map(|lang| lang.to_lowercase())
            .unwrap_or_else(|| DEFAULT_SOURCE_LANG.to_string());
        let timeout = match non_empty(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::Config(format!("{} 必须是正整数秒数: {}", ENV_TIMEOUT_SECS, raw))
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            email,
            endpoint,
            source_lang,
            timeout,
        })
    }
}
