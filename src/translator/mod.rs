//! 翻译客户端：单次网络调用翻译一个字符串
//!
//! `translate_or_fallback` 是对外契约：任何失败都只记录警告并返回原文。

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::model::error::AppError;

/// 翻译服务接口（固定源语言，由实现方持有）
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, AppError>;
}

/// 翻译失败时回退为原文，从不向调用方报错
pub async fn translate_or_fallback(translator: &dyn Translator, text: &str, target_lang: &str) -> String {
    match translator.translate(text, target_lang).await {
        Ok(translated) => translated,
        Err(e) => {
            tracing::warn!("翻译失败（{}），保留原文: {:?}: {}", target_lang, text, e);
            text.to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    /// 配额耗尽、邮箱无效等错误仍返回 HTTP 200，只在此处标明；可能是数字或字符串
    #[serde(rename = "responseStatus")]
    response_status: Option<serde_json::Value>,
    #[serde(rename = "responseDetails")]
    response_details: Option<serde_json::Value>,
}

impl MyMemoryResponse {
    /// 缺少 responseStatus 时按成功处理
    fn status_code(&self) -> Option<u64> {
        match self.response_status.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// 从响应体中取出 `responseData.translatedText`；响应体中的 `responseStatus` 不是 200 时视为失败
pub fn extract_translated_text(body: &[u8]) -> Result<String, AppError> {
    let parsed: MyMemoryResponse = serde_json::from_slice(body)?;
    if parsed.response_status.is_some() && parsed.status_code() != Some(200) {
        let details = match &parsed.response_details {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        return Err(AppError::Translation(format!(
            "responseStatus {}: {}",
            parsed.response_status.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            details
        )));
    }
    parsed
        .response_data
        .and_then(|data| data.translated_text)
        .ok_or_else(|| AppError::Translation("响应缺少 responseData.translatedText".into()))
}

/// MyMemory 翻译服务的 HTTP 客户端
#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    client: reqwest::Client,
    endpoint: String,
    source_lang: String,
    email: String,
}

impl MyMemoryClient {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("juzhen_locale_sync/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            source_lang: config.source_lang.clone(),
            email: config.email.clone(),
        })
    }

    fn lang_pair(&self, target_lang: &str) -> String {
        format!("{}|{}", self.source_lang, target_lang)
    }
}

#[async_trait]
impl Translator for MyMemoryClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, AppError> {
        let lang_pair = self.lang_pair(target_lang);
        let params = [
            ("q", text),
            ("langpair", lang_pair.as_str()),
            ("de", self.email.as_str()),
        ];

        let response = self.client.get(&self.endpoint).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Translation(format!("HTTP状态: {}", response.status())));
        }

        let body = response.bytes().await?;
        extract_translated_text(&body)
    }
}
