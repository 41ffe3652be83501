//! AI服务客户端 - OpenAI 兼容的 chat completions 接口（Perplexity、OpenAI 等）

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;

use crate::config::{LLMConfig, mask_api_key};

pub mod types;

pub use types::{ChatCompletionRequest, ChatMessage, Completion};

/// AI服务调用错误
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("AI service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI service returned a malformed body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("AI service returned insufficient content ({length} chars)")]
    Insufficient { length: usize },
}

/// 文本补全服务，调研与综合流程只依赖这个接口
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// 提交单条 user 消息，返回服务的响应
    async fn complete(&self, prompt: &str) -> Result<Completion, LLMError>;

    /// 日志中展示的服务标识
    fn describe(&self) -> String {
        "ai-service".to_string()
    }
}

/// 基于 reqwest 的 chat completions 客户端
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    api_key: String,
    http: reqwest::Client,
}

impl LLMClient {
    /// 配置了API KEY时创建客户端，否则返回 None
    pub fn from_config(config: &LLMConfig) -> Option<Self> {
        let api_key = config.resolve_api_key()?;
        Some(Self::with_api_key(config, &api_key))
    }

    pub fn with_api_key(config: &LLMConfig, api_key: &str) -> Self {
        Self::with_http_client(config, api_key, reqwest::Client::new())
    }

    /// 使用外部构造的 reqwest 客户端（代理、TLS 等由调用方决定）
    pub fn with_http_client(config: &LLMConfig, api_key: &str, http: reqwest::Client) -> Self {
        Self {
            config: config.clone(),
            api_key: api_key.to_string(),
            http,
        }
    }

    pub fn masked_api_key(&self) -> String {
        mask_api_key(&self.api_key)
    }

    /// 通用重试逻辑，用尽次数后返回最后一次错误
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T, LLMError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, LLMError>>,
    {
        let max_attempts = self.config.retry_attempts.max(1);
        let mut attempts = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    attempts += 1;
                    if attempts >= max_attempts {
                        return Err(err);
                    }
                    eprintln!(
                        "❌ 调用AI服务出错，重试中 (第 {} / {}次尝试): {}",
                        attempts, max_attempts, err
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(
                        self.config.retry_delay_ms,
                    ))
                    .await;
                }
            }
        }
    }

    async fn send_once(&self, prompt: &str) -> Result<Completion, LLMError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
        };

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        println!(
            "📥 AI服务响应状态: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );

        let text = response.text().await?;
        if !status.is_success() {
            return Err(LLMError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text)?;
        Ok(Completion::from_body(body))
    }
}

#[async_trait]
impl CompletionService for LLMClient {
    async fn complete(&self, prompt: &str) -> Result<Completion, LLMError> {
        self.retry_with_backoff(|| self.send_once(prompt)).await
    }

    fn describe(&self) -> String {
        format!("{} @ {}", self.config.model, self.config.api_base_url)
    }
}
