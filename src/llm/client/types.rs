use serde::{Deserialize, Serialize};
use serde_json::Value;

/// chat completions 消息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// chat completions 请求体
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// 一次调用的结果：正文（可能缺失）以及原始响应体
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: Option<String>,
    pub body: Value,
}

impl Completion {
    /// 从响应体中读取 `choices[0].message.content`
    pub fn from_body(body: Value) -> Self {
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|s| s.to_string());
        Self { content, body }
    }

    /// 构造只有正文的结果，缓存命中与测试时使用
    pub fn from_text(text: &str) -> Self {
        Self::from_body(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        }))
    }
}
