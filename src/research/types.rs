use serde::{Deserialize, Serialize};

use crate::catalog::{CourseRecord, ResourceRecord};

/// 未命中任何分类规则时使用的兜底分类
pub const DEFAULT_CATEGORY: &str = "General Research";

/// 研究主题优先级
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// 研究主题状态
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopicStatus::Pending => write!(f, "pending"),
            TopicStatus::InProgress => write!(f, "in_progress"),
            TopicStatus::Completed => write!(f, "completed"),
        }
    }
}

/// 研究主题条目
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResearchTopic {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TopicStatus,
}

impl ResearchTopic {
    pub fn new(title: &str, description: &str, priority: Priority, status: TopicStatus) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            priority,
            status,
        }
    }
}

/// 单次调研的结构化产出
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Findings {
    /// 调研日期 (YYYY-MM-DD)
    pub date: String,
    pub topics: Vec<ResearchTopic>,
    pub insights: Vec<String>,
    pub next_steps: Vec<String>,
    /// AI返回的原始文本，模拟生成时为空
    pub ai_results: String,
    pub category: String,
}

impl Findings {
    pub fn new(category: &str) -> Self {
        Self {
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            topics: Vec::new(),
            insights: Vec::new(),
            next_steps: Vec::new(),
            ai_results: String::new(),
            category: category.to_string(),
        }
    }

    /// 是否来自AI服务
    pub fn is_ai_backed(&self) -> bool {
        !self.ai_results.is_empty()
    }
}

/// 一次调研的完整结果，交给报告输出
#[derive(Debug, Clone)]
pub struct ResearchOutcome {
    pub topic: String,
    pub findings: Findings,
    pub course: Option<CourseRecord>,
    pub resources: Vec<ResourceRecord>,
}
