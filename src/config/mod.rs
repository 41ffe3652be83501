use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::research::profile::UserProfile;

/// 课程关键词命中阈值：未命中课程代码时，至少命中这么多个不同关键词才认定为该课程
pub const COURSE_KEYWORD_THRESHOLD: usize = 2;

/// 洞察条目的最小长度（字符数），不超过该长度的条目视为噪声
pub const INSIGHT_MIN_LENGTH: usize = 10;

/// 报告中洞察条目的最大数量
pub const MAX_INSIGHTS: usize = 5;

/// 报告中后续步骤的最大数量
pub const MAX_NEXT_STEPS: usize = 6;

/// 写入AI提示词的参考资源最大数量
pub const MAX_PROMPT_RESOURCES: usize = 10;

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 研究报告输出路径
    pub output_path: PathBuf,

    /// 综合报告输出路径
    pub synthesis_output_path: PathBuf,

    /// 课程与资源目录的查找路径
    pub catalog: CatalogConfig,

    /// 匹配规则的阈值
    pub matching: MatchingConfig,

    /// 研究阶段使用的AI服务（Perplexity）
    #[serde(default = "LLMConfig::perplexity")]
    pub research_llm: LLMConfig,

    /// 综合阶段使用的AI服务（OpenAI）
    #[serde(default = "LLMConfig::openai")]
    pub synthesis_llm: LLMConfig,

    /// AI响应缓存配置
    pub cache: CacheConfig,

    /// 注入提示词的用户画像
    pub profile: UserProfile,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// 目录查找配置，按顺序取第一个存在的文件
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    /// 课程目录候选路径
    pub course_paths: Vec<PathBuf>,

    /// 资源目录候选路径
    pub resource_paths: Vec<PathBuf>,
}

/// 匹配阈值配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct MatchingConfig {
    pub course_keyword_threshold: usize,
    pub insight_min_length: usize,
    pub max_insights: usize,
    pub max_next_steps: usize,
    pub max_prompt_resources: usize,
}

/// AI服务配置
///
/// 配置文件中的 `[research_llm]`/`[synthesis_llm]` 段需要写全地址、模型和环境变量名，
/// 只有 `api_key` 与重试参数可以省略
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// API KEY，为空时从 `api_key_env` 指定的环境变量读取
    #[serde(default)]
    pub api_key: String,

    /// 读取API KEY的环境变量名
    pub api_key_env: String,

    /// API基地址
    pub api_base_url: String,

    /// 模型标识
    pub model: String,

    /// 尝试次数（包含首次调用）
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_retry_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    2000
}

/// 缓存配置，默认关闭，每次调用互不影响；显式开启后AI回复会跨调用复用
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,

    /// 缓存过期时间（小时）
    pub expire_hours: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl LLMConfig {
    /// Perplexity 研究服务的默认配置
    pub fn perplexity() -> Self {
        Self {
            api_key: String::new(),
            api_key_env: String::from("PPLX_API_KEY"),
            api_base_url: String::from("https://api.perplexity.ai"),
            model: String::from("sonar"),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }

    /// OpenAI 综合服务的默认配置
    pub fn openai() -> Self {
        Self {
            api_key: String::new(),
            api_key_env: String::from("OPENAI_API_KEY"),
            api_base_url: String::from("https://api.openai.com/v1"),
            model: String::from("gpt-4o-mini"),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }

    /// 解析实际使用的API KEY：配置值优先，其次环境变量。全空白视为未配置
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.trim().to_string());
        }
        if self.api_key_env.is_empty() {
            return None;
        }
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// chat completions 接口地址
    pub fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.api_base_url.trim_end_matches('/')
        )
    }
}

/// 日志中展示的API KEY，只保留前8个字符
pub fn mask_api_key(key: &str) -> String {
    let prefix: String = key.chars().take(8).collect();
    format!("{}...", prefix)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("RESEARCH.md"),
            synthesis_output_path: PathBuf::from("SYNTHESIS.md"),
            catalog: CatalogConfig::default(),
            matching: MatchingConfig::default(),
            research_llm: LLMConfig::perplexity(),
            synthesis_llm: LLMConfig::openai(),
            cache: CacheConfig::default(),
            profile: UserProfile::default(),
            verbose: false,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            course_paths: vec![
                PathBuf::from("config/courses.json"),
                PathBuf::from(".github/config/courses.json"),
                PathBuf::from("../config/courses.json"),
            ],
            resource_paths: vec![
                PathBuf::from("config/resources.json"),
                PathBuf::from(".github/config/resources.json"),
                PathBuf::from("../config/resources.json"),
            ],
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            course_keyword_threshold: COURSE_KEYWORD_THRESHOLD,
            insight_min_length: INSIGHT_MIN_LENGTH,
            max_insights: MAX_INSIGHTS,
            max_next_steps: MAX_NEXT_STEPS,
            max_prompt_resources: MAX_PROMPT_RESOURCES,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cache_dir: PathBuf::from(".research/cache"),
            expire_hours: 24,
        }
    }
}
