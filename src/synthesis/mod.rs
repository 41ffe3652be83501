//! 调研报告综合：读取调研报告，让AI整理成可执行的要点
//!
//! 进度日志写到 stderr，`--stdout` 模式下 stdout 只包含综合结果。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cache::CacheManager;
use crate::config::Config;
use crate::llm::client::{CompletionService, LLMClient};

/// 未指定输入文件时读取的调研报告
pub const DEFAULT_INPUT: &str = "RESEARCH.md";

const CACHE_CATEGORY: &str = "synthesis";

/// 没有AI服务或调用失败时输出的固定综合模板
pub const SIMULATED_SYNTHESIS: &str = "# Direct Answers
- This is a simulated synthesis. Provide specific, actionable guidance based on the research input.
- Summarize the most relevant points to answer the user's prompt directly.

# Next Actions
- List 5–8 concrete, short steps the user can take.

# Materials (if relevant)
- List only what's needed to proceed.

# Risks & Mitigations
- Up to 3 bullets with succinct mitigations.

# References
- Include up to 5 high-signal references if present in research.";

/// 读取调研报告，文件不存在时报错
pub fn load_input(path: &Path) -> Result<String> {
    eprintln!("📚 读取输入文件: {}", path.display());
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    eprintln!("📊 已读取 {} 个字符", input.chars().count());
    Ok(input)
}

/// 综合提示词：固定的段落要求加上完整的调研报告
pub fn build_prompt(input: &str) -> String {
    format!(
        "You are a pragmatic assistant. Read the research below and output ONLY the following sections, in this exact order and concise style:

# Direct Answers
- Answer the user's question(s) in plain language (3-7 bullets max)

# Next Actions
- A short checklist of concrete steps the user can take next (5-8 items)

# Materials (if relevant)
- List required materials/tools succinctly

# Risks & Mitigations (optional)
- Up to 3 bullets

# References (optional)
- Up to 5 short, high-signal references, if present in research

Do NOT describe the repo structure or general capabilities. Focus on answering the user's prompt directly.

---
{}",
        input
    )
}

pub struct ResearchSynthesizer<'a> {
    service: Option<&'a dyn CompletionService>,
    cache: Option<&'a CacheManager>,
}

impl<'a> ResearchSynthesizer<'a> {
    pub fn new(service: Option<&'a dyn CompletionService>) -> Self {
        Self {
            service,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: &'a CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    /// 生成综合文本，任何失败都回退到模拟模板
    pub async fn synthesize(&self, input: &str) -> String {
        let Some(service) = self.service else {
            eprintln!("⚠️ 未配置综合用AI服务的API KEY，使用模拟综合");
            return simulated();
        };

        let prompt = build_prompt(input);
        if let Some(cache) = self.cache
            && let Some(text) = cache.get::<String>(CACHE_CATEGORY, &prompt).await
        {
            eprintln!("💾 命中综合结果缓存");
            return text;
        }

        eprintln!("🤖 正在查询AI服务: {}", service.describe());
        match service.complete(&prompt).await {
            Ok(completion) => {
                // 缺少正文时保留完整响应体，便于排查
                let text = match completion.content {
                    Some(content) => content,
                    None => serde_json::to_string_pretty(&completion.body)
                        .unwrap_or_else(|_| completion.body.to_string()),
                };
                if let Some(cache) = self.cache
                    && let Err(e) = cache
                        .set(CACHE_CATEGORY, &prompt, text.clone(), Some(service.describe()))
                        .await
                {
                    eprintln!("⚠️ 写入综合结果缓存失败: {}", e);
                }
                eprintln!("✅ AI综合完成");
                text
            }
            Err(e) => {
                eprintln!("❌ AI综合失败，回退到模拟综合: {}", e);
                simulated()
            }
        }
    }
}

fn simulated() -> String {
    eprintln!("🔄 使用模拟综合...");
    SIMULATED_SYNTHESIS.to_string()
}

/// 启动综合流程；`to_stdout` 为 true 时打印结果而不写文件
pub async fn launch(config: &Config, input: &Path, to_stdout: bool) -> Result<Option<PathBuf>> {
    eprintln!("🚀 开始综合调研报告: \"{}\"", input.display());
    let input = load_input(input)?;

    let client = LLMClient::from_config(&config.synthesis_llm);
    if let Some(client) = &client {
        eprintln!("🔑 使用API KEY: {}", client.masked_api_key());
    }
    let cache = CacheManager::new(config.cache.clone());
    let mut synthesizer =
        ResearchSynthesizer::new(client.as_ref().map(|c| c as &dyn CompletionService));
    if cache.is_enabled() {
        synthesizer = synthesizer.with_cache(&cache);
    }

    let output = synthesizer.synthesize(&input).await;

    let saved = if to_stdout {
        print!("{}", output);
        None
    } else {
        let path = &config.synthesis_output_path;
        std::fs::write(path, &output)
            .with_context(|| format!("Failed to write synthesis to {}", path.display()))?;
        eprintln!("📄 综合报告已保存: {}", path.display());
        Some(path.clone())
    };

    eprintln!("🎉 综合流程完成!");
    Ok(saved)
}
