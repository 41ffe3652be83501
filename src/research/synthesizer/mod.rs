//! 内容生成：优先调用AI服务并解析回复，任何失败都回退到离线模拟生成

use crate::cache::CacheManager;
use crate::catalog::{CourseRecord, ResourceRecord};
use crate::config::MatchingConfig;
use crate::llm::client::{CompletionService, LLMError};
use crate::research::profile::UserProfile;
use crate::research::response_parser::ResponseParser;
use crate::research::types::{Findings, Priority, ResearchTopic, TopicStatus};

pub mod prompt;
pub mod simulated;

/// 响应缺少正文时使用的占位文本
pub const NO_RESULT: &str = "No result";

/// AI回复去掉首尾空白后的最小长度，不足视为无效
pub const MIN_RESPONSE_LENGTH: usize = 50;

const CACHE_CATEGORY: &str = "research";

/// AI调用结果
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome {
    /// 有效回复文本
    Answered(String),
    /// 需要回退到模拟生成，附带原因
    Fallback(String),
}

/// 判断AI回复是否过短或缺失
pub fn check_response(text: &str) -> Result<(), LLMError> {
    let length = text.trim().chars().count();
    if text == NO_RESULT || length < MIN_RESPONSE_LENGTH {
        return Err(LLMError::Insufficient { length });
    }
    Ok(())
}

pub struct ContentSynthesizer<'a> {
    service: Option<&'a dyn CompletionService>,
    cache: Option<&'a CacheManager>,
    profile: &'a UserProfile,
    matching: &'a MatchingConfig,
    verbose: bool,
}

impl<'a> ContentSynthesizer<'a> {
    pub fn new(profile: &'a UserProfile, matching: &'a MatchingConfig) -> Self {
        Self {
            service: None,
            cache: None,
            profile,
            matching,
            verbose: false,
        }
    }

    pub fn with_service(mut self, service: Option<&'a dyn CompletionService>) -> Self {
        self.service = service;
        self
    }

    pub fn with_cache(mut self, cache: &'a CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 生成调研结果，保证研究主题与后续步骤非空
    pub async fn synthesize(
        &self,
        topic: &str,
        category: &str,
        course: Option<&CourseRecord>,
        resources: &[ResourceRecord],
    ) -> Findings {
        let mut findings = Findings::new(category);

        let Some(service) = self.service else {
            eprintln!("⚠️ 未配置AI服务的API KEY，使用模拟调研数据");
            self.simulate(&mut findings, topic, course);
            return findings;
        };

        let prompt = prompt::build_research_prompt(
            topic,
            self.profile,
            course,
            resources,
            self.matching.max_prompt_resources,
        );
        if self.verbose {
            println!("   📏 提示词长度: {} 字符", prompt.chars().count());
        }

        match self.query(service, &prompt).await {
            AiOutcome::Answered(text) => {
                self.populate_from_ai(&mut findings, topic, course, text);
                println!("✅ AI调研完成");
            }
            AiOutcome::Fallback(reason) => {
                eprintln!("❌ AI调研失败，回退到模拟数据: {}", reason);
                self.simulate(&mut findings, topic, course);
            }
        }

        findings
    }

    /// 调用AI服务（先查缓存），把所有失败折叠成 Fallback
    pub async fn query(&self, service: &dyn CompletionService, prompt: &str) -> AiOutcome {
        if let Some(cache) = self.cache
            && let Some(text) = cache.get::<String>(CACHE_CATEGORY, prompt).await
        {
            if self.verbose {
                println!("   💾 命中AI响应缓存");
            }
            return AiOutcome::Answered(text);
        }

        println!("🤖 正在查询AI服务: {}", service.describe());
        let completion = match service.complete(prompt).await {
            Ok(completion) => completion,
            Err(e) => return AiOutcome::Fallback(e.to_string()),
        };

        let text = completion
            .content
            .unwrap_or_else(|| NO_RESULT.to_string());
        println!("📝 响应长度: {} 字符", text.chars().count());

        if let Err(e) = check_response(&text) {
            return AiOutcome::Fallback(e.to_string());
        }

        if let Some(cache) = self.cache
            && let Err(e) = cache
                .set(CACHE_CATEGORY, prompt, text.clone(), Some(service.describe()))
                .await
        {
            eprintln!("⚠️ 写入AI响应缓存失败: {}", e);
        }

        AiOutcome::Answered(text)
    }

    fn populate_from_ai(
        &self,
        findings: &mut Findings,
        topic: &str,
        course: Option<&CourseRecord>,
        text: String,
    ) {
        findings.topics.push(ResearchTopic::new(
            topic,
            &format!("Research findings from AI for: {}", topic),
            Priority::High,
            TopicStatus::Completed,
        ));
        if let Some(course) = course {
            findings.topics.push(ResearchTopic::new(
                &format!("{} - {}", course.code, course.name),
                &format!("Course context for {} ({})", course.subject, course.term),
                Priority::Medium,
                TopicStatus::InProgress,
            ));
        }

        let parser =
            ResponseParser::new(self.matching.insight_min_length, self.matching.max_insights);
        findings.insights = parser.parse(&text).insights;

        findings.next_steps = vec![
            "Review and validate research findings".to_string(),
            "Implement recommendations from the research".to_string(),
            "Schedule follow-up research if needed".to_string(),
            "Document key insights for future reference".to_string(),
        ];
        if let Some(course) = course {
            findings
                .next_steps
                .push(format!("Connect the findings to {} coursework", course.code));
        }
        findings.next_steps.truncate(self.matching.max_next_steps);

        findings.ai_results = text;
    }

    fn simulate(&self, findings: &mut Findings, topic: &str, course: Option<&CourseRecord>) {
        println!("🔄 使用模拟调研数据...");
        if self.verbose {
            match (course, simulated::matching_rule(topic)) {
                (Some(course), _) => println!(
                    "   🎓 按课程学科生成: {} ({:?})",
                    course.code,
                    simulated::SubjectKind::of(&course.subject)
                ),
                (None, Some(rule)) => println!("   🧩 命中模板分组: {}", rule.name),
                (None, None) => println!("   🧩 使用通用模板"),
            }
        }
        simulated::populate(findings, topic, course, self.matching);
        println!("✅ 模拟调研完成");
    }
}

// Include tests
#[cfg(test)]
mod tests;
