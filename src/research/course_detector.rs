//! 课程识别
//!
//! 两阶段匹配，均按目录插入顺序遍历、首个命中即返回：
//! - A 阶段：主题（转大写）包含课程代码，或包含去掉数字后的课程代码
//! - B 阶段：A 阶段未命中时，命中关键词数达到阈值的第一门课程

use crate::catalog::{CourseCatalog, CourseRecord};
use crate::config::COURSE_KEYWORD_THRESHOLD;

/// 课程命中方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// 课程代码命中
    Code,
    /// 关键词数量达到阈值
    Keywords(usize),
}

/// 课程识别结果
#[derive(Debug, Clone, Copy)]
pub struct CourseMatch<'a> {
    pub course: &'a CourseRecord,
    pub phase: MatchPhase,
}

pub struct CourseDetector<'a> {
    catalog: Option<&'a CourseCatalog>,
    keyword_threshold: usize,
}

impl<'a> CourseDetector<'a> {
    pub fn new(catalog: Option<&'a CourseCatalog>) -> Self {
        Self {
            catalog,
            keyword_threshold: COURSE_KEYWORD_THRESHOLD,
        }
    }

    pub fn with_keyword_threshold(mut self, threshold: usize) -> Self {
        self.keyword_threshold = threshold;
        self
    }

    /// 识别主题对应的课程，没有足够把握时返回 None
    pub fn detect(&self, topic: &str) -> Option<CourseMatch<'a>> {
        let catalog = self.catalog?;

        let upper_topic = topic.to_uppercase();
        if let Some(course) = catalog.iter().find(|c| code_matches(&upper_topic, &c.code)) {
            return Some(CourseMatch {
                course,
                phase: MatchPhase::Code,
            });
        }

        let lower_topic = topic.to_lowercase();
        catalog.iter().find_map(|course| {
            let hits = count_keyword_hits(&lower_topic, &course.keywords);
            (hits >= self.keyword_threshold).then_some(CourseMatch {
                course,
                phase: MatchPhase::Keywords(hits),
            })
        })
    }

    /// 识别课程并在命中时用课程分类覆盖已有分类
    pub fn detect_and_apply(&self, topic: &str, category: &mut String) -> Option<CourseMatch<'a>> {
        let detected = self.detect(topic)?;
        if !detected.course.category.trim().is_empty() {
            *category = detected.course.category.clone();
        }
        Some(detected)
    }
}

fn code_matches(upper_topic: &str, code: &str) -> bool {
    let code = code.to_uppercase();
    if code.is_empty() {
        return false;
    }
    if upper_topic.contains(&code) {
        return true;
    }

    // 宽松引用，例如只写了学科前缀
    let stripped: String = code.chars().filter(|c| !c.is_ascii_digit()).collect();
    !stripped.is_empty() && upper_topic.contains(&stripped)
}

/// 统计命中的不同关键词个数（大小写不敏感的子串匹配）
fn count_keyword_hits(lower_topic: &str, keywords: &[String]) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || seen.contains(&keyword) {
            continue;
        }
        if lower_topic.contains(&keyword) {
            seen.push(keyword);
        }
    }
    seen.len()
}
