//! 主题分类器
//!
//! 规则表按顺序求值，第一条命中的规则决定分类（first-match）。

use crate::catalog::CourseCatalog;
use crate::research::types::DEFAULT_CATEGORY;

/// 分类规则：关键词集合 → 分类名称
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub keywords: Vec<String>,
    pub category: String,
}

impl CategoryRule {
    fn new(keywords: &[&str], category: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            category: category.to_string(),
        }
    }

    /// 任一关键词是主题（已转小写）的子串即命中
    fn matches(&self, lower_topic: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && lower_topic.contains(keyword.as_str()))
    }
}

/// 主题分类器
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CategoryClassifier {
    /// 创建分类器；课程目录存在时，把每门课的关键词追加到同名分类规则上
    pub fn new(courses: Option<&CourseCatalog>) -> Self {
        let mut rules = Self::base_rules();

        if let Some(catalog) = courses {
            for course in catalog.iter() {
                if let Some(rule) = rules.iter_mut().find(|r| r.category == course.category) {
                    rule.keywords
                        .extend(course.keywords.iter().map(|k| k.to_lowercase()));
                }
            }
        }

        Self { rules }
    }

    fn base_rules() -> Vec<CategoryRule> {
        vec![
            CategoryRule::new(
                &[
                    "project", "build", "create", "develop", "app", "website", "software", "tool",
                ],
                "Personal Projects",
            ),
            CategoryRule::new(
                &[
                    "think",
                    "reflect",
                    "philosophy",
                    "meaning",
                    "purpose",
                    "life",
                    "personal",
                    "growth",
                ],
                "Reflections & Questions",
            ),
            CategoryRule::new(
                &[
                    "math",
                    "mathematics",
                    "algorithm",
                    "code",
                    "programming",
                    "function",
                    "equation",
                    "calculate",
                ],
                "Math & Coding",
            ),
            CategoryRule::new(
                &[
                    "science",
                    "physics",
                    "chemistry",
                    "biology",
                    "research",
                    "experiment",
                    "theory",
                    "hypothesis",
                ],
                "Sciences",
            ),
        ]
    }

    /// 计算主题分类，未命中时返回兜底分类
    pub fn classify(&self, topic: &str) -> String {
        let lower_topic = topic.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower_topic))
            .map(|rule| rule.category.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}
