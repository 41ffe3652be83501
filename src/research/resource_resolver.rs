//! 参考资源解析
//!
//! 资源来源按以下顺序拼接，最后按 URL 去重（保留首次出现）：
//! 1. 已识别课程在 `courseMappings` 中的资源路径
//! 2. 关键词规则表中所有命中的规则（multi-match，规则之间互不排斥）
//! 3. 通用工具：计算器与参考资料各取前两条

use std::collections::HashSet;

use crate::catalog::{CourseRecord, ResourceCatalog, ResourceRecord};

/// 每类通用工具最多附加的条目数
pub const TOOL_RESOURCES_PER_GROUP: usize = 2;

const TOOL_RESOURCE_PATHS: [&str; 2] = ["tools.calculators", "tools.references"];

/// 关键词 → 资源路径规则
pub struct ResourceRule {
    pub keywords: &'static [&'static str],
    pub paths: &'static [&'static str],
}

/// 主题关键词规则表，所有命中的规则都会贡献资源
pub const RESOURCE_RULES: &[ResourceRule] = &[
    ResourceRule {
        keywords: &["biomaterial", "material", "tissue", "implant", "scaffold"],
        paths: &["biomaterials.journals", "biomaterials.databases"],
    },
    ResourceRule {
        keywords: &["laplace", "differential", "equation", "transform", "ode"],
        paths: &[
            "mathematics.differential_equations",
            "mathematics.transforms",
        ],
    },
    ResourceRule {
        keywords: &["circuit", "rms", "voltage", "current", "signal", "impedance"],
        paths: &["circuits.fundamentals", "circuits.simulation"],
    },
    ResourceRule {
        keywords: &["physiology", "anatomy", "organ", "cardiac", "renal"],
        paths: &["physiology.references"],
    },
    ResourceRule {
        keywords: &["physics", "electric", "magnetic", "optics"],
        paths: &["physics.electromagnetism"],
    },
    ResourceRule {
        keywords: &["python", "matlab", "code", "programming"],
        paths: &["programming.python", "programming.matlab"],
    },
    ResourceRule {
        keywords: &["prisma", "systematic review", "literature", "meta-analysis"],
        paths: &["research.methodology"],
    },
];

pub struct ResourceResolver<'a> {
    catalog: Option<&'a ResourceCatalog>,
}

impl<'a> ResourceResolver<'a> {
    pub fn new(catalog: Option<&'a ResourceCatalog>) -> Self {
        Self { catalog }
    }

    /// 汇总主题相关资源，结果按 URL 去重并保持插入顺序
    pub fn resolve(&self, topic: &str, course: Option<&CourseRecord>) -> Vec<ResourceRecord> {
        let Some(catalog) = self.catalog else {
            return Vec::new();
        };

        let mut collected: Vec<&ResourceRecord> = Vec::new();

        if let Some(course) = course {
            for path in catalog.course_paths(&course.code) {
                collected.extend(catalog.lookup(path));
            }
        }

        let lower_topic = topic.to_lowercase();
        for rule in matching_rules(&lower_topic) {
            for path in rule.paths {
                collected.extend(catalog.lookup(path));
            }
        }

        for path in TOOL_RESOURCE_PATHS {
            collected.extend(catalog.lookup(path).iter().take(TOOL_RESOURCES_PER_GROUP));
        }

        dedup_by_url(collected)
    }
}

/// 命中的资源规则（保持规则表顺序）
pub fn matching_rules(lower_topic: &str) -> impl Iterator<Item = &'static ResourceRule> + '_ {
    RESOURCE_RULES.iter().filter(move |rule| {
        rule.keywords
            .iter()
            .any(|keyword| lower_topic.contains(keyword))
    })
}

fn dedup_by_url(records: Vec<&ResourceRecord>) -> Vec<ResourceRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.url.as_str()))
        .cloned()
        .collect()
}
