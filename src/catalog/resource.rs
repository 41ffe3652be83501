use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 参考资源，URL 是去重的唯一标识
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl ResourceRecord {
    pub fn new(title: &str, url: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            description: description.to_string(),
        }
    }
}

/// 资源目录：category → subcategory → 资源列表，另有课程代码到资源路径的映射
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    /// 课程代码 → "category.subcategory" 路径列表
    course_mappings: HashMap<String, Vec<String>>,
    categories: HashMap<String, HashMap<String, Vec<ResourceRecord>>>,
}

/// 文件的原始结构，`courseMappings` 以外的顶层键都是候选分类
#[derive(Deserialize)]
struct RawResourceCatalog {
    #[serde(rename = "courseMappings", default)]
    course_mappings: HashMap<String, Vec<String>>,
    #[serde(flatten)]
    entries: Map<String, Value>,
}

impl ResourceCatalog {
    /// 从JSON文本解析资源目录
    ///
    /// 值不是对象的顶层键（如 `version`、`$schema`）不是分类表，直接跳过；
    /// 分类表本身格式错误时整个文件解析失败
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawResourceCatalog =
            serde_json::from_str(content).context("Failed to parse resource catalog")?;

        let mut categories = HashMap::new();
        for (key, value) in raw.entries {
            if !value.is_object() {
                continue;
            }
            let subcategories = serde_json::from_value(value)
                .with_context(|| format!("Failed to parse resource category: {}", key))?;
            categories.insert(key, subcategories);
        }

        Ok(Self {
            course_mappings: raw.course_mappings,
            categories,
        })
    }

    /// 向目录中追加资源，主要用于构造测试数据
    pub fn insert(&mut self, category: &str, subcategory: &str, records: Vec<ResourceRecord>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .entry(subcategory.to_string())
            .or_default()
            .extend(records);
    }

    pub fn map_course(&mut self, code: &str, paths: Vec<String>) {
        self.course_mappings.insert(code.to_string(), paths);
    }

    /// 解析 "category.subcategory" 路径，不存在时返回空切片
    pub fn lookup(&self, path: &str) -> &[ResourceRecord] {
        path.split_once('.')
            .and_then(|(category, subcategory)| {
                self.categories
                    .get(category)
                    .and_then(|subcategories| subcategories.get(subcategory))
            })
            .map(|records| records.as_slice())
            .unwrap_or(&[])
    }

    /// 课程对应的资源路径
    pub fn course_paths(&self, code: &str) -> &[String] {
        self.course_mappings
            .get(code)
            .map(|paths| paths.as_slice())
            .unwrap_or(&[])
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
