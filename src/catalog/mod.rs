//! 课程目录与资源目录的加载
//!
//! 两个目录都是可选的：按查找列表取第一个存在的文件，缺失或解析失败只打印警告，
//! 之后按"没有数据"处理。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::CatalogConfig;

pub mod course;
pub mod resource;

pub use course::{CourseCatalog, CourseRecord, EnrollmentStatus, SelfStudy};
pub use resource::{ResourceCatalog, ResourceRecord};

/// 启动时加载一次的只读目录集合
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    pub courses: Option<CourseCatalog>,
    pub resources: Option<ResourceCatalog>,
}

impl CatalogStore {
    /// 按配置的查找路径加载两个目录
    pub fn load(config: &CatalogConfig) -> Self {
        let courses = load_optional(&config.course_paths, "课程目录", |content| {
            CourseCatalog::from_json_str(content)
        });
        if let Some(catalog) = &courses {
            println!("📚 已加载课程目录: {} 门课程", catalog.len());
        }

        let resources = load_optional(&config.resource_paths, "资源目录", |content| {
            ResourceCatalog::from_json_str(content)
        });
        if let Some(catalog) = &resources {
            println!("🔗 已加载资源目录: {} 个分类", catalog.category_count());
        }

        Self { courses, resources }
    }

    pub fn new(courses: Option<CourseCatalog>, resources: Option<ResourceCatalog>) -> Self {
        Self { courses, resources }
    }
}

/// 查找列表中第一个存在的文件
pub fn first_existing(paths: &[PathBuf]) -> Option<&PathBuf> {
    paths.iter().find(|path| path.is_file())
}

fn load_optional<T, F>(paths: &[PathBuf], label: &str, parse: F) -> Option<T>
where
    F: Fn(&str) -> Result<T>,
{
    let Some(path) = first_existing(paths) else {
        eprintln!("⚠️ 未找到{}，已跳过 (查找路径: {:?})", label, paths);
        return None;
    };

    match read_and_parse(path, &parse) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            eprintln!("⚠️ 无法加载{} {}: {:#}", label, path.display(), e);
            None
        }
    }
}

fn read_and_parse<T, F>(path: &Path, parse: &F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read catalog file: {:?}", path))?;
    parse(&content)
}

// Include tests
#[cfg(test)]
mod tests;
