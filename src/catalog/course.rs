use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 选课状态
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// 本学期在修
    Current,
    /// 即将开始
    Upcoming,
    #[default]
    None,
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Current => write!(f, "current"),
            EnrollmentStatus::Upcoming => write!(f, "upcoming"),
            EnrollmentStatus::None => write!(f, "none"),
        }
    }
}

/// 课程记录，加载后只读
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRecord {
    /// 课程代码，取自目录中的键
    #[serde(skip)]
    pub code: String,
    pub name: String,
    pub subject: String,
    pub credits: u32,
    pub status: EnrollmentStatus,
    pub term: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub common_topics: Vec<String>,
    pub textbooks: Vec<String>,
    pub tools: Vec<String>,
    pub typical_assignments: Vec<String>,
}

/// 自学主题附表，只做加载，不参与匹配
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SelfStudy {
    pub topics: Vec<String>,
    pub category: String,
}

/// 课程目录，保持文件中的插入顺序
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<CourseRecord>,
    self_study: Option<SelfStudy>,
}

#[derive(Deserialize)]
struct RawCourseCatalog {
    #[serde(default)]
    courses: Map<String, Value>,
    #[serde(rename = "selfStudy", default)]
    self_study: Option<SelfStudy>,
}

impl CourseCatalog {
    /// 从JSON文本解析课程目录
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawCourseCatalog =
            serde_json::from_str(content).context("Failed to parse course catalog")?;

        let mut courses = Vec::with_capacity(raw.courses.len());
        for (code, value) in raw.courses {
            let mut record: CourseRecord = serde_json::from_value(value)
                .context(format!("Invalid course record: {}", code))?;
            record.code = code;
            courses.push(record);
        }

        Ok(Self {
            courses,
            self_study: raw.self_study,
        })
    }

    pub fn from_records(courses: Vec<CourseRecord>) -> Self {
        Self {
            courses,
            self_study: None,
        }
    }

    /// 按插入顺序遍历课程
    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> {
        self.courses.iter()
    }

    pub fn self_study(&self) -> Option<&SelfStudy> {
        self.self_study.as_ref()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
