//! 用户画像 - 注入到提示词中，帮助AI给出贴合学生背景的回答

use serde::{Deserialize, Serialize};

/// 学生画像
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    pub major: String,
    pub minors: Vec<String>,
    pub focus: Vec<String>,
    pub learning_style: String,
    pub current_term: String,
    pub current_courses: Vec<String>,
    pub upcoming_courses: Vec<String>,
    pub activities: Vec<String>,
    pub preferences: ProfilePreferences,
}

/// 回答偏好
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProfilePreferences {
    pub communication: String,
    pub detail: String,
    pub examples: String,
    pub format: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            major: "Bioengineering".to_string(),
            minors: vec!["Chemistry".to_string(), "Computer Science".to_string()],
            focus: vec![
                "Medical devices".to_string(),
                "Biomaterials".to_string(),
                "Tissue engineering".to_string(),
            ],
            learning_style: "Self-directed, project-oriented, active self-study".to_string(),
            current_term: "Summer 2025".to_string(),
            current_courses: vec![
                "MAP2302 (Differential Equations)".to_string(),
                "PHY2049 (Physics II)".to_string(),
            ],
            upcoming_courses: vec![
                "BME3100C (Introduction to Biomaterials)".to_string(),
                "BME3404C (Human Physiology for Engineers II)".to_string(),
                "BME3506C (Circuits for Bioengineers)".to_string(),
                "BME4722 (Health Care Engineering)".to_string(),
            ],
            activities: vec![
                "Multiple personal programming projects".to_string(),
                "Religious self-study".to_string(),
                "Active GitHub contributor".to_string(),
                "Project-based learning approach".to_string(),
            ],
            preferences: ProfilePreferences::default(),
        }
    }
}

impl Default for ProfilePreferences {
    fn default() -> Self {
        Self {
            communication: "Clear, actionable, step-by-step".to_string(),
            detail: "Practical over theoretical".to_string(),
            examples: "Real-world applications preferred".to_string(),
            format: "Structured, scannable markdown".to_string(),
        }
    }
}

impl UserProfile {
    /// 生成提示词中使用的画像描述，即将开始的课程只列出前两门
    pub fn context_string(&self) -> String {
        let minors = if self.minors.is_empty() {
            String::new()
        } else {
            format!(" ({} minor)", self.minors.join(" & "))
        };

        let upcoming = self
            .upcoming_courses
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let upcoming_suffix = if self.upcoming_courses.len() > 2 {
            "..."
        } else {
            ""
        };

        format!(
            "{} student{}:\n- Active self-learner with multiple projects\n- Currently: {}\n- Upcoming: {}{}\n- Prefers: {}, {}",
            self.major,
            minors,
            self.current_courses.join(", "),
            upcoming,
            upcoming_suffix,
            self.preferences.communication,
            self.preferences.detail
        )
    }
}
