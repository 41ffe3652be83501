use crate::catalog::{CourseRecord, ResourceRecord};
use crate::research::profile::UserProfile;

/// 构建调研提示词：主题、用户画像、课程上下文（可选）以及前若干条参考资源
pub fn build_research_prompt(
    topic: &str,
    profile: &UserProfile,
    course: Option<&CourseRecord>,
    resources: &[ResourceRecord],
    max_resources: usize,
) -> String {
    let mut prompt = format!(
        "You are a research assistant helping a student. Please provide a comprehensive research brief on the following topic:\n\nTopic: {}\n\nStudent context:\n{}\n",
        topic,
        profile.context_string()
    );

    if let Some(course) = course {
        prompt.push_str(&course_section(course));
    }

    if !resources.is_empty() && max_resources > 0 {
        prompt.push_str("\nCurated resources already available:\n");
        for resource in resources.iter().take(max_resources) {
            prompt.push_str(&format!("- {}: {}\n", resource.title, resource.url));
        }
    }

    prompt.push_str(
        "\nPlease provide:\n\
         1. Key findings and insights (3-5 bullet points)\n\
         2. Important sources and references (3-5 reputable sources)\n\
         3. Research gaps and opportunities\n\
         4. Practical applications or implications\n\
         5. Next steps for further research\n\n\
         Format your response as a structured research brief with clear sections.",
    );

    prompt
}

fn course_section(course: &CourseRecord) -> String {
    let mut section = format!(
        "\nCourse context: {} - {} ({}, {} credits, {} {})\n",
        course.code, course.name, course.subject, course.credits, course.status, course.term
    );
    let lists = [
        ("Common topics", &course.common_topics),
        ("Textbooks", &course.textbooks),
        ("Tools", &course.tools),
        ("Typical assignments", &course.typical_assignments),
    ];
    for (label, items) in lists {
        if !items.is_empty() {
            section.push_str(&format!("{}: {}\n", label, items.join("; ")));
        }
    }
    section
}
