//! 离线模拟调研
//!
//! 选择顺序：识别到课程时按课程学科生成；否则按关键词分组表取第一个命中的模板；
//! 都未命中时使用只依赖主题文本的通用模板。每个模板的第一个研究主题都以原始主题命名。

use crate::catalog::{CourseRecord, EnrollmentStatus};
use crate::config::MatchingConfig;
use crate::research::types::{Findings, Priority, ResearchTopic, TopicStatus};

/// 模板产出的三类内容
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub topics: Vec<ResearchTopic>,
    pub insights: Vec<String>,
    pub next_steps: Vec<String>,
}

impl Template {
    /// 写入调研结果，洞察与后续步骤按配置截断
    pub fn apply(self, findings: &mut Findings, matching: &MatchingConfig) {
        findings.topics = self.topics;
        findings.insights = self.insights;
        findings.insights.truncate(matching.max_insights);
        findings.next_steps = self.next_steps;
        findings.next_steps.truncate(matching.max_next_steps);
    }
}

/// 关键词分组：任一关键词命中即使用该模板
pub struct TemplateRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    build: fn(&str) -> Template,
}

pub const TEMPLATE_RULES: &[TemplateRule] = &[
    TemplateRule {
        name: "materials",
        keywords: &["biomaterial", "material", "tissue", "scaffold"],
        build: materials_template,
    },
    TemplateRule {
        name: "mathematics",
        keywords: &["laplace", "math", "equation", "transform", "differential"],
        build: mathematics_template,
    },
    TemplateRule {
        name: "circuits",
        keywords: &["circuit", "rms", "voltage", "current", "signal", "average value"],
        build: circuits_template,
    },
    TemplateRule {
        name: "project",
        keywords: &["project", "build", "develop", "plan"],
        build: project_template,
    },
    TemplateRule {
        name: "creative",
        keywords: &["idea", "creative", "brainstorm", "explore", "design", "open-ended"],
        build: creative_template,
    },
];

/// 课程学科类型，决定课程模板的侧重点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Engineering,
    Quantitative,
    Science,
}

impl SubjectKind {
    pub fn of(subject: &str) -> Self {
        let subject = subject.to_lowercase();
        if subject.contains("engineering") {
            SubjectKind::Engineering
        } else if ["math", "statistic", "computer", "computing"]
            .iter()
            .any(|cue| subject.contains(cue))
        {
            SubjectKind::Quantitative
        } else {
            SubjectKind::Science
        }
    }
}

/// 选择并填充模拟内容
pub fn populate(
    findings: &mut Findings,
    topic: &str,
    course: Option<&CourseRecord>,
    matching: &MatchingConfig,
) {
    select_template(topic, course).apply(findings, matching);
}

pub fn select_template(topic: &str, course: Option<&CourseRecord>) -> Template {
    if let Some(course) = course {
        return course_template(topic, course);
    }

    match matching_rule(topic) {
        Some(rule) => (rule.build)(topic),
        None => default_template(topic),
    }
}

/// 第一个命中的关键词分组
pub fn matching_rule(topic: &str) -> Option<&'static TemplateRule> {
    let lower_topic = topic.to_lowercase();
    TEMPLATE_RULES.iter().find(|rule| {
        rule.keywords
            .iter()
            .any(|keyword| lower_topic.contains(keyword))
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn listed(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn first_or<'a>(items: &'a [String], fallback: &'a str) -> &'a str {
    items.first().map(String::as_str).unwrap_or(fallback)
}

fn course_template(topic: &str, course: &CourseRecord) -> Template {
    let kind = SubjectKind::of(&course.subject);
    let textbook = first_or(&course.textbooks, "the course textbook");
    let tools = listed(&course.tools, "standard course software");
    let common_topics = listed(&course.common_topics, "the core syllabus topics");
    let assignments = listed(&course.typical_assignments, "problem sets and exams");

    let mut topics = vec![
        ResearchTopic::new(
            topic,
            &format!("Course-focused research for {} {}", course.code, course.name),
            Priority::High,
            TopicStatus::InProgress,
        ),
        ResearchTopic::new(
            &format!("{} Core Concepts", course.code),
            &format!("Review of {}", common_topics),
            Priority::High,
            TopicStatus::Pending,
        ),
    ];
    if !course.typical_assignments.is_empty() {
        topics.push(ResearchTopic::new(
            &format!("{} Assignment Preparation", course.code),
            &format!("Preparing for {}", assignments),
            Priority::Medium,
            TopicStatus::Pending,
        ));
    }

    let (insights, mut next_steps) = match kind {
        SubjectKind::Engineering => (
            vec![
                format!("{} ({}) treats this topic as an applied engineering problem", course.name, course.code),
                format!("Verify hand calculations with {} before trusting a design", tools),
                format!("{} has worked examples that match the course notation", textbook),
                "Engineering answers should state assumptions and units explicitly".to_string(),
                format!("Typical assessments: {}", assignments),
            ],
            vec![
                format!("Read the relevant chapter of {}", textbook),
                "Write down the governing equations and every modeling assumption".to_string(),
                format!("Build a quick verification model in {}", first_or(&course.tools, "simulation software")),
                "Compare simulated results against the hand calculation".to_string(),
                "Summarize the design trade-offs in your notes".to_string(),
            ],
        ),
        SubjectKind::Quantitative => (
            vec![
                format!("{} ({}) rewards step-by-step derivations over memorized results", course.name, course.code),
                "Check boundary and initial conditions before simplifying an expression".to_string(),
                format!("{} covers the standard solution methods for this topic", textbook),
                format!("Use {} to confirm algebra and plot solutions", tools),
                format!("Core topics to connect: {}", common_topics),
            ],
            vec![
                "Write out the derivation one step at a time".to_string(),
                "Verify the result satisfies the boundary and initial conditions".to_string(),
                format!("Work the matching exercises in {}", textbook),
                format!("Confirm the answer numerically with {}", first_or(&course.tools, "a computer algebra system")),
                "Collect common mistakes into a review sheet".to_string(),
            ],
        ),
        SubjectKind::Science => (
            vec![
                format!("{} ({}) builds this topic on a few core physical principles", course.name, course.code),
                "Start from the governing law before plugging in numbers".to_string(),
                format!("{} explains the concepts with worked problems", textbook),
                "Sketch the system and label every quantity before solving".to_string(),
                format!("Interactive tools such as {} help build intuition", tools),
            ],
            vec![
                format!("Review the concept summary in {}", textbook),
                "Identify which principle governs the problem".to_string(),
                "Solve two practice problems without notes".to_string(),
                "Check units and orders of magnitude on every answer".to_string(),
            ],
        ),
    };

    if course.status == EnrollmentStatus::Upcoming && !course.term.is_empty() {
        next_steps.push(format!("Preview the material before {} starts", course.term));
    }

    Template {
        topics,
        insights,
        next_steps,
    }
}

fn materials_template(topic: &str) -> Template {
    Template {
        topics: vec![
            ResearchTopic::new(
                topic,
                "Research into biocompatible materials for implants and medical devices",
                Priority::High,
                TopicStatus::InProgress,
            ),
            ResearchTopic::new(
                "Tissue Engineering Materials",
                "Advanced materials for regenerative medicine and tissue scaffolds",
                Priority::High,
                TopicStatus::Pending,
            ),
            ResearchTopic::new(
                "PRISMA Protocol Development",
                "Systematic review methodology for biomaterials research",
                Priority::Medium,
                TopicStatus::Pending,
            ),
        ],
        insights: strings(&[
            "Recent advances in biocompatible materials show promise for medical applications",
            "PRISMA guidelines provide systematic framework for evidence synthesis",
            "Tissue engineering requires careful material selection and biocompatibility testing",
            "Systematic reviews help identify gaps in current research",
            "Material properties must balance mechanical strength with biological compatibility",
        ]),
        next_steps: strings(&[
            "Conduct systematic literature review using PRISMA guidelines",
            "Identify key material properties and biocompatibility requirements",
            "Analyze current research gaps and opportunities",
            "Develop research protocol and methodology",
            "Plan experimental validation approaches",
        ]),
    }
}

fn mathematics_template(topic: &str) -> Template {
    Template {
        topics: vec![
            ResearchTopic::new(
                topic,
                "Advanced methods for solving differential equations and transforms",
                Priority::High,
                TopicStatus::InProgress,
            ),
            ResearchTopic::new(
                "Numerical Methods",
                "Computational approaches for mathematical problem solving",
                Priority::High,
                TopicStatus::Pending,
            ),
        ],
        insights: strings(&[
            "Laplace transforms provide powerful tools for solving differential equations",
            "Numerical methods offer computational alternatives to analytical solutions",
            "MATLAB and Python provide robust platforms for mathematical computation",
            "Understanding mathematical foundations is crucial for engineering applications",
            "Systematic approaches help organize complex mathematical problems",
        ]),
        next_steps: strings(&[
            "Review mathematical foundations and theory",
            "Implement computational solutions using appropriate software",
            "Validate results through analytical and numerical methods",
            "Document solution methodology and assumptions",
            "Prepare comprehensive analysis and conclusions",
        ]),
    }
}

fn circuits_template(topic: &str) -> Template {
    Template {
        topics: vec![
            ResearchTopic::new(
                topic,
                "RMS and average value analysis of periodic signals",
                Priority::High,
                TopicStatus::InProgress,
            ),
            ResearchTopic::new(
                "Periodic Waveform Integration",
                "Piecewise integration of common waveforms over one period",
                Priority::High,
                TopicStatus::Pending,
            ),
            ResearchTopic::new(
                "Simulation Cross-Check",
                "Confirming hand-computed values with a circuit simulator",
                Priority::Medium,
                TopicStatus::Pending,
            ),
        ],
        insights: strings(&[
            "For a periodic current, i_rms = sqrt((1/T) * integral of i(t)^2 dt) over one full period",
            "The average value i_avg = (1/T) * integral of i(t) dt is zero for any symmetric AC waveform",
            "A sinusoid with peak I_m has i_rms = I_m/sqrt(2), while its half-wave rectified i_avg = I_m/pi",
            "Average power in a resistor is P = i_rms^2 * R, so meters report i_rms rather than the peak",
            "Piecewise waveforms need the i_rms and i_avg integrals split at every breakpoint",
        ]),
        next_steps: strings(&[
            "Sketch one full period of the waveform and mark its breakpoints",
            "Write i(t) piecewise for each interval",
            "Compute i_avg by integrating i(t) over the period and dividing by T",
            "Compute i_rms by integrating i(t)^2, dividing by T, then taking the square root",
            "Check the sinusoidal special case against I_m/sqrt(2)",
            "Confirm both values with a transient simulation",
        ]),
    }
}

fn project_template(topic: &str) -> Template {
    Template {
        topics: vec![
            ResearchTopic::new(
                topic,
                "Best practices for project development and execution",
                Priority::High,
                TopicStatus::InProgress,
            ),
            ResearchTopic::new(
                "Technology Stack Selection",
                "Choosing appropriate tools and frameworks for development",
                Priority::Medium,
                TopicStatus::Pending,
            ),
        ],
        insights: strings(&[
            "Clear scope definition prevents most project overruns",
            "Small milestones make progress visible and keep motivation high",
            "Choosing familiar tools first reduces early friction",
            "Regular reviews catch design problems before they become expensive",
            "Written decisions make it easier to resume a paused project",
        ]),
        next_steps: strings(&[
            "Define the project goal and success criteria",
            "Break the work into milestones of one or two weeks",
            "Select the tools and frameworks for the first milestone",
            "Set up a repository with a short README",
            "Schedule a weekly progress review",
        ]),
    }
}

fn creative_template(topic: &str) -> Template {
    Template {
        topics: vec![
            ResearchTopic::new(
                topic,
                "Open-ended exploration of ideas and directions",
                Priority::High,
                TopicStatus::InProgress,
            ),
            ResearchTopic::new(
                "Idea Evaluation",
                "Comparing candidate directions by effort and interest",
                Priority::Medium,
                TopicStatus::Pending,
            ),
        ],
        insights: strings(&[
            "Generating many ideas before judging them leads to better options",
            "Constraints often make creative work easier to start",
            "Looking at adjacent fields is a reliable source of new angles",
            "Quick prototypes reveal problems that discussion misses",
            "Keeping an idea journal preserves thoughts that seem minor today",
        ]),
        next_steps: strings(&[
            "Brainstorm at least ten directions without filtering",
            "Pick the three most promising ideas",
            "Sketch a one-page outline for each",
            "Build a small prototype of the favorite",
            "Reflect on what the prototype taught you",
        ]),
    }
}

fn default_template(topic: &str) -> Template {
    Template {
        topics: vec![
            ResearchTopic::new(
                topic,
                &format!("Research analysis for: {}", topic),
                Priority::High,
                TopicStatus::InProgress,
            ),
            ResearchTopic::new(
                "Related Research Areas",
                "Exploring connected topics and methodologies",
                Priority::Medium,
                TopicStatus::Pending,
            ),
        ],
        insights: vec![
            format!("Key research focus: {}", topic),
            "Systematic approaches improve research quality and reproducibility".to_string(),
            "Evidence-based methods provide reliable foundations for decision making".to_string(),
            "Documentation and methodology are crucial for research success".to_string(),
            "Collaborative approaches enhance research outcomes".to_string(),
        ],
        next_steps: vec![
            format!("Develop comprehensive research plan for {}", topic),
            "Identify key resources and methodologies".to_string(),
            "Create systematic approach to information gathering".to_string(),
            "Plan implementation and validation steps".to_string(),
            "Document findings and recommendations".to_string(),
        ],
    }
}
