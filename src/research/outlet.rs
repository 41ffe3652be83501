use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::research::types::ResearchOutcome;

/// 保存调研报告，返回写入的路径
pub async fn save(outcome: &ResearchOutcome, output_path: &Path) -> Result<PathBuf> {
    let outlet = DiskOutlet::new(output_path);
    outlet.save(outcome).await?;
    Ok(output_path.to_path_buf())
}

pub trait Outlet {
    async fn save(&self, outcome: &ResearchOutcome) -> Result<()>;
}

/// 写入单个 Markdown 文件
pub struct DiskOutlet {
    output_path: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_path: &Path) -> Self {
        Self {
            output_path: output_path.to_path_buf(),
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, outcome: &ResearchOutcome) -> Result<()> {
        println!("\n🖊️ 报告存储中...");
        let report = render_report(outcome);

        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(&self.output_path, report).await.with_context(|| {
            format!("Failed to write report to {}", self.output_path.display())
        })?;

        println!("📄 调研报告已保存: {}", self.output_path.display());
        Ok(())
    }
}

/// 渲染 Markdown 调研报告
pub fn render_report(outcome: &ResearchOutcome) -> String {
    let findings = &outcome.findings;
    let mut report = String::new();

    let _ = writeln!(report, "# AI Research Report - {}\n", findings.date);
    let _ = writeln!(report, "## Research Topic\n**{}**\n", outcome.topic);
    let _ = writeln!(report, "## Category\n**{}**\n", findings.category);

    if let Some(course) = &outcome.course {
        let _ = writeln!(report, "## Course Context");
        let _ = writeln!(report, "- **Course**: {} - {}", course.code, course.name);
        let _ = writeln!(report, "- **Subject**: {}", course.subject);
        let _ = writeln!(report, "- **Credits**: {}", course.credits);
        if course.term.is_empty() {
            let _ = writeln!(report, "- **Status**: {}", course.status);
        } else {
            let _ = writeln!(report, "- **Status**: {} ({})", course.status, course.term);
        }
        if !course.textbooks.is_empty() {
            let _ = writeln!(report, "- **Textbooks**: {}", course.textbooks.join("; "));
        }
        report.push('\n');
    }

    let _ = writeln!(report, "## Research Topics\n");
    for topic in &findings.topics {
        let _ = writeln!(report, "### {}", topic.title);
        let _ = writeln!(report, "- **Priority**: {}", topic.priority);
        let _ = writeln!(report, "- **Status**: {}", topic.status);
        let _ = writeln!(report, "- **Description**: {}\n", topic.description);
    }

    let _ = writeln!(report, "## Key Insights\n");
    for insight in &findings.insights {
        let _ = writeln!(report, "- {}", insight);
    }
    report.push('\n');

    let _ = writeln!(report, "## Next Steps\n");
    for step in &findings.next_steps {
        let _ = writeln!(report, "- {}", step);
    }
    report.push('\n');

    if !outcome.resources.is_empty() {
        let _ = writeln!(report, "## Resources\n");
        for resource in &outcome.resources {
            if resource.description.is_empty() {
                let _ = writeln!(report, "- [{}]({})", resource.title, resource.url);
            } else {
                let _ = writeln!(
                    report,
                    "- [{}]({}) - {}",
                    resource.title, resource.url, resource.description
                );
            }
        }
        report.push('\n');
    }

    if findings.is_ai_backed() {
        let _ = writeln!(report, "## AI Research Results\n");
        let _ = writeln!(report, "{}\n", findings.ai_results.trim_end());
    }

    let _ = writeln!(report, "---");
    let _ = writeln!(
        report,
        "*Generated by AI Research System on {}*",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    );

    report
}
