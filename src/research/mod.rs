use crate::research::context::ResearchContext;
use crate::research::course_detector::MatchPhase;
use crate::research::types::ResearchOutcome;

pub mod classifier;
pub mod context;
pub mod course_detector;
pub mod outlet;
pub mod profile;
pub mod resource_resolver;
pub mod response_parser;
pub mod synthesizer;
pub mod types;
pub mod workflow;

/// 执行一次调研：分类 → 课程识别 → 资源汇总 → 内容生成
///
/// 目录缺失、AI服务失败都会降级处理，因此这里不会失败。
pub async fn execute(context: &ResearchContext, topic: &str) -> ResearchOutcome {
    let verbose = context.config.verbose;
    println!("🔬 开始调研...");
    println!("📝 调研主题: {}", topic);

    let mut category = context.classifier.classify(topic);
    if verbose {
        println!("   🏷️ 关键词分类: {}", category);
    }

    let detected = context.course_detector().detect_and_apply(topic, &mut category);
    match &detected {
        Some(detected) => {
            let how = match detected.phase {
                MatchPhase::Code => "课程代码".to_string(),
                MatchPhase::Keywords(hits) => format!("{} 个关键词", hits),
            };
            println!(
                "🎓 识别到课程: {} - {} (依据: {})",
                detected.course.code, detected.course.name, how
            );
        }
        None => {
            if verbose {
                println!("   🎓 未识别到相关课程");
            }
        }
    }
    println!("📂 分类: {}", category);

    let course = detected.map(|d| d.course);
    let resources = context.resource_resolver().resolve(topic, course);
    println!("🔗 汇总参考资源 {} 条", resources.len());

    let findings = context
        .synthesizer()
        .synthesize(topic, &category, course, &resources)
        .await;

    ResearchOutcome {
        topic: topic.to_string(),
        findings,
        course: course.cloned(),
        resources,
    }
}
