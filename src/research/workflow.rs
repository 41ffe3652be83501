use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::research::context::ResearchContext;

/// 主题参数为空时使用的默认主题
///
/// 课程代码去掉数字后按子串匹配，默认目录下 "roadmap" 中的 "map" 会命中 MAP2302
pub const DEFAULT_TOPIC: &str = "repo roadmap";

/// 把命令行中的主题单词拼成一个主题
pub fn topic_from_words(words: &[String]) -> String {
    let topic = words.join(" ");
    if topic.trim().is_empty() {
        DEFAULT_TOPIC.to_string()
    } else {
        topic
    }
}

/// 启动调研工作流，只有报告写入失败会返回错误
pub async fn launch(config: &Config, topic: &str) -> Result<PathBuf> {
    let context = ResearchContext::new(config.clone());
    run(&context, topic).await
}

/// 在已构建的上下文上执行调研并保存报告
pub async fn run(context: &ResearchContext, topic: &str) -> Result<PathBuf> {
    let started = Instant::now();
    println!("🚀 开始调研主题: \"{}\"", topic);

    let outcome = crate::research::execute(context, topic).await;
    let saved = crate::research::outlet::save(&outcome, &context.config.output_path).await?;

    if context.config.verbose {
        if context.cache.is_enabled() {
            let stats = context.cache.stats();
            println!(
                "   💾 缓存统计: 命中 {} 次, 未命中 {} 次",
                stats.hits, stats.misses
            );
        }
        println!("   ⏱️ 总耗时: {:.2}秒", started.elapsed().as_secs_f64());
    }
    println!("🎉 调研流程完成!");

    Ok(saved)
}
