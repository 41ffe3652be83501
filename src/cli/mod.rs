use crate::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 隐式加载的配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "research.toml";

/// Study Research - 面向课程学习的主题调研助手
#[derive(Parser, Debug)]
#[command(name = "study-research")]
#[command(
    about = "Topic research assistant: classifies a topic, matches it to a course, gathers curated resources and writes a structured research report."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 启用AI响应缓存（默认关闭）
    #[arg(long, global = true, conflicts_with = "no_cache")]
    pub cache: bool,

    /// 禁用AI响应缓存，覆盖配置文件中的设置
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 调研一个主题并生成报告
    Research(ResearchArgs),
    /// 将调研报告综合为可执行要点
    Synthesize(SynthesizeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ResearchArgs {
    /// 调研主题，多个单词会以空格拼接
    pub topic: Vec<String>,

    /// 报告输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 课程目录文件，优先于默认查找路径
    #[arg(long)]
    pub courses: Option<PathBuf>,

    /// 资源目录文件，优先于默认查找路径
    #[arg(long)]
    pub resources: Option<PathBuf>,

    /// 调研用AI服务的API KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// 调研用AI服务的模型
    #[arg(long)]
    pub model: Option<String>,

    /// 调研用AI服务的API基地址
    #[arg(long)]
    pub api_base_url: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SynthesizeArgs {
    /// 输入的调研报告
    #[arg(default_value = crate::synthesis::DEFAULT_INPUT)]
    pub input: PathBuf,

    /// 输出到标准输出而不是写文件
    #[arg(long)]
    pub stdout: bool,

    /// 综合报告输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 综合用AI服务的API KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// 综合用AI服务的模型
    #[arg(long)]
    pub model: Option<String>,
}

impl Args {
    /// 加载配置文件：显式指定的文件必须可读，否则尝试当前目录下的 research.toml
    pub fn load_config(&self) -> Result<Config> {
        if let Some(config_path) = &self.config {
            return Config::from_file(config_path);
        }

        let default_config_path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILE);

        if default_config_path.exists() {
            Config::from_file(&default_config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// 将CLI参数转换为配置
    pub fn to_config(&self) -> Result<Config> {
        let config = self.load_config()?;
        Ok(self.apply_overrides(config))
    }

    /// 用CLI参数覆盖配置文件中的设置
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if self.verbose {
            config.verbose = true;
        }
        if self.cache {
            config.cache.enabled = true;
        }
        if self.no_cache {
            config.cache.enabled = false;
        }

        match &self.command {
            Command::Research(args) => {
                if let Some(output_path) = &args.output_path {
                    config.output_path = output_path.clone();
                }
                if let Some(courses) = &args.courses {
                    config.catalog.course_paths.insert(0, courses.clone());
                }
                if let Some(resources) = &args.resources {
                    config.catalog.resource_paths.insert(0, resources.clone());
                }
                if let Some(api_key) = &args.api_key {
                    config.research_llm.api_key = api_key.clone();
                }
                if let Some(model) = &args.model {
                    config.research_llm.model = model.clone();
                }
                if let Some(api_base_url) = &args.api_base_url {
                    config.research_llm.api_base_url = api_base_url.clone();
                }
            }
            Command::Synthesize(args) => {
                if let Some(output_path) = &args.output_path {
                    config.synthesis_output_path = output_path.clone();
                }
                if let Some(api_key) = &args.api_key {
                    config.synthesis_llm.api_key = api_key.clone();
                }
                if let Some(model) = &args.model {
                    config.synthesis_llm.model = model.clone();
                }
            }
        }

        config
    }
}
