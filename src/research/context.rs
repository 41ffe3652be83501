use std::sync::Arc;

use crate::cache::CacheManager;
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::llm::client::{CompletionService, LLMClient};
use crate::research::classifier::CategoryClassifier;
use crate::research::course_detector::CourseDetector;
use crate::research::resource_resolver::ResourceResolver;
use crate::research::synthesizer::ContentSynthesizer;

/// 一次调研所需的全部只读依赖
pub struct ResearchContext {
    /// 配置
    pub config: Config,
    /// 启动时加载的课程与资源目录
    pub catalogs: CatalogStore,
    /// 叠加了课程关键词的分类器
    pub classifier: CategoryClassifier,
    /// 调研用AI服务，未配置API KEY时为 None
    pub service: Option<Arc<dyn CompletionService>>,
    /// AI响应缓存
    pub cache: CacheManager,
}

impl ResearchContext {
    /// 加载目录并按配置创建AI客户端
    pub fn new(config: Config) -> Self {
        let catalogs = CatalogStore::load(&config.catalog);

        let service = match LLMClient::from_config(&config.research_llm) {
            Some(client) => {
                println!("🔑 API Key present: Yes ({})", client.masked_api_key());
                Some(Arc::new(client) as Arc<dyn CompletionService>)
            }
            None => {
                println!("🔑 API Key present: No");
                eprintln!(
                    "💡 设置环境变量 {} 或在配置文件中填写 research_llm.api_key 以启用AI调研",
                    config.research_llm.api_key_env
                );
                None
            }
        };

        Self::with_parts(config, catalogs, service)
    }

    /// 使用外部提供的目录与AI服务创建上下文
    pub fn with_parts(
        config: Config,
        catalogs: CatalogStore,
        service: Option<Arc<dyn CompletionService>>,
    ) -> Self {
        let classifier = CategoryClassifier::new(catalogs.courses.as_ref());
        let cache = CacheManager::new(config.cache.clone());
        Self {
            config,
            catalogs,
            classifier,
            service,
            cache,
        }
    }

    pub fn course_detector(&self) -> CourseDetector<'_> {
        CourseDetector::new(self.catalogs.courses.as_ref())
            .with_keyword_threshold(self.config.matching.course_keyword_threshold)
    }

    pub fn resource_resolver(&self) -> ResourceResolver<'_> {
        ResourceResolver::new(self.catalogs.resources.as_ref())
    }

    pub fn synthesizer(&self) -> ContentSynthesizer<'_> {
        let synthesizer = ContentSynthesizer::new(&self.config.profile, &self.config.matching)
            .with_service(self.service.as_deref())
            .verbose(self.config.verbose);
        if self.cache.is_enabled() {
            synthesizer.with_cache(&self.cache)
        } else {
            synthesizer
        }
    }
}
