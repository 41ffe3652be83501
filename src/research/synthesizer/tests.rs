#[cfg(test)]
mod tests {
    use crate::cache::CacheManager;
    use crate::catalog::{CourseRecord, EnrollmentStatus, ResourceRecord};
    use crate::config::{CacheConfig, MAX_NEXT_STEPS, MatchingConfig};
    use crate::llm::client::{Completion, CompletionService, LLMError};
    use crate::research::profile::UserProfile;
    use crate::research::synthesizer::simulated::{self, SubjectKind};
    use crate::research::synthesizer::{
        AiOutcome, ContentSynthesizer, NO_RESULT, check_response, prompt,
    };
    use crate::research::types::{Findings, Priority, TopicStatus};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const AI_REPLY: &str = "# Research Brief\n\
        ## Key Findings\n\
        - Laplace transforms convert linear ODEs into algebraic equations\n\
        - The s-domain makes initial conditions explicit\n\
        - Partial fraction expansion handles most inverse transforms\n\
        ## Sources\n\
        - Boyce & DiPrima\n";

    enum Reply {
        Text(&'static str),
        MissingContent,
        Status(u16),
    }

    struct MockService {
        reply: Reply,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockService {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionService for MockService {
        async fn complete(&self, prompt: &str) -> Result<Completion, LLMError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Reply::Text(text) => Ok(Completion::from_text(text)),
                Reply::MissingContent => Ok(Completion::from_body(serde_json::json!({}))),
                Reply::Status(status) => Err(LLMError::Status {
                    status,
                    body: "service unavailable".to_string(),
                }),
            }
        }
    }

    fn map2302() -> CourseRecord {
        CourseRecord {
            code: "MAP2302".to_string(),
            name: "Differential Equations".to_string(),
            subject: "Mathematics".to_string(),
            credits: 3,
            status: EnrollmentStatus::Current,
            term: "Summer 2025".to_string(),
            category: "Math & Coding".to_string(),
            keywords: vec!["laplace".to_string()],
            common_topics: vec!["Laplace transforms".to_string()],
            textbooks: vec!["Boyce & DiPrima".to_string()],
            tools: vec!["MATLAB".to_string()],
            typical_assignments: vec!["Problem sets".to_string()],
        }
    }

    fn bme_course() -> CourseRecord {
        CourseRecord {
            code: "BME3506C".to_string(),
            name: "Circuits for Bioengineers".to_string(),
            subject: "Biomedical Engineering".to_string(),
            status: EnrollmentStatus::Upcoming,
            term: "Fall 2025".to_string(),
            category: "Sciences".to_string(),
            tools: vec!["LTspice".to_string()],
            ..Default::default()
        }
    }

    fn resources(count: usize) -> Vec<ResourceRecord> {
        (0..count)
            .map(|i| {
                ResourceRecord::new(
                    &format!("Resource {}", i),
                    &format!("https://example.org/{}", i),
                    "",
                )
            })
            .collect()
    }

    #[test]
    fn test_check_response() {
        assert!(check_response("ok").is_err());
        assert!(check_response(NO_RESULT).is_err());
        assert!(check_response(&format!("   {}   ", "x".repeat(49))).is_err());
        assert!(check_response(&"x".repeat(50)).is_ok());

        match check_response("ok") {
            Err(LLMError::Insufficient { length }) => assert_eq!(length, 2),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_ai_branch_success() {
        let profile = UserProfile::default();
        let matching = MatchingConfig::default();
        let service = MockService::new(Reply::Text(AI_REPLY));
        let synthesizer =
            ContentSynthesizer::new(&profile, &matching).with_service(Some(&service));

        let findings = synthesizer
            .synthesize("Laplace transform help", "Math & Coding", None, &[])
            .await;

        assert_eq!(service.calls(), 1);
        assert!(findings.is_ai_backed());
        assert_eq!(findings.ai_results, AI_REPLY);
        assert_eq!(findings.category, "Math & Coding");
        assert_eq!(findings.topics.len(), 1);
        assert_eq!(findings.topics[0].title, "Laplace transform help");
        assert_eq!(findings.topics[0].priority, Priority::High);
        assert_eq!(findings.topics[0].status, TopicStatus::Completed);
        assert_eq!(
            findings.insights,
            vec![
                "Laplace transforms convert linear ODEs into algebraic equations",
                "The s-domain makes initial conditions explicit",
                "Partial fraction expansion handles most inverse transforms",
            ]
        );
        assert_eq!(findings.next_steps.len(), 4);
    }

    #[tokio::test]
    async fn test_ai_branch_with_course_context() {
        let profile = UserProfile::default();
        let matching = MatchingConfig::default();
        let service = MockService::new(Reply::Text(AI_REPLY));
        let synthesizer =
            ContentSynthesizer::new(&profile, &matching).with_service(Some(&service));
        let course = map2302();

        let findings = synthesizer
            .synthesize("MAP2302 Laplace transform help", "Math & Coding", Some(&course), &resources(12))
            .await;

        assert_eq!(findings.topics.len(), 2);
        assert_eq!(findings.topics[1].title, "MAP2302 - Differential Equations");
        assert_eq!(findings.next_steps.len(), 5);
        assert!(findings.next_steps[4].contains("MAP2302"));

        let prompts = service.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("Topic: MAP2302 Laplace transform help"));
        assert!(prompt.contains("Course context: MAP2302 - Differential Equations"));
        assert!(prompt.contains("https://example.org/9"));
        assert!(!prompt.contains("https://example.org/10"));
    }

    #[tokio::test]
    async fn test_insufficient_reply_falls_back() {
        let profile = UserProfile::default();
        let matching = MatchingConfig::default();
        let service = MockService::new(Reply::Text("ok"));
        let synthesizer =
            ContentSynthesizer::new(&profile, &matching).with_service(Some(&service));

        let findings = synthesizer
            .synthesize("circuit rms average value homework", "General Research", None, &[])
            .await;

        assert_eq!(service.calls(), 1);
        assert!(!findings.is_ai_backed());
        assert!(!findings.insights.iter().any(|i| i == "ok"));
        assert!(findings.insights.iter().all(|i| i.contains("i_rms") || i.contains("i_avg")));
    }

    #[tokio::test]
    async fn test_missing_content_falls_back() {
        let profile = UserProfile::default();
        let matching = MatchingConfig::default();
        let service = MockService::new(Reply::MissingContent);
        let synthesizer =
            ContentSynthesizer::new(&profile, &matching).with_service(Some(&service));

        let outcome = synthesizer.query(&service, "prompt").await;
        match outcome {
            AiOutcome::Fallback(reason) => assert!(reason.contains("insufficient")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_service_error_falls_back() {
        let profile = UserProfile::default();
        let matching = MatchingConfig::default();
        let service = MockService::new(Reply::Status(503));
        let synthesizer =
            ContentSynthesizer::new(&profile, &matching).with_service(Some(&service));

        let findings = synthesizer
            .synthesize("biomaterial scaffolds", "Sciences", None, &[])
            .await;

        assert!(!findings.is_ai_backed());
        assert_eq!(findings.topics[0].title, "biomaterial scaffolds");
        assert_eq!(findings.insights.len(), 5);
        assert!(findings.insights[1].contains("PRISMA"));
    }

    #[tokio::test]
    async fn test_without_service_uses_simulation() {
        let profile = UserProfile::default();
        let matching = MatchingConfig::default();
        let synthesizer = ContentSynthesizer::new(&profile, &matching);

        let findings = synthesizer
            .synthesize("circuit rms average value homework", "General Research", None, &[])
            .await;

        assert_eq!(findings.category, "General Research");
        assert_eq!(findings.topics[0].title, "circuit rms average value homework");
        assert_eq!(findings.insights.len(), 5);
        for insight in &findings.insights {
            assert!(insight.contains("i_rms") || insight.contains("i_avg"), "{}", insight);
        }
        assert!(findings.next_steps.len() >= 5);
    }

    #[tokio::test]
    async fn test_cached_reply_skips_service() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::new(CacheConfig {
            enabled: true,
            cache_dir: temp_dir.path().to_path_buf(),
            expire_hours: 24,
        });
        let profile = UserProfile::default();
        let matching = MatchingConfig::default();
        let service = MockService::new(Reply::Text(AI_REPLY));
        let synthesizer = ContentSynthesizer::new(&profile, &matching)
            .with_service(Some(&service))
            .with_cache(&cache);

        let first = synthesizer.synthesize("laplace", "Math & Coding", None, &[]).await;
        let second = synthesizer.synthesize("laplace", "Math & Coding", None, &[]).await;

        assert_eq!(service.calls(), 1);
        assert_eq!(first.insights, second.insights);
        assert_eq!(second.ai_results, AI_REPLY);
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_fallback_reply_is_not_cached() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::new(CacheConfig {
            enabled: true,
            cache_dir: temp_dir.path().to_path_buf(),
            expire_hours: 24,
        });
        let profile = UserProfile::default();
        let matching = MatchingConfig::default();
        let service = MockService::new(Reply::Text("ok"));
        let synthesizer = ContentSynthesizer::new(&profile, &matching)
            .with_service(Some(&service))
            .with_cache(&cache);

        synthesizer.synthesize("laplace", "Math & Coding", None, &[]).await;
        synthesizer.synthesize("laplace", "Math & Coding", None, &[]).await;

        assert_eq!(service.calls(), 2);
        assert_eq!(cache.stats().hits, 0);
    }

    #[tokio::test]
    async fn test_ai_next_steps_are_capped() {
        let profile = UserProfile::default();
        let matching = MatchingConfig {
            max_next_steps: 2,
            ..MatchingConfig::default()
        };
        let service = MockService::new(Reply::Text(AI_REPLY));
        let synthesizer =
            ContentSynthesizer::new(&profile, &matching).with_service(Some(&service));
        let course = map2302();

        let findings = synthesizer
            .synthesize("MAP2302 Laplace transform help", "Math & Coding", Some(&course), &[])
            .await;

        assert!(findings.is_ai_backed());
        assert_eq!(
            findings.next_steps,
            vec![
                "Review and validate research findings",
                "Implement recommendations from the research",
            ]
        );
    }

    #[test]
    fn test_template_apply_truncates() {
        let matching = MatchingConfig {
            max_insights: 2,
            max_next_steps: 3,
            ..MatchingConfig::default()
        };
        let mut findings = Findings::new("General Research");

        simulated::populate(&mut findings, "circuit rms", None, &matching);

        assert_eq!(findings.insights.len(), 2);
        assert_eq!(findings.next_steps.len(), 3);
        assert_eq!(
            findings.next_steps[0],
            "Sketch one full period of the waveform and mark its breakpoints"
        );
    }

    #[test]
    fn test_default_cap_keeps_every_template_step() {
        let matching = MatchingConfig::default();
        let upcoming = bme_course();
        let mut findings = Findings::new("Sciences");

        simulated::populate(&mut findings, "op amp gain", Some(&upcoming), &matching);

        assert_eq!(findings.next_steps.len(), MAX_NEXT_STEPS);
        assert!(findings.next_steps.last().unwrap().starts_with("Preview the material"));
    }

    #[test]
    fn test_template_rule_order() {
        // 材料分组排在数学之前
        assert_eq!(simulated::matching_rule("material equation").unwrap().name, "materials");
        assert_eq!(simulated::matching_rule("Laplace").unwrap().name, "mathematics");
        assert_eq!(simulated::matching_rule("RMS of a signal").unwrap().name, "circuits");
        assert_eq!(simulated::matching_rule("build a planner").unwrap().name, "project");
        assert_eq!(simulated::matching_rule("brainstorm session").unwrap().name, "creative");
        assert!(simulated::matching_rule("ancient history").is_none());
    }

    #[test]
    fn test_every_branch_is_complete() {
        let topics = [
            "biomaterial scaffolds",
            "laplace transform",
            "circuit rms",
            "build an app",
            "creative ideas",
            "ancient history",
            "",
        ];
        for topic in topics {
            let template = simulated::select_template(topic, None);
            assert_eq!(template.topics[0].title, topic);
            assert_eq!(template.insights.len(), 5, "{}", topic);
            assert!((4..=MAX_NEXT_STEPS).contains(&template.next_steps.len()), "{}", topic);
        }

        for course in [map2302(), bme_course()] {
            let template = simulated::select_template("anything", Some(&course));
            assert_eq!(template.topics[0].title, "anything");
            assert_eq!(template.insights.len(), 5);
            assert!((4..=MAX_NEXT_STEPS).contains(&template.next_steps.len()));
        }
    }

    #[test]
    fn test_course_template_takes_precedence() {
        let course = map2302();
        let template = simulated::select_template("biomaterial scaffolds", Some(&course));

        assert!(template.topics[1].title.starts_with("MAP2302"));
        assert!(template.insights.iter().any(|i| i.contains("boundary")));
        assert!(template.next_steps.iter().any(|s| s.contains("Boyce & DiPrima")));
    }

    #[test]
    fn test_engineering_course_template() {
        let course = bme_course();
        let template = simulated::select_template("op amp gain", Some(&course));

        assert!(template.insights.iter().any(|i| i.contains("LTspice")));
        assert!(template.insights.iter().any(|i| i.contains("the course textbook")));
        assert_eq!(
            template.next_steps.last().map(String::as_str),
            Some("Preview the material before Fall 2025 starts")
        );
    }

    #[test]
    fn test_subject_kind() {
        assert_eq!(SubjectKind::of("Biomedical Engineering"), SubjectKind::Engineering);
        assert_eq!(SubjectKind::of("Mathematics"), SubjectKind::Quantitative);
        assert_eq!(SubjectKind::of("Physics"), SubjectKind::Science);
        assert_eq!(SubjectKind::of(""), SubjectKind::Science);
    }

    #[test]
    fn test_prompt_includes_profile() {
        let profile = UserProfile::default();
        let text = prompt::build_research_prompt("phasors", &profile, None, &[], 10);

        assert!(text.contains("Topic: phasors"));
        assert!(text.contains(&profile.context_string()));
        assert!(!text.contains("Course context"));
        assert!(!text.contains("Curated resources"));
        assert!(text.ends_with("Format your response as a structured research brief with clear sections."));
    }
}
