#[cfg(test)]
mod tests {
    use crate::catalog::{
        CatalogStore, CourseCatalog, CourseRecord, EnrollmentStatus, ResourceCatalog,
        ResourceRecord, first_existing,
    };
    use crate::config::CatalogConfig;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const COURSES_JSON: &str = r#"{
        "courses": {
            "MAP2302": {
                "name": "Differential Equations",
                "subject": "Mathematics",
                "credits": 3,
                "status": "current",
                "term": "Summer 2025",
                "category": "Math & Coding",
                "keywords": ["differential equations", "laplace", "boundary value"],
                "commonTopics": ["Laplace transforms"],
                "textbooks": ["Boyce & DiPrima"],
                "tools": ["MATLAB"],
                "typicalAssignments": ["Problem sets"]
            },
            "BME3100C": {
                "name": "Introduction to Biomaterials",
                "subject": "Biomedical Engineering",
                "status": "upcoming",
                "category": "Sciences",
                "keywords": ["biomaterial", "implant"]
            },
            "AAA1000": {
                "name": "Sorting Check",
                "keywords": []
            }
        },
        "selfStudy": {
            "topics": ["Rust programming"],
            "category": "Reflections & Questions"
        }
    }"#;

    const RESOURCES_JSON: &str = r#"{
        "mathematics": {
            "transforms": [
                { "title": "Laplace Table", "url": "https://example.org/laplace", "description": "pairs" }
            ]
        },
        "tools": {
            "calculators": [
                { "title": "Wolfram Alpha", "url": "https://www.wolframalpha.com/" }
            ]
        },
        "courseMappings": {
            "MAP2302": ["mathematics.transforms"]
        }
    }"#;

    fn find_course<'a>(catalog: &'a CourseCatalog, code: &str) -> &'a CourseRecord {
        catalog.iter().find(|course| course.code == code).unwrap()
    }

    #[test]
    fn test_course_catalog_preserves_insertion_order() {
        let catalog = CourseCatalog::from_json_str(COURSES_JSON).unwrap();

        let codes: Vec<&str> = catalog.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["MAP2302", "BME3100C", "AAA1000"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_course_catalog_fields() {
        let catalog = CourseCatalog::from_json_str(COURSES_JSON).unwrap();

        let map = find_course(&catalog, "MAP2302");
        assert_eq!(map.name, "Differential Equations");
        assert_eq!(map.credits, 3);
        assert_eq!(map.status, EnrollmentStatus::Current);
        assert_eq!(map.category, "Math & Coding");
        assert_eq!(map.keywords.len(), 3);
        assert_eq!(map.common_topics, vec!["Laplace transforms".to_string()]);
        assert_eq!(map.typical_assignments, vec!["Problem sets".to_string()]);

        // 缺省字段使用默认值
        let sorting = find_course(&catalog, "AAA1000");
        assert_eq!(sorting.status, EnrollmentStatus::None);
        assert_eq!(sorting.credits, 0);
        assert!(sorting.textbooks.is_empty());

        let self_study = catalog.self_study().unwrap();
        assert_eq!(self_study.category, "Reflections & Questions");
    }

    #[test]
    fn test_course_catalog_invalid_record() {
        let result = CourseCatalog::from_json_str(r#"{"courses": {"X1": {"credits": "three"}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_course_catalog_empty_object() {
        let catalog = CourseCatalog::from_json_str("{}").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.self_study().is_none());
    }

    #[test]
    fn test_enrollment_status_display() {
        assert_eq!(EnrollmentStatus::Current.to_string(), "current");
        assert_eq!(EnrollmentStatus::Upcoming.to_string(), "upcoming");
        assert_eq!(EnrollmentStatus::None.to_string(), "none");
    }

    #[test]
    fn test_resource_catalog_lookup() {
        let catalog = ResourceCatalog::from_json_str(RESOURCES_JSON).unwrap();

        let transforms = catalog.lookup("mathematics.transforms");
        assert_eq!(transforms.len(), 1);
        assert_eq!(transforms[0].url, "https://example.org/laplace");

        // description 可以省略
        let calculators = catalog.lookup("tools.calculators");
        assert_eq!(calculators[0].description, "");

        assert!(catalog.lookup("mathematics.unknown").is_empty());
        assert!(catalog.lookup("unknown.transforms").is_empty());
        assert!(catalog.lookup("no-dot").is_empty());
        assert_eq!(catalog.category_count(), 2);
    }

    #[test]
    fn test_resource_catalog_skips_metadata_keys() {
        let catalog = ResourceCatalog::from_json_str(
            r#"{
                "$schema": "./resources.schema.json",
                "version": "1",
                "tags": ["stem"],
                "tools": {"calculators": [{"title": "Desmos", "url": "https://www.desmos.com/"}]}
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.category_count(), 1);
        assert_eq!(catalog.lookup("tools.calculators")[0].title, "Desmos");
    }

    #[test]
    fn test_resource_catalog_malformed_category_is_an_error() {
        let result =
            ResourceCatalog::from_json_str(r#"{"tools": {"calculators": [{"title": "no url"}]}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_resource_catalog_course_paths() {
        let catalog = ResourceCatalog::from_json_str(RESOURCES_JSON).unwrap();

        assert_eq!(
            catalog.course_paths("MAP2302"),
            &["mathematics.transforms".to_string()]
        );
        assert!(catalog.course_paths("PHY2049").is_empty());
    }

    #[test]
    fn test_resource_catalog_insert() {
        let mut catalog = ResourceCatalog::default();
        assert!(catalog.is_empty());

        catalog.insert(
            "circuits",
            "fundamentals",
            vec![ResourceRecord::new("A", "https://a.example", "first")],
        );
        catalog.insert(
            "circuits",
            "fundamentals",
            vec![ResourceRecord::new("B", "https://b.example", "second")],
        );
        catalog.map_course("BME3506C", vec!["circuits.fundamentals".to_string()]);

        assert_eq!(catalog.lookup("circuits.fundamentals").len(), 2);
        assert_eq!(catalog.course_paths("BME3506C").len(), 1);
    }

    #[test]
    fn test_first_existing() {
        let temp_dir = TempDir::new().unwrap();
        let second = temp_dir.path().join("second.json");
        fs::write(&second, "{}").unwrap();

        let paths = vec![temp_dir.path().join("missing.json"), second.clone()];
        assert_eq!(first_existing(&paths), Some(&second));

        let none: Vec<PathBuf> = vec![temp_dir.path().join("nope.json")];
        assert_eq!(first_existing(&none), None);
    }

    #[test]
    fn test_store_load_from_search_list() {
        let temp_dir = TempDir::new().unwrap();
        let courses_path = temp_dir.path().join("courses.json");
        let resources_path = temp_dir.path().join("resources.json");
        fs::write(&courses_path, COURSES_JSON).unwrap();
        fs::write(&resources_path, RESOURCES_JSON).unwrap();

        let config = CatalogConfig {
            course_paths: vec![temp_dir.path().join("missing.json"), courses_path],
            resource_paths: vec![resources_path],
        };

        let store = CatalogStore::load(&config);
        assert_eq!(store.courses.as_ref().map(|c| c.len()), Some(3));
        assert!(store.resources.is_some());
    }

    #[test]
    fn test_store_load_missing_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig {
            course_paths: vec![temp_dir.path().join("courses.json")],
            resource_paths: vec![],
        };

        let store = CatalogStore::load(&config);
        assert!(store.courses.is_none());
        assert!(store.resources.is_none());
    }

    #[test]
    fn test_store_load_unparsable_degrades_to_none() {
        let temp_dir = TempDir::new().unwrap();
        let courses_path = temp_dir.path().join("courses.json");
        let resources_path = temp_dir.path().join("resources.json");
        fs::write(&courses_path, "{ not json").unwrap();
        fs::write(&resources_path, r#"{"tools": {"calculators": "not a list"}}"#).unwrap();

        let config = CatalogConfig {
            course_paths: vec![courses_path],
            resource_paths: vec![resources_path],
        };

        let store = CatalogStore::load(&config);
        assert!(store.courses.is_none());
        assert!(store.resources.is_none());
    }

    #[test]
    fn test_bundled_catalogs_parse() {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let courses =
            fs::read_to_string(manifest_dir.join("config/courses.json")).unwrap();
        let resources =
            fs::read_to_string(manifest_dir.join("config/resources.json")).unwrap();

        let courses = CourseCatalog::from_json_str(&courses).unwrap();
        assert!(courses.iter().any(|course| course.code == "MAP2302"));
        let resources = ResourceCatalog::from_json_str(&resources).unwrap();
        assert_eq!(resources.lookup("tools.calculators").len(), 3);
    }
}
