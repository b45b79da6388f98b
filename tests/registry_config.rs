//! Registry and configuration contract tests

use rstest::rstest;
use textree::textree::{ConfigError, LevelRegistry, ParserConfig, RegistryError};

#[rstest]
#[case("chapter", 0)]
#[case("adi_2", 7)]
#[case("level_1", 42)]
fn re_registering_the_same_priority_is_a_no_op(#[case] kind: &str, #[case] priority: u32) {
    let mut registry = LevelRegistry::new();
    registry.register_priority(kind, priority).unwrap();
    registry.register_priority(kind, priority).unwrap();
    assert_eq!(registry.priority_of(kind), Some(priority));
}

#[test]
fn re_registering_a_different_priority_is_rejected() {
    let mut registry = LevelRegistry::new();
    registry.register_priority("chapter", 0).unwrap();
    assert_eq!(
        registry.register_priority("chapter", 1).unwrap_err(),
        RegistryError::ConflictingPriority {
            level_kind: "chapter".to_string(),
            existing: 0,
            requested: 1,
        }
    );
}

#[rstest]
#[case("Chapter")]
#[case("Leaf")]
fn tags_resolve_back_to_their_owner(#[case] tag: &str) {
    let mut registry = LevelRegistry::new();
    registry.register_priority("chapter", 0).unwrap();
    registry.register_priority("leaf", 1).unwrap();
    registry.register_level_tag("chapter", "Chapter").unwrap();
    registry.register_content_tag("leaf", "Leaf").unwrap();

    let owner = registry.level_kind_of_tag(tag).unwrap();
    assert_eq!(registry.tag_for(owner), Some(tag));
}

#[test]
fn unknown_tags_fail_both_reverse_lookups() {
    let registry = LevelRegistry::new();
    assert!(matches!(
        registry.level_kind_of_tag("Ghost"),
        Err(RegistryError::UnknownTag(_))
    ));
    assert!(matches!(
        registry.priority_of_tag("Ghost"),
        Err(RegistryError::UnknownTag(_))
    ));
}

const BOOK_YAML: &str = r#"
levels:
  - kind: chapter
    tag: Chapter
    priority: 0
  - kind: section
    tag: Section
    priority: 1
content:
  - class: leaf
    tag: Leaf
    priority: 2
attributes:
  Chapter: [title, number]
  Section: [title]
"#;

const BOOK_JSON: &str = r#"{
  "levels": [
    {"kind": "chapter", "tag": "Chapter", "priority": 0},
    {"kind": "section", "tag": "Section", "priority": 1}
  ],
  "content": [
    {"class": "leaf", "tag": "Leaf", "priority": 2}
  ],
  "attributes": {
    "Chapter": ["title", "number"],
    "Section": ["title"]
  }
}"#;

#[rstest]
#[case::yaml(BOOK_YAML, true)]
#[case::json(BOOK_JSON, false)]
fn configs_build_equivalent_registries(#[case] source: &str, #[case] is_yaml: bool) {
    let config = if is_yaml {
        ParserConfig::from_yaml(source).unwrap()
    } else {
        ParserConfig::from_json(source).unwrap()
    };
    let registry = config.registry().unwrap();
    assert_eq!(registry.priority_of_tag("Chapter").unwrap(), 0);
    assert_eq!(registry.priority_of_tag("Section").unwrap(), 1);
    assert_eq!(registry.priority_of_tag("Leaf").unwrap(), 2);
    assert!(registry.is_terminal_tag("Leaf"));
    assert!(!registry.is_terminal_tag("Section"));

    let schema = config.schema();
    assert_eq!(
        schema.expected_for("Chapter"),
        Some(&["title".to_string(), "number".to_string()][..])
    );
}

#[test]
fn inconsistent_config_fails_before_parsing() {
    let config = ParserConfig::from_yaml(
        r#"
levels:
  - kind: chapter
    tag: Shared
    priority: 0
content:
  - class: leaf
    tag: Shared
    priority: 1
"#,
    )
    .unwrap();
    assert!(matches!(
        config.registry(),
        Err(ConfigError::Registry(RegistryError::DuplicateTag { .. }))
    ));
}
