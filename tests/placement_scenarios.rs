//! Placement scenarios through the public builder API
//!
//! Covers the parent-resolution behavior end to end: sibling placement after
//! deep nesting, level gaps, skip lines, and both placement policies.

use textree::textree::{
    Anomaly, BuildError, Classification, LevelRegistry, PlacementPolicy, TreeBuilder,
};

fn book_registry() -> LevelRegistry {
    let mut registry = LevelRegistry::new();
    registry.register_priority("chapter", 0).unwrap();
    registry.register_priority("section", 1).unwrap();
    registry.register_priority("leaf", 2).unwrap();
    registry.register_level_tag("chapter", "Chapter").unwrap();
    registry.register_level_tag("section", "Section").unwrap();
    registry.register_content_tag("leaf", "Leaf").unwrap();
    registry
}

#[test]
fn results_section_becomes_a_sibling_of_background() {
    let registry = book_registry();
    let mut builder = TreeBuilder::new(&registry);
    for (kind, content) in [
        ("chapter", "Intro"),
        ("section", "Background"),
        ("leaf", "first point"),
        ("leaf", "second point"),
        ("section", "Results"),
    ] {
        builder.place(Classification::line(kind, content)).unwrap();
    }
    let output = builder.finish();
    let tree = &output.tree;

    // root -> Chapter("Intro") -> [Section("Background"), Section("Results")]
    let root_children = tree.node(tree.root()).children();
    assert_eq!(root_children.len(), 1);
    let chapter = tree.node(root_children[0]);
    assert_eq!(
        (chapter.tag(), chapter.content()),
        ("Chapter", Some("Intro"))
    );

    let sections: Vec<_> = chapter
        .children()
        .iter()
        .map(|&id| (tree.node(id).tag(), tree.node(id).content().unwrap()))
        .collect();
    assert_eq!(
        sections,
        vec![("Section", "Background"), ("Section", "Results")]
    );

    // The two leaves stayed under "Background", not "Results".
    let background = tree.node(chapter.children()[0]);
    let leaves: Vec<_> = background
        .children()
        .iter()
        .map(|&id| tree.node(id).content().unwrap())
        .collect();
    assert_eq!(leaves, vec!["first point", "second point"]);
    assert!(tree.node(chapter.children()[1]).is_leaf());
}

#[test]
fn parent_priority_is_always_strictly_lower() {
    let registry = book_registry();
    let mut builder = TreeBuilder::new(&registry);
    for (kind, content) in [
        ("chapter", "One"),
        ("section", "A"),
        ("leaf", "a1"),
        ("section", "B"),
        ("chapter", "Two"),
        ("leaf", "direct leaf"),
    ] {
        builder.place(Classification::line(kind, content)).unwrap();
    }
    let tree = builder.finish().tree;

    for id in tree.ids() {
        let node = tree.node(id);
        let Some(parent_id) = node.parent() else {
            continue;
        };
        if parent_id == tree.root() {
            continue;
        }
        let parent_priority = registry.priority_of_tag(tree.node(parent_id).tag()).unwrap();
        let node_priority = registry.priority_of_tag(node.tag()).unwrap();
        assert!(
            parent_priority < node_priority,
            "parent '{}' ({parent_priority}) must outrank child '{}' ({node_priority})",
            tree.node(parent_id).tag(),
            node.tag()
        );
    }
}

#[test]
fn skipping_a_level_records_one_anomaly() {
    let mut registry = LevelRegistry::new();
    registry.register_priority("chapter", 0).unwrap();
    registry.register_priority("leaf", 2).unwrap();
    registry.register_level_tag("chapter", "Chapter").unwrap();
    registry.register_content_tag("leaf", "Leaf").unwrap();

    let mut builder = TreeBuilder::new(&registry);
    builder
        .place(Classification::line("chapter", "Intro"))
        .unwrap();
    builder
        .place(Classification::line("leaf", "orphaned point"))
        .unwrap();
    let output = builder.finish();

    assert_eq!(
        output.anomalies,
        vec![Anomaly {
            line: 2,
            tag: "Leaf".to_string(),
            ancestor_tag: "Chapter".to_string(),
            gap: 2,
        }]
    );
    // The leaf is attached regardless.
    let tree = &output.tree;
    let chapter = tree.node(tree.node(tree.root()).children()[0]);
    assert_eq!(tree.node(chapter.children()[0]).content(), Some("orphaned point"));
}

#[test]
fn skip_classifications_leave_the_tree_unchanged() {
    let registry = book_registry();

    let mut with_skips = TreeBuilder::new(&registry);
    let mut without_skips = TreeBuilder::new(&registry);
    for (kind, content) in [("chapter", "Intro"), ("section", "Background")] {
        with_skips.place(Classification::Skip).unwrap();
        with_skips
            .place(Classification::line(kind, content))
            .unwrap();
        without_skips
            .place(Classification::line(kind, content))
            .unwrap();
    }
    with_skips.place(Classification::Skip).unwrap();

    assert_eq!(with_skips.finish().tree, without_skips.finish().tree);
}

#[test]
fn abort_policy_fails_fast_on_unknown_level_kinds() {
    let registry = book_registry();
    let mut builder = TreeBuilder::new(&registry);
    let err = builder
        .place(Classification::line("glossary", "Terms"))
        .unwrap_err();
    assert!(matches!(err, BuildError::UnknownLevelKind { line: 1, .. }));
}

#[test]
fn skip_line_policy_preserves_surrounding_structure() {
    let registry = book_registry();
    let mut builder = TreeBuilder::new(&registry).with_policy(PlacementPolicy::SkipLine);
    for kind_and_content in [
        ("chapter", "Intro"),
        ("glossary", "Terms"),
        ("section", "Background"),
        ("glossary", "More terms"),
        ("leaf", "a point"),
    ] {
        builder
            .place(Classification::line(kind_and_content.0, kind_and_content.1))
            .unwrap();
    }
    let output = builder.finish();

    assert_eq!(output.skipped.len(), 2);
    assert_eq!(
        output
            .skipped
            .iter()
            .map(|s| s.line)
            .collect::<Vec<_>>(),
        vec![2, 4]
    );

    let tree = &output.tree;
    let chapter = tree.node(tree.node(tree.root()).children()[0]);
    let section = tree.node(chapter.children()[0]);
    assert_eq!(section.content(), Some("Background"));
    assert_eq!(tree.node(section.children()[0]).content(), Some("a point"));
}

#[test]
fn deep_rise_pops_multiple_stack_levels() {
    let registry = book_registry();
    let mut builder = TreeBuilder::new(&registry);
    for (kind, content) in [
        ("chapter", "One"),
        ("section", "A"),
        ("leaf", "a1"),
        ("chapter", "Two"),
    ] {
        builder.place(Classification::line(kind, content)).unwrap();
    }
    let tree = builder.finish().tree;
    let chapters: Vec<_> = tree
        .node(tree.root())
        .children()
        .iter()
        .map(|&id| tree.node(id).content().unwrap())
        .collect();
    assert_eq!(chapters, vec!["One", "Two"]);
}
