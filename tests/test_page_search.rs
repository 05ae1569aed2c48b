//! Integration tests for the page search index over rendered Sphinx markup.

mod fixtures;

use docsite_search::search::{MAX_RESULTS, MIN_QUERY_CHARS};
use docsite_search::{
    Anchor, Category, DocumentTree, IndexEntry, Navigation, PageSearchIndex,
};
use fixtures::{API_PAGE, API_PAGE_LABELS, UNANCHORED_PAGE};

const QUERIES: &[&str] = &["ci", "CIRCLE", "e", "re", "Ge", "radius", "_", "zz", "  sur  "];

fn api_index() -> PageSearchIndex {
    PageSearchIndex::build(&DocumentTree::parse(API_PAGE))
}

fn texts(entries: &[&IndexEntry]) -> Vec<String> {
    entries.iter().map(|e| e.text.clone()).collect()
}

#[test]
fn test_one_entry_per_labelled_candidate() {
    let index = api_index();
    let labels: Vec<&str> = index.entries().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(labels, API_PAGE_LABELS);
}

#[test]
fn test_categories_follow_structure() {
    let index = api_index();
    let categories: Vec<Category> = index.entries().iter().map(|e| e.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Modules,
            Category::Modules,
            Category::Classes,
            Category::Functions,
            Category::Functions,
            Category::Functions,
            Category::Examples,
            Category::Functions,
        ]
    );
}

#[test]
fn test_anchors_resolve_to_nearest_id() {
    let index = api_index();
    let entries = index.entries();

    assert_eq!(entries[0].anchor.as_str(), "module-manimlib.mobject.geometry");
    assert_eq!(entries[2].anchor.as_str(), "manimlib.mobject.geometry.Circle");
    assert_eq!(entries[6].anchor.as_str(), "example-circle-scene");
    // inline marker without an id of its own
    assert_eq!(entries[7].anchor.as_str(), "module-manimlib.mobject.geometry");
    assert_eq!(
        entries[2].navigation(),
        Navigation::Fragment("manimlib.mobject.geometry.Circle".to_string())
    );
}

#[test]
fn test_short_queries_return_nothing() {
    let index = api_index();
    for query in ["", "c", " c ", "é"] {
        assert!(query.trim().chars().count() < MIN_QUERY_CHARS);
        for category in Category::ALL_FACETS {
            assert!(
                index.query(query, category).is_empty(),
                "query {:?} in {} should be empty",
                query,
                category
            );
        }
    }
}

#[test]
fn test_results_contain_the_query() {
    let index = api_index();
    for query in QUERIES {
        let needle = query.trim().to_lowercase();
        for category in Category::ALL_FACETS {
            for entry in index.query(query, category) {
                assert!(entry.text.to_lowercase().contains(&needle));
                assert!(category.admits(entry.category));
            }
        }
    }
}

#[test]
fn test_category_results_are_subset_of_all() {
    let index = api_index();
    for query in QUERIES {
        let all = index.query(query, Category::All);
        for category in Category::ALL_FACETS {
            for entry in index.query(query, category) {
                assert!(all.contains(&entry), "{:?} missing from all", entry.text);
            }
        }
    }
}

#[test]
fn test_results_are_capped() {
    let entries: Vec<IndexEntry> = (0..25)
        .map(|i| {
            let text = format!("Scene{}", i);
            IndexEntry::new(text.clone(), Anchor::synthesize(&text), Category::Classes)
        })
        .collect();
    let index = PageSearchIndex::from_entries(entries);

    let hits = index.query("scene", Category::All);
    assert_eq!(hits.len(), MAX_RESULTS);
    assert_eq!(hits[0].text, "Scene0");
    assert_eq!(hits[9].text, "Scene9");
}

#[test]
fn test_results_keep_document_order_and_are_repeatable() {
    let index = api_index();

    let first = texts(&index.query("circle", Category::All));
    assert_eq!(
        first,
        vec![
            "class Circle(radius=1.0)",
            "create_circle(radius)",
            "CircleScene",
            "square_to_circle",
        ]
    );
    assert_eq!(texts(&index.query("circle", Category::All)), first);
    assert_eq!(texts(&index.query("CIRCLE", Category::All)), first);
}

#[test]
fn test_create_circle_scenario() {
    let index = PageSearchIndex::from_entries(vec![
        IndexEntry::new("Create", Anchor::new("create"), Category::Modules),
        IndexEntry::new("Circle", Anchor::new("circle"), Category::Classes),
        IndexEntry::new("create_circle", Anchor::new("create_circle"), Category::Functions),
    ]);

    assert_eq!(
        texts(&index.query("cre", Category::All)),
        vec!["Create", "create_circle"]
    );
    assert!(index.query("cre", Category::Classes).is_empty());
    for category in Category::ALL_FACETS {
        assert!(index.query("c", category).is_empty());
    }
}

#[test]
fn test_unanchored_entries_are_listed_but_not_navigable() {
    let index = PageSearchIndex::build(&DocumentTree::parse(UNANCHORED_PAGE));
    let entries = index.entries();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].text, "Orphan heading");
    assert!(entries[0].anchor.is_empty());
    assert_eq!(entries[0].navigation(), Navigation::None);

    assert_eq!(entries[1].navigation(), Navigation::Fragment("tips".to_string()));

    assert_eq!(entries[2].text, "render_frame");
    assert_eq!(entries[2].category, Category::Functions);
    assert!(!entries[2].navigation().is_navigable());

    let hits = index.search("orphan", Category::All);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].navigation.href(), None);
}

#[test]
fn test_search_highlights_matches() {
    let index = api_index();
    let hits = index.search("radius", Category::Functions);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].highlighted, "get_<mark>radius</mark>()");
    assert_eq!(hits[1].highlighted, "create_circle(<mark>radius</mark>)");
    assert_eq!(
        hits[0].navigation.href().as_deref(),
        Some("#manimlib.mobject.geometry.Circle.get_radius")
    );
}

#[test]
fn test_related_items() {
    let index = api_index();
    let related = texts(&index.related("create_circle(radius)"));
    assert_eq!(
        related,
        vec![
            "class Circle(radius=1.0)",
            "get_radius()",
            "CircleScene",
            "square_to_circle",
        ]
    );
    assert!(index.related("zz").is_empty());
}

#[test]
fn test_script_content_is_not_indexed() {
    let index = api_index();
    assert!(index.query("not a heading", Category::All).is_empty());
}
