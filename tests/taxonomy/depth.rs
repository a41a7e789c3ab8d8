//! Integration tests for depth queries

use praxis_taxonomy::{NodeDecl, Taxonomy, TaxonomyBuilder};

/// A diamond with a long left side: leaf -> long1 -> long2 -> top, leaf -> top.
fn diamond() -> Taxonomy {
    TaxonomyBuilder::new()
        .with(NodeDecl::new("top"))
        .unwrap()
        .with(NodeDecl::new("long2").with_parent("top"))
        .unwrap()
        .with(NodeDecl::new("long1").with_parent("long2"))
        .unwrap()
        .with(NodeDecl::new("leaf").with_parent("long1").with_parent("top"))
        .unwrap()
        .with(NodeDecl::new("loner"))
        .unwrap()
        .build()
}

#[test]
fn depth_follows_the_first_branch() {
    let t = diamond();
    let leaf = t.find("leaf").unwrap();
    let top = t.find("top").unwrap();
    assert_eq!(t.depth_of(leaf, top), 3);
    assert_eq!(t.shortest_depth_of(leaf, top), 1);
}

#[test]
fn unreachable_depth_is_negative() {
    let t = diamond();
    let loner = t.find("loner").unwrap();
    for other in t.ids().filter(|&id| id != loner) {
        assert_eq!(t.depth_of(loner, other), -1);
        assert_eq!(t.shortest_depth_of(loner, other), -1);
    }
}

#[test]
fn depth_counts_hops() {
    let t = diamond();
    let long1 = t.find("long1").unwrap();
    assert_eq!(t.depth_of(long1, t.find("long2").unwrap()), 1);
    assert_eq!(t.depth_of(long1, t.find("top").unwrap()), 2);
    assert_eq!(t.depth_of(t.find("top").unwrap(), long1), -1);
}
