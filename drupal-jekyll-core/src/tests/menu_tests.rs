use super::*;

fn row(mlid: i64, plid: i64, title: &str) -> MenuRow {
    MenuRow {
        title: title.to_string(),
        nid: mlid * 10,
        mlid,
        plid,
    }
}

fn three_levels() -> MenuIndex {
    MenuIndex::build(vec![
        row(1, 0, "About Us"),
        row(2, 1, "Our Team"),
        row(3, 2, "Jane Doe"),
    ])
}

#[test]
fn slug_is_computed_on_insert() {
    let index = three_levels();
    assert_eq!(index.get(1).unwrap().slug, "about-us");
    assert_eq!(index.get(2).unwrap().slug, "our-team");
    assert_eq!(index.get(3).unwrap().nid, 30);
}

#[test]
fn grandchild_resolves_through_both_ancestors() {
    let index = three_levels();
    assert_eq!(index.resolve_path(3).unwrap(), "/about-us/our-team");
    assert_eq!(index.resolve_path(2).unwrap(), "/about-us");
}

#[test]
fn root_link_resolves_to_empty_path() {
    let index = three_levels();
    assert_eq!(index.resolve_path(1).unwrap(), "");
}

#[test]
fn resolution_is_repeatable() {
    let index = three_levels();
    let first = index.resolve_path(3).unwrap();
    let second = index.resolve_path(3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn separate_trees_do_not_mix() {
    let index = MenuIndex::build(vec![
        row(1, 0, "Docs"),
        row(2, 1, "Install"),
        row(10, 0, "Blog"),
        row(11, 10, "2024"),
        row(12, 11, "Release"),
    ]);
    assert_eq!(index.resolve_path(2).unwrap(), "/docs");
    assert_eq!(index.resolve_path(12).unwrap(), "/blog/2024");
}

#[test]
fn later_row_wins_for_duplicate_mlid() {
    let mut index = MenuIndex::build(vec![row(1, 0, "A"), row(5, 0, "B"), row(2, 1, "Child")]);
    let replaced = index.insert(row(2, 5, "Child"));

    assert_eq!(replaced.unwrap().plid, 1);
    assert_eq!(index.len(), 3);
    assert_eq!(index.get(2).unwrap().plid, 5);
    assert_eq!(index.resolve_path(2).unwrap(), "/b");
}

#[test]
fn duplicate_rows_in_build_keep_the_last() {
    let index: MenuIndex = vec![row(1, 0, "A"), row(2, 0, "B"), row(3, 1, "C"), row(3, 2, "C")]
        .into_iter()
        .collect();
    assert_eq!(index.get(3).unwrap().plid, 2);
}

#[test]
fn missing_link_is_dangling() {
    let index = three_levels();
    let err = index.resolve_path(99).unwrap_err();
    assert_eq!(err, MenuError::DanglingLink { mlid: 99 });
    assert!(err.is_dangling());
}

#[test]
fn missing_parent_is_dangling() {
    let index = MenuIndex::build(vec![row(1, 0, "Root"), row(2, 7, "Orphan"), row(3, 2, "Leaf")]);
    let err = index.resolve_path(3).unwrap_err();
    assert_eq!(err, MenuError::DanglingParent { child: 2, plid: 7 });
}

#[test]
fn cycle_hits_the_depth_limit() {
    let index = MenuIndex::build(vec![row(1, 2, "Ping"), row(2, 1, "Pong")]);
    let err = index.resolve_path(1).unwrap_err();
    assert_eq!(
        err,
        MenuError::DepthExceeded {
            mlid: 1,
            limit: MAX_MENU_DEPTH
        }
    );
    assert!(!err.is_dangling());
}

#[test]
fn self_parent_hits_the_depth_limit() {
    let index = MenuIndex::build(vec![row(4, 4, "Loop")]);
    assert!(matches!(
        index.resolve_path(4),
        Err(MenuError::DepthExceeded { mlid: 4, .. })
    ));
}

#[test]
fn explicit_limit_counts_parent_hops() {
    let index = three_levels();
    assert_eq!(index.resolve_path_with_limit(3, 2).unwrap(), "/about-us/our-team");
    assert_eq!(
        index.resolve_path_with_limit(3, 1),
        Err(MenuError::DepthExceeded { mlid: 3, limit: 1 })
    );
}

#[test]
fn empty_ancestor_slug_still_adds_a_segment() {
    let index = MenuIndex::build(vec![row(1, 0, "!!!"), row(2, 1, "Page")]);
    assert_eq!(index.resolve_path(2).unwrap(), "/");
}
