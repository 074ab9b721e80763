//! Search over loaded panels.

use comforters_admin::{project, DailyDevotion, Dashboard, PanelBody, ResourceController};

use crate::support::seeded_api;

#[tokio::test]
async fn devotion_search_by_citation() {
    let api = seeded_api();
    let dashboard = Dashboard::new(api.clone());
    dashboard.devotions().reload().await.unwrap();

    dashboard.devotions().set_query("psalm");
    let rows = dashboard.devotions().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].citation, "Psalm 23:1");

    dashboard.devotions().set_query("xyz");
    assert!(dashboard.devotions().rows().is_empty());
    assert!(matches!(
        dashboard.devotions().body(),
        PanelBody::Empty { hint, .. } if hint == "Try a different search."
    ));
}

#[test]
fn blank_query_is_identity_and_filter_is_idempotent() {
    let api = seeded_api();
    let items: Vec<DailyDevotion> = api.devotions();

    assert_eq!(project(&items, "   "), items);

    let once = project(&items, "LOVED");
    assert_eq!(once.len(), 1);
    assert_eq!(project(&once, "LOVED"), once);
    assert_eq!(project(&items, "loved"), once);
}

#[tokio::test]
async fn post_search_only_covers_the_loaded_page() {
    let api = seeded_api();
    let dashboard = Dashboard::new(api.clone());
    dashboard.change_page(1).await.unwrap();

    // "Rest is not weakness" lives on page 2.
    dashboard.posts().set_query("rest");
    assert!(dashboard.posts().rows().is_empty());

    dashboard.change_page(2).await.unwrap();
    assert_eq!(dashboard.posts().rows().len(), 1);
}
