//! Create and delete flows through the panels.

use comforters_admin::{
    ActionError, DailyDevotion, DailyPost, Dashboard, DevotionDraft, Draft, Notifier, Outcome,
    Panel, PostDraft, PostFields, PostMode, ResourceController, TsvFile, ValidationError,
};

use crate::support::{first_devotion, seeded_api, tsv, GatedTransport, RecordingTransport};

fn devotion(citation: &str, verse: &str) -> DevotionDraft {
    DevotionDraft {
        citation: citation.into(),
        verse_content: verse.into(),
        date_posted: String::new(),
    }
}

#[tokio::test]
async fn blank_citation_never_reaches_the_server() {
    let api = seeded_api();
    let dashboard = Dashboard::new(api.clone());
    let panel = dashboard.devotions();
    panel.start_create(devotion("   ", "Be still, and know that I am God"));

    let err = panel.submit_create().await.unwrap_err();
    assert_eq!(
        err,
        ActionError::Validation(ValidationError::Required {
            field: "citation",
            message: "Citation is required.",
        })
    );
    assert!(api.requests().is_empty());
    assert_eq!(dashboard.notifier().text().as_deref(), Some("Citation is required."));
    // The form stays open with what the user typed.
    assert!(panel.create_dialog().is_open());
    assert_eq!(panel.create_dialog().draft().verse_content, "Be still, and know that I am God");
}

#[tokio::test]
async fn create_reloads_once_before_the_toast() {
    let api = seeded_api();
    let notifier = Notifier::new();
    let transport = RecordingTransport::new(api.clone(), notifier.clone());
    let panel: Panel<DailyDevotion, _> = Panel::new(transport.clone(), notifier.clone());
    panel.start_create(devotion("Psalm 46:10", "Be still, and know that I am God"));

    assert_eq!(panel.submit_create().await.unwrap(), Outcome::Completed);

    let log = transport.log();
    assert_eq!(
        log,
        vec![
            ("POST /devotions".to_string(), None),
            ("GET /devotions".to_string(), None),
        ]
    );
    assert_eq!(notifier.text().as_deref(), Some("Devotion created."));
    assert_eq!(panel.store().items().len(), 3);
    assert!(!panel.create_dialog().is_open());
    assert_eq!(panel.create_dialog().draft(), DevotionDraft::default());
}

#[tokio::test]
async fn failed_create_keeps_dialog_and_fields() {
    let api = seeded_api();
    let dashboard = Dashboard::new(api.clone());
    let panel = dashboard.posts();
    let fields = PostFields {
        opening_hook: "Morning mercies".into(),
        ..PostFields::default()
    };
    panel.start_create(PostDraft::single(fields.clone()));

    api.fail_next(500, "disk full");
    let err = panel.submit_create().await.unwrap_err();
    assert!(matches!(err, ActionError::Transport(_)));
    assert_eq!(
        dashboard.notifier().text().as_deref(),
        Some("500 Internal Server Error: disk full")
    );
    assert!(panel.create_dialog().is_open());
    assert_eq!(panel.create_dialog().draft().fields, fields);
    assert!(!panel.create_dialog().is_busy());
}

#[tokio::test]
async fn second_submit_while_busy_is_ignored() {
    let gated = GatedTransport::new(seeded_api());
    let panel: Panel<DailyDevotion, _> = Panel::new(gated.clone(), Notifier::new());
    panel.start_create(devotion("Psalm 121:1", "I will lift up mine eyes unto the hills"));
    gated.hold_next(1);

    let (first, second) = tokio::join!(panel.submit_create(), async {
        gated.wait_held(1).await;
        assert!(panel.create_dialog().is_busy());
        assert!(!panel.create_dialog().close());
        let second = panel.submit_create().await;
        gated.release();
        second
    });

    assert_eq!(first.unwrap(), Outcome::Completed);
    assert_eq!(second.unwrap(), Outcome::AlreadyBusy);
    let posts = gated
        .api()
        .requests()
        .into_iter()
        .filter(|r| r == "POST /devotions")
        .count();
    assert_eq!(posts, 1);
    assert!(!panel.create_dialog().is_busy());
}

#[tokio::test]
async fn bulk_upload_creates_every_row() {
    let api = seeded_api();
    let dashboard = Dashboard::new(api.clone());
    let panel = dashboard.posts();
    let file = TsvFile::new(
        "january.tsv",
        tsv(&[
            "Hook A\tQ A\tQA A\tR A\tS A\tP A\tAct A\t2025-02-01",
            "Hook B\tQ B\tQA B\tR B\tS B\tP B\tAct B\t2025-02-02",
        ]),
    );
    panel.start_create(PostDraft::bulk(file));

    assert_eq!(panel.submit_create().await.unwrap(), Outcome::Completed);
    assert_eq!(api.posts().len(), 5);
    assert_eq!(dashboard.notifier().text().as_deref(), Some("Bulk posts uploaded."));
}

#[tokio::test]
async fn tsv_header_mismatch_stays_local() {
    let api = seeded_api();
    let dashboard = Dashboard::new(api.clone());
    let panel = dashboard.posts();
    let file = TsvFile::new("bad.tsv", "title\tbody\nA\tB\n");
    panel.start_create(PostDraft::bulk(file));

    let err = panel.submit_create().await.unwrap_err();
    assert!(matches!(
        err,
        ActionError::Validation(ValidationError::TsvHeader { .. })
    ));
    assert!(api.requests().is_empty());
}

#[test]
fn bulk_without_file_is_rejected() {
    let draft = PostDraft {
        mode: PostMode::Tsv,
        ..PostDraft::default()
    };
    assert_eq!(draft.validate(), Err(ValidationError::MissingFile));
}

#[tokio::test]
async fn delete_reloads_then_toasts() {
    let api = seeded_api();
    let dashboard = Dashboard::new(api.clone());
    let panel = dashboard.devotions();
    panel.reload().await.unwrap();
    let target = first_devotion(&api);

    let confirmation = panel.delete_confirmation(&target);
    assert_eq!(confirmation.label(), "Delete Psalm 23:1");
    assert_eq!(panel.confirm_delete(&confirmation).await.unwrap(), Outcome::NotOpen);

    confirmation.request();
    assert_eq!(panel.confirm_delete(&confirmation).await.unwrap(), Outcome::Completed);
    assert!(!confirmation.is_open());
    assert!(panel.store().items().iter().all(|d| d.id != target.id));
    assert_eq!(dashboard.notifier().text().as_deref(), Some("Devotion deleted."));
}

#[tokio::test]
async fn delete_reloads_once_before_the_toast() {
    let api = seeded_api();
    let notifier = Notifier::new();
    let transport = RecordingTransport::new(api.clone(), notifier.clone());
    let panel: Panel<DailyDevotion, _> = Panel::new(transport.clone(), notifier.clone());
    let target = first_devotion(&api);

    let confirmation = panel.delete_confirmation(&target);
    confirmation.request();
    assert_eq!(panel.confirm_delete(&confirmation).await.unwrap(), Outcome::Completed);

    assert_eq!(
        transport.log(),
        vec![
            (format!("DELETE /devotions/{}", target.id), None),
            ("GET /devotions".to_string(), None),
        ]
    );
    assert_eq!(notifier.text().as_deref(), Some("Devotion deleted."));
}

#[tokio::test]
async fn second_confirm_while_deleting_is_ignored() {
    let gated = GatedTransport::new(seeded_api());
    let panel: Panel<DailyDevotion, _> = Panel::new(gated.clone(), Notifier::new());
    let target = first_devotion(gated.api());
    let confirmation = panel.delete_confirmation(&target);
    confirmation.request();
    gated.hold_next(1);

    let (first, (second, cancelled)) = tokio::join!(panel.confirm_delete(&confirmation), async {
        gated.wait_held(1).await;
        assert!(confirmation.is_busy());
        let cancelled = confirmation.cancel();
        let second = panel.confirm_delete(&confirmation).await;
        gated.release();
        (second, cancelled)
    });

    assert_eq!(first.unwrap(), Outcome::Completed);
    assert_eq!(second.unwrap(), Outcome::AlreadyBusy);
    assert!(!cancelled);
    let deletes = gated
        .api()
        .requests()
        .into_iter()
        .filter(|r| r.starts_with("DELETE "))
        .count();
    assert_eq!(deletes, 1);
    assert!(!confirmation.is_open());
    assert!(!confirmation.is_busy());
}

#[tokio::test]
async fn failed_delete_keeps_the_item() {
    let api = seeded_api();
    let dashboard = Dashboard::new(api.clone());
    let panel: &Panel<DailyPost, _> = dashboard.posts();
    panel.reload().await.unwrap();
    let target = panel.store().items()[0].clone();

    let confirmation = panel.delete_confirmation(&target);
    confirmation.request();
    api.fail_next(500, "db locked");
    let err = panel.confirm_delete(&confirmation).await.unwrap_err();

    assert!(err.to_string().contains("db locked"));
    assert!(dashboard
        .notifier()
        .text()
        .is_some_and(|text| text.contains("db locked")));
    assert!(panel.store().items().contains(&target));
    assert!(confirmation.is_open());
    assert!(confirmation.cancel());
    assert!(!confirmation.is_open());
}
