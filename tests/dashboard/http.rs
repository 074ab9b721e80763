//! HttpTransport against a live axum server.
//!
//! The server forwards every request to an `InMemoryApi`, so these tests
//! exercise the wire format (multipart bodies, status mapping, empty bodies)
//! rather than server logic.

use axum::body::Body;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{Method as HttpMethod, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use comforters_admin::{
    ApiConfig, ApiRequest, Dashboard, DevotionDraft, FilePart, HttpTransport, InMemoryApi,
    PostDraft, RequestBody, ResourceController, Transport, TransportError, TsvFile,
};
use serde_json::{json, Value};

use crate::support::{seeded_api, tsv};

async fn proxy(State(api): State<InMemoryApi>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let api_request = if method == HttpMethod::GET {
        ApiRequest::get(path)
    } else if method == HttpMethod::DELETE {
        ApiRequest::delete(path)
    } else if method == HttpMethod::POST {
        let multipart = match Multipart::from_request(request, &()).await {
            Ok(multipart) => multipart,
            Err(rejection) => return rejection.into_response(),
        };
        ApiRequest::post(path, read_body(multipart).await)
    } else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    match api.send(api_request).await {
        Ok(Value::Null) => StatusCode::NO_CONTENT.into_response(),
        Ok(body) => Json(body).into_response(),
        Err(TransportError::Status { status, detail, .. }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "detail": detail }))).into_response()
        }
        Err(other) => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
    }
}

async fn read_body(mut multipart: Multipart) -> RequestBody {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap().to_vec();
            return RequestBody::File(FilePart {
                field: name,
                file_name,
                content_type,
                bytes,
            });
        }
        fields.push((name, field.text().await.unwrap()));
    }
    RequestBody::Form(fields)
}

/// Bind to port 0 and return the base address.
async fn start_server(api: InMemoryApi) -> String {
    let app = Router::new()
        .route("/plain", get(|| async { Response::new(Body::from("ok")) }))
        .fallback(proxy)
        .with_state(api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn connect(api: InMemoryApi) -> Dashboard<HttpTransport> {
    let base = start_server(api).await;
    Dashboard::connect(&ApiConfig::new(&base).unwrap()).unwrap()
}

#[tokio::test]
async fn refresh_over_http() {
    let api = seeded_api();
    let dashboard = connect(api.clone()).await;

    let report = dashboard.refresh_all().await;
    assert!(report.is_ok());
    assert_eq!(dashboard.devotions().store().items(), api.devotions());
    let cursor = dashboard.posts().store().cursor().unwrap();
    assert_eq!((cursor.page, cursor.total_pages), (1, 2));
}

#[tokio::test]
async fn create_and_delete_devotion_over_http() {
    let api = InMemoryApi::new();
    let dashboard = connect(api.clone()).await;
    let panel = dashboard.devotions();

    panel.start_create(DevotionDraft {
        citation: "Lamentations 3:22".into(),
        verse_content: "His compassions fail not.".into(),
        date_posted: "2025-03-01".into(),
    });
    panel.submit_create().await.unwrap();
    let created = api.devotions();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].date_posted, "2025-03-01");
    assert_eq!(panel.store().items(), created);

    let confirmation = panel.delete_confirmation(&created[0]);
    confirmation.request();
    panel.confirm_delete(&confirmation).await.unwrap();
    assert!(api.devotions().is_empty());
    assert!(panel.store().items().is_empty());
    assert_eq!(dashboard.notifier().text().as_deref(), Some("Devotion deleted."));
}

#[tokio::test]
async fn server_detail_reaches_the_toast() {
    let api = seeded_api();
    let dashboard = connect(api.clone()).await;
    let panel = dashboard.posts();
    panel.reload().await.unwrap();
    let target = panel.store().items()[0].clone();

    api.fail_next(500, "db locked");
    let confirmation = panel.delete_confirmation(&target);
    confirmation.request();
    assert!(panel.confirm_delete(&confirmation).await.is_err());

    assert_eq!(
        dashboard.notifier().text().as_deref(),
        Some("500 Internal Server Error: db locked")
    );
    assert!(panel.store().items().contains(&target));
}

#[tokio::test]
async fn tsv_file_is_sent_as_multipart() {
    let api = InMemoryApi::new();
    let dashboard = connect(api.clone()).await;
    let panel = dashboard.posts();
    let file = TsvFile::new(
        "week.tsv",
        tsv(&["Hook\tQuestion\tQA\tReflection\tStory\tPrayer\tActivity\t2025-04-01"]),
    );
    panel.start_create(PostDraft::bulk(file));

    panel.submit_create().await.unwrap();
    let posts = api.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].activity_guide, "Activity");
    assert_eq!(panel.store().items(), posts);
}

#[tokio::test]
async fn missing_record_maps_to_status_error() {
    let base = start_server(InMemoryApi::new()).await;
    let transport = HttpTransport::new(&ApiConfig::new(&base).unwrap()).unwrap();

    let err = transport
        .send(ApiRequest::get("/devotions/41"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "404 Not Found: Devotion not found");
}

#[tokio::test]
async fn non_json_success_is_a_decode_error() {
    let base = start_server(InMemoryApi::new()).await;
    let transport = HttpTransport::new(&ApiConfig::new(&base).unwrap()).unwrap();

    let err = transport.send(ApiRequest::get("/plain")).await.unwrap_err();
    assert_eq!(err, TransportError::Decode { raw: "ok".into() });
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let transport = HttpTransport::new(&ApiConfig::new(&format!("http://{addr}")).unwrap()).unwrap();

    let err = transport.send(ApiRequest::get("/posts")).await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn bad_content_type_is_rejected_before_sending() {
    let transport = HttpTransport::new(&ApiConfig::default()).unwrap();
    let body = RequestBody::File(FilePart {
        field: "tsv_file".into(),
        file_name: "week.tsv".into(),
        content_type: "not a mime type".into(),
        bytes: b"x".to_vec(),
    });

    let err = transport.send(ApiRequest::post("/posts", body)).await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidRequest(_)));
    assert!(err.to_string().contains("not a mime type"));
}
