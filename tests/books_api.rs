use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use bookshelf_kernel::{settings::Settings, InitCtx};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app_with(settings: Settings) -> Router {
    let registry = bookshelf_app::build_registry().unwrap();
    registry
        .init_modules(&InitCtx {
            settings: &settings,
        })
        .await
        .unwrap();
    bookshelf_http::build_router(&registry, &settings)
}

async fn app() -> Router {
    app_with(Settings::default()).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn ids(books: &Value) -> Vec<i64> {
    books
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn list_returns_every_seeded_book() {
    let app = app().await;

    let response = send(&app, "GET", "/api/books", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let books = body_json(response).await;
    assert_eq!(ids(&books), (1..=10).collect::<Vec<_>>());
    assert_eq!(
        books[0],
        json!({
            "id": 1,
            "title": "A Brief History of Time",
            "author": "Stephen Hawking",
            "category": "Science",
            "rating": 5
        })
    );
}

#[tokio::test]
async fn list_filters_by_category_ignoring_case() {
    let app = app().await;

    let response = send(&app, "GET", "/api/books?category=science", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), vec![1, 8]);

    let response = send(&app, "GET", "/api/books?category=Self-HELP", None).await;
    assert_eq!(ids(&body_json(response).await), vec![9]);
}

#[tokio::test]
async fn title_lookup_returns_book_or_null() {
    let app = app().await;

    let response = send(&app, "GET", "/api/books/title/the%20art%20of%20war", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], 10);

    let response = send(&app, "GET", "/api/books/title/Missing%20Book", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn id_lookup_distinguishes_invalid_and_missing() {
    let app = app().await;

    let response = send(&app, "GET", "/api/books/id/3", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Clean Code");

    let response = send(&app, "GET", "/api/books/id/11", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Book not found - 11");

    let response = send(&app, "GET", "/api/books/id/0", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "id");

    let response = send(&app, "GET", "/api/books/id/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "bad_request");
}

#[tokio::test]
async fn create_appends_with_next_id() {
    let app = app().await;

    let response = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": "X", "author": "Y", "category": "Z", "rating": 3})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    assert!(bytes.is_empty());

    let response = send(&app, "GET", "/api/books/id/11", None).await;
    assert_eq!(
        body_json(response).await,
        json!({"id": 11, "title": "X", "author": "Y", "category": "Z", "rating": 3})
    );

    let response = send(&app, "GET", "/api/books", None).await;
    assert_eq!(ids(&body_json(response).await).len(), 11);
}

#[tokio::test]
async fn create_in_unseeded_catalog_starts_at_one() {
    let mut settings = Settings::default();
    settings.catalog.seed = false;
    let app = app_with(settings).await;

    let response = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": "X", "author": "Y", "category": "Z", "rating": 3})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "GET", "/api/books", None).await;
    assert_eq!(ids(&body_json(response).await), vec![1]);
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let app = app().await;

    let response = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": "X", "author": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|detail| detail["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["author", "category", "rating"]);

    let response = send(&app, "GET", "/api/books", None).await;
    assert_eq!(ids(&body_json(response).await).len(), 10);
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/books")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "bad_request");
}

#[tokio::test]
async fn update_replaces_and_persists() {
    let app = app().await;
    let replacement = json!({"title": "Gatsby", "author": "Fitzgerald", "category": "Classics", "rating": 2});

    let response = send(&app, "PUT", "/api/books/2", Some(replacement)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(
        updated,
        json!({"id": 2, "title": "Gatsby", "author": "Fitzgerald", "category": "Classics", "rating": 2})
    );

    let response = send(&app, "GET", "/api/books/id/2", None).await;
    assert_eq!(body_json(response).await, updated);
}

#[tokio::test]
async fn update_of_missing_book_is_not_found() {
    let app = app().await;

    let response = send(
        &app,
        "PUT",
        "/api/books/99",
        Some(json!({"title": "X", "author": "Y", "category": "Z", "rating": 3})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "Book not found - 99"
    );

    let response = send(&app, "GET", "/api/books", None).await;
    assert_eq!(ids(&body_json(response).await), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn delete_removes_book() {
    let app = app().await;

    let response = send(&app, "DELETE", "/api/books/5", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", "/api/books/id/5", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", "/api/books/5", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/api/books", None).await;
    assert_eq!(ids(&body_json(response).await), vec![1, 2, 3, 4, 6, 7, 8, 9, 10]);
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = app().await;

    let response = send(&app, "GET", "/healthz", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/books/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(
        String::from_utf8(bytes.to_vec()).unwrap(),
        "books module is healthy: 10 books"
    );

    let response = send(&app, "GET", "/docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    for path in [
        "/api/books",
        "/api/books/title/{title}",
        "/api/books/id/{id}",
        "/api/books/{id}",
    ] {
        assert!(spec["paths"][path].is_object(), "missing {path}");
    }
    assert!(spec["components"]["schemas"]["Book"].is_object());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = app().await;

    let response = send(&app, "GET", "/api/books/id/1", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn create_rejects_non_json_content_type() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/books")
        .header("content-type", "text/plain")
        .body(Body::from(
            json!({"title": "X", "author": "Y", "category": "Z", "rating": 3}).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        body_json(response).await["error"]["code"],
        "unsupported_media_type"
    );
}

#[tokio::test]
async fn create_rejects_oversized_body() {
    let app = app().await;
    let huge_title = "x".repeat(3 * 1024 * 1024);

    let response = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": huge_title, "author": "Y", "category": "Z", "rating": 3})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["error"]["code"], "payload_too_large");

    let response = send(&app, "GET", "/api/books", None).await;
    assert_eq!(ids(&body_json(response).await).len(), 10);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let app = app().await;

    let tasks: Vec<_> = (0..50)
        .map(|n| {
            let app = app.clone();
            tokio::spawn(async move {
                send(
                    &app,
                    "POST",
                    "/api/books",
                    Some(json!({"title": format!("Book {n}"), "author": "A", "category": "C", "rating": 1})),
                )
                .await
                .status()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }

    let response = send(&app, "GET", "/api/books", None).await;
    let mut all = ids(&body_json(response).await);
    assert_eq!(all.len(), 60);
    all.sort_unstable();
    all.dedup();
    assert_eq!(all, (1..=60).collect::<Vec<_>>());
}
