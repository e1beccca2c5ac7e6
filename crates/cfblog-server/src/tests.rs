use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use cfblog_client::{FetchError, PostSource};
use cfblog_common::{ContentVariant, Document, Links, Node, Post};
use serde_json::json;
use tower::ServiceExt;

use crate::{AppState, router};

/// Answers every slug with a canned result.
enum Stub {
    Found(Post),
    Missing,
    Broken,
}

#[async_trait]
impl PostSource for Stub {
    fn variant(&self) -> ContentVariant {
        ContentVariant::GraphQl
    }

    async fn fetch_post(&self, _slug: &str) -> Result<Option<Post>, FetchError> {
        match self {
            Stub::Found(post) => Ok(Some(post.clone())),
            Stub::Missing => Ok(None),
            Stub::Broken => Err(FetchError::Status {
                url: "https://graphql.example.com".into(),
                status: 401,
                body: "unauthorized".into(),
            }),
        }
    }
}

fn post() -> Post {
    let paragraph: Node = serde_json::from_value(json!({
        "nodeType": "paragraph",
        "data": {},
        "content": [{ "nodeType": "text", "value": "Hello there", "marks": [], "data": {} }]
    }))
    .unwrap();
    Post {
        id: "p1".into(),
        title: "First post".into(),
        slug: Some("first".into()),
        body: Document::document(vec![paragraph]),
        links: Links::default(),
    }
}

fn app(graphql: Stub, rest: Stub) -> axum::Router {
    router(AppState {
        graphql: Arc::new(graphql),
        rest: Arc::new(rest),
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    if uri.starts_with("/blog/") {
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
    }
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_found_renders_page() {
    let (status, body) = get(app(Stub::Found(post()), Stub::Missing), "/blog/graphql/first").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>First post</title>"));
    assert!(body.contains("<p>Hello there</p>"));
}

#[tokio::test]
async fn test_routes_pick_their_source() {
    let (status, _) = get(app(Stub::Found(post()), Stub::Missing), "/blog/rest/first").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_not_found_renders_empty_shell() {
    let (status, body) = get(app(Stub::Missing, Stub::Missing), "/blog/graphql/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<header class=\"App-header\">\n</header>"));
}

#[tokio::test]
async fn test_fetch_failure_is_bad_gateway() {
    let (status, body) = get(app(Stub::Missing, Stub::Broken), "/blog/rest/first").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("<header class=\"App-header\">\n</header>"));
    assert!(!body.contains("unauthorized"));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(Stub::Missing, Stub::Missing), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
