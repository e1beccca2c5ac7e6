//! GraphQL content path
//!
//! One POST per slug. The body's linked entries and assets come back in a
//! `links` side-table next to the rich-text JSON, keyed by id.

use async_trait::async_trait;
use cfblog_common::{ContentVariant, ContentfulConfig, Document, Links, Post, Sys};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::FetchError;
use crate::http::{build_http_client, send};
use crate::source::PostSource;

pub const BLOG_POST_QUERY: &str = r#"
query GetBlogPostBySlug($slug: String!) {
  blogPostCollection(limit: 1, where: { slug: $slug }) {
    items {
      sys {
        id
      }
      title
      slug
      body {
        json
        links {
          entries {
            inline {
              __typename
              sys {
                id
              }
              ... on FormattedText {
                text
                color
              }
            }
            block {
              __typename
              sys {
                id
              }
              ...CodeBlockFields
              ...VideoEmbedFields
            }
          }
          assets {
            block {
              sys {
                id
              }
              url
              title
              width
              height
              description
              contentType
            }
          }
        }
      }
    }
  }
}

fragment CodeBlockFields on CodeBlock {
  title
  description
  language
  code
}

fragment VideoEmbedFields on VideoEmbed {
  title
  embedUrl
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    slug: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    blog_post_collection: Option<BlogPostCollection>,
}

#[derive(Debug, Deserialize)]
struct BlogPostCollection {
    #[serde(default)]
    items: Vec<Option<BlogPostItem>>,
}

#[derive(Debug, Deserialize)]
struct BlogPostItem {
    sys: Sys,
    title: Option<String>,
    slug: Option<String>,
    body: Option<BlogPostBody>,
}

#[derive(Debug, Deserialize)]
struct BlogPostBody {
    json: Document,
    #[serde(default)]
    links: Links,
}

impl From<BlogPostItem> for Post {
    fn from(item: BlogPostItem) -> Self {
        let (body, links) = match item.body {
            Some(body) => (body.json, body.links),
            None => (Document::document(Vec::new()), Links::default()),
        };
        Post {
            id: item.sys.id,
            title: item.title.unwrap_or_default(),
            slug: item.slug,
            body,
            links,
        }
    }
}

/// Fetches posts through the GraphQL content API
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: Url,
    delivery_token: String,
}

impl GraphQlClient {
    pub fn new(config: &ContentfulConfig) -> Result<Self, FetchError> {
        Self::with_http(config, build_http_client(config)?)
    }

    /// Reuse an existing HTTP client (and its connection pool).
    pub fn with_http(config: &ContentfulConfig, http: reqwest::Client) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            endpoint: config.graphql_endpoint()?,
            delivery_token: config.delivery_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn build_request(&self, slug: &str) -> Result<reqwest::Request, FetchError> {
        let body = GraphQlRequest {
            query: BLOG_POST_QUERY,
            variables: Variables { slug },
        };
        self.http
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.delivery_token))
            .json(&body)
            .build()
            .map_err(|source| FetchError::Transport {
                url: self.endpoint.to_string(),
                source,
            })
    }
}

#[async_trait]
impl PostSource for GraphQlClient {
    fn variant(&self) -> ContentVariant {
        ContentVariant::GraphQl
    }

    #[tracing::instrument(skip(self), fields(variant = "graphql"))]
    async fn fetch_post(&self, slug: &str) -> Result<Option<Post>, FetchError> {
        let request = self.build_request(slug)?;
        debug!(url = %request.url(), "querying blog post");
        let body = send(&self.http, request).await?;
        let post = parse_response(&body)?;
        debug!(found = post.is_some(), "blog post query finished");
        Ok(post)
    }
}

/// Pull the first post out of a `blogPostCollection` response.
pub(crate) fn parse_response(body: &str) -> Result<Option<Post>, FetchError> {
    let response: GraphQlResponse = serde_json::from_str(body).map_err(FetchError::decode)?;

    let collection = response.data.and_then(|data| data.blog_post_collection);
    let Some(collection) = collection else {
        if response.errors.is_empty() {
            return Err(FetchError::decode("response has no blogPostCollection"));
        }
        return Err(FetchError::GraphQl {
            messages: response.errors.into_iter().map(|e| e.message).collect(),
        });
    };

    for error in &response.errors {
        warn!(message = %error.message, "GraphQL returned a partial result");
    }

    Ok(collection.items.into_iter().flatten().next().map(Post::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn client() -> GraphQlClient {
        GraphQlClient::new(&ContentfulConfig::new("space1", "master", "secret")).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let request = client().build_request("hello-world").unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://graphql.contentful.com/content/v1/spaces/space1/environments/master"
        );
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer secret");
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/json"
        );

        let body: Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(body["variables"], json!({ "slug": "hello-world" }));
        let query = body["query"].as_str().unwrap();
        assert!(query.contains("blogPostCollection(limit: 1, where: { slug: $slug })"));
        assert!(query.contains("fragment VideoEmbedFields on VideoEmbed"));
    }

    #[test]
    fn test_parse_found() {
        let body = json!({
            "data": { "blogPostCollection": { "items": [{
                "sys": { "id": "p1" },
                "title": "Hello",
                "slug": "hello",
                "body": {
                    "json": { "nodeType": "document", "data": {}, "content": [] },
                    "links": {
                        "entries": {
                            "inline": [],
                            "block": [{ "__typename": "CodeBlock", "sys": { "id": "c1" }, "code": "print(1)" }]
                        },
                        "assets": { "block": [] }
                    }
                }
            }] } }
        });

        let post = parse_response(&body.to_string()).unwrap().unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.slug.as_deref(), Some("hello"));
        assert_eq!(post.links.entries.block.len(), 1);
    }

    #[test]
    fn test_parse_zero_items_is_not_found() {
        let body = json!({ "data": { "blogPostCollection": { "items": [] } } });
        assert!(parse_response(&body.to_string()).unwrap().is_none());
    }

    #[test]
    fn test_parse_errors_without_data() {
        let body = json!({
            "data": null,
            "errors": [{ "message": "Query cannot be executed" }, { "message": "second" }]
        });
        let err = parse_response(&body.to_string()).unwrap_err();
        match err {
            FetchError::GraphQl { messages } => {
                assert_eq!(messages, vec!["Query cannot be executed", "second"])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_partial_errors_keep_data() {
        let body = json!({
            "data": { "blogPostCollection": { "items": [{
                "sys": { "id": "p1" },
                "title": "Hello",
                "slug": "hello",
                "body": {
                    "json": { "nodeType": "document", "data": {}, "content": [] },
                    "links": { "entries": { "inline": [null], "block": [] }, "assets": { "block": [] } }
                }
            }] } },
            "errors": [{ "message": "Link to entry 'x' on field 'inline' could not be resolved" }]
        });
        let post = parse_response(&body.to_string()).unwrap().unwrap();
        assert_eq!(post.links.entries.inline, vec![None]);
    }

    #[test]
    fn test_parse_missing_body() {
        let body = json!({
            "data": { "blogPostCollection": { "items": [{
                "sys": { "id": "p1" }, "title": null, "slug": "hello", "body": null
            }] } }
        });
        let post = parse_response(&body.to_string()).unwrap().unwrap();
        assert_eq!(post.title, "");
        assert!(post.body.content.is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(FetchError::Decode { .. })
        ));
        assert!(matches!(
            parse_response("{}"),
            Err(FetchError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let mut config = ContentfulConfig::new("space1", "master", "secret");
        config.graphql_host = Url::parse("http://127.0.0.1:9").unwrap();
        config.timeout = Some(std::time::Duration::from_secs(5));
        let client = GraphQlClient::new(&config).unwrap();

        let err = client.fetch_post("hello").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
