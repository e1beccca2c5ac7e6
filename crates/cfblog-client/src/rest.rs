//! Content Delivery (REST) path
//!
//! Queries the entries collection by slug with `include=10`, then stitches the
//! returned `includes` back into the rich-text tree so that every embed node's
//! `data.target` holds the full entry or asset instead of a bare link.

use std::collections::HashMap;

use async_trait::async_trait;
use cfblog_common::{ContentVariant, ContentfulConfig, Document, Links, Post};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::http::{build_http_client, send};
use crate::source::PostSource;

pub const BLOG_POST_CONTENT_TYPE: &str = "blogPost";
/// Maximum link depth the delivery API will resolve.
pub const INCLUDE_DEPTH: u8 = 10;

#[derive(Debug, Deserialize)]
struct EntryCollection {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    includes: Includes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Includes {
    #[serde(default)]
    entry: Vec<Value>,
    #[serde(default)]
    asset: Vec<Value>,
}

/// Included entries and assets, keyed by id within each link type.
#[derive(Debug, Default)]
struct IncludeIndex<'a> {
    entries: HashMap<&'a str, &'a Value>,
    assets: HashMap<&'a str, &'a Value>,
}

impl<'a> IncludeIndex<'a> {
    fn build(collection: &'a EntryCollection) -> Self {
        fn by_id(values: &[Value]) -> impl Iterator<Item = (&str, &Value)> {
            values.iter().filter_map(|value| {
                let id = value.pointer("/sys/id")?.as_str()?;
                Some((id, value))
            })
        }

        let mut entries: HashMap<_, _> = by_id(&collection.items).collect();
        entries.extend(by_id(&collection.includes.entry));
        Self {
            entries,
            assets: by_id(&collection.includes.asset).collect(),
        }
    }

    fn get(&self, link: &Value) -> Option<&'a Value> {
        let sys = link.get("sys")?;
        if sys.get("type")?.as_str()? != "Link" {
            return None;
        }
        let id = sys.get("id")?.as_str()?;
        let table = match sys.get("linkType")?.as_str()? {
            "Entry" => &self.entries,
            "Asset" => &self.assets,
            _ => return None,
        };
        table.get(id).copied()
    }

    /// Replace every resolvable link object under `value` in place.
    ///
    /// Replacements are not walked again, so reference cycles between
    /// entries cannot loop. Unresolvable links are left as they are.
    fn resolve_links(&self, value: &mut Value) {
        if let Some(target) = self.get(value) {
            *value = target.clone();
            return;
        }
        match value {
            Value::Object(map) => map.values_mut().for_each(|v| self.resolve_links(v)),
            Value::Array(items) => items.iter_mut().for_each(|v| self.resolve_links(v)),
            _ => {}
        }
    }
}

/// Fetches posts through the Content Delivery API
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    endpoint: Url,
    delivery_token: String,
}

impl RestClient {
    pub fn new(config: &ContentfulConfig) -> Result<Self, FetchError> {
        Self::with_http(config, build_http_client(config)?)
    }

    pub fn with_http(config: &ContentfulConfig, http: reqwest::Client) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            endpoint: config.entries_endpoint()?,
            delivery_token: config.delivery_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn build_request(&self, slug: &str) -> Result<reqwest::Request, FetchError> {
        let include = INCLUDE_DEPTH.to_string();
        self.http
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.delivery_token))
            .query(&[
                ("content_type", BLOG_POST_CONTENT_TYPE),
                ("fields.slug", slug),
                ("limit", "1"),
                ("include", include.as_str()),
            ])
            .build()
            .map_err(|source| FetchError::Transport {
                url: self.endpoint.to_string(),
                source,
            })
    }
}

#[async_trait]
impl PostSource for RestClient {
    fn variant(&self) -> ContentVariant {
        ContentVariant::Rest
    }

    #[tracing::instrument(skip(self), fields(variant = "rest"))]
    async fn fetch_post(&self, slug: &str) -> Result<Option<Post>, FetchError> {
        let request = self.build_request(slug)?;
        debug!(url = %request.url(), "fetching blog post entries");
        let body = send(&self.http, request).await?;
        let post = parse_response(&body)?;
        debug!(found = post.is_some(), "blog post entries fetched");
        Ok(post)
    }
}

/// Turn an entries collection into the first matching post, with links resolved.
pub(crate) fn parse_response(body: &str) -> Result<Option<Post>, FetchError> {
    let collection: EntryCollection = serde_json::from_str(body).map_err(FetchError::decode)?;
    let Some(item) = collection.items.first() else {
        return Ok(None);
    };

    let index = IncludeIndex::build(&collection);
    let id = item
        .pointer("/sys/id")
        .and_then(Value::as_str)
        .ok_or_else(|| FetchError::decode("entry is missing sys.id"))?
        .to_string();
    let fields = item.get("fields").and_then(Value::as_object);
    let string_field = |name: &str| {
        fields
            .and_then(|f| f.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let body = match fields.and_then(|f| f.get("body")) {
        Some(raw) if !raw.is_null() => {
            let mut raw = raw.clone();
            index.resolve_links(&mut raw);
            serde_json::from_value::<Document>(raw).map_err(FetchError::decode)?
        }
        _ => Document::document(Vec::new()),
    };

    Ok(Some(Post {
        id,
        title: string_field("title").unwrap_or_default(),
        slug: string_field("slug"),
        body,
        links: Links::default(),
    }))
}
