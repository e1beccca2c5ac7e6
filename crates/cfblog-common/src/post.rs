use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::richtext::Document;

/// A blog post as returned by either content path.
///
/// `links` is populated by the GraphQL path only. The REST path embeds each
/// linked entry directly in the document tree, under `data.target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub body: Document,
    pub links: Links,
}

/// Which delivery API a post was fetched through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentVariant {
    #[serde(rename = "graphql")]
    GraphQl,
    Rest,
}

impl ContentVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GraphQl => "graphql",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for ContentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphql" | "gql" => Ok(Self::GraphQl),
            "rest" | "cda" => Ok(Self::Rest),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sys {
    pub id: String,
}

/// GraphQL `body.links` side-table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub entries: LinkedEntries,
    #[serde(default)]
    pub assets: LinkedAssets,
}

// The GraphQL API returns `null` in these lists for links it cannot resolve
// (unpublished or deleted targets), hence the `Option`s.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkedEntries {
    #[serde(default)]
    pub inline: Vec<Option<LinkedEntry>>,
    #[serde(default)]
    pub block: Vec<Option<LinkedEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkedAssets {
    #[serde(default)]
    pub block: Vec<Option<LinkedAsset>>,
}

/// A linked entry as selected by the GraphQL query: the typename, the id,
/// and whatever fields the type fragment selected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkedEntry {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub sys: Sys,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LinkedEntry {
    pub fn to_embedded(&self) -> EmbeddedEntry {
        EmbeddedEntry::from_fields(&self.typename, &self.fields)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAsset {
    pub sys: Sys,
    pub url: Option<String>,
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub description: Option<String>,
    pub content_type: Option<String>,
}

impl LinkedAsset {
    /// `None` when the asset has no file URL yet.
    pub fn to_asset(&self) -> Option<Asset> {
        Some(Asset {
            id: self.sys.id.clone(),
            url: self.url.clone()?,
            content_type: self.content_type.clone().unwrap_or_default(),
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            description: self.description.clone(),
        })
    }
}

/// A media asset, normalised across both content paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub url: String,
    pub content_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Asset {
    pub fn is_image(&self) -> bool {
        self.content_type.contains("image")
    }
}

/// An embedded entry resolved to one of the content types the renderer knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedEntry {
    FormattedText {
        text: String,
        color: Option<String>,
    },
    CodeBlock {
        code: String,
        title: Option<String>,
        language: Option<String>,
        description: Option<String>,
    },
    VideoEmbed {
        embed_url: Option<String>,
        title: Option<String>,
    },
    Unknown {
        discriminator: String,
    },
}

impl EmbeddedEntry {
    /// Build from a type discriminator and a flat field map.
    ///
    /// Accepts both the GraphQL typenames (`FormattedText`, `CodeBlock`,
    /// `VideoEmbed`) and the REST content type ids (`formattedText`,
    /// `codeBlock`, `videoEmbed`).
    pub fn from_fields(discriminator: &str, fields: &Map<String, Value>) -> Self {
        let string = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        match discriminator {
            "FormattedText" | "formattedText" => Self::FormattedText {
                text: string("text").unwrap_or_default(),
                color: string("color"),
            },
            "CodeBlock" | "codeBlock" => Self::CodeBlock {
                code: string("code").unwrap_or_default(),
                title: string("title"),
                language: string("language"),
                description: string("description"),
            },
            "VideoEmbed" | "videoEmbed" => Self::VideoEmbed {
                embed_url: string("embedUrl"),
                title: string("title"),
            },
            other => Self::Unknown {
                discriminator: other.to_string(),
            },
        }
    }
}
