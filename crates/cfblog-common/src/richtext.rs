//! Rich-text document tree as delivered by the content API
//!
//! Every node carries a `nodeType` tag, a free-form `data` object, and an
//! ordered list of children. Text nodes additionally carry `value` and `marks`.
//! Unrecognised node and mark kinds are kept as [`NodeType::Other`] and
//! [`MarkType::Other`] instead of failing deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The root node of a rich-text body (`nodeType: "document"`).
pub type Document = Node;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_type: NodeType,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl Node {
    pub fn document(content: Vec<Node>) -> Self {
        Self {
            node_type: NodeType::Document,
            data: Map::new(),
            content,
            value: None,
            marks: Vec::new(),
        }
    }

    /// `data.target`, the linked entry or asset of an embed or entry hyperlink
    pub fn target(&self) -> Option<&Value> {
        self.data.get("target")
    }

    /// `data.target.sys.id`
    pub fn target_id(&self) -> Option<&str> {
        self.target()?.pointer("/sys/id")?.as_str()
    }

    /// `data.uri`, set on hyperlinks
    pub fn uri(&self) -> Option<&str> {
        self.data.get("uri")?.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Document,
    Paragraph,
    /// `heading-1` through `heading-6`
    Heading(u8),
    OrderedList,
    UnorderedList,
    ListItem,
    Blockquote,
    HorizontalRule,
    Table,
    TableRow,
    TableCell,
    TableHeaderCell,
    EmbeddedEntryBlock,
    EmbeddedAssetBlock,
    EmbeddedResourceBlock,
    Hyperlink,
    EntryHyperlink,
    AssetHyperlink,
    ResourceHyperlink,
    EmbeddedEntryInline,
    EmbeddedResourceInline,
    Text,
    Other(String),
}

impl NodeType {
    pub fn is_embedded_entry(&self) -> bool {
        matches!(self, Self::EmbeddedEntryBlock | Self::EmbeddedEntryInline)
    }
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "document" => Self::Document,
            "paragraph" => Self::Paragraph,
            "heading-1" => Self::Heading(1),
            "heading-2" => Self::Heading(2),
            "heading-3" => Self::Heading(3),
            "heading-4" => Self::Heading(4),
            "heading-5" => Self::Heading(5),
            "heading-6" => Self::Heading(6),
            "ordered-list" => Self::OrderedList,
            "unordered-list" => Self::UnorderedList,
            "list-item" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            "hr" => Self::HorizontalRule,
            "table" => Self::Table,
            "table-row" => Self::TableRow,
            "table-cell" => Self::TableCell,
            "table-header-cell" => Self::TableHeaderCell,
            "embedded-entry-block" => Self::EmbeddedEntryBlock,
            "embedded-asset-block" => Self::EmbeddedAssetBlock,
            "embedded-resource-block" => Self::EmbeddedResourceBlock,
            "hyperlink" => Self::Hyperlink,
            "entry-hyperlink" => Self::EntryHyperlink,
            "asset-hyperlink" => Self::AssetHyperlink,
            "resource-hyperlink" => Self::ResourceHyperlink,
            "embedded-entry-inline" => Self::EmbeddedEntryInline,
            "embedded-resource-inline" => Self::EmbeddedResourceInline,
            "text" => Self::Text,
            _ => Self::Other(tag),
        }
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        node_type.to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Document => "document",
            Self::Paragraph => "paragraph",
            Self::Heading(level) => return write!(f, "heading-{level}"),
            Self::OrderedList => "ordered-list",
            Self::UnorderedList => "unordered-list",
            Self::ListItem => "list-item",
            Self::Blockquote => "blockquote",
            Self::HorizontalRule => "hr",
            Self::Table => "table",
            Self::TableRow => "table-row",
            Self::TableCell => "table-cell",
            Self::TableHeaderCell => "table-header-cell",
            Self::EmbeddedEntryBlock => "embedded-entry-block",
            Self::EmbeddedAssetBlock => "embedded-asset-block",
            Self::EmbeddedResourceBlock => "embedded-resource-block",
            Self::Hyperlink => "hyperlink",
            Self::EntryHyperlink => "entry-hyperlink",
            Self::AssetHyperlink => "asset-hyperlink",
            Self::ResourceHyperlink => "resource-hyperlink",
            Self::EmbeddedEntryInline => "embedded-entry-inline",
            Self::EmbeddedResourceInline => "embedded-resource-inline",
            Self::Text => "text",
            Self::Other(tag) => tag,
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: MarkType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarkType {
    Bold,
    Italic,
    Underline,
    Code,
    Superscript,
    Subscript,
    Strikethrough,
    Other(String),
}

impl From<String> for MarkType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "code" => Self::Code,
            "superscript" => Self::Superscript,
            "subscript" => Self::Subscript,
            "strikethrough" => Self::Strikethrough,
            _ => Self::Other(tag),
        }
    }
}

impl From<MarkType> for String {
    fn from(mark: MarkType) -> Self {
        match mark {
            MarkType::Bold => "bold".into(),
            MarkType::Italic => "italic".into(),
            MarkType::Underline => "underline".into(),
            MarkType::Code => "code".into(),
            MarkType::Superscript => "superscript".into(),
            MarkType::Subscript => "subscript".into(),
            MarkType::Strikethrough => "strikethrough".into(),
            MarkType::Other(tag) => tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_type_tags() {
        for tag in [
            "document",
            "heading-3",
            "hr",
            "table-header-cell",
            "embedded-entry-inline",
            "embedded-asset-block",
        ] {
            assert_eq!(NodeType::from(tag.to_string()).to_string(), tag);
        }
        assert_eq!(NodeType::from("heading-2".to_string()), NodeType::Heading(2));
    }

    #[test]
    fn test_unknown_node_type_is_preserved() {
        let node_type = NodeType::from("carousel".to_string());
        assert_eq!(node_type, NodeType::Other("carousel".into()));
        assert_eq!(node_type.to_string(), "carousel");
    }

    #[test]
    fn test_deserialize_document() {
        let doc: Document = serde_json::from_value(json!({
            "nodeType": "document",
            "data": {},
            "content": [
                {
                    "nodeType": "paragraph",
                    "data": {},
                    "content": [
                        {
                            "nodeType": "text",
                            "value": "Hello",
                            "marks": [{ "type": "bold" }, { "type": "sparkle" }],
                            "data": {}
                        },
                        {
                            "nodeType": "embedded-entry-inline",
                            "data": { "target": { "sys": { "id": "e1", "type": "Link", "linkType": "Entry" } } },
                            "content": []
                        }
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(doc.node_type, NodeType::Document);
        let paragraph = &doc.content[0];
        assert_eq!(paragraph.node_type, NodeType::Paragraph);

        let text = &paragraph.content[0];
        assert_eq!(text.value.as_deref(), Some("Hello"));
        assert_eq!(text.marks[0].mark_type, MarkType::Bold);
        assert_eq!(text.marks[1].mark_type, MarkType::Other("sparkle".into()));

        let embed = &paragraph.content[1];
        assert!(embed.node_type.is_embedded_entry());
        assert_eq!(embed.target_id(), Some("e1"));
    }

    #[test]
    fn test_missing_data_and_content_default() {
        let node: Node = serde_json::from_value(json!({ "nodeType": "hr" })).unwrap();
        assert_eq!(node.node_type, NodeType::HorizontalRule);
        assert!(node.data.is_empty());
        assert!(node.content.is_empty());
        assert_eq!(node.target_id(), None);
        assert_eq!(node.uri(), None);
    }

    #[test]
    fn test_serialize_uses_wire_tags() {
        let node: Node = serde_json::from_value(json!({
            "nodeType": "hyperlink",
            "data": { "uri": "https://example.com" },
            "content": []
        }))
        .unwrap();
        assert_eq!(node.uri(), Some("https://example.com"));

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["nodeType"], "hyperlink");
        assert!(value.get("content").is_none());
    }
}
