use std::fmt::Write;

use cfblog_common::{Asset, ContentVariant, EmbeddedEntry, MarkType, Node, NodeType};
use markdown_weaver_escape::{escape_href, escape_html, escape_html_body_text};

use crate::resolver::EntryResolver;

const FORMATTED_TEXT_CLASS: &str = "font-bold text-2xl m-1";
const CODE_BLOCK_CLASS: &str = "bg-slate-900 p-12 m-12";
const EMBED_CLASS: &str = "my-12 mx-auto";
const STYLED_TABLE_CLASS: &str =
    "mx-auto table-auto border-separate border-spacing-2 border border-slate-500";

const VIDEO_WIDTH: u32 = 560;
const VIDEO_HEIGHT: u32 = 315;
const VIDEO_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

const IMAGE_SIZE: u32 = 500;
const IMAGE_ALT: &str = "Alternative text";

/// Per-path rendering switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// When set, tables render as `<table class=..>{rows}</table>` without a `<tbody>`.
    pub table_class: Option<&'static str>,
}

impl RenderOptions {
    pub fn for_variant(variant: ContentVariant) -> Self {
        match variant {
            ContentVariant::GraphQl => Self::default(),
            ContentVariant::Rest => Self {
                table_class: Some(STYLED_TABLE_CLASS),
            },
        }
    }
}

/// Render `document` to an HTML string.
pub fn render_document<R>(document: &Node, resolver: &R, options: RenderOptions) -> String
where
    R: EntryResolver + ?Sized,
{
    HtmlRenderer::new(resolver, options).render(document)
}

/// Depth-first, pre-order walk over a rich-text tree.
pub struct HtmlRenderer<'r, R: ?Sized> {
    resolver: &'r R,
    options: RenderOptions,
}

impl<'r, R: EntryResolver + ?Sized> HtmlRenderer<'r, R> {
    pub fn new(resolver: &'r R, options: RenderOptions) -> Self {
        Self { resolver, options }
    }

    pub fn render(&self, document: &Node) -> String {
        let mut html = String::new();
        self.render_node(&mut html, document);
        html
    }

    fn render_node(&self, html: &mut String, node: &Node) {
        match &node.node_type {
            NodeType::Document => self.render_children(html, node),
            NodeType::Paragraph => self.wrap(html, node, "p"),
            NodeType::Heading(level) => {
                let level = (*level).clamp(1, 6);
                let _ = write!(html, "<h{}>", level);
                self.render_children(html, node);
                let _ = write!(html, "</h{}>\n", level);
            }
            NodeType::OrderedList => self.wrap(html, node, "ol"),
            NodeType::UnorderedList => self.wrap(html, node, "ul"),
            NodeType::ListItem => self.wrap(html, node, "li"),
            NodeType::Blockquote => self.wrap(html, node, "blockquote"),
            NodeType::HorizontalRule => html.push_str("<hr />\n"),
            NodeType::Table => self.render_table(html, node),
            NodeType::TableRow => self.wrap(html, node, "tr"),
            NodeType::TableCell => self.wrap(html, node, "td"),
            NodeType::TableHeaderCell => self.wrap(html, node, "th"),
            NodeType::Hyperlink => {
                html.push_str("<a href=\"");
                let _ = escape_href(&mut *html, node.uri().unwrap_or_default());
                html.push_str("\">");
                self.render_children(html, node);
                html.push_str("</a>");
            }
            NodeType::EmbeddedEntryInline => {
                if let Some(entry) = self.resolver.resolve_entry(node) {
                    render_inline_entry(html, &entry);
                }
            }
            NodeType::EmbeddedEntryBlock => {
                if let Some(entry) = self.resolver.resolve_entry(node) {
                    render_block_entry(html, &entry);
                }
            }
            NodeType::EmbeddedAssetBlock => {
                if let Some(asset) = self.resolver.resolve_asset(node) {
                    render_asset(html, &asset);
                }
            }
            NodeType::EntryHyperlink
            | NodeType::AssetHyperlink
            | NodeType::ResourceHyperlink
            | NodeType::EmbeddedResourceInline
            | NodeType::EmbeddedResourceBlock => render_link_placeholder(html, node),
            NodeType::Text => render_text(html, node),
            NodeType::Other(tag) => {
                tracing::debug!(node_type = %tag, "no renderer for node type, rendering children");
                self.render_children(html, node);
            }
        }
    }

    fn render_children(&self, html: &mut String, node: &Node) {
        for child in &node.content {
            self.render_node(html, child);
        }
    }

    fn wrap(&self, html: &mut String, node: &Node, tag: &str) {
        let _ = write!(html, "<{}>", tag);
        self.render_children(html, node);
        let _ = write!(html, "</{}>", tag);
        if is_block(&node.node_type) {
            html.push('\n');
        }
    }

    fn render_table(&self, html: &mut String, node: &Node) {
        match self.options.table_class {
            Some(class) => {
                html.push_str("<table class=\"");
                let _ = escape_html(&mut *html, class);
                html.push_str("\">");
                self.render_children(html, node);
                html.push_str("</table>\n");
            }
            None => {
                html.push_str("<table><tbody>");
                self.render_children(html, node);
                html.push_str("</tbody></table>\n");
            }
        }
    }
}

fn is_block(node_type: &NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Paragraph
            | NodeType::OrderedList
            | NodeType::UnorderedList
            | NodeType::ListItem
            | NodeType::Blockquote
            | NodeType::TableRow
    )
}

fn render_inline_entry(html: &mut String, entry: &EmbeddedEntry) {
    match entry {
        EmbeddedEntry::FormattedText { text, color } => {
            html.push_str("<span");
            if let Some(color) = color {
                html.push_str(" style=\"color:");
                let _ = escape_html(&mut *html, color);
                html.push('"');
            }
            let _ = write!(html, " class=\"{}\">", FORMATTED_TEXT_CLASS);
            let _ = escape_html_body_text(&mut *html, text);
            html.push_str("</span>");
        }
        EmbeddedEntry::CodeBlock { .. }
        | EmbeddedEntry::VideoEmbed { .. }
        | EmbeddedEntry::Unknown { .. } => {
            tracing::debug!(?entry, "inline entry type has no renderer");
        }
    }
}

fn render_block_entry(html: &mut String, entry: &EmbeddedEntry) {
    match entry {
        EmbeddedEntry::CodeBlock { code, .. } => {
            let _ = write!(html, "<pre class=\"{}\"><code>", CODE_BLOCK_CLASS);
            let _ = escape_html_body_text(&mut *html, code);
            html.push_str("</code></pre>\n");
        }
        EmbeddedEntry::VideoEmbed { embed_url, title } => {
            let _ = write!(
                html,
                "<iframe class=\"{}\" width=\"{}\" height=\"{}\"",
                EMBED_CLASS, VIDEO_WIDTH, VIDEO_HEIGHT
            );
            if let Some(url) = embed_url {
                html.push_str(" src=\"");
                let _ = escape_href(&mut *html, url);
                html.push('"');
            }
            if let Some(title) = title {
                html.push_str(" title=\"");
                let _ = escape_html(&mut *html, title);
                html.push('"');
            }
            let _ = write!(
                html,
                " frameborder=\"0\" allow=\"{}\" allowfullscreen></iframe>\n",
                VIDEO_ALLOW
            );
        }
        EmbeddedEntry::FormattedText { .. } | EmbeddedEntry::Unknown { .. } => {
            tracing::debug!(?entry, "block entry type has no renderer");
        }
    }
}

fn render_asset(html: &mut String, asset: &Asset) {
    if !asset.is_image() {
        tracing::debug!(id = %asset.id, content_type = %asset.content_type, "skipping non-image asset");
        return;
    }
    let _ = write!(html, "<img class=\"{}\" src=\"", EMBED_CLASS);
    let _ = escape_href(&mut *html, &asset.url);
    let _ = write!(
        html,
        "?w={size}&h={size}\" width=\"{size}\" height=\"{size}\" alt=\"{alt}\" />\n",
        size = IMAGE_SIZE,
        alt = IMAGE_ALT
    );
}

/// Entry/asset hyperlinks and resource embeds have no bespoke rendering; they
/// show their kind and target id.
fn render_link_placeholder(html: &mut String, node: &Node) {
    let id = node
        .target()
        .and_then(|target| target.pointer("/sys/id").or_else(|| target.pointer("/sys/urn")))
        .and_then(|id| id.as_str())
        .unwrap_or_default();
    let _ = write!(html, "<span>type: {} id: ", node.node_type);
    let _ = escape_html_body_text(&mut *html, id);
    html.push_str("</span>");
}

/// Marks apply in list order, the first mark innermost.
fn render_text(html: &mut String, node: &Node) {
    let tags: Vec<&str> = node
        .marks
        .iter()
        .filter_map(|mark| mark_tag(&mark.mark_type))
        .collect();

    for tag in tags.iter().rev() {
        let _ = write!(html, "<{}>", tag);
    }
    let _ = escape_html_body_text(&mut *html, node.value.as_deref().unwrap_or_default());
    for tag in &tags {
        let _ = write!(html, "</{}>", tag);
    }
}

fn mark_tag(mark: &MarkType) -> Option<&'static str> {
    match mark {
        MarkType::Bold => Some("b"),
        MarkType::Italic => Some("i"),
        MarkType::Underline => Some("u"),
        MarkType::Code => Some("code"),
        MarkType::Superscript => Some("sup"),
        MarkType::Subscript => Some("sub"),
        MarkType::Strikethrough => Some("s"),
        MarkType::Other(_) => None,
    }
}
