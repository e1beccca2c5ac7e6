use std::borrow::Cow;

use cfblog_common::{Asset, EmbeddedEntry, Node};
use serde_json::Value;

use crate::link_table::LinkTable;

/// Resolves the entry or asset an embed node points at.
///
/// Implementations return `None` when the target cannot be resolved; the
/// renderer then emits nothing for that node.
pub trait EntryResolver {
    fn resolve_entry(&self, node: &Node) -> Option<Cow<'_, EmbeddedEntry>>;

    fn resolve_asset(&self, node: &Node) -> Option<Cow<'_, Asset>>;
}

/// GraphQL: look the target id up in the per-post link table.
impl EntryResolver for LinkTable {
    fn resolve_entry(&self, node: &Node) -> Option<Cow<'_, EmbeddedEntry>> {
        let id = node.target_id()?;
        let entry = self.entry(id);
        if entry.is_none() {
            tracing::warn!(id, node_type = %node.node_type, "linked entry missing from link table");
        }
        entry.map(Cow::Borrowed)
    }

    fn resolve_asset(&self, node: &Node) -> Option<Cow<'_, Asset>> {
        let id = node.target_id()?;
        let asset = self.asset(id);
        if asset.is_none() {
            tracing::warn!(id, "linked asset missing from link table");
        }
        asset.map(Cow::Borrowed)
    }
}

/// REST: the delivery client has already replaced each link with the full
/// entry or asset, so everything is read straight off `data.target`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineTargets;

impl EntryResolver for InlineTargets {
    fn resolve_entry(&self, node: &Node) -> Option<Cow<'_, EmbeddedEntry>> {
        let target = node.target()?;
        let Some(content_type) = target
            .pointer("/sys/contentType/sys/id")
            .and_then(Value::as_str)
        else {
            tracing::debug!(id = ?node.target_id(), "embedded entry target is unresolved");
            return None;
        };
        let fields = target.get("fields")?.as_object()?;
        Some(Cow::Owned(EmbeddedEntry::from_fields(content_type, fields)))
    }

    fn resolve_asset(&self, node: &Node) -> Option<Cow<'_, Asset>> {
        let target = node.target()?;
        let fields = target.get("fields")?;
        let file = fields.get("file")?;
        let url = file.get("url")?.as_str()?;

        let string = |value: Option<&Value>| value.and_then(Value::as_str).map(str::to_string);
        let dimension = |axis: &str| {
            file.pointer(&format!("/details/image/{axis}"))
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
        };

        Some(Cow::Owned(Asset {
            id: string(target.pointer("/sys/id")).unwrap_or_default(),
            url: absolute_url(url),
            content_type: string(file.get("contentType")).unwrap_or_default(),
            width: dimension("width"),
            height: dimension("height"),
            title: string(fields.get("title")),
            description: string(fields.get("description")),
        }))
    }
}

/// The delivery API serves asset URLs protocol-relative (`//images.ctfassets.net/...`).
fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}
