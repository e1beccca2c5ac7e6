use std::collections::HashMap;

use cfblog_common::{Asset, EmbeddedEntry, Links};

/// Lookup from linked entry/asset id to its resolved content.
///
/// Built once per render from a GraphQL `body.links` side-table. Entries from
/// the block and inline lists share one map; a later duplicate id replaces
/// the earlier one.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    entries: HashMap<String, EmbeddedEntry>,
    assets: HashMap<String, Asset>,
}

impl LinkTable {
    pub fn build(links: &Links) -> Self {
        let mut table = Self::default();

        for asset in links.assets.block.iter().flatten() {
            match asset.to_asset() {
                Some(resolved) => {
                    table.assets.insert(resolved.id.clone(), resolved);
                }
                None => tracing::debug!(id = %asset.sys.id, "linked asset has no url, skipping"),
            }
        }

        let entries = links.entries.block.iter().chain(&links.entries.inline);
        for entry in entries.flatten() {
            table
                .entries
                .insert(entry.sys.id.clone(), entry.to_embedded());
        }

        table
    }

    pub fn entry(&self, id: &str) -> Option<&EmbeddedEntry> {
        self.entries.get(id)
    }

    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.get(id)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }
}
