//! cfblog renderer
//!
//! Turns a rich-text document into HTML. Embedded entries and assets are looked
//! up through an [`EntryResolver`], so the GraphQL side-table and the REST
//! inline targets share one dispatch.

mod html;
mod link_table;
pub mod page;
mod resolver;


pub use html::{HtmlRenderer, RenderOptions, render_document};
pub use link_table::LinkTable;
pub use resolver::{EntryResolver, InlineTargets};

use cfblog_common::{ContentVariant, Post};

/// Render a post body with the resolver and options for the path it came from.
pub fn render_post(post: &Post, variant: ContentVariant) -> String {
    let options = RenderOptions::for_variant(variant);
    match variant {
        ContentVariant::GraphQl => {
            let links = LinkTable::build(&post.links);
            render_document(&post.body, &links, options)
        }
        ContentVariant::Rest => render_document(&post.body, &InlineTargets, options),
    }
}
