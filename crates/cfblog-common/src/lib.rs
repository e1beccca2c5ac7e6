//! Shared types for cfblog
//!
//! The rich-text document model, the post and linked-content types both
//! content paths produce, delivery API configuration and telemetry setup.

pub mod config;
pub mod error;
pub mod post;
pub mod richtext;
pub mod telemetry;

pub use config::ContentfulConfig;
pub use error::ConfigError;
pub use post::{
    Asset, ContentVariant, EmbeddedEntry, LinkedAsset, LinkedAssets, LinkedEntries, LinkedEntry,
    Links, Post, Sys,
};
pub use richtext::{Document, Mark, MarkType, Node, NodeType};
