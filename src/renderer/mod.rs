//! HTML serializer for resolved node trees
//!
//! This module walks a [`Node`](crate::Node) tree and produces markup,
//! applying text-context or attribute-context escaping as it goes.

pub mod config;
pub mod escape;
pub mod html;

pub use config::HtmlConfig;
pub use html::Chunks;
