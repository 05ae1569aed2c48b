//! Rendered page model.
//!
//! The search index, table of contents and page view all read pages through
//! this read-only tree: tag names, class attributes, element ids, ancestor
//! chains and text content. Nothing here mutates a page.

mod parser;
mod tree;

pub use parser::decode_entities;
pub use tree::{DocumentTree, ElementRef, NodeId};
