//! Domain value objects and types.
//!
//! This module contains the small typed vocabulary the index is built from:
//! navigation anchors, category facets and the themes a reader can pick.
//! Validation happens at construction so the rest of the crate never sees
//! an unknown facet name.

pub mod anchor;
pub mod category;
pub mod errors;
pub mod theme;

pub use anchor::{Anchor, Navigation};
pub use category::Category;
pub use errors::ValidationError;
pub use theme::Theme;
