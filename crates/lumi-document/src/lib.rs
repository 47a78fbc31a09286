//! Headless element/text tree used where text must be annotated or
//! highlighted without a live rendering surface. Implements
//! [`lumi_anchor::DocumentSurface`] so the anchor engine operates on it
//! directly.

mod surface;
mod tree;

pub use surface::{HIGHLIGHT_CLASS, HIGHLIGHT_ID_ATTR};
pub use tree::{Document, NodeId};
