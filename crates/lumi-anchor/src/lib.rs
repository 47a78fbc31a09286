pub mod anchor;
pub mod engine;
pub mod locator;
pub mod path;
pub mod style;
pub mod surface;

pub use anchor::HighlightAnchor;
pub use engine::{HighlightEngine, RestoreError};
pub use locator::{chapter_index, compare_cfi, is_valid_cfi};
pub use path::{PathError, PathStep, StructuralPath};
pub use style::HighlightStyle;
pub use surface::{DocumentSurface, HighlightId, SurfaceRange, WrapError};
