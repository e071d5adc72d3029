//! PDF rendering modules for cheat-sheet imposition
//!
//! This module handles all PDF-specific operations:
//! - Wrapping source pages as Form XObjects
//! - Deep copying their resources
//! - Building one output page per sheet face

mod face;
mod xobject;

pub use face::{FaceContext, SharedResources, render_face};
pub use xobject::{ObjectCopier, PageBox, get_page_box, get_page_dimensions};
