//! Core data model for Pulpit.
//!
//! A sermon owns its thoughts, its outline, and a cached per-section
//! ordering of thought ids (the structure). The ordering logic that
//! reconciles these lives in [`crate::order`]; everything here is plain data.

mod outline;
mod section;
mod sermon;
mod structure;
mod thought;

pub use outline::{Outline, OutlinePoint};
pub use section::Section;
pub use sermon::Sermon;
pub use structure::{RawStructure, Structure};
pub use thought::Thought;
