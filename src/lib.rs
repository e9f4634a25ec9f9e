//! Pulpit: sermon thoughts, outlines, and the order they are preached in.
//!
//! - [`model`]: sermons, thoughts, outline points, and the stored structure.
//! - [`order`]: reconciles structure, outline points, and tags into one
//!   deterministic order per section.
//! - [`storage`]: local persistence, one `SQLite` file per sermon.

pub mod model;
pub mod order;
pub mod storage;
